//! Reflective model of the accessible units of the target program.
//!
//! Candidate test cases are built from calls into constructors, methods,
//! free functions and field accesses of the target. The kind set is fixed
//! and exhaustive, so it is modelled as a closed enum with a shared
//! capability surface rather than an open trait hierarchy.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Identity of a type in the target program.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef(Arc<str>);

impl TypeRef {
    /// Create a type reference from its fully qualified name.
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// The fully qualified name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parameter and return types of a callable unit, as inferred by the
/// (external) analysis of the target program.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct InferredSignature {
    /// Parameter types, in declaration order.
    pub parameters: Vec<TypeRef>,
    /// Return type, if any could be inferred.
    pub return_type: Option<TypeRef>,
}

impl InferredSignature {
    /// Signature with the given parameters and return type.
    pub fn new(parameters: Vec<TypeRef>, return_type: Option<TypeRef>) -> Self {
        Self {
            parameters,
            return_type,
        }
    }
}

/// A unit of the target program that a test case can access.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GenericAccessibleObject {
    /// A constructor of `owner`.
    Constructor {
        owner: TypeRef,
        signature: InferredSignature,
    },
    /// A method on `owner`.
    Method {
        owner: TypeRef,
        name: Arc<str>,
        signature: InferredSignature,
    },
    /// A free function.
    Function {
        name: Arc<str>,
        signature: InferredSignature,
    },
    /// A field on `owner`.
    Field {
        owner: TypeRef,
        name: Arc<str>,
        field_type: TypeRef,
    },
}

impl GenericAccessibleObject {
    /// Create a constructor accessible.
    pub fn constructor(owner: TypeRef, signature: InferredSignature) -> Self {
        Self::Constructor { owner, signature }
    }

    /// Create a method accessible.
    pub fn method(owner: TypeRef, name: &str, signature: InferredSignature) -> Self {
        Self::Method {
            owner,
            name: Arc::from(name),
            signature,
        }
    }

    /// Create a free-function accessible.
    pub fn function(name: &str, signature: InferredSignature) -> Self {
        Self::Function {
            name: Arc::from(name),
            signature,
        }
    }

    /// Create a field accessible.
    pub fn field(owner: TypeRef, name: &str, field_type: TypeRef) -> Self {
        Self::Field {
            owner,
            name: Arc::from(name),
            field_type,
        }
    }

    /// The type a statement using this accessible produces, if any.
    pub fn generated_type(&self) -> Option<&TypeRef> {
        match self {
            Self::Constructor { owner, .. } => Some(owner),
            Self::Method { signature, .. } | Self::Function { signature, .. } => {
                signature.return_type.as_ref()
            }
            Self::Field { field_type, .. } => Some(field_type),
        }
    }

    /// The type which owns this accessible, if any.
    pub fn owner(&self) -> Option<&TypeRef> {
        match self {
            Self::Constructor { owner, .. }
            | Self::Method { owner, .. }
            | Self::Field { owner, .. } => Some(owner),
            Self::Function { .. } => None,
        }
    }

    /// Types that must be constructed before this accessible can be used.
    ///
    /// Methods and fields require an instance of their owner in addition
    /// to their parameters.
    pub fn dependencies(&self) -> HashSet<TypeRef> {
        match self {
            Self::Constructor { signature, .. } | Self::Function { signature, .. } => {
                signature.parameters.iter().cloned().collect()
            }
            Self::Method {
                owner, signature, ..
            } => {
                let mut deps: HashSet<TypeRef> = signature.parameters.iter().cloned().collect();
                deps.insert(owner.clone());
                deps
            }
            Self::Field { owner, .. } => {
                let mut deps = HashSet::new();
                deps.insert(owner.clone());
                deps
            }
        }
    }

    /// Number of parameters this accessible takes.
    pub fn parameter_count(&self) -> usize {
        match self {
            Self::Constructor { signature, .. }
            | Self::Method { signature, .. }
            | Self::Function { signature, .. } => signature.parameters.len(),
            Self::Field { .. } => 0,
        }
    }

    pub fn is_constructor(&self) -> bool {
        matches!(self, Self::Constructor { .. })
    }

    pub fn is_method(&self) -> bool {
        matches!(self, Self::Method { .. })
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Self::Function { .. })
    }

    pub fn is_field(&self) -> bool {
        matches!(self, Self::Field { .. })
    }
}
