//! Statements a test case is built from.

use std::sync::Arc;

use crate::generic::GenericAccessibleObject;

/// Reference to the value produced by an earlier statement, identified
/// by its position in the test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableReference(pub usize);

impl VariableReference {
    /// Position of the producing statement.
    pub fn position(&self) -> usize {
        self.0
    }
}

/// A primitive literal value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrimitiveValue {
    Int(i64),
    Bool(bool),
    Str(String),
}

/// A single statement in a test case.
///
/// Every statement produces a value that later statements can reference
/// by position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Statement {
    /// Assignment of a primitive literal.
    Primitive { value: PrimitiveValue },
    /// Invocation of an accessible unit of the target program, with
    /// arguments drawn from earlier statements.
    Call {
        accessible: Arc<GenericAccessibleObject>,
        args: Vec<VariableReference>,
    },
}

impl Statement {
    /// Primitive integer assignment.
    pub fn int(value: i64) -> Self {
        Self::Primitive {
            value: PrimitiveValue::Int(value),
        }
    }

    /// Primitive boolean assignment.
    pub fn bool(value: bool) -> Self {
        Self::Primitive {
            value: PrimitiveValue::Bool(value),
        }
    }

    /// Primitive string assignment.
    pub fn str(value: &str) -> Self {
        Self::Primitive {
            value: PrimitiveValue::Str(value.to_owned()),
        }
    }

    /// Call of an accessible unit.
    pub fn call(accessible: Arc<GenericAccessibleObject>, args: Vec<VariableReference>) -> Self {
        Self::Call { accessible, args }
    }

    /// Positions of earlier statements this statement reads from.
    pub fn variable_references(&self) -> &[VariableReference] {
        match self {
            Self::Primitive { .. } => &[],
            Self::Call { args, .. } => args,
        }
    }
}
