//! Test cases - ordered statement sequences.

use super::statement::{Statement, VariableReference};

/// A candidate test case: an ordered sequence of statements.
///
/// Equality and hashing are by value, so a clone compares equal to its
/// source until one of them is mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TestCase {
    statements: Vec<Statement>,
}

impl TestCase {
    /// Empty test case.
    pub fn new() -> Self {
        Self::default()
    }

    /// Test case from an existing statement sequence.
    pub fn from_statements(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    /// Number of statements.
    pub fn size(&self) -> usize {
        self.statements.len()
    }

    /// Whether the test case has no statements.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// The statement sequence.
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Append a statement, returning a reference to its value.
    pub fn push(&mut self, statement: Statement) -> VariableReference {
        self.statements.push(statement);
        VariableReference(self.statements.len() - 1)
    }

    /// Remove the statement at `position`, if it exists.
    pub fn remove(&mut self, position: usize) -> Option<Statement> {
        if position < self.statements.len() {
            Some(self.statements.remove(position))
        } else {
            None
        }
    }

    /// Replace the statement at `position`. Returns false if the
    /// position is out of bounds.
    pub fn replace(&mut self, position: usize, statement: Statement) -> bool {
        match self.statements.get_mut(position) {
            Some(slot) => {
                *slot = statement;
                true
            }
            None => false,
        }
    }
}
