//! Candidate representation - test cases as statement sequences.

mod statement;
#[allow(clippy::module_inception)]
mod testcase;

pub use statement::*;
pub use testcase::*;
