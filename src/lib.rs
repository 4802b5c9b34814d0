//! Covgen - Coverage-guided evolutionary test case generation.
//!
//! This crate provides the search core of an automated test generator:
//! a many-objective genetic algorithm that evolves candidate test cases
//! against a set of coverage goals, keeps the best-known solution per
//! goal in an archive, and falls back to externally seeded candidates
//! when the search stagnates.
//!
//! # Architecture
//!
//! The crate is split into four main modules:
//!
//! - `schema`: Configuration types and validation for search runs
//! - `generic`: Reflective model of the callable units of the target
//! - `testcase`: Candidate representation (statement sequences)
//! - `ga`: The search core (engine, archive, ranking, diversity)
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use covgen::{
//!     schema::SearchConfig,
//!     ga::{MosaEngine, FitnessFunction, MaxIterationsStoppingCondition},
//! };
//!
//! # fn collaborators() -> (Vec<Arc<dyn FitnessFunction>>,
//! #     Box<dyn covgen::ga::ChromosomeFactory>,
//! #     Box<dyn covgen::ga::Breeder>,
//! #     Box<dyn covgen::ga::TargetedSeeder>) { unimplemented!() }
//! let config = SearchConfig::default();
//! let (goals, factory, breeder, seeder) = collaborators();
//!
//! let mut engine = MosaEngine::new(
//!     config,
//!     goals,
//!     factory,
//!     breeder,
//!     seeder,
//!     Box::new(MaxIterationsStoppingCondition::new(600)),
//! );
//! let suite = engine.run();
//! println!("Generated {} test cases", suite.size());
//! ```

pub mod ga;
pub mod generic;
pub mod schema;
pub mod testcase;

// Re-export commonly used types
pub use ga::{CoverageArchive, FitnessFunction, GoalId, MosaEngine, TestSuiteChromosome};
pub use schema::SearchConfig;
pub use testcase::TestCase;
