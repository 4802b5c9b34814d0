//! Collaborator contracts consumed by the search core.
//!
//! Instrumentation, candidate construction and variation operators live
//! outside this crate; the engine only depends on these traits.

use super::chromosome::{TestCaseChromosome, TestSuiteChromosome};
use crate::testcase::TestCase;

/// Identity of a coverage goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GoalId(pub u64);

/// A coverage goal with an externally computed fitness.
///
/// Fitness is a non-negative real value; 0.0 means the goal is
/// satisfied by the test case. For a fixed, unmutated test case the
/// value must be deterministic. Implementations are responsible for
/// mapping internal evaluation failures to a finite worst-case value.
pub trait FitnessFunction {
    /// Stable identity of this goal for the duration of a run.
    fn id(&self) -> GoalId;

    /// Fitness of `test_case` for this goal.
    fn compute(&self, test_case: &TestCase) -> f64;
}

/// Produces fresh candidate chromosomes, e.g. by random construction
/// from the accessible units of the target.
pub trait ChromosomeFactory {
    fn get_chromosome(&mut self) -> TestCaseChromosome;
}

/// Produces offspring from the current population via selection,
/// crossover and mutation.
pub trait Breeder {
    /// Breed an offspring population from `population`. The returned
    /// sequence is expected to match the configured population size,
    /// but the engine tolerates any length.
    fn breed_next_generation(
        &mut self,
        population: &[TestCaseChromosome],
    ) -> Vec<TestCaseChromosome>;

    /// Mutate `chromosome` in place, reporting whether a change occurred.
    fn mutate(&mut self, chromosome: &mut TestCaseChromosome) -> bool;
}

/// Supplies candidates aimed at presently uncovered parts of the
/// target, given the current best-known suite as context.
pub trait TargetedSeeder {
    /// Up to `max_count` new candidate test cases targeting code the
    /// given suite does not cover. May return fewer, or none.
    fn target_uncovered_functions(
        &mut self,
        suite: &TestSuiteChromosome,
        max_count: usize,
    ) -> Vec<TestCase>;
}

/// Pure notification hooks around the search. Nothing the observer
/// returns is consumed by the engine.
pub trait SearchObserver {
    fn before_search_start(&mut self) {}
    fn before_first_search_iteration(&mut self, _suite: &TestSuiteChromosome) {}
    fn after_search_iteration(&mut self, _suite: &TestSuiteChromosome) {}
    fn after_search_finish(&mut self) {}
}
