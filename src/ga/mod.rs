//! Evolutionary search core for coverage-guided test generation.
//!
//! # Overview
//!
//! The search core consists of:
//!
//! - **Chromosomes** (`chromosome`): candidate test cases and the
//!   resulting test suite
//! - **Archive** (`archive`): best-known solution per coverage goal
//! - **Ranking** (`ranking`): non-dominated sorting into Pareto fronts
//! - **Diversity** (`distance`): epsilon-dominance distance assignment
//! - **Collaborator traits** (`operators`): fitness, breeding, seeding
//!   and observation contracts implemented outside this crate
//! - **Stopping conditions** (`stopping`): search budget bookkeeping
//! - **Engine** (`engine`): the many-objective search loop
//! - **Random search** (`random_search`): archive-backed baseline
//!
//! Data flow per generation: population -> breeder -> offspring ->
//! union -> ranked fronts -> per-front diversity -> truncated selection
//! -> new population -> archive update. When the covered-goal count has
//! not grown for a configured number of generations, one generation is
//! instead driven by externally seeded candidates aimed at the
//! uncovered parts of the target.

mod archive;
mod chromosome;
mod distance;
mod engine;
mod operators;
mod random_search;
mod ranking;
mod stopping;

pub use archive::CoverageArchive;
pub use chromosome::{TestCaseChromosome, TestSuiteChromosome};
pub use distance::fast_epsilon_dominance_assignment;
pub use engine::{MosaEngine, SearchStats};
pub use operators::{
    Breeder, ChromosomeFactory, FitnessFunction, GoalId, SearchObserver, TargetedSeeder,
};
pub use random_search::RandomTestCaseSearch;
pub use ranking::{compute_ranking_assignment, RankedFronts};
pub use stopping::{
    MaxIterationsStoppingCondition, MaxSearchTimeStoppingCondition,
    MaxTestExecutionsStoppingCondition, StoppingCondition,
};

#[cfg(test)]
pub(crate) mod fixtures {
    //! Shared collaborator stand-ins for the search core tests.

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::chromosome::{TestCaseChromosome, TestSuiteChromosome};
    use super::operators::{
        Breeder, ChromosomeFactory, FitnessFunction, GoalId, SearchObserver, TargetedSeeder,
    };
    use crate::testcase::{PrimitiveValue, Statement, TestCase};

    /// Fitness for tests: distance of the nearest integer literal in
    /// the test case to a target value. 0.0 iff the literal appears.
    pub struct TargetValueGoal {
        id: GoalId,
        target: i64,
    }

    impl FitnessFunction for TargetValueGoal {
        fn id(&self) -> GoalId {
            self.id
        }

        fn compute(&self, test_case: &TestCase) -> f64 {
            test_case
                .statements()
                .iter()
                .filter_map(|stmt| match stmt {
                    Statement::Primitive {
                        value: PrimitiveValue::Int(v),
                    } => Some((v - self.target).abs() as f64),
                    _ => None,
                })
                .fold(1e12, f64::min)
        }
    }

    pub fn goal(id: u64, target: i64) -> Arc<dyn FitnessFunction> {
        Arc::new(TargetValueGoal {
            id: GoalId(id),
            target,
        })
    }

    pub fn test_case_with(values: &[i64]) -> TestCase {
        TestCase::from_statements(values.iter().map(|&v| Statement::int(v)).collect())
    }

    pub fn chromosome_with(values: &[i64]) -> TestCaseChromosome {
        TestCaseChromosome::new(test_case_with(values))
    }

    /// Factory cycling through a fixed list of literal batches.
    pub struct ConstantFactory {
        batches: Vec<Vec<i64>>,
        next: usize,
    }

    impl ConstantFactory {
        pub fn new(batches: Vec<Vec<i64>>) -> Self {
            Self { batches, next: 0 }
        }
    }

    impl ChromosomeFactory for ConstantFactory {
        fn get_chromosome(&mut self) -> TestCaseChromosome {
            let batch = &self.batches[self.next % self.batches.len()];
            self.next += 1;
            chromosome_with(batch)
        }
    }

    /// Breeder that never improves fitness: offspring are clones of the
    /// parents, and mutation appends a literal far from every goal used
    /// in the tests.
    pub struct StaleBreeder;

    impl Breeder for StaleBreeder {
        fn breed_next_generation(
            &mut self,
            population: &[TestCaseChromosome],
        ) -> Vec<TestCaseChromosome> {
            population.to_vec()
        }

        fn mutate(&mut self, chromosome: &mut TestCaseChromosome) -> bool {
            chromosome.test_case_mut().push(Statement::int(999_999_999));
            true
        }
    }

    /// Seeder that counts how often it was asked and returns fixed seeds.
    pub struct RecordingSeeder {
        pub calls: Arc<AtomicUsize>,
        seeds: Vec<TestCase>,
    }

    impl RecordingSeeder {
        pub fn new(seeds: Vec<TestCase>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    calls: Arc::clone(&calls),
                    seeds,
                },
                calls,
            )
        }
    }

    impl TargetedSeeder for RecordingSeeder {
        fn target_uncovered_functions(
            &mut self,
            _suite: &TestSuiteChromosome,
            max_count: usize,
        ) -> Vec<TestCase> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.seeds.iter().take(max_count).cloned().collect()
        }
    }

    /// Observer counting every hook invocation.
    #[derive(Default)]
    pub struct CountingObserver {
        pub starts: Arc<AtomicUsize>,
        pub first_iterations: Arc<AtomicUsize>,
        pub iterations: Arc<AtomicUsize>,
        pub finishes: Arc<AtomicUsize>,
    }

    impl SearchObserver for CountingObserver {
        fn before_search_start(&mut self) {
            self.starts.fetch_add(1, Ordering::Relaxed);
        }

        fn before_first_search_iteration(&mut self, _suite: &TestSuiteChromosome) {
            self.first_iterations.fetch_add(1, Ordering::Relaxed);
        }

        fn after_search_iteration(&mut self, _suite: &TestSuiteChromosome) {
            self.iterations.fetch_add(1, Ordering::Relaxed);
        }

        fn after_search_finish(&mut self) {
            self.finishes.fetch_add(1, Ordering::Relaxed);
        }
    }
}
