//! Chromosome types for the evolutionary search.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use super::operators::{FitnessFunction, GoalId};
use crate::testcase::TestCase;

/// A candidate test case under evolution.
///
/// Wraps a [`TestCase`] together with a per-goal fitness cache and the
/// per-generation scratch state (rank, distance) written by the ranking
/// and diversity steps. The scratch state is overwritten every
/// generation and carries no identity: equality and hashing consider
/// only the underlying test case.
#[derive(Debug, Clone)]
pub struct TestCaseChromosome {
    test_case: TestCase,
    fitness_cache: HashMap<GoalId, f64>,
    changed: bool,
    rank: usize,
    distance: f64,
}

impl TestCaseChromosome {
    /// Wrap a test case into a chromosome.
    pub fn new(test_case: TestCase) -> Self {
        Self {
            test_case,
            fitness_cache: HashMap::new(),
            changed: true,
            rank: 0,
            distance: 0.0,
        }
    }

    /// Number of statements in the underlying test case.
    pub fn size(&self) -> usize {
        self.test_case.size()
    }

    /// Whether the underlying test case has no statements.
    pub fn is_empty(&self) -> bool {
        self.test_case.is_empty()
    }

    /// Read access to the underlying test case.
    pub fn test_case(&self) -> &TestCase {
        &self.test_case
    }

    /// Mutable access to the underlying test case.
    ///
    /// Invalidates all cached fitness values and marks the chromosome
    /// as changed. Cached fitness for an unmutated test case must never
    /// change, so every mutation path goes through here.
    pub fn test_case_mut(&mut self) -> &mut TestCase {
        self.fitness_cache.clear();
        self.changed = true;
        &mut self.test_case
    }

    /// Fitness of this chromosome for `goal`, computing and caching it
    /// on first access.
    pub fn fitness(&mut self, goal: &dyn FitnessFunction) -> f64 {
        let id = goal.id();
        if let Some(value) = self.fitness_cache.get(&id) {
            return *value;
        }
        let value = goal.compute(&self.test_case);
        self.fitness_cache.insert(id, value);
        value
    }

    /// Cached fitness for a goal, if it has been computed.
    pub fn cached_fitness(&self, id: GoalId) -> Option<f64> {
        self.fitness_cache.get(&id).copied()
    }

    /// Whether the test case was modified since the flag was last cleared.
    pub fn has_changed(&self) -> bool {
        self.changed
    }

    pub fn set_changed(&mut self, changed: bool) {
        self.changed = changed;
    }

    /// Pareto front index assigned by the last ranking pass.
    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn set_rank(&mut self, rank: usize) {
        self.rank = rank;
    }

    /// Diversity distance assigned by the last diversity pass.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn set_distance(&mut self, distance: f64) {
        self.distance = distance;
    }
}

impl PartialEq for TestCaseChromosome {
    fn eq(&self, other: &Self) -> bool {
        self.test_case == other.test_case
    }
}

impl Eq for TestCaseChromosome {}

impl Hash for TestCaseChromosome {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.test_case.hash(state);
    }
}

/// The externally visible output of the search: a collection of test
/// cases covering as many goals as the search managed to reach.
#[derive(Debug, Clone, Default)]
pub struct TestSuiteChromosome {
    test_cases: Vec<TestCaseChromosome>,
}

impl TestSuiteChromosome {
    /// Suite from a sequence of chromosomes.
    pub fn new(test_cases: Vec<TestCaseChromosome>) -> Self {
        Self { test_cases }
    }

    /// Number of test cases in the suite.
    pub fn size(&self) -> usize {
        self.test_cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.test_cases.is_empty()
    }

    /// The test cases.
    pub fn test_cases(&self) -> &[TestCaseChromosome] {
        &self.test_cases
    }

    /// Total number of statements across all test cases.
    pub fn total_statements(&self) -> usize {
        self.test_cases.iter().map(|tc| tc.size()).sum()
    }
}
