//! Archive-backed random search baseline.
//!
//! Samples fresh candidates without any variation operators. Useful as
//! a comparison point for the evolutionary engine and as a sanity
//! check of the instrumentation stack.

use std::sync::Arc;

use log::info;

use super::archive::CoverageArchive;
use super::chromosome::TestSuiteChromosome;
use super::operators::{ChromosomeFactory, FitnessFunction, SearchObserver};
use super::stopping::StoppingCondition;
use crate::schema::SearchConfig;

/// Random test-case search: one fresh candidate per iteration, folded
/// into the same per-goal archive the evolutionary engine uses.
pub struct RandomTestCaseSearch {
    archive: CoverageArchive,
    factory: Box<dyn ChromosomeFactory>,
    stopping: Box<dyn StoppingCondition>,
    observers: Vec<Box<dyn SearchObserver>>,
}

impl RandomTestCaseSearch {
    pub fn new(
        config: &SearchConfig,
        goals: Vec<Arc<dyn FitnessFunction>>,
        factory: Box<dyn ChromosomeFactory>,
        stopping: Box<dyn StoppingCondition>,
    ) -> Self {
        Self {
            archive: CoverageArchive::new(goals, config.tie_break),
            factory,
            stopping,
            observers: Vec::new(),
        }
    }

    /// Register an observer notified around search iterations.
    pub fn add_observer(&mut self, observer: Box<dyn SearchObserver>) {
        self.observers.push(observer);
    }

    /// The archive of best-known solutions.
    pub fn archive(&self) -> &CoverageArchive {
        &self.archive
    }

    /// Sample candidates until the budget is exhausted or every goal
    /// is covered.
    pub fn generate_tests(&mut self) -> TestSuiteChromosome {
        self.stopping.reset();
        for observer in &mut self.observers {
            observer.before_search_start();
        }
        info!(
            "starting random search over {} goals",
            self.archive.num_goals()
        );

        let mut solution = self.factory.get_chromosome();
        self.archive.update(std::slice::from_mut(&mut solution));

        let first_suite = TestSuiteChromosome::new(self.archive.solutions());
        for observer in &mut self.observers {
            observer.before_first_search_iteration(&first_suite);
        }

        while !self.stopping.is_fulfilled() && !self.archive.is_fully_covered() {
            let mut candidate = self.factory.get_chromosome();
            self.archive.update(std::slice::from_mut(&mut candidate));
            self.stopping.after_search_iteration();

            let suite = TestSuiteChromosome::new(self.archive.solutions());
            for observer in &mut self.observers {
                observer.after_search_iteration(&suite);
            }
        }

        for observer in &mut self.observers {
            observer.after_search_finish();
        }
        TestSuiteChromosome::new(self.archive.solutions())
    }
}
