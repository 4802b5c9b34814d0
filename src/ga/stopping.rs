//! Search budget bookkeeping.
//!
//! The engine consults a stopping condition once per generation and
//! stops issuing new generations once the budget is exhausted;
//! cancellation is cooperative and the running generation finishes.

use std::time::Instant;

/// A resource budget for the search.
pub trait StoppingCondition {
    /// The configured limit.
    fn limit(&self) -> u64;

    /// Change the limit.
    fn set_limit(&mut self, limit: u64);

    /// Whether the budget is exhausted.
    fn is_fulfilled(&self) -> bool;

    /// Restart the budget from zero.
    fn reset(&mut self);

    /// Called by the engine once per completed generation.
    fn after_search_iteration(&mut self) {}

    /// Called by the execution layer after every test case execution.
    fn after_test_case_execution(&mut self) {}
}

const DEFAULT_MAX_ITERATIONS: u64 = 600;
const DEFAULT_MAX_TEST_EXECUTIONS: u64 = 100_000;
const DEFAULT_MAX_SEARCH_TIME_SECS: u64 = 600;

/// Budget on completed search generations.
#[derive(Debug, Clone)]
pub struct MaxIterationsStoppingCondition {
    limit: u64,
    iterations: u64,
}

impl MaxIterationsStoppingCondition {
    pub fn new(limit: u64) -> Self {
        Self {
            limit,
            iterations: 0,
        }
    }
}

impl Default for MaxIterationsStoppingCondition {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITERATIONS)
    }
}

impl StoppingCondition for MaxIterationsStoppingCondition {
    fn limit(&self) -> u64 {
        self.limit
    }

    fn set_limit(&mut self, limit: u64) {
        self.limit = limit;
    }

    fn is_fulfilled(&self) -> bool {
        self.iterations >= self.limit
    }

    fn reset(&mut self) {
        self.iterations = 0;
    }

    fn after_search_iteration(&mut self) {
        self.iterations += 1;
    }
}

/// Budget on test case executions, counted by the execution layer.
#[derive(Debug, Clone)]
pub struct MaxTestExecutionsStoppingCondition {
    limit: u64,
    executions: u64,
}

impl MaxTestExecutionsStoppingCondition {
    pub fn new(limit: u64) -> Self {
        Self {
            limit,
            executions: 0,
        }
    }
}

impl Default for MaxTestExecutionsStoppingCondition {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TEST_EXECUTIONS)
    }
}

impl StoppingCondition for MaxTestExecutionsStoppingCondition {
    fn limit(&self) -> u64 {
        self.limit
    }

    fn set_limit(&mut self, limit: u64) {
        self.limit = limit;
    }

    fn is_fulfilled(&self) -> bool {
        self.executions >= self.limit
    }

    fn reset(&mut self) {
        self.executions = 0;
    }

    fn after_test_case_execution(&mut self) {
        self.executions += 1;
    }
}

/// Wall-clock budget on the whole search.
#[derive(Debug, Clone)]
pub struct MaxSearchTimeStoppingCondition {
    limit_secs: u64,
    start: Instant,
}

impl MaxSearchTimeStoppingCondition {
    pub fn new(limit_secs: u64) -> Self {
        Self {
            limit_secs,
            start: Instant::now(),
        }
    }
}

impl Default for MaxSearchTimeStoppingCondition {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SEARCH_TIME_SECS)
    }
}

impl StoppingCondition for MaxSearchTimeStoppingCondition {
    fn limit(&self) -> u64 {
        self.limit_secs
    }

    fn set_limit(&mut self, limit: u64) {
        self.limit_secs = limit;
    }

    fn is_fulfilled(&self) -> bool {
        self.start.elapsed().as_secs() >= self.limit_secs
    }

    fn reset(&mut self) {
        self.start = Instant::now();
    }
}
