//! Best-known-solution archive, keyed by coverage goal.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use super::chromosome::TestCaseChromosome;
use super::operators::{FitnessFunction, GoalId};
use crate::schema::ArchiveTieBreak;

struct ArchiveEntry {
    chromosome: TestCaseChromosome,
    fitness: f64,
}

/// Maps every goal to the best chromosome observed so far for it.
///
/// The covered/uncovered partition is derived from the stored best
/// fitness values and never tracked separately. Per goal the stored
/// fitness is non-increasing across updates, so a goal that reached
/// fitness 0.0 stays covered for the rest of the run.
pub struct CoverageArchive {
    goals: Vec<Arc<dyn FitnessFunction>>,
    best: HashMap<GoalId, ArchiveEntry>,
    tie_break: ArchiveTieBreak,
}

impl CoverageArchive {
    /// Archive tracking the given goals.
    pub fn new(goals: Vec<Arc<dyn FitnessFunction>>, tie_break: ArchiveTieBreak) -> Self {
        Self {
            goals,
            best: HashMap::new(),
            tie_break,
        }
    }

    /// Total number of tracked goals.
    pub fn num_goals(&self) -> usize {
        self.goals.len()
    }

    /// Fold every candidate into the per-goal bests.
    ///
    /// A candidate replaces the stored chromosome for a goal when its
    /// fitness is strictly lower, or equal under the configured
    /// tie-break. Idempotent: a second call with the same input
    /// changes nothing.
    pub fn update(&mut self, candidates: &mut [TestCaseChromosome]) {
        for goal in &self.goals {
            for candidate in candidates.iter_mut() {
                let fitness = candidate.fitness(goal.as_ref());
                let replace = match self.best.get(&goal.id()) {
                    None => true,
                    Some(entry) => {
                        fitness < entry.fitness
                            || (fitness == entry.fitness
                                && self.tie_break == ArchiveTieBreak::PreferSmaller
                                && candidate.size() < entry.chromosome.size())
                    }
                };
                if replace {
                    self.best.insert(
                        goal.id(),
                        ArchiveEntry {
                            chromosome: candidate.clone(),
                            fitness,
                        },
                    );
                }
            }
        }
        debug!(
            "archive covers {}/{} goals",
            self.num_covered_goals(),
            self.num_goals()
        );
    }

    /// Best fitness observed so far for a goal.
    pub fn best_fitness(&self, id: GoalId) -> Option<f64> {
        self.best.get(&id).map(|entry| entry.fitness)
    }

    /// Goals whose best fitness reached 0.0.
    pub fn covered_goals(&self) -> Vec<Arc<dyn FitnessFunction>> {
        self.goals
            .iter()
            .filter(|goal| self.is_covered(goal.id()))
            .cloned()
            .collect()
    }

    /// Goals not yet covered.
    pub fn uncovered_goals(&self) -> Vec<Arc<dyn FitnessFunction>> {
        self.goals
            .iter()
            .filter(|goal| !self.is_covered(goal.id()))
            .cloned()
            .collect()
    }

    pub fn num_covered_goals(&self) -> usize {
        self.goals
            .iter()
            .filter(|goal| self.is_covered(goal.id()))
            .count()
    }

    /// Whether every tracked goal is covered.
    pub fn is_fully_covered(&self) -> bool {
        self.num_covered_goals() == self.num_goals()
    }

    /// The minimal deduplicated set of chromosomes covering every
    /// covered goal, in goal order.
    pub fn solutions(&self) -> Vec<TestCaseChromosome> {
        let mut solutions: Vec<TestCaseChromosome> = Vec::new();
        for goal in &self.goals {
            if let Some(entry) = self.best.get(&goal.id()) {
                if entry.fitness == 0.0 && !solutions.contains(&entry.chromosome) {
                    solutions.push(entry.chromosome.clone());
                }
            }
        }
        solutions
    }

    fn is_covered(&self, id: GoalId) -> bool {
        matches!(self.best.get(&id), Some(entry) if entry.fitness == 0.0)
    }
}
