//! Search configuration types.
//!
//! Configuration is an explicit immutable value threaded through the
//! engine constructor, so multiple engine instances do not interfere.

use serde::{Deserialize, Serialize};

/// Top-level configuration for an evolutionary search run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of chromosomes in the population.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Consecutive generations without new coverage before the search
    /// switches to a targeted evolution step.
    #[serde(default = "default_stagnation_threshold")]
    pub stagnation_threshold: usize,
    /// Maximum number of externally seeded candidates requested per
    /// targeted evolution step.
    #[serde(default = "default_targeted_seed_count")]
    pub targeted_seed_count: usize,
    /// Tie-break applied by the archive when two chromosomes reach the
    /// same fitness for a goal.
    #[serde(default)]
    pub tie_break: ArchiveTieBreak,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            stagnation_threshold: default_stagnation_threshold(),
            targeted_seed_count: default_targeted_seed_count(),
            tie_break: ArchiveTieBreak::default(),
            random_seed: None,
        }
    }
}

fn default_population_size() -> usize {
    50
}
fn default_stagnation_threshold() -> usize {
    25
}
fn default_targeted_seed_count() -> usize {
    10
}

/// Archive tie-break on equal fitness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ArchiveTieBreak {
    /// Prefer the chromosome with fewer statements, biasing the archive
    /// toward minimal covering tests.
    #[default]
    PreferSmaller,
    /// Keep the chromosome that entered the archive first.
    KeepExisting,
}

/// Search configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum SearchConfigError {
    #[error("Population size must be at least 2")]
    PopulationTooSmall,
    #[error("Targeted seed count must be positive")]
    NoTargetedSeeds,
}

impl SearchConfig {
    /// Validate the search configuration.
    pub fn validate(&self) -> Result<(), SearchConfigError> {
        if self.population_size < 2 {
            return Err(SearchConfigError::PopulationTooSmall);
        }
        if self.targeted_seed_count == 0 {
            return Err(SearchConfigError::NoTargetedSeeds);
        }
        Ok(())
    }
}
