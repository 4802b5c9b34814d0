//! Non-dominated sorting of populations into ranked fronts.

use std::sync::Arc;

use super::chromosome::TestCaseChromosome;
use super::operators::FitnessFunction;

/// An ordered sequence of Pareto fronts.
///
/// Front 0 holds candidates dominated by no one; front k holds
/// candidates dominated only by members of earlier fronts. The fronts
/// partition the input population.
pub struct RankedFronts {
    fronts: Vec<Vec<TestCaseChromosome>>,
}

impl RankedFronts {
    /// Number of fronts.
    pub fn num_fronts(&self) -> usize {
        self.fronts.len()
    }

    /// The front at the given rank, if it exists.
    pub fn front(&self, rank: usize) -> Option<&[TestCaseChromosome]> {
        self.fronts.get(rank).map(|front| front.as_slice())
    }

    /// Consume into the raw front sequence, rank order preserved.
    pub fn into_fronts(self) -> Vec<Vec<TestCaseChromosome>> {
        self.fronts
    }
}

/// Partition `candidates` into ranked fronts with respect to `goals`.
///
/// Dominance compares the per-goal fitness vectors restricted to the
/// goal set: A dominates B iff A is no worse on every goal and strictly
/// better on at least one. With an empty goal set nothing dominates
/// anything and all candidates land in a single front.
///
/// Rank and distance are per-generation scratch state; both are reset
/// here before ranks are assigned. Within a front, input order is kept.
pub fn compute_ranking_assignment(
    candidates: Vec<TestCaseChromosome>,
    goals: &[Arc<dyn FitnessFunction>],
) -> RankedFronts {
    let mut candidates = candidates;
    if candidates.is_empty() {
        return RankedFronts { fronts: Vec::new() };
    }

    // Warm the fitness caches once; dominance checks read the matrix.
    let matrix: Vec<Vec<f64>> = candidates
        .iter_mut()
        .map(|candidate| {
            candidate.set_rank(0);
            candidate.set_distance(0.0);
            goals
                .iter()
                .map(|goal| candidate.fitness(goal.as_ref()))
                .collect()
        })
        .collect();

    let n = candidates.len();
    let mut dominated_by = vec![0usize; n];
    let mut dominates_list: Vec<Vec<usize>> = vec![Vec::new(); n];
    for i in 0..n {
        for j in (i + 1)..n {
            if dominates(&matrix[i], &matrix[j]) {
                dominates_list[i].push(j);
                dominated_by[j] += 1;
            } else if dominates(&matrix[j], &matrix[i]) {
                dominates_list[j].push(i);
                dominated_by[i] += 1;
            }
        }
    }

    let mut front_indices: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = (0..n).filter(|&i| dominated_by[i] == 0).collect();
    while !current.is_empty() {
        let mut next = Vec::new();
        for &i in &current {
            for &j in &dominates_list[i] {
                dominated_by[j] -= 1;
                if dominated_by[j] == 0 {
                    next.push(j);
                }
            }
        }
        next.sort_unstable();
        front_indices.push(std::mem::replace(&mut current, next));
    }

    let mut slots: Vec<Option<TestCaseChromosome>> = candidates.into_iter().map(Some).collect();
    let fronts = front_indices
        .into_iter()
        .enumerate()
        .map(|(rank, indices)| {
            indices
                .into_iter()
                .filter_map(|i| {
                    let mut candidate = slots[i].take()?;
                    candidate.set_rank(rank);
                    Some(candidate)
                })
                .collect()
        })
        .collect();

    RankedFronts { fronts }
}

/// Pareto dominance over minimized fitness vectors.
fn dominates(a: &[f64], b: &[f64]) -> bool {
    let mut strictly_better = false;
    for (x, y) in a.iter().zip(b.iter()) {
        if x > y {
            return false;
        }
        if x < y {
            strictly_better = true;
        }
    }
    strictly_better
}
