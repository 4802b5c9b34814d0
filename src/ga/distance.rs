//! Diversity assignment within a single front.

use std::sync::Arc;

use super::chromosome::TestCaseChromosome;
use super::operators::FitnessFunction;

/// Tolerance under which candidates count as equally good on a goal.
const EPSILON: f64 = 1e-6;

/// Assign an epsilon-dominance diversity distance to every chromosome
/// of one front.
///
/// Per goal, the candidates within [`EPSILON`] of the front's minimum
/// fitness share a credit that grows with how few of them there are;
/// credits are summed across goals into the chromosome's `distance`. A
/// candidate that is the sole best on some goal gets an infinite
/// distance so truncation never drops it ahead of interior points. The
/// distance is only ever used as a tie-breaker within a front.
pub fn fast_epsilon_dominance_assignment(
    front: &mut [TestCaseChromosome],
    goals: &[Arc<dyn FitnessFunction>],
) {
    for candidate in front.iter_mut() {
        candidate.set_distance(0.0);
    }
    if front.is_empty() {
        return;
    }

    for goal in goals {
        let values: Vec<f64> = front
            .iter_mut()
            .map(|candidate| candidate.fitness(goal.as_ref()))
            .collect();
        let minimum = values.iter().copied().fold(f64::INFINITY, f64::min);
        let best: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|(_, &value)| value <= minimum + EPSILON)
            .map(|(i, _)| i)
            .collect();

        // A goal the whole front ties on discriminates nothing.
        if best.len() == front.len() {
            continue;
        }

        if best.len() == 1 {
            front[best[0]].set_distance(f64::INFINITY);
        } else {
            let credit = (front.len() - best.len()) as f64 / front.len() as f64;
            for &i in &best {
                let distance = front[i].distance();
                front[i].set_distance(distance + credit);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::fixtures::{chromosome_with, goal};

    #[test]
    fn test_sole_extreme_gets_infinite_distance() {
        let goals: Vec<Arc<dyn FitnessFunction>> = vec![goal(1, 0)];
        let mut front = vec![
            chromosome_with(&[0]), // covers the goal, unique best
            chromosome_with(&[5]),
            chromosome_with(&[9]),
        ];
        fast_epsilon_dominance_assignment(&mut front, &goals);

        assert_eq!(front[0].distance(), f64::INFINITY);
        assert_eq!(front[1].distance(), 0.0);
        assert_eq!(front[2].distance(), 0.0);
    }

    #[test]
    fn test_shared_best_splits_credit() {
        let goals: Vec<Arc<dyn FitnessFunction>> = vec![goal(1, 0)];
        let mut front = vec![
            chromosome_with(&[0]),
            chromosome_with(&[0, 7]), // ties on the goal, different test case
            chromosome_with(&[30]),
            chromosome_with(&[40]),
        ];
        fast_epsilon_dominance_assignment(&mut front, &goals);

        // Two of four candidates share the best value.
        assert_eq!(front[0].distance(), 0.5);
        assert_eq!(front[1].distance(), 0.5);
        assert_eq!(front[2].distance(), 0.0);
    }

    #[test]
    fn test_non_discriminating_goal_contributes_nothing() {
        let goals: Vec<Arc<dyn FitnessFunction>> = vec![goal(1, 0)];
        let mut front = vec![chromosome_with(&[3]), chromosome_with(&[3, 3])];
        fast_epsilon_dominance_assignment(&mut front, &goals);

        assert_eq!(front[0].distance(), 0.0);
        assert_eq!(front[1].distance(), 0.0);
    }

    #[test]
    fn test_contributions_sum_across_goals() {
        let goals: Vec<Arc<dyn FitnessFunction>> = vec![goal(1, 0), goal(2, 10)];
        let mut front = vec![
            chromosome_with(&[0, 10]), // best on both goals, shared on each
            chromosome_with(&[0, 20]), // shares best on goal 1
            chromosome_with(&[12, 3]), // shares no best value with the others
            chromosome_with(&[12, 4]),
        ];
        // goal 1 best set: {0, 1}; goal 2 best set: {0}.
        fast_epsilon_dominance_assignment(&mut front, &goals);

        assert_eq!(front[0].distance(), f64::INFINITY);
        assert_eq!(front[1].distance(), 0.5);
    }

    #[test]
    fn test_stale_distance_is_reset() {
        let goals: Vec<Arc<dyn FitnessFunction>> = vec![goal(1, 0)];
        let mut front = vec![chromosome_with(&[3]), chromosome_with(&[3, 3])];
        front[0].set_distance(99.0);
        fast_epsilon_dominance_assignment(&mut front, &goals);
        assert_eq!(front[0].distance(), 0.0);
    }

    #[test]
    fn test_empty_front() {
        let goals: Vec<Arc<dyn FitnessFunction>> = vec![goal(1, 0)];
        let mut front: Vec<TestCaseChromosome> = Vec::new();
        fast_epsilon_dominance_assignment(&mut front, &goals);
    }
}
