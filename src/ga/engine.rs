//! The many-objective search engine.

use std::sync::Arc;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::archive::CoverageArchive;
use super::chromosome::{TestCaseChromosome, TestSuiteChromosome};
use super::distance::fast_epsilon_dominance_assignment;
use super::operators::{
    Breeder, ChromosomeFactory, FitnessFunction, SearchObserver, TargetedSeeder,
};
use super::ranking::compute_ranking_assignment;
use super::stopping::StoppingCondition;
use crate::schema::SearchConfig;

/// Summary of a finished or running search, for statistics export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchStats {
    /// Completed generations.
    pub iterations: usize,
    /// Total goals tracked by the archive.
    pub total_goals: usize,
    /// Goals covered so far.
    pub covered_goals: usize,
    /// Targeted evolution steps taken.
    pub targeted_steps: usize,
}

impl SearchStats {
    /// Render the statistics as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Many-objective evolutionary search over coverage goals.
///
/// Evolves a population of candidate test cases, keeps the best-known
/// solution per goal in an archive, and redirects the search through an
/// externally seeded generation once the covered-goal count has
/// stagnated past the configured threshold.
pub struct MosaEngine {
    config: SearchConfig,
    archive: CoverageArchive,
    population: Vec<TestCaseChromosome>,
    factory: Box<dyn ChromosomeFactory>,
    breeder: Box<dyn Breeder>,
    seeder: Box<dyn TargetedSeeder>,
    stopping: Box<dyn StoppingCondition>,
    observers: Vec<Box<dyn SearchObserver>>,
    rng: StdRng,
    iteration: usize,
    stagnation_count: usize,
    targeted_steps: usize,
}

impl MosaEngine {
    /// Create a new engine over the given goals and collaborators.
    pub fn new(
        config: SearchConfig,
        goals: Vec<Arc<dyn FitnessFunction>>,
        factory: Box<dyn ChromosomeFactory>,
        breeder: Box<dyn Breeder>,
        seeder: Box<dyn TargetedSeeder>,
        stopping: Box<dyn StoppingCondition>,
    ) -> Self {
        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let archive = CoverageArchive::new(goals, config.tie_break);

        Self {
            config,
            archive,
            population: Vec::new(),
            factory,
            breeder,
            seeder,
            stopping,
            observers: Vec::new(),
            rng,
            iteration: 0,
            stagnation_count: 0,
            targeted_steps: 0,
        }
    }

    /// Register an observer notified around search iterations.
    pub fn add_observer(&mut self, observer: Box<dyn SearchObserver>) {
        self.observers.push(observer);
    }

    /// The current population.
    pub fn population(&self) -> &[TestCaseChromosome] {
        &self.population
    }

    /// The archive of best-known solutions.
    pub fn archive(&self) -> &CoverageArchive {
        &self.archive
    }

    /// Completed generations.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Consecutive generations without new goal coverage.
    pub fn stagnation_count(&self) -> usize {
        self.stagnation_count
    }

    /// Current search statistics.
    pub fn stats(&self) -> SearchStats {
        SearchStats {
            iterations: self.iteration,
            total_goals: self.archive.num_goals(),
            covered_goals: self.archive.num_covered_goals(),
            targeted_steps: self.targeted_steps,
        }
    }

    /// Run the search until the budget is exhausted or every goal is
    /// covered, and return the best suite found.
    pub fn run(&mut self) -> TestSuiteChromosome {
        self.stopping.reset();
        self.iteration = 0;
        self.stagnation_count = 0;
        self.targeted_steps = 0;
        for observer in &mut self.observers {
            observer.before_search_start();
        }
        info!("starting search over {} goals", self.archive.num_goals());

        self.population = (0..self.config.population_size)
            .map(|_| self.factory.get_chromosome())
            .collect();
        self.archive.update(&mut self.population);

        // Rank and spread the initial population. Reporting consumes
        // this ordering; the first evolve step replaces it anyway.
        let uncovered = self.archive.uncovered_goals();
        let initial = std::mem::take(&mut self.population);
        for mut front in compute_ranking_assignment(initial, &uncovered).into_fronts() {
            fast_epsilon_dominance_assignment(&mut front, &uncovered);
            self.population.extend(front);
        }

        let first_suite = self.current_suite();
        for observer in &mut self.observers {
            observer.before_first_search_iteration(&first_suite);
        }

        let mut last_covered = self.archive.num_covered_goals();
        while self.resources_left() && !self.archive.is_fully_covered() {
            let covered = self.archive.num_covered_goals();
            if covered == last_covered {
                self.stagnation_count += 1;
            } else {
                self.stagnation_count = 0;
            }
            last_covered = covered;

            if self.stagnation_count > self.config.stagnation_threshold {
                self.stagnation_count = 0;
                self.evolve_targeted();
            } else {
                self.evolve();
            }

            self.iteration += 1;
            self.stopping.after_search_iteration();
            let suite = self.current_suite();
            for observer in &mut self.observers {
                observer.after_search_iteration(&suite);
            }
        }

        for observer in &mut self.observers {
            observer.after_search_finish();
        }
        info!(
            "search finished after {} generations, {}/{} goals covered",
            self.iteration,
            self.archive.num_covered_goals(),
            self.archive.num_goals()
        );

        let solutions = self.archive.solutions();
        if solutions.is_empty() {
            // Best-effort result even with zero confirmed coverage.
            TestSuiteChromosome::new(self.best_individuals())
        } else {
            TestSuiteChromosome::new(solutions)
        }
    }

    /// One ordinary evolution step.
    fn evolve(&mut self) {
        let offspring = self.breeder.breed_next_generation(&self.population);
        self.evolve_common(offspring);
    }

    /// One seeding-driven evolution step, taken when the search has
    /// stagnated. Asks the seeder for candidates aimed at uncovered
    /// code and pads them to population size with mutated clones of
    /// the original seeds, discarding no-op or empty mutants.
    fn evolve_targeted(&mut self) {
        self.targeted_steps += 1;
        let suite = self.current_suite();
        let seeds = self
            .seeder
            .target_uncovered_functions(&suite, self.config.targeted_seed_count);
        debug!("targeted step received {} seeds", seeds.len());

        let mut candidates: Vec<TestCaseChromosome> = seeds
            .iter()
            .cloned()
            .map(TestCaseChromosome::new)
            .collect();

        if !seeds.is_empty() {
            while candidates.len() < self.config.population_size {
                let pick = self.rng.gen_range(0..seeds.len());
                let mut offspring = TestCaseChromosome::new(seeds[pick].clone());
                offspring.set_changed(false);
                let mutated = self.breeder.mutate(&mut offspring);
                if mutated && !offspring.is_empty() {
                    candidates.push(offspring);
                }
            }
        }

        self.evolve_common(candidates);
    }

    /// Generation replacement: rank the union of population and
    /// offspring against the current uncovered goals, admit fronts in
    /// rank order, and break the first overfull front by diversity
    /// distance.
    fn evolve_common(&mut self, offspring: Vec<TestCaseChromosome>) {
        let mut union = std::mem::take(&mut self.population);
        union.extend(offspring);
        debug!("union size = {}", union.len());

        // Snapshot: goals covered mid-step do not change this ranking.
        let uncovered = self.archive.uncovered_goals();
        let fronts = compute_ranking_assignment(union, &uncovered);

        let mut new_population: Vec<TestCaseChromosome> =
            Vec::with_capacity(self.config.population_size);
        for mut front in fronts.into_fronts() {
            if front.is_empty() {
                break;
            }
            let remaining = self.config.population_size - new_population.len();
            if remaining == 0 {
                break;
            }
            fast_epsilon_dominance_assignment(&mut front, &uncovered);
            if front.len() <= remaining {
                new_population.extend(front);
            } else {
                front.sort_by(|a, b| {
                    b.distance()
                        .partial_cmp(&a.distance())
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
                new_population.extend(front.into_iter().take(remaining));
                break;
            }
        }

        self.population = new_population;
        self.archive.update(&mut self.population);
    }

    fn current_suite(&self) -> TestSuiteChromosome {
        TestSuiteChromosome::new(self.archive.solutions())
    }

    fn resources_left(&self) -> bool {
        !self.stopping.is_fulfilled()
    }

    /// Best-ranked chromosome of the final population, as a fallback
    /// result when the archive holds no confirmed coverage.
    fn best_individuals(&self) -> Vec<TestCaseChromosome> {
        let mut best: Option<&TestCaseChromosome> = None;
        for candidate in &self.population {
            let better = match best {
                None => true,
                Some(current) => {
                    candidate.rank() < current.rank()
                        || (candidate.rank() == current.rank()
                            && candidate.distance() > current.distance())
                }
            };
            if better {
                best = Some(candidate);
            }
        }
        best.cloned().into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::fixtures::{
        chromosome_with, goal, ConstantFactory, CountingObserver, RecordingSeeder, StaleBreeder,
        test_case_with,
    };
    use crate::ga::stopping::MaxIterationsStoppingCondition;
    use crate::schema::SearchConfig;
    use std::sync::atomic::Ordering;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn config(population_size: usize) -> SearchConfig {
        SearchConfig {
            population_size,
            random_seed: Some(7),
            ..Default::default()
        }
    }

    /// Engine over three goals none of the factory's candidates can
    /// reach, so coverage stays constant for the entire run.
    fn stagnating_engine(
        population_size: usize,
        max_iterations: u64,
        seeds: Vec<crate::testcase::TestCase>,
    ) -> (MosaEngine, std::sync::Arc<std::sync::atomic::AtomicUsize>) {
        let goals = vec![goal(1, 1000), goal(2, 2000), goal(3, 3000)];
        let (seeder, calls) = RecordingSeeder::new(seeds);
        let engine = MosaEngine::new(
            config(population_size),
            goals,
            Box::new(ConstantFactory::new(vec![vec![0], vec![1], vec![2]])),
            Box::new(StaleBreeder),
            Box::new(seeder),
            Box::new(MaxIterationsStoppingCondition::new(max_iterations)),
        );
        (engine, calls)
    }

    #[test]
    fn test_evolve_common_truncates_to_population_size() {
        let (mut engine, _) = stagnating_engine(4, 1, Vec::new());
        engine.population = vec![
            chromosome_with(&[0]),
            chromosome_with(&[1]),
            chromosome_with(&[2]),
        ];
        let offspring = vec![
            chromosome_with(&[3]),
            chromosome_with(&[4]),
            chromosome_with(&[5]),
            chromosome_with(&[6]),
        ];
        engine.evolve_common(offspring);
        assert_eq!(engine.population().len(), 4);
    }

    #[test]
    fn test_evolve_common_keeps_small_union_whole() {
        let (mut engine, _) = stagnating_engine(10, 1, Vec::new());
        engine.population = vec![chromosome_with(&[0])];
        engine.evolve_common(vec![chromosome_with(&[1])]);
        assert_eq!(engine.population().len(), 2);
    }

    // Breaking an overfull front must keep the candidates with the
    // highest diversity distance: the sole best on each goal survives,
    // interior points do not.
    #[test]
    fn test_evolve_common_truncation_keeps_most_diverse() {
        let goals = vec![goal(1, 0), goal(2, 10), goal(3, 5)];
        let (seeder, _) = RecordingSeeder::new(Vec::new());
        let mut engine = MosaEngine::new(
            config(3),
            goals,
            Box::new(ConstantFactory::new(vec![vec![0]])),
            Box::new(StaleBreeder),
            Box::new(seeder),
            Box::new(MaxIterationsStoppingCondition::new(1)),
        );
        // Interior points come first in the union, so keeping input
        // order (or sorting ascending) would select the wrong ones.
        engine.population = vec![chromosome_with(&[4]), chromosome_with(&[6])];
        engine.evolve_common(vec![
            chromosome_with(&[0]),
            chromosome_with(&[10]),
            chromosome_with(&[5]),
        ]);

        let survivors: Vec<_> = engine
            .population()
            .iter()
            .map(|c| c.test_case().clone())
            .collect();
        assert_eq!(survivors.len(), 3);
        for extreme in [
            test_case_with(&[0]),
            test_case_with(&[10]),
            test_case_with(&[5]),
        ] {
            assert!(survivors.contains(&extreme));
        }
    }

    #[test]
    fn test_evolve_common_updates_archive_with_new_population() {
        let goals = vec![goal(1, 42)];
        let (seeder, _) = RecordingSeeder::new(Vec::new());
        let mut engine = MosaEngine::new(
            config(4),
            goals,
            Box::new(ConstantFactory::new(vec![vec![0]])),
            Box::new(StaleBreeder),
            Box::new(seeder),
            Box::new(MaxIterationsStoppingCondition::new(1)),
        );
        engine.evolve_common(vec![chromosome_with(&[42])]);
        assert!(engine.archive().is_fully_covered());
    }

    // Population size 10, 3 goals, a breeder that never improves
    // coverage for 30 generations: the targeted path must fire exactly
    // once, at generation 26.
    #[test]
    fn test_stagnation_fires_targeted_exactly_once_in_30_generations() {
        init_logging();
        let (mut engine, calls) = stagnating_engine(10, 30, Vec::new());
        engine.run();

        assert_eq!(engine.iteration(), 30);
        assert_eq!(calls.load(Ordering::Relaxed), 1);
        // Reset at generation 26, then four more stagnant generations.
        assert_eq!(engine.stagnation_count(), 4);
        assert_eq!(engine.stats().targeted_steps, 1);
    }

    #[test]
    fn test_stagnation_counter_reset_by_targeted_step() {
        let (mut engine, calls) = stagnating_engine(10, 26, Vec::new());
        engine.run();

        assert_eq!(calls.load(Ordering::Relaxed), 1);
        assert_eq!(engine.stagnation_count(), 0);
    }

    #[test]
    fn test_no_targeted_step_below_threshold() {
        let (mut engine, calls) = stagnating_engine(10, 25, Vec::new());
        engine.run();

        assert_eq!(calls.load(Ordering::Relaxed), 0);
        assert_eq!(engine.stagnation_count(), 25);
    }

    #[test]
    fn test_targeted_step_pads_seeds_with_mutants() {
        let seeds = vec![test_case_with(&[5]), test_case_with(&[6])];
        let (mut engine, _) = stagnating_engine(6, 1, seeds);
        engine.evolve_targeted();

        assert_eq!(engine.population().len(), 6);
        assert!(engine.population().iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn test_full_coverage_skips_loop() {
        let goals = vec![goal(1, 0), goal(2, 1)];
        let (seeder, calls) = RecordingSeeder::new(Vec::new());
        let mut engine = MosaEngine::new(
            config(4),
            goals,
            // Every initial chromosome covers both goals.
            Box::new(ConstantFactory::new(vec![vec![0, 1]])),
            Box::new(StaleBreeder),
            Box::new(seeder),
            Box::new(MaxIterationsStoppingCondition::new(100)),
        );
        let suite = engine.run();

        assert_eq!(engine.iteration(), 0);
        assert_eq!(calls.load(Ordering::Relaxed), 0);
        assert_eq!(suite.size(), 1);
    }

    #[test]
    fn test_fallback_to_best_individual_without_coverage() {
        let (mut engine, _) = stagnating_engine(4, 3, Vec::new());
        let suite = engine.run();

        // Nothing covered, so the suite is the single best-ranked
        // chromosome of the final population.
        assert_eq!(engine.archive().num_covered_goals(), 0);
        assert_eq!(suite.size(), 1);
    }

    #[test]
    fn test_observer_hooks_fire_per_generation() {
        let (mut engine, _) = stagnating_engine(4, 5, Vec::new());
        let observer = CountingObserver::default();
        let starts = std::sync::Arc::clone(&observer.starts);
        let firsts = std::sync::Arc::clone(&observer.first_iterations);
        let iterations = std::sync::Arc::clone(&observer.iterations);
        let finishes = std::sync::Arc::clone(&observer.finishes);
        engine.add_observer(Box::new(observer));
        engine.run();

        assert_eq!(starts.load(Ordering::Relaxed), 1);
        assert_eq!(firsts.load(Ordering::Relaxed), 1);
        assert_eq!(iterations.load(Ordering::Relaxed), 5);
        assert_eq!(finishes.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_stats_serialization() {
        let (engine, _) = stagnating_engine(4, 1, Vec::new());
        let json = engine.stats().to_json().unwrap();
        let parsed: SearchStats = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.total_goals, 3);
        assert_eq!(parsed.iterations, 0);
    }
}
