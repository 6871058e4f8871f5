use std::time::Instant;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};

use super::{Detail, SearchResult};
use crate::board::Board;
use crate::config::AnnealingConfig;

const PROGRESS_INTERVAL: usize = 100_000;

/// Result of a single annealing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Accepted { delta: i64 },
    Rejected { delta: i64 },
}

/// Random walk over the boards with the manhattan distance as energy.
///
/// The walk is not monotonic, so the best board seen so far is tracked
/// separately from the current one.
#[derive(Debug, Clone)]
pub struct Annealer {
    goal: Board,
    current: Board,
    energy: u32,
    best: Board,
    best_energy: u32,
    temperature: f64,
    cooling_rate: f64,
    rng: SmallRng,
}

impl Annealer {
    pub fn new(start: Board, goal: &Board, config: &AnnealingConfig) -> Annealer {
        let energy = start.manhattan(goal);
        Annealer {
            goal: *goal,
            current: start,
            energy,
            best: start,
            best_energy: energy,
            temperature: config.initial_temperature,
            cooling_rate: config.cooling_rate,
            rng: SmallRng::seed_from_u64(config.seed),
        }
    }

    pub fn current(&self) -> Board {
        self.current
    }
    pub fn energy(&self) -> u32 {
        self.energy
    }
    pub fn best(&self) -> (Board, u32) {
        (self.best, self.best_energy)
    }
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Proposes a uniformly random neighbor and cools down afterwards.
    ///
    /// Improvements are always accepted, a worse board with probability
    /// `exp(-delta / T)`. The random draw is only made for the latter case.
    pub fn step(&mut self) -> Transition {
        let next = self.current.neighbors().choose(&mut self.rng).map(|(_, b)| b);
        let transition = match next {
            Some(next) => {
                let next_energy = next.manhattan(&self.goal);
                let delta = next_energy as i64 - self.energy as i64;
                if delta < 0
                    || self.rng.gen::<f64>() < (-(delta as f64) / self.temperature).exp()
                {
                    self.current = next;
                    self.energy = next_energy;
                    if next_energy < self.best_energy {
                        self.best = next;
                        self.best_energy = next_energy;
                    }
                    Transition::Accepted { delta }
                } else {
                    Transition::Rejected { delta }
                }
            }
            None => Transition::Rejected { delta: 0 },
        };
        self.temperature *= self.cooling_rate;
        transition
    }
}

/// Simulated annealing with a geometric cooling schedule.
///
/// Stops on the goal, after `max_iterations` or once the temperature is down
/// to `min_temperature`. On success the path is the walk of accepted boards.
/// Runs are reproducible for a fixed seed.
pub fn simulated_annealing(start: Board, goal: &Board, config: &AnnealingConfig) -> SearchResult {
    let timer = Instant::now();

    let mut annealer = Annealer::new(start, goal, config);
    let mut path = vec![start];
    let mut explored = 0;
    let mut accepted = 0;
    let mut rejected = 0;
    let mut success = false;

    let mut iteration = 0;
    while iteration < config.max_iterations && annealer.temperature() > config.min_temperature {
        explored += 1;

        if annealer.energy() == 0 {
            success = true;
            break;
        }

        match annealer.step() {
            Transition::Accepted { .. } => {
                accepted += 1;
                path.push(annealer.current());
            }
            Transition::Rejected { .. } => rejected += 1,
        }

        iteration += 1;
        if iteration % PROGRESS_INTERVAL == 0 {
            info!(
                "annealing iteration {}: T={:.4}, current h2={}, best h2={}",
                iteration,
                annealer.temperature(),
                annealer.energy(),
                annealer.best().1
            );
        }
    }

    // the last allowed step may have reached the goal
    success |= annealer.energy() == 0;

    let (best, best_energy) = annealer.best();
    debug!(
        "annealing stopped after {} iterations, T={:.6}, best h2={}",
        iteration,
        annealer.temperature(),
        best_energy
    );

    let detail = Detail::Annealing {
        final_temperature: annealer.temperature(),
        best_energy,
        best,
        accepted,
        rejected,
    };
    let elapsed = timer.elapsed();
    if success {
        SearchResult::solved(explored, elapsed, Some(path)).with_detail(detail)
    } else {
        SearchResult::failed(explored, elapsed).with_detail(detail)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::logging;
    use crate::search::test::{assert_path, board};

    #[test]
    fn annealer_deterministic() {
        let start = board("413 726 58B");
        let config = AnnealingConfig::default();
        let mut a = Annealer::new(start, &Board::GOAL, &config);
        let mut b = Annealer::new(start, &Board::GOAL, &config);
        for _ in 0..2000 {
            assert_eq!(a.step(), b.step());
            assert_eq!(a.current(), b.current());
        }
        assert_eq!(a.energy(), b.energy());
        assert_eq!(a.best(), b.best());
    }

    #[test]
    fn annealer_cooling() {
        let config = AnnealingConfig {
            initial_temperature: 10.0,
            cooling_rate: 0.5,
            ..Default::default()
        };
        let mut annealer = Annealer::new(board("413 726 58B"), &Board::GOAL, &config);
        annealer.step();
        annealer.step();
        assert_eq!(annealer.temperature(), 2.5);
    }

    #[test]
    fn annealer_improvements() {
        // at a tiny temperature only improvements are accepted
        let config = AnnealingConfig {
            initial_temperature: 1e-9,
            ..Default::default()
        };
        let mut annealer = Annealer::new(board("413 726 58B"), &Board::GOAL, &config);
        for _ in 0..200 {
            let before = annealer.energy();
            match annealer.step() {
                Transition::Accepted { delta } => {
                    assert!(delta < 0);
                    assert_eq!(annealer.energy() as i64, before as i64 + delta);
                }
                Transition::Rejected { delta } => {
                    assert!(delta > 0);
                    assert_eq!(annealer.energy(), before);
                }
            }
            assert_eq!(annealer.best().1, annealer.energy());
        }
    }

    #[test]
    fn annealing_reproducible() {
        logging();
        let start = board("413 726 58B");
        let config = AnnealingConfig::default();
        let a = simulated_annealing(start, &Board::GOAL, &config);
        let b = simulated_annealing(start, &Board::GOAL, &config);
        assert_eq!(a.success, b.success);
        assert_eq!(a.explored, b.explored);
        assert_eq!(a.path, b.path);
        assert_eq!(a.detail, b.detail);
        if a.success {
            assert_path(&a, start, Board::GOAL);
        }
    }

    #[test]
    fn annealing_goal_on_last_step() {
        // a single iteration from one move away, only the goal is accepted
        let start = board("123 456 7B8");
        let mut solved = 0;
        for seed in 0..64 {
            let config = AnnealingConfig {
                initial_temperature: 1e-6,
                min_temperature: 1e-9,
                max_iterations: 1,
                seed,
                ..Default::default()
            };
            let result = simulated_annealing(start, &Board::GOAL, &config);
            let Detail::Annealing { best_energy, .. } = result.detail else {
                panic!("missing detail");
            };
            assert_eq!(result.success, best_energy == 0, "seed {seed}");
            if result.success {
                assert_path(&result, start, Board::GOAL);
                assert_eq!(result.path.as_ref().map(Vec::len), Some(2));
                assert_eq!(result.explored, 1);
                solved += 1;
            }
        }
        // roughly a third of the seeds pick the move onto the goal
        assert!(solved > 0);
        assert!(solved < 64);
    }

    #[test]
    fn annealing_bounds() {
        let start = board("867 254 3B1");
        let config = AnnealingConfig {
            max_iterations: 10,
            ..Default::default()
        };
        let result = simulated_annealing(start, &Board::GOAL, &config);
        assert!(!result.success);
        assert_eq!(result.path, None);
        assert_eq!(result.explored, 10);
        let Detail::Annealing {
            accepted,
            rejected,
            best_energy,
            ..
        } = result.detail
        else {
            panic!("missing detail");
        };
        assert_eq!(accepted + rejected, 10);
        assert!(best_energy <= start.manhattan(&Board::GOAL));

        // the temperature floor is reached before the first iteration
        let config = AnnealingConfig {
            initial_temperature: 0.0001,
            ..Default::default()
        };
        let result = simulated_annealing(start, &Board::GOAL, &config);
        assert!(!result.success);
        assert_eq!(result.explored, 0);
    }
}
