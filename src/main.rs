use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};
use owo_colors::OwoColorize;
use serde::Serialize;

use manuscript::config::Config;
use manuscript::game::Comparison;
use manuscript::heuristic::Heuristic;
use manuscript::input::Instance;
use manuscript::logging;
use manuscript::report::{Run, Summary};
use manuscript::search::Strategy;

/// Every strategy selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Algorithm {
    Bfs,
    Dfs,
    Greedy,
    AStar,
    IdaStar,
    Annealing,
    Minimax,
    AlphaBeta,
}

impl Algorithm {
    fn strategy(self) -> Option<Strategy> {
        match self {
            Algorithm::Bfs => Some(Strategy::Bfs),
            Algorithm::Dfs => Some(Strategy::Dfs),
            Algorithm::Greedy => Some(Strategy::Greedy),
            Algorithm::AStar => Some(Strategy::AStar),
            Algorithm::IdaStar => Some(Strategy::IdaStar),
            Algorithm::Annealing => Some(Strategy::Annealing),
            Algorithm::Minimax | Algorithm::AlphaBeta => None,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "sorter",
    about = "Sort a tray of manuscripts with classic search strategies."
)]
struct Opts {
    /// Start configuration on the first line, optional goal on the second.
    #[arg(default_value = "input.txt")]
    input: PathBuf,
    /// Strategies to run, all if omitted.
    /// Minimax and alpha-beta always run together for comparison.
    #[arg(long, value_enum)]
    strategy: Vec<Algorithm>,
    /// Heuristic of the informed strategies.
    /// A* and IDA* run with both if omitted, greedy with manhattan.
    #[arg(long, value_enum)]
    heuristic: Option<Heuristic>,
    /// Strategy configuration as JSON.
    #[arg(long, default_value_t)]
    config: Config,
    /// Print the results as JSON instead of the text report.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Output {
    instance: Instance,
    runs: Vec<Run>,
    comparison: Option<Comparison>,
}

fn main() -> ExitCode {
    logging();

    let Opts {
        input,
        strategy,
        heuristic,
        config,
        json,
    } = Opts::parse();

    let instance = match Instance::load(&input) {
        Ok(instance) => instance,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let Instance { start, goal } = instance;

    let algorithms = if strategy.is_empty() {
        vec![
            Algorithm::Bfs,
            Algorithm::Dfs,
            Algorithm::Greedy,
            Algorithm::AStar,
            Algorithm::IdaStar,
            Algorithm::Annealing,
            Algorithm::Minimax,
        ]
    } else {
        strategy
    };

    if !json {
        println!("Start State: {start}");
        println!("Goal  State: {goal}");
        println!("Start Grid:\n{start:#}");
        println!("h1 (Misplaced Tiles)    = {}", start.misplaced(&goal));
        println!("h2 (Manhattan Distance) = {}", start.manhattan(&goal));
        println!();
    }

    let solvable = instance.is_solvable();
    if !solvable {
        warn!("start and goal differ in parity, the goal is unreachable");
    }

    let mut runs = Vec::new();
    for s in Strategy::ALL {
        if !algorithms.iter().any(|a| a.strategy() == Some(s)) {
            continue;
        }

        let heuristics = match (s, heuristic) {
            (_, Some(h)) if s.takes_heuristic() => vec![Some(h)],
            (Strategy::AStar | Strategy::IdaStar, None) => {
                Heuristic::ALL.iter().copied().map(Some).collect()
            }
            (Strategy::Greedy, None) => vec![Some(Heuristic::Manhattan)],
            _ => vec![None],
        };

        for h in heuristics {
            let result = s.run(start, &goal, h.unwrap_or_default(), &config);
            let run = Run {
                strategy: s,
                heuristic: h,
                label: s.label(h.unwrap_or_default(), &config),
                result,
            };
            info!(
                "{}: {} states explored",
                run.title(),
                run.result.explored
            );
            if !json {
                println!("{run}");
            }
            runs.push(run);
        }
    }

    let comparison = algorithms
        .iter()
        .any(|a| matches!(a, Algorithm::Minimax | Algorithm::AlphaBeta))
        .then(|| Comparison::run(start, &goal, config.lookahead));

    if json {
        let output = Output {
            instance,
            runs,
            comparison,
        };
        match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                error!("{e}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    if let Some(comparison) = &comparison {
        println!("Adversarial Search Depth: {}", comparison.depth);
        println!("Utility function: u(s) = -ManhattanDistance(s)");
        println!();
        println!("{comparison}");
    }

    if !runs.is_empty() {
        println!("{}", Summary(&runs));
    }
    if !solvable {
        println!("{}", "The goal is unreachable from the start configuration.".red());
    }

    ExitCode::SUCCESS
}
