//! Console rendering of search results.

use std::fmt;
use std::time::Duration;

use owo_colors::OwoColorize;
use serde::Serialize;

use crate::game::{Comparison, Decision};
use crate::heuristic::Heuristic;
use crate::search::{Detail, SearchResult, Strategy};

const RULE_WIDTH: usize = 60;
/// Width of the algorithm column, fits the longest run title.
const TITLE_WIDTH: usize = 56;
/// Algorithm, status, explored, length and time columns with separators.
const SUMMARY_WIDTH: usize = TITLE_WIDTH + 1 + 8 + 1 + 10 + 1 + 7 + 1 + 12;

fn rule(f: &mut fmt::Formatter<'_>, c: char, width: usize) -> fmt::Result {
    for _ in 0..width {
        write!(f, "{c}")?;
    }
    writeln!(f)
}

fn millis(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}

/// One executed strategy together with the parameters it ran with.
#[derive(Debug, Clone, Serialize)]
pub struct Run {
    pub strategy: Strategy,
    pub heuristic: Option<Heuristic>,
    /// Parameter description, e.g. the heuristic name or the depth limit.
    pub label: String,
    pub result: SearchResult,
}

impl Run {
    pub fn title(&self) -> String {
        if self.label.is_empty() {
            self.strategy.name().to_string()
        } else {
            format!("{} ({})", self.strategy.name(), self.label)
        }
    }
}

impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = &self.result;

        rule(f, '=', RULE_WIDTH)?;
        writeln!(f, "Algorithm    : {}", self.title().bold())?;
        rule(f, '=', RULE_WIDTH)?;
        if result.success {
            writeln!(f, "Status       : {}", "SUCCESS".green())?;
        } else {
            writeln!(f, "Status       : {}", "FAILURE".red())?;
        }
        writeln!(f, "States Explored: {}", result.explored)?;
        writeln!(f, "Time Taken   : {:.3} ms", millis(result.elapsed))?;

        match &result.detail {
            Detail::None => {}
            Detail::IdaStar {
                iterations,
                thresholds,
            } => {
                writeln!(f, "Iterations   : {iterations}")?;
                let thresholds: Vec<String> = thresholds.iter().map(|t| t.to_string()).collect();
                writeln!(f, "Thresholds   : {}", thresholds.join(" -> "))?;
            }
            Detail::Annealing {
                final_temperature,
                best_energy,
                best,
                accepted,
                rejected,
            } => {
                writeln!(f, "Final Temperature: {final_temperature:.6}")?;
                writeln!(f, "Moves Accepted: {accepted}, Rejected: {rejected}")?;
                if !result.success {
                    writeln!(f, "Best state found (h2={best_energy}):")?;
                    write!(f, "{best:#}")?;
                }
            }
        }

        if let Some(path) = result.path.as_deref().filter(|p| p.len() > 1) {
            let moves = result.moves();
            writeln!(f, "Path Length  : {} moves", moves.len())?;
            let names: Vec<&str> = moves.iter().map(|d| d.name()).collect();
            writeln!(f, "Path         : {}", names.join(" -> "))?;

            writeln!(f, "\nStep-by-step:")?;
            writeln!(f, "Initial State:")?;
            write!(f, "{:#}", path[0])?;
            for (i, (board, d)) in path[1..].iter().zip(&moves).enumerate() {
                writeln!(f, "  | Move {}: {}", i + 1, d)?;
                writeln!(f, "  v")?;
                write!(f, "{board:#}")?;
            }
        } else if result.success {
            writeln!(f, "Path Length  : 0 moves")?;
        }
        Ok(())
    }
}

/// Result of one adversarial search, headed by `title`.
pub struct DecisionReport<'a> {
    pub title: &'a str,
    pub decision: &'a Decision,
}

impl fmt::Display for DecisionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.decision;
        writeln!(f, "--- {} ---", self.title)?;
        match d.best {
            Some((dir, _)) => writeln!(f, "  Best move: {} (utility={})", dir.bold(), d.value)?,
            None => writeln!(f, "  Terminal state (utility={})", d.value)?,
        }
        for (dir, value) in &d.children {
            writeln!(f, "    {:<5} -> {}", dir.name(), value)?;
        }
        writeln!(f, "  States evaluated: {}", d.evaluations)?;
        writeln!(f, "  Time: {:.3} ms", millis(d.elapsed))?;
        if let Some((_, board)) = d.best {
            writeln!(f, "  Resulting state:")?;
            write!(f, "{board:#}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}",
            DecisionReport {
                title: "Plain Minimax",
                decision: &self.minimax,
            }
        )?;
        writeln!(
            f,
            "{}",
            DecisionReport {
                title: "Alpha-Beta Pruning",
                decision: &self.alphabeta,
            }
        )?;

        rule(f, '=', RULE_WIDTH)?;
        writeln!(f, "COMPARISON: Minimax vs Alpha-Beta (depth={})", self.depth)?;
        rule(f, '=', RULE_WIDTH)?;
        writeln!(f, "                    Minimax    Alpha-Beta")?;
        writeln!(
            f,
            "States evaluated:   {:<11}{}",
            self.minimax.evaluations, self.alphabeta.evaluations
        )?;
        writeln!(
            f,
            "Time (ms):          {:<11}{}",
            format!("{:.3}", millis(self.minimax.elapsed)),
            format!("{:.3}", millis(self.alphabeta.elapsed))
        )?;
        if self.same_move() {
            writeln!(f, "Same best move?     {}", "YES (pruning is lossless)".green())?;
        } else {
            writeln!(f, "Same best move?     {}", "NO (unexpected)".red())?;
        }
        writeln!(
            f,
            "Pruning saved:      {:.1}% of state evaluations",
            self.savings()
        )
    }
}

/// Table of all path finding runs.
pub struct Summary<'a>(pub &'a [Run]);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        rule(f, '=', SUMMARY_WIDTH)?;
        writeln!(f, "SUMMARY")?;
        rule(f, '=', SUMMARY_WIDTH)?;
        writeln!(
            f,
            "{:<TITLE_WIDTH$} {:<8} {:>10} {:>7} {:>12}",
            "Algorithm", "Status", "Explored", "Length", "Time (ms)"
        )?;
        rule(f, '-', SUMMARY_WIDTH)?;
        for run in self.0 {
            let result = &run.result;
            let length = match result.len() {
                Some(len) if result.success => len.to_string(),
                _ => "-".to_string(),
            };
            writeln!(
                f,
                "{:<TITLE_WIDTH$} {:<8} {:>10} {:>7} {:>12.3}",
                run.title(),
                if result.success { "SUCCESS" } else { "FAILURE" },
                result.explored,
                length,
                millis(result.elapsed)
            )?;
        }
        Ok(())
    }
}
