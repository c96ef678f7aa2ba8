// Test utilities that cannot be moved to the "tests" folder, because stress_test uses them.

use itertools::Itertools;
use lazy_static::lazy_static;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use regex_lite::Regex;

use crate::coord::Position;
use crate::engine::XiangqiEngine;
use crate::error::TurnError;


// In theory random tests verify statistical properties that should always hold, but let's fix
// the seed to avoid sporadic failures.
pub fn deterministic_rng() -> StdRng { StdRng::from_seed([0; 32]) }

// Whitespace-separated moves, each optionally preceded by a move number: "1.C2=5 h8+7 2.H2+3".
pub fn replay_log(engine: &mut XiangqiEngine, log: &str) -> Result<(), TurnError> {
    lazy_static! {
        static ref TURN_NUMBER_RE: Regex = Regex::new(r"^(?:[0-9]+\.)?(.*)$").unwrap();
    }
    for word in log.split_whitespace() {
        let turn_notation = TURN_NUMBER_RE.captures(word).unwrap().get(1).unwrap().as_str();
        if turn_notation.is_empty() {
            continue;
        }
        engine.make_move_text(turn_notation)?;
    }
    Ok(())
}

pub fn all_legal_moves(engine: &XiangqiEngine) -> Vec<(Position, Position)> {
    engine
        .legal_moves()
        .iter()
        .flat_map(|(&from, destinations)| destinations.iter().map(move |&to| (from, to)))
        .collect_vec()
}

pub fn random_legal_move(
    engine: &XiangqiEngine, rng: &mut impl Rng,
) -> Option<(Position, Position)> {
    all_legal_moves(engine).choose(rng).copied()
}

// Plays random legal moves until the game ends or `max_plies` moves were made.
// Returns the number of moves made.
pub fn random_playout(engine: &mut XiangqiEngine, rng: &mut impl Rng, max_plies: usize) -> usize {
    for ply in 0..max_plies {
        let Some((from, to)) = random_legal_move(engine, rng) else {
            return ply;
        };
        engine.make_move(from, to).unwrap();
    }
    max_plies
}
