use std::collections::BTreeMap;

use serde_json::json;

use crate::xiangqi_prelude::*;


pub struct MovesConfig {
    pub fen: Option<String>,
}

fn algebraic_list(squares: &[Position]) -> Vec<String> {
    squares.iter().map(|pos| pos.to_algebraic()).collect()
}

pub fn run(config: MovesConfig) -> anyhow::Result<()> {
    let engine = crate::engine_from_args(config.fen.as_deref())?;
    let active_side = engine.active_side();
    let moves: BTreeMap<String, Vec<String>> = engine
        .legal_moves()
        .iter()
        .filter(|(_, destinations)| !destinations.is_empty())
        .map(|(from, destinations)| (from.to_algebraic(), algebraic_list(destinations)))
        .collect();
    let pins: BTreeMap<String, Vec<String>> = engine
        .pins()
        .iter()
        .map(|(pinned, pinners)| (pinned.to_algebraic(), algebraic_list(pinners)))
        .collect();
    let report = json!({
        "fen": engine.fen(),
        "active_side": active_side,
        "status": engine.status(),
        "checkers": algebraic_list(engine.checkers(active_side)),
        "pins": pins,
        "moves": moves,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
