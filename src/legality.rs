// Check detection and check-safety filtering on top of the piece catalog.
//
// Functions that probe moves take `&mut Board` and use scoped (self-reverting) changes,
// so the board is returned intact on every exit path. Callers that only hold a shared
// reference probe a scratch copy.

use std::collections::BTreeMap;

use itertools::Itertools;

use crate::board::Board;
use crate::coord::Position;
use crate::movement::pseudo_legal_destinations;
use crate::piece::PieceKind;
use crate::side::Side;


pub type MoveTable = BTreeMap<Position, Vec<Position>>;

// Enemy pieces whose pseudo-legal destinations include `side`'s General.
pub fn checkers(board: &Board, side: Side) -> Vec<Position> {
    let general = board.general(side);
    board
        .pieces(side.opponent())
        .map(|(pos, _)| pos)
        .filter(|&pos| pseudo_legal_destinations(board, pos).contains(&general))
        .collect()
}

pub fn is_in_check(board: &Board, side: Side) -> bool {
    let general = board.general(side);
    board
        .pieces(side.opponent())
        .any(|(pos, _)| pseudo_legal_destinations(board, pos).contains(&general))
}

// Whether moving the piece on `from` to `to` would leave its own General attacked.
// Board is guaranteed to be returned intact.
pub fn exposes_general(board: &mut Board, from: Position, to: Position) -> bool {
    let Some(entity) = board.get(from) else {
        return false;
    };
    let board = board.scoped_move(from, to);
    is_in_check(&board, entity.side)
}

// Pseudo-legal destinations of the piece on `from` that keep its General safe.
// Board is guaranteed to be returned intact.
pub fn legal_destinations(board: &mut Board, from: Position) -> Vec<Position> {
    let Some(entity) = board.get(from) else {
        return Vec::new();
    };
    let enemy_general = board.general(entity.side.opponent());
    pseudo_legal_destinations(board, from)
        .into_iter()
        // The face-off destination is an attack marker, not a move.
        .filter(|&to| to != enemy_general)
        .filter(|&to| !exposes_general(board, from, to))
        .collect()
}

// Legal destinations for every piece of `side`, including pieces that cannot move.
// Board is guaranteed to be returned intact.
pub fn legal_moves(board: &mut Board, side: Side) -> MoveTable {
    let positions = board.pieces(side).map(|(pos, _)| pos).collect_vec();
    positions.into_iter().map(|from| (from, legal_destinations(board, from))).collect()
}

pub fn has_legal_move(moves: &MoveTable) -> bool { moves.values().any(|to| !to.is_empty()) }

// Friendly pieces of `side` that shield the General, mapped to the enemy pieces that
// would attack the General if the shielding piece were lifted.
// Board is guaranteed to be returned intact.
pub fn pins(board: &mut Board, side: Side) -> BTreeMap<Position, Vec<Position>> {
    let current_checkers = checkers(board, side);
    let candidates = board
        .pieces(side)
        .filter(|&(_, kind)| kind != PieceKind::General)
        .map(|(pos, _)| pos)
        .collect_vec();
    let mut pins = BTreeMap::new();
    for pos in candidates {
        let board = board.scoped_remove(pos);
        let pinners = checkers(&board, side)
            .into_iter()
            .filter(|attacker| !current_checkers.contains(attacker))
            .collect_vec();
        if !pinners.is_empty() {
            pins.insert(pos, pinners);
        }
    }
    pins
}
