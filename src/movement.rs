// Piece catalog: how each kind of piece moves, before check safety is considered.
//
// Every function here is pure with respect to the board. Out-of-bounds or rule-breaking
// squares are simply left out of the result; rejecting a move is the engine's job.

use crate::board::Board;
use crate::coord::{Delta, Position};
use crate::piece::PieceKind;
use crate::side::Side;


const HORSE_DELTAS: [Delta; 8] = [
    Delta::new(1, 2),
    Delta::new(-1, 2),
    Delta::new(1, -2),
    Delta::new(-1, -2),
    Delta::new(2, 1),
    Delta::new(2, -1),
    Delta::new(-2, 1),
    Delta::new(-2, -1),
];

const SIDEWAYS: [Delta; 2] = [Delta::new(1, 0), Delta::new(-1, 0)];


// Squares a piece of this kind could reach from `from` on an empty board. For sliding
// pieces this is the whole file and rank. Palace and river limits are applied here,
// blocking and landing rules are not.
pub fn candidate_squares(kind: PieceKind, side: Side, from: Position) -> Vec<Position> {
    let steps = |deltas: &[Delta]| -> Vec<Position> {
        deltas.iter().filter_map(|&delta| from.offset(delta)).collect()
    };
    match kind {
        PieceKind::General => {
            steps(&Delta::ORTHOGONAL).into_iter().filter(|to| to.is_in_palace(side)).collect()
        }
        PieceKind::Advisor => {
            steps(&Delta::DIAGONAL).into_iter().filter(|to| to.is_in_palace(side)).collect()
        }
        PieceKind::Elephant => {
            let deltas = Delta::DIAGONAL.map(|d| d * 2);
            steps(&deltas).into_iter().filter(|to| to.is_on_own_half(side)).collect()
        }
        PieceKind::Horse => steps(&HORSE_DELTAS),
        PieceKind::Chariot | PieceKind::Cannon => Delta::ORTHOGONAL
            .iter()
            .flat_map(|&dir| ray(from, dir))
            .collect(),
        PieceKind::Soldier => {
            let mut deltas = vec![Delta::new(0, side.forward())];
            if from.has_crossed_river(side) {
                deltas.extend(SIDEWAYS);
            }
            steps(&deltas)
        }
    }
}

// Squares from `from` (exclusive) to the edge of the board in direction `dir`.
fn ray(from: Position, dir: Delta) -> impl Iterator<Item = Position> {
    let mut pos = from;
    std::iter::from_fn(move || {
        pos = pos.offset(dir)?;
        Some(pos)
    })
}

fn can_land(board: &Board, side: Side, to: Position) -> bool {
    board.get(to).is_none_or(|entity| entity.side != side)
}

// The square that must be empty for a step to be possible: the Elephant's eye or the
// Horse's leg. Both are the step halved toward zero.
fn blocking_square(from: Position, to: Position) -> Position {
    let half = (to - from).halved();
    Position::new(from.file() + half.file, from.rank() + half.rank)
}

// All destinations of the piece on `from` under its movement rule, including captures
// of enemy pieces, excluding squares held by friendly pieces. Ignores check safety.
// The General's "flying general" face-off is reported as a destination on the enemy
// General's square.
pub fn pseudo_legal_destinations(board: &Board, from: Position) -> Vec<Position> {
    let Some(entity) = board.get(from) else {
        return Vec::new();
    };
    let side = entity.side;
    match entity.kind {
        PieceKind::General => {
            let mut destinations: Vec<_> = candidate_squares(entity.kind, side, from)
                .into_iter()
                .filter(|&to| can_land(board, side, to))
                .collect();
            if let Some(enemy_general) = facing_general(board, from, side) {
                destinations.push(enemy_general);
            }
            destinations
        }
        PieceKind::Advisor | PieceKind::Soldier => candidate_squares(entity.kind, side, from)
            .into_iter()
            .filter(|&to| can_land(board, side, to))
            .collect(),
        PieceKind::Elephant | PieceKind::Horse => candidate_squares(entity.kind, side, from)
            .into_iter()
            .filter(|&to| board.get(blocking_square(from, to)).is_none())
            .filter(|&to| can_land(board, side, to))
            .collect(),
        PieceKind::Chariot => {
            Delta::ORTHOGONAL.iter().flat_map(|&dir| chariot_line(board, side, from, dir)).collect()
        }
        PieceKind::Cannon => {
            Delta::ORTHOGONAL.iter().flat_map(|&dir| cannon_line(board, side, from, dir)).collect()
        }
    }
}

pub fn is_pseudo_legal(board: &Board, from: Position, to: Position) -> bool {
    pseudo_legal_destinations(board, from).contains(&to)
}

// Empty squares up to the first piece, plus that piece if it is an enemy.
fn chariot_line(board: &Board, side: Side, from: Position, dir: Delta) -> Vec<Position> {
    let mut destinations = Vec::new();
    for pos in ray(from, dir) {
        match board.get(pos) {
            None => destinations.push(pos),
            Some(entity) => {
                if entity.side != side {
                    destinations.push(pos);
                }
                break;
            }
        }
    }
    destinations
}

// Quiet moves slide like a Chariot but cannot land on the first piece. Captures need
// exactly one piece of either side (the screen) in between, and take the first piece
// beyond it if that piece is an enemy.
fn cannon_line(board: &Board, side: Side, from: Position, dir: Delta) -> Vec<Position> {
    let mut destinations = Vec::new();
    let mut screen_found = false;
    for pos in ray(from, dir) {
        match (board.get(pos), screen_found) {
            (None, false) => destinations.push(pos),
            (None, true) => {}
            (Some(_), false) => screen_found = true,
            (Some(entity), true) => {
                if entity.side != side {
                    destinations.push(pos);
                }
                break;
            }
        }
    }
    destinations
}

// Returns the enemy General's square if it stands on the same file as the General on
// `from` with nothing in between.
fn facing_general(board: &Board, from: Position, side: Side) -> Option<Position> {
    let first_piece = ray(from, Delta::new(0, side.forward())).find(|&pos| board.get(pos).is_some())?;
    let entity = board.get(first_piece)?;
    (entity.kind == PieceKind::General && entity.side != side).then_some(first_piece)
}
