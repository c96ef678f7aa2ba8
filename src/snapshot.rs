// Recovers a move from two pictures of the board, as produced by a camera watching a
// physical game.

use std::fmt;

use itertools::Itertools;

use crate::board::Board;
use crate::coord::Position;
use crate::piece::BoardEntity;
use crate::side::Side;


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SnapshotError {
    NoChange,
    // The squares that differ cannot be explained by a single move of the side to move.
    Inconsistent(Vec<Position>),
    // A piece left `from` but a different piece appeared on `to`.
    PieceMismatch { from: Position, to: Position },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::NoChange => write!(f, "the board did not change"),
            SnapshotError::Inconsistent(squares) => {
                write!(f, "changes on {} do not form a single move", squares.iter().join(", "))
            }
            SnapshotError::PieceMismatch { from, to } => {
                write!(f, "the piece that left {from} is not the piece that arrived on {to}")
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

fn is_own(entity: Option<BoardEntity>, side: Side) -> bool {
    entity.is_some_and(|entity| entity.side == side)
}

// Finds the move by `side` that turns `before` into `after`: exactly one square vacated by
// a piece of `side` and exactly one square newly taken by that same piece. Legality is not
// checked here.
pub fn infer_move(
    before: &Board, after: &Board, side: Side,
) -> Result<(Position, Position), SnapshotError> {
    let changed = Position::all().filter(|&pos| before.get(pos) != after.get(pos)).collect_vec();
    if changed.is_empty() {
        return Err(SnapshotError::NoChange);
    }
    let vacated = changed
        .iter()
        .copied()
        .filter(|&pos| is_own(before.get(pos), side) && after.get(pos).is_none())
        .collect_vec();
    let taken = changed
        .iter()
        .copied()
        .filter(|&pos| is_own(after.get(pos), side) && !is_own(before.get(pos), side))
        .collect_vec();
    let (&[from], &[to]) = (vacated.as_slice(), taken.as_slice()) else {
        return Err(SnapshotError::Inconsistent(changed));
    };
    if changed.len() != 2 {
        return Err(SnapshotError::Inconsistent(changed));
    }
    if before.get(from) != after.get(to) {
        return Err(SnapshotError::PieceMismatch { from, to });
    }
    Ok((from, to))
}
