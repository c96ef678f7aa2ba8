use std::fmt;

use crate::coord::Position;
use crate::notation::NotationError;
use crate::piece::PieceKind;
use crate::side::Side;
use crate::snapshot::SnapshotError;


#[macro_export]
macro_rules! internal_error_message {
    () => {
        format!("Internal error at {}:{}.", file!(), line!())
    };
    ($($arg:tt)+) => {
        format!("Internal error at {}:{}: {}.", file!(), line!(), format!($($arg)*))
    };
}


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InvalidMoveReason {
    GameOver,
    OutOfBounds,
    PieceMissing,
    WrongTurnOrder,
    IllegalDestination,
}

// A rejected move. The engine state is never changed by a move that produced this.
// `from` and `to` are `None` only when the caller supplied off-board coordinates.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct InvalidMove {
    pub piece: Option<PieceKind>,
    pub from: Option<Position>,
    pub to: Option<Position>,
    pub reason: InvalidMoveReason,
}

impl InvalidMove {
    pub fn new(
        piece: Option<PieceKind>, from: Position, to: Position, reason: InvalidMoveReason,
    ) -> Self {
        InvalidMove { piece, from: Some(from), to: Some(to), reason }
    }
}

fn format_square(pos: Option<Position>) -> String {
    pos.map_or_else(|| "<off-board>".to_owned(), |pos| pos.to_algebraic())
}

impl fmt::Display for InvalidMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let from = format_square(self.from);
        let to = format_square(self.to);
        match self.reason {
            InvalidMoveReason::GameOver => {
                write!(f, "Cannot move from {from} to {to}: the game is already over")
            }
            InvalidMoveReason::OutOfBounds => {
                write!(f, "Cannot move from {from} to {to}: square is off the board")
            }
            InvalidMoveReason::PieceMissing => write!(f, "No piece found on {from}"),
            InvalidMoveReason::WrongTurnOrder => {
                let name = self.piece.map_or("Piece", PieceKind::name);
                write!(f, "{name} on {from} belongs to the side that is not on move")
            }
            InvalidMoveReason::IllegalDestination => {
                let name = self.piece.map_or("Piece", PieceKind::name);
                write!(f, "{name} cannot move from {from} to {to}")
            }
        }
    }
}

impl std::error::Error for InvalidMove {}


// A caller-supplied board that violates the board invariants.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum BoardError {
    MissingGeneral(Side),
    ExtraGeneral(Side),
    GeneralOutsidePalace(Side, Position),
    // The side that just moved would still be in check: the previous move was illegal.
    InactiveSideInCheck(Side),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::MissingGeneral(side) => write!(f, "{side:?} has no General"),
            BoardError::ExtraGeneral(side) => write!(f, "{side:?} has more than one General"),
            BoardError::GeneralOutsidePalace(side, pos) => {
                write!(f, "{side:?} General on {pos} is outside the palace")
            }
            BoardError::InactiveSideInCheck(side) => {
                write!(f, "{side:?} is in check but it is not {side:?}'s turn")
            }
        }
    }
}

impl std::error::Error for BoardError {}


// A move given in some input form other than a pair of squares.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TurnError {
    Notation(NotationError),
    Snapshot(SnapshotError),
    InvalidMove(InvalidMove),
}

impl fmt::Display for TurnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnError::Notation(err) => write!(f, "{err}"),
            TurnError::Snapshot(err) => write!(f, "{err}"),
            TurnError::InvalidMove(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for TurnError {}

impl From<NotationError> for TurnError {
    fn from(err: NotationError) -> Self { TurnError::Notation(err) }
}

impl From<SnapshotError> for TurnError {
    fn from(err: SnapshotError) -> Self { TurnError::Snapshot(err) }
}

impl From<InvalidMove> for TurnError {
    fn from(err: InvalidMove) -> Self { TurnError::InvalidMove(err) }
}
