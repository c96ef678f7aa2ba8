// WXF move notation, e.g. "C2=5", "H8+7", "+R-3".
//
// Files are numbered 1 to 9 from each side's own right. After the piece letter and its
// file comes the direction ('+' forward, '-' backward, '=' or '.' sideways) and a number:
// the destination file for sideways and diagonal moves, the number of ranks otherwise.
// When two pieces of the same kind share a file, the file is replaced by a '+' (front) or
// '-' (rear) prefix.

use std::fmt;

use itertools::Itertools;
use lazy_static::lazy_static;
use regex_lite::Regex;

use crate::board::Board;
use crate::coord::{NUM_FILES, Position};
use crate::piece::PieceKind;
use crate::side::Side;


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NotationError {
    Malformed(String),
    UnknownPiece(char),
    PieceNotFound(String),
    Ambiguous(String),
    OffBoard(String),
}

impl fmt::Display for NotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotationError::Malformed(s) => write!(f, "cannot parse move notation '{s}'"),
            NotationError::UnknownPiece(ch) => write!(f, "unknown piece letter '{ch}'"),
            NotationError::PieceNotFound(s) => write!(f, "no piece matches '{s}'"),
            NotationError::Ambiguous(s) => write!(f, "'{s}' matches more than one piece"),
            NotationError::OffBoard(s) => write!(f, "'{s}' leads off the board"),
        }
    }
}

impl std::error::Error for NotationError {}


// Pieces that move along files and ranks write the distance for forward/backward moves.
fn counts_ranks(kind: PieceKind) -> bool {
    matches!(kind, PieceKind::General | PieceKind::Chariot | PieceKind::Cannon | PieceKind::Soldier)
}

fn file_from_wxf(number: u32, side: Side) -> i8 {
    let number = number as i8;
    match side {
        Side::Red => NUM_FILES - number,
        Side::Black => number - 1,
    }
}

fn file_to_wxf(file: i8, side: Side) -> i8 {
    match side {
        Side::Red => NUM_FILES - file,
        Side::Black => file + 1,
    }
}

// Same-kind pieces of `side` on `file`, from rear to front.
fn pieces_on_file(board: &Board, side: Side, kind: PieceKind, file: i8) -> Vec<Position> {
    board
        .pieces(side)
        .filter(|&(pos, k)| k == kind && pos.file() == file)
        .map(|(pos, _)| pos)
        .sorted_by_key(|pos| pos.rank() * side.forward())
        .collect()
}

fn tandem_files(board: &Board, side: Side, kind: PieceKind) -> Vec<i8> {
    (0..NUM_FILES)
        .filter(|&file| pieces_on_file(board, side, kind, file).len() >= 2)
        .collect()
}

pub fn parse_wxf(
    board: &Board, side: Side, notation: &str,
) -> Result<(Position, Position), NotationError> {
    lazy_static! {
        static ref WXF_RE: Regex =
            Regex::new(r"^([+-])?([A-Za-z])([1-9])?([-+=.])([1-9])$").unwrap();
    }
    let notation = notation.trim();
    let malformed = || NotationError::Malformed(notation.to_owned());
    let cap = WXF_RE.captures(notation).ok_or_else(malformed)?;
    let tandem = cap.get(1).map(|m| m.as_str());
    let piece_char = cap.get(2).unwrap().as_str().chars().next().ok_or_else(malformed)?;
    let kind = PieceKind::from_wxf_char(piece_char).ok_or(NotationError::UnknownPiece(piece_char))?;
    let former_file = cap.get(3).map(|m| m.as_str().parse::<u32>().unwrap());
    let direction = cap.get(4).unwrap().as_str();
    let amount: u32 = cap.get(5).unwrap().as_str().parse().unwrap();

    let from = match (tandem, former_file) {
        (Some(_), Some(_)) | (None, None) => return Err(malformed()),
        (None, Some(number)) => {
            let candidates = pieces_on_file(board, side, kind, file_from_wxf(number, side));
            match candidates.as_slice() {
                [] => return Err(NotationError::PieceNotFound(notation.to_owned())),
                [from] => *from,
                _ => return Err(NotationError::Ambiguous(notation.to_owned())),
            }
        }
        (Some(tandem), None) => {
            let files = tandem_files(board, side, kind);
            let file = match files.as_slice() {
                [] => return Err(NotationError::PieceNotFound(notation.to_owned())),
                [file] => *file,
                _ => return Err(NotationError::Ambiguous(notation.to_owned())),
            };
            let candidates = pieces_on_file(board, side, kind, file);
            if candidates.len() > 2 {
                return Err(NotationError::Ambiguous(notation.to_owned()));
            }
            let pick = if tandem == "+" { candidates.last() } else { candidates.first() };
            *pick.ok_or_else(malformed)?
        }
    };

    let off_board = || NotationError::OffBoard(notation.to_owned());
    let to = match direction {
        "=" | "." => Position::try_new(file_from_wxf(amount, side), from.rank()),
        _ => {
            let sign = if direction == "+" { 1 } else { -1 };
            let forward = sign * side.forward();
            if counts_ranks(kind) {
                Position::try_new(from.file(), from.rank() + forward * amount as i8)
            } else {
                let to_file = file_from_wxf(amount, side);
                let rank_delta = match kind {
                    PieceKind::Advisor => 1,
                    PieceKind::Elephant => 2,
                    _ if (to_file - from.file()).abs() == 2 => 1,
                    _ => 2,
                };
                Position::try_new(to_file, from.rank() + forward * rank_delta)
            }
        }
    };
    Ok((from, to.ok_or_else(off_board)?))
}

// ICCS coordinates of both squares, e.g. "h2e2". A separating '-' is accepted.
pub fn parse_iccs(notation: &str) -> Option<(Position, Position)> {
    lazy_static! {
        static ref ICCS_RE: Regex = Regex::new(r"^([a-iA-I][0-9])-?([a-iA-I][0-9])$").unwrap();
    }
    let cap = ICCS_RE.captures(notation.trim())?;
    let from = Position::from_algebraic(cap.get(1)?.as_str())?;
    let to = Position::from_algebraic(cap.get(2)?.as_str())?;
    Some((from, to))
}

pub fn to_iccs(from: Position, to: Position) -> String { format!("{from}{to}") }

// Returns `None` if there is no piece on `from` or if tandem prefixes cannot tell the piece
// apart (three on a file, or tandems on several files). The move itself is not validated.
pub fn to_wxf(board: &Board, from: Position, to: Position) -> Option<String> {
    let entity = board.get(from)?;
    let side = entity.side;
    let kind = entity.kind;

    let same_file = pieces_on_file(board, side, kind, from.file());
    let prefix = match same_file.len() {
        1 => format!("{}{}", kind.to_wxf_char(), file_to_wxf(from.file(), side)),
        2 if tandem_files(board, side, kind).len() == 1 => {
            let front = same_file.last() == Some(&from);
            format!("{}{}", if front { '+' } else { '-' }, kind.to_wxf_char())
        }
        _ => return None,
    };

    let forward = (to.rank() - from.rank()) * side.forward();
    let (direction, amount) = if forward == 0 {
        ('=', file_to_wxf(to.file(), side))
    } else {
        let direction = if forward > 0 { '+' } else { '-' };
        if counts_ranks(kind) {
            (direction, forward.abs())
        } else {
            (direction, file_to_wxf(to.file(), side))
        }
    };
    Some(format!("{prefix}{direction}{amount}"))
}
