// Xiangqi FEN: ten ranks from rank 9 down to rank 0, separated by '/'. Red pieces are
// upper-case, Black pieces lower-case, digits count empty squares.
//
// Full position form: "<board> <w|b> - - <halfmove clock> <fullmove number>". Red is
// written as 'w' following the convention shared with chess tools.

use std::fmt;

use itertools::Itertools;

use crate::board::Board;
use crate::coord::{NUM_FILES, NUM_RANKS, Position};
use crate::error::BoardError;
use crate::grid::Grid;
use crate::piece::BoardEntity;
use crate::side::Side;


pub const STANDARD_FEN: &str =
    "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w - - 0 1";

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum FenError {
    WrongFieldCount(usize),
    WrongRankCount(usize),
    BadRank(String),
    BadPiece(char),
    BadSide(String),
    BadNumber(String),
    Board(BoardError),
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::WrongFieldCount(n) => write!(f, "expected 1 or 6 FEN fields, got {n}"),
            FenError::WrongRankCount(n) => write!(f, "expected 10 ranks, got {n}"),
            FenError::BadRank(s) => write!(f, "rank '{s}' does not describe 9 squares"),
            FenError::BadPiece(ch) => write!(f, "unknown piece '{ch}'"),
            FenError::BadSide(s) => write!(f, "invalid side to move: '{s}'"),
            FenError::BadNumber(s) => write!(f, "invalid move counter: '{s}'"),
            FenError::Board(err) => write!(f, "invalid board: {err}"),
        }
    }
}

impl std::error::Error for FenError {}

impl From<BoardError> for FenError {
    fn from(err: BoardError) -> Self { FenError::Board(err) }
}

// A position parsed from a full FEN string.
#[derive(Clone, Debug)]
pub struct FenPosition {
    pub board: Board,
    pub active_side: Side,
    pub fullmove_number: u32,
}

fn side_to_fen(side: Side) -> char {
    match side {
        Side::Red => 'w',
        Side::Black => 'b',
    }
}

fn side_from_fen(s: &str) -> Result<Side, FenError> {
    match s {
        "w" | "r" => Ok(Side::Red),
        "b" => Ok(Side::Black),
        _ => Err(FenError::BadSide(s.to_owned())),
    }
}

fn rank_to_fen(board: &Board, rank: i8) -> String {
    let mut s = String::new();
    let mut empty = 0;
    for file in 0..NUM_FILES {
        match board.get(Position::new(file, rank)) {
            None => empty += 1,
            Some(entity) => {
                if empty > 0 {
                    s.push_str(&empty.to_string());
                    empty = 0;
                }
                s.push(entity.to_fen_char());
            }
        }
    }
    if empty > 0 {
        s.push_str(&empty.to_string());
    }
    s
}

pub fn board_to_fen(board: &Board) -> String {
    (0..NUM_RANKS).rev().map(|rank| rank_to_fen(board, rank)).join("/")
}

pub fn position_to_fen(board: &Board, active_side: Side, fullmove_number: u32) -> String {
    format!("{} {} - - 0 {}", board_to_fen(board), side_to_fen(active_side), fullmove_number)
}

// Accepts either the board field alone or a full six-field FEN; in the latter case only
// the board is returned.
pub fn board_from_fen(fen: &str) -> Result<Board, FenError> {
    let board_field = fen.split_whitespace().next().unwrap_or("");
    let ranks = board_field.split('/').collect_vec();
    if ranks.len() != NUM_RANKS as usize {
        return Err(FenError::WrongRankCount(ranks.len()));
    }
    let mut grid = Grid::new();
    for (rank_str, rank) in ranks.iter().zip((0..NUM_RANKS).rev()) {
        let mut file = 0;
        for ch in rank_str.chars() {
            if let Some(skip) = ch.to_digit(10) {
                file += skip as i8;
            } else {
                let entity = BoardEntity::from_fen_char(ch).ok_or(FenError::BadPiece(ch))?;
                let pos = Position::try_new(file, rank)
                    .ok_or_else(|| FenError::BadRank((*rank_str).to_owned()))?;
                grid[pos] = Some(entity);
                file += 1;
            }
            if file > NUM_FILES {
                return Err(FenError::BadRank((*rank_str).to_owned()));
            }
        }
        if file != NUM_FILES {
            return Err(FenError::BadRank((*rank_str).to_owned()));
        }
    }
    Ok(Board::from_grid(grid)?)
}

pub fn position_from_fen(fen: &str) -> Result<FenPosition, FenError> {
    let fields = fen.split_whitespace().collect_vec();
    let board = board_from_fen(fen)?;
    match fields.len() {
        1 => Ok(FenPosition { board, active_side: Side::Red, fullmove_number: 1 }),
        6 => {
            let active_side = side_from_fen(fields[1])?;
            let fullmove_number = fields[5]
                .parse()
                .map_err(|_| FenError::BadNumber(fields[5].to_owned()))?;
            Ok(FenPosition { board, active_side, fullmove_number })
        }
        n => Err(FenError::WrongFieldCount(n)),
    }
}
