// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use itertools::Itertools;
use xiangqi::board::Board;
use xiangqi::coord::{NUM_FILES, NUM_RANKS, Position};
use xiangqi::grid::Grid;
use xiangqi::piece::{BoardEntity, PieceKind};
use xiangqi::side::Side;


#[derive(Clone, Copy, Debug)]
pub struct PieceMatcher {
    pub side: Side,
    pub kind: PieceKind,
}

pub trait PieceIs {
    fn is(self, matcher: PieceMatcher) -> bool;
}

impl PieceIs for Option<BoardEntity> {
    fn is(self, matcher: PieceMatcher) -> bool {
        if let Some(entity) = self {
            entity.kind == matcher.kind && entity.side == matcher.side
        } else {
            false
        }
    }
}

#[macro_export]
macro_rules! piece {
    ($side:ident $kind:ident) => {
        common::PieceMatcher {
            side: xiangqi::side::Side::$side,
            kind: xiangqi::piece::PieceKind::$kind,
        }
    };
}

#[allow(dead_code)]
pub fn pos(algebraic: &str) -> Position {
    Position::from_algebraic(algebraic).unwrap_or_else(|| panic!("Invalid square: {algebraic}"))
}

#[allow(dead_code)]
pub fn sorted(squares: &[Position]) -> Vec<Position> { squares.iter().copied().sorted().collect() }

#[allow(dead_code)]
pub fn squares(list: &[&str]) -> Vec<Position> { list.iter().map(|s| pos(s)).sorted().collect() }

// Parses a diagram with rank 9 on top. Pieces use FEN letters, '.' is an empty square.
#[allow(dead_code)]
pub fn parse_board(board_str: &str) -> Result<Board, String> {
    let ranks = board_str
        .split('\n')
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.split_ascii_whitespace().collect_vec())
        .collect_vec();
    assert_eq!(ranks.len(), NUM_RANKS as usize);
    assert!(ranks.iter().all(|rank| rank.len() == NUM_FILES as usize));
    let mut grid = Grid::new();
    for (rank_idx, rank) in ranks.iter().rev().enumerate() {
        for (file_idx, piece_str) in rank.iter().enumerate() {
            let piece_char = piece_str
                .chars()
                .exactly_one()
                .map_err(|_| format!("Invalid piece: {}", piece_str))?;
            let pos = Position::new(file_idx as i8, rank_idx as i8);
            grid[pos] = if piece_char == '.' {
                None
            } else {
                Some(
                    BoardEntity::from_fen_char(piece_char)
                        .ok_or_else(|| format!("Invalid piece: {}", piece_char))?,
                )
            };
        }
    }
    Board::from_grid(grid).map_err(|err| err.to_string())
}


#[cfg(test)]
mod tests {
    use xiangqi::fen::board_from_fen;

    use super::*;

    #[test]
    fn parse_board_matches_fen() {
        let board_str = "
            r n b a k a b n r
            . . . . . . . . .
            . c . . . . . c .
            p . p . p . p . p
            . . . . . . . . .
            . . . . . . . . .
            P . P . P . P . P
            . C . . C . . . .
            . . . . . . . . .
            R N B A K A B N R
        ";
        let board = parse_board(board_str).unwrap();
        let expected =
            board_from_fen("rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C2C4/9/RNBAKABNR").unwrap();
        assert_eq!(board, expected);
    }
}
