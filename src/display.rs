// Plain-text board rendering: Red at the bottom, FEN letters for pieces, '.' for empty
// squares. The river is drawn between rank 5 and rank 4.

use itertools::Itertools;

use crate::board::Board;
use crate::coord::{NUM_FILES, NUM_RANKS, Position};


const RIVER: &str = "~~~~~~~~~~~~~~~~~~~~~~~~~~~";

pub fn file_to_algebraic(file: i8) -> char { (b'a' + file as u8) as char }

// Squares of `last_move`, if given, are wrapped in brackets.
pub fn render_board(board: &Board, last_move: Option<(Position, Position)>) -> String {
    let mut lines = Vec::new();
    for rank in (0..NUM_RANKS).rev() {
        let mut line = format!("{rank} ");
        for file in 0..NUM_FILES {
            let pos = Position::new(file, rank);
            let ch = board.get(pos).map_or('.', |entity| entity.to_fen_char());
            if last_move.is_some_and(|(from, to)| pos == from || pos == to) {
                line.push_str(&format!("[{ch}]"));
            } else {
                line.push_str(&format!(" {ch} "));
            }
        }
        lines.push(line);
        if rank == NUM_RANKS / 2 {
            lines.push(format!("  {RIVER}"));
        }
    }
    let files = (0..NUM_FILES).map(|file| format!(" {} ", file_to_algebraic(file))).join("");
    lines.push(format!("  {files}"));
    lines.iter().map(|line| format!("{}\n", line.trim_end())).join("")
}


#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn standard_board() {
        let rendered = render_board(&Board::standard(), None);
        let lines = rendered.lines().collect_vec();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "9  r  n  b  a  k  a  b  n  r");
        assert_eq!(lines[5], "  ~~~~~~~~~~~~~~~~~~~~~~~~~~~");
        assert_eq!(lines[10], "0  R  N  B  A  K  A  B  N  R");
        assert_eq!(lines[11], "   a  b  c  d  e  f  g  h  i");
    }

    #[test]
    fn highlights_last_move() {
        let board = crate::fen::board_from_fen("4k4/9/9/9/9/9/9/9/4A4/3K5").unwrap();
        let rendered = render_board(&board, Some((Position::new(5, 0), Position::new(4, 1))));
        let expected = indoc! {"
            9  .  .  .  .  k  .  .  .  .
            8  .  .  .  .  .  .  .  .  .
            7  .  .  .  .  .  .  .  .  .
            6  .  .  .  .  .  .  .  .  .
            5  .  .  .  .  .  .  .  .  .
              ~~~~~~~~~~~~~~~~~~~~~~~~~~~
            4  .  .  .  .  .  .  .  .  .
            3  .  .  .  .  .  .  .  .  .
            2  .  .  .  .  .  .  .  .  .
            1  .  .  .  . [A] .  .  .  .
            0  .  .  .  K  . [.] .  .  .
               a  b  c  d  e  f  g  h  i
        "};
        assert_eq!(rendered, expected);
    }
}
