// Pieces are drawn as pictograms, which take two terminal columns. Every cell is therefore
// four columns wide, headers included.

use console::Style;
use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::xiangqi_prelude::*;


const EMPTY_SQUARE: char = '＋';
const RIVER_SQUARE: char = '～';

fn square_style(pos: Position, last_move: Option<(Position, Position)>) -> Style {
    let background = if last_move.is_some_and(|(from, to)| pos == from || pos == to) {
        194
    } else if Side::iter().any(|side| pos.is_in_palace(side)) {
        230
    } else {
        222
    };
    Style::new().color256(233).on_color256(background)
}

fn piece_color(side: Side) -> u8 {
    match side {
        Side::Red => 160,
        Side::Black => 233,
    }
}

fn render_grid(board: &Board, last_move: Option<(Position, Position)>) -> String {
    let mut ret = String::new();
    for rank in (0..NUM_RANKS).rev() {
        ret.push_str(&format_header(rank.to_string()));
        for file in 0..NUM_FILES {
            let pos = Position::new(file, rank);
            let style = square_style(pos, last_move);
            let square = match board.get(pos) {
                Some(entity) => style
                    .color256(piece_color(entity.side))
                    .apply_to(format_square(piece_to_pictogram(entity.kind, entity.side))),
                None => style.apply_to(format_square(EMPTY_SQUARE)),
            };
            ret.push_str(&square.to_string());
        }
        ret.push('\n');
        if rank == NUM_RANKS / 2 {
            ret.push_str(&format_header(String::new()));
            let river = String::from_iter(std::iter::repeat_n(
                format_square(RIVER_SQUARE),
                NUM_FILES as usize,
            ));
            ret.push_str(&Style::new().color256(25).on_color256(153).apply_to(river).to_string());
            ret.push('\n');
        }
    }
    ret.push_str(&format_header(String::new()));
    ret.push_str(
        &(0..NUM_FILES).map(|file| format_header(file_to_algebraic(file).to_string())).join(""),
    );
    ret.push('\n');
    ret
}

fn render_status(engine: &XiangqiEngine) -> String {
    let active_side = engine.active_side();
    match engine.status() {
        GameStatus::Active if engine.is_in_check(active_side) => {
            let checkers = engine.checkers(active_side).iter().join(", ");
            Style::new()
                .red()
                .apply_to(format!("{active_side:?} to move, in check from {checkers}"))
                .to_string()
        }
        GameStatus::Active => format!("{active_side:?} to move"),
        GameStatus::Checkmate(loser) => Style::new()
            .magenta()
            .apply_to(format!("Checkmate: {:?} wins", loser.opponent()))
            .to_string(),
        GameStatus::Stalemate(loser) => Style::new()
            .magenta()
            .apply_to(format!("Stalemate: {loser:?} cannot move, {:?} wins", loser.opponent()))
            .to_string(),
    }
}

pub fn render_game(engine: &XiangqiEngine) -> String {
    let last_move = engine.last_move();
    let last_move_line = match last_move {
        Some(record) => format!("Last move: {record}\n"),
        None => String::new(),
    };
    format!(
        "{}{}{}\n",
        render_grid(engine.board(), last_move.map(|record| (record.from, record.to))),
        last_move_line,
        render_status(engine),
    )
}

fn format_square(ch: char) -> String { format!(" {} ", ch) }

// ASCII text of up to two characters, padded to the width of a pictogram square.
fn format_header(text: String) -> String { format!(" {:<2} ", text) }
