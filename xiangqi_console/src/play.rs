use std::io::{self, BufRead, Write};

use console::Style;
use itertools::Itertools;

use crate::tui;
use crate::xiangqi_prelude::*;


const HELP: &str = "\
Enter moves in ICCS (h2e2) or WXF (C2=5).
  <square>  list destinations of the piece on the square, e.g. b0
  moves     list all legal moves
  fen       print the current position
  quit      leave the game";

pub struct PlayConfig {
    pub fen: Option<String>,
}

fn list_moves(engine: &XiangqiEngine) -> String {
    engine
        .legal_moves()
        .iter()
        .filter(|(_, destinations)| !destinations.is_empty())
        .map(|(from, destinations)| format!("{from}: {}", destinations.iter().join(" ")))
        .join("\n")
}

pub fn run(config: PlayConfig) -> anyhow::Result<()> {
    let mut engine = crate::engine_from_args(config.fen.as_deref())?;
    let mut lines = io::stdin().lock().lines();
    println!("{HELP}\n");
    let mut redraw = true;
    loop {
        if redraw {
            println!("{}", tui::render_game(&engine));
        }
        redraw = false;
        if !engine.is_active() {
            return Ok(());
        }
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line?;
        let input = line.trim();
        match input {
            "" => {}
            "quit" | "exit" => return Ok(()),
            "help" => println!("{HELP}"),
            "moves" => println!("{}", list_moves(&engine)),
            "fen" => println!("{}", engine.fen()),
            _ => {
                if let Some(pos) = Position::from_algebraic(input) {
                    println!("{pos}: {}", engine.valid_moves(pos).iter().join(" "));
                    continue;
                }
                match engine.make_move_text(input) {
                    Ok(_) => redraw = true,
                    Err(err) => println!("{}", Style::new().red().apply_to(err)),
                }
            }
        }
    }
}
