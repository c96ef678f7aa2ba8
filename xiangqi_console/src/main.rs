// Legend for various fix-this comments:
//   * "TODO" - bug or missing crucial feature.
//   * "Improvement potential" - missing nice-to-have feature or an opportunity
//       to make code better or faster.

#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod tui;

mod moves;
mod play;
mod replay;
mod xiangqi_prelude;

use clap::{Command, arg};
use xiangqi::engine::XiangqiEngine;


fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let fen_arg = || arg!(--"fen" <fen> "Starting position in Xiangqi FEN; standard setup if omitted");
    let matches = Command::new("Xiangqi")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .about("Xiangqi rule engine console app")
        .subcommand_required(true)
        .subcommand(
            Command::new("play")
                .about("Play a game in the terminal, both sides at the same keyboard")
                .arg(fen_arg()),
        )
        .subcommand(
            Command::new("replay")
                .about("Replays a game log (one WXF or ICCS move per line) and prints the result")
                .arg(arg!(<log_file> "Path to the game log"))
                .arg(fen_arg()),
        )
        .subcommand(
            Command::new("moves")
                .about("Prints legal moves of the side to move as JSON")
                .arg(fen_arg()),
        )
        .subcommand(
            Command::new("stress-test")
                .about(concat!(
                    "Plays random games and verifies engine invariants. ",
                    "Can be used for testing or benchmarking."
                ))
                .arg(
                    arg!(-'n' --"games" <n> "Number of games per batch")
                        .value_parser(1..=100_000)
                        .default_value("100"),
                )
                .arg(
                    arg!(--"batches" <n> "Stop after this many batches; runs forever if omitted")
                        .value_parser(1..=1_000_000),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("play", sub_matches)) => {
            play::run(play::PlayConfig { fen: sub_matches.get_one::<String>("fen").cloned() })
        }
        Some(("replay", sub_matches)) => replay::run(replay::ReplayConfig {
            log_file: sub_matches.get_one::<String>("log_file").unwrap().clone(),
            fen: sub_matches.get_one::<String>("fen").cloned(),
        }),
        Some(("moves", sub_matches)) => {
            moves::run(moves::MovesConfig { fen: sub_matches.get_one::<String>("fen").cloned() })
        }
        Some(("stress-test", sub_matches)) => stress_test::run(stress_test::StressTestConfig {
            games_per_batch: *sub_matches.get_one::<i64>("games").unwrap() as usize,
            batches: sub_matches.get_one::<i64>("batches").map(|&n| n as usize),
        }),
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    }
}

fn engine_from_args(fen: Option<&str>) -> anyhow::Result<XiangqiEngine> {
    Ok(match fen {
        Some(fen) => XiangqiEngine::from_fen(fen)?,
        None => XiangqiEngine::standard(),
    })
}
