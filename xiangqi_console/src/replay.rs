use anyhow::Context;

use crate::tui;


pub struct ReplayConfig {
    pub log_file: String,
    pub fen: Option<String>,
}

// Empty lines and lines starting with '#' are skipped.
pub fn run(config: ReplayConfig) -> anyhow::Result<()> {
    let log = std::fs::read_to_string(&config.log_file)
        .with_context(|| format!("Reading {}", config.log_file))?;
    let mut engine = crate::engine_from_args(config.fen.as_deref())?;
    for (line_idx, line) in log.lines().enumerate() {
        let text = line.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        engine.make_move_text(text).with_context(|| {
            format!("{}:{}: cannot apply \"{text}\"", config.log_file, line_idx + 1)
        })?;
    }
    log::info!("Replayed {} moves from {}", engine.history().len(), config.log_file);
    print!("{}", tui::render_game(&engine));
    println!("{}", engine.fen());
    Ok(())
}
