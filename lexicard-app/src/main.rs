mod cli;
pub mod api;
pub mod lexicon;
pub mod logging;
pub mod settings;
pub mod tui;

use anyhow::Result;
use clap::Parser; // needed for Cli::parse()
use std::sync::Arc;
use tokio::runtime::Runtime;

use cli::commands::{open_repo, run_cli};
use cli::opts::{Cli, Command};
use tui::app::TuiApp;

fn main() -> Result<()> {
    let args = Cli::parse();
    // The TUI owns the terminal, so it only logs warnings and worse.
    let level = if matches!(args.cmd, Command::Tui) { "warn" } else { "info" };
    logging::init_logging(args.log_json, level);

    match &args.cmd {
        // Run TUI on its own thread/runtime (no nested Tokio)
        Command::Tui => {
            let rt = Arc::new(Runtime::new()?);
            let repo = rt.block_on(open_repo(args.data_dir.as_deref()))?;
            let mut app = TuiApp::new(repo, rt, args.engine_settings());
            app.run()
        }
        // Everything else uses a single runtime here
        _ => {
            let rt = Runtime::new()?;
            rt.block_on(run_cli(args))
        }
    }
}
