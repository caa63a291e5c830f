use clap::{Args, Parser, Subcommand};
use lexicard_core::{EngineConfig, DEFAULT_CAPACITY, DEFAULT_PICK_ATTEMPTS};
use std::path::PathBuf;

use crate::settings::EngineSettings;

#[derive(Debug, Parser, Clone)]
#[command(name = "lexicard", version, about = "Lexicard vocabulary trainer CLI/TUI/API")]
pub struct Cli {
    /// Directory holding the deck store (defaults to the app data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Maximum cards a session tracks before known cards are evicted
    #[arg(long, global = true, default_value_t = DEFAULT_CAPACITY)]
    pub capacity: usize,

    /// Weighted draws before a pick falls back to a flat scan
    #[arg(long, global = true, default_value_t = DEFAULT_PICK_ATTEMPTS)]
    pub pick_attempts: usize,

    /// Seed the card picker for a reproducible session
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

impl Cli {
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            config: EngineConfig {
                capacity: self.capacity,
                pick_attempts: self.pick_attempts,
            },
            seed: self.seed,
        }
    }
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Deck operations (CLI)
    #[command(subcommand)]
    Deck(DeckCmd),
    /// Card operations (CLI)
    #[command(subcommand)]
    Card(CardCmd),
    /// Single-card practice loop (CLI)
    Practice(PracticeCmd),
    /// Multiple-choice quiz loop (CLI)
    Quiz(PracticeCmd),
    /// Launch Terminal UI
    Tui,
    /// Launch Axum HTTP API
    Api(ApiCmd),
}

#[derive(Debug, Subcommand, Clone)]
pub enum DeckCmd {
    Add {
        name: String,
        #[arg(long, default_value = "th")]
        lang: String,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    List,
    Show(DeckShow),
    Rm { deck: String },
    /// Import a single-deck JSON file
    Import {
        path: PathBuf,
        #[arg(long)]
        replace: bool,
    },
    /// Export a deck as a single-deck JSON file
    Export { deck: String, path: PathBuf },
    /// Import a lexicon CSV (tid,sound,check_for_correction,phonetic,target_word,explain)
    ImportCsv(CsvImport),
    ExportCsv { deck: String, path: PathBuf },
}

#[derive(Debug, Args, Clone)]
pub struct DeckShow {
    pub deck: String,
    #[arg(long)]
    pub query: Option<String>,
    /// Only cards flagged for correction
    #[arg(long)]
    pub flagged: bool,
    /// Only cards with audio
    #[arg(long)]
    pub audio: bool,
}

#[derive(Debug, Args, Clone)]
pub struct CsvImport {
    pub path: PathBuf,
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "th")]
    pub lang: String,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub replace: bool,
}

#[derive(Debug, Subcommand, Clone)]
pub enum CardCmd {
    Add(CardAdd),
    /// Mark a card as needing correction (typo report)
    Flag {
        #[arg(long)]
        deck: String,
        card_id: u64,
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Debug, Args, Clone)]
pub struct CardAdd {
    #[arg(long)]
    pub deck: String,
    #[arg(long)]
    pub word: String,
    #[arg(long, default_value = "")]
    pub phonetic: String,
    #[arg(long)]
    pub explain: String,
    #[arg(long)]
    pub sound: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct PracticeCmd {
    /// Deck(s) to practice; later decks are added under the capacity limit
    #[arg(long = "deck", required = true)]
    pub decks: Vec<String>,
    #[arg(long, default_value_t = 50)]
    pub max: usize,
}

#[derive(Debug, Args, Clone)]
pub struct ApiCmd {
    /// Bind address (host:port)
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub addr: String,
}
