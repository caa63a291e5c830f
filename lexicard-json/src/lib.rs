use chrono::{DateTime, Utc};
use lexicard_core::repo::{append_card, deck_key, flag_card, Repository};
use lexicard_core::{Card, CardId, CoreError, Deck};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::task;
use tracing::{debug, warn};

pub mod deck_file;
pub mod paths;

const FILE_VERSION: u32 = 1;

#[derive(Clone, Serialize, Deserialize)]
struct FileImage {
    version: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    decks: Vec<Deck>,
}

#[derive(Clone)]
struct State {
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    decks: HashMap<String, Deck>,
}

impl State {
    fn new_empty() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            decks: HashMap::new(),
        }
    }

    fn to_image(&self) -> FileImage {
        let mut decks: Vec<Deck> = self.decks.values().cloned().collect();
        decks.sort_by(|a, b| a.name.cmp(&b.name));
        FileImage {
            version: FILE_VERSION,
            created_at: self.created_at,
            updated_at: self.updated_at,
            decks,
        }
    }

    fn from_image(img: FileImage) -> Self {
        let decks = img
            .decks
            .into_iter()
            .map(|d| (deck_key(&d.name), d))
            .collect();
        Self {
            created_at: img.created_at,
            updated_at: img.updated_at,
            decks,
        }
    }
}

/// All decks in one JSON file, rewritten atomically on every change with a
/// rotating set of timestamped backups next to it.
pub struct JsonStore {
    path: PathBuf,
    backups_dir: PathBuf,
    max_backups: usize,
    state: RwLock<State>,
}

impl JsonStore {
    pub async fn open_default() -> Result<Self, CoreError> {
        let (file, backups) = paths::default_store_file();
        Self::open_with(file, backups, 10).await
    }

    pub async fn open_in(dir: &Path) -> Result<Self, CoreError> {
        let (file, backups) = paths::store_file_in(dir);
        Self::open_with(file, backups, 10).await
    }

    pub async fn open_with(path: PathBuf, backups_dir: PathBuf, max_backups: usize) -> Result<Self, CoreError> {
        ensure_parent_dirs(&path)?;
        ensure_dir(&backups_dir)?;
        let state = load_or_init(&path, &backups_dir).await?;
        debug!(path = %path.display(), decks = state.decks.len(), "json store opened");
        Ok(Self {
            path,
            backups_dir,
            max_backups: max_backups.max(1),
            state: RwLock::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn save(&self) -> Result<(), CoreError> {
        let snapshot = {
            let mut s = self.state.write();
            s.updated_at = Utc::now();
            s.to_image()
        };
        let path = self.path.clone();
        let backups = self.backups_dir.clone();
        let keep = self.max_backups;

        task::spawn_blocking(move || write_with_backup(&path, &backups, keep, &snapshot))
            .await
            .map_err(|_| CoreError::Storage("io"))?
            .map_err(|e| {
                warn!(error = %e, "failed to write json store");
                CoreError::Storage("io")
            })?;
        Ok(())
    }
}

fn ensure_parent_dirs(path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    Ok(())
}

fn ensure_dir(path: &Path) -> Result<(), CoreError> {
    fs::create_dir_all(path).map_err(|_| CoreError::Storage("io"))
}

async fn load_or_init(path: &Path, backups_dir: &Path) -> Result<State, CoreError> {
    if path.exists() {
        let p = path.to_path_buf();
        let img: FileImage = task::spawn_blocking(move || {
            let mut f = fs::File::open(&p)?;
            let mut buf = String::new();
            f.read_to_string(&mut buf)?;
            let v = serde_json::from_str::<FileImage>(&buf)?;
            Ok::<FileImage, std::io::Error>(v)
        })
        .await
        .map_err(|_| CoreError::Storage("io"))
        .and_then(|r| r.map_err(|_| CoreError::Storage("corrupt store file")))?;
        if img.version > FILE_VERSION {
            return Err(CoreError::Storage("store file from a newer version"));
        }
        Ok(State::from_image(img))
    } else {
        let st = State::new_empty();
        write_with_backup(path, backups_dir, 1, &st.to_image()).map_err(|_| CoreError::Storage("io"))?;
        Ok(st)
    }
}

fn write_with_backup(path: &Path, backups_dir: &Path, max_backups: usize, img: &FileImage) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::create_dir_all(backups_dir)?;

    let json = serde_json::to_vec_pretty(img)?;
    let mut tmp = NamedTempFile::new_in(path.parent().unwrap_or_else(|| Path::new(".")))?;
    tmp.write_all(&json)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;

    // Backup rotation
    let ts = chrono::Local::now().format("%Y%m%d-%H%M%S%.3f");
    let backup_path = backups_dir.join(format!("lexicard-{ts}.json"));
    let mut btmp = NamedTempFile::new_in(backups_dir)?;
    btmp.write_all(&json)?;
    btmp.flush()?;
    btmp.persist(&backup_path).map_err(|e| e.error)?;

    rotate_backups(backups_dir, max_backups)
}

fn rotate_backups(dir: &Path, keep: usize) -> Result<(), std::io::Error> {
    let mut entries: Vec<_> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    // names embed the timestamp, so lexical order is age order
    entries.sort_by_key(|e| e.file_name());
    if entries.len() > keep {
        for e in &entries[0..entries.len() - keep] {
            let _ = fs::remove_file(e.path());
        }
    }
    Ok(())
}

use async_trait::async_trait;

#[async_trait]
impl Repository for JsonStore {
    async fn create_deck(&self, name: &str, target_language: &str) -> Result<Deck, CoreError> {
        if name.trim().is_empty() {
            return Err(CoreError::Invalid("deck name is empty"));
        }
        let deck = Deck::new(name.trim(), target_language);
        {
            let mut s = self.state.write();
            if s.decks.contains_key(&deck_key(name)) {
                return Err(CoreError::Conflict("deck name already exists"));
            }
            s.decks.insert(deck_key(name), deck.clone());
        }
        self.save().await?;
        Ok(deck)
    }

    async fn save_deck(&self, deck: &Deck) -> Result<(), CoreError> {
        self.state.write().decks.insert(deck_key(&deck.name), deck.clone());
        self.save().await
    }

    async fn get_deck(&self, name: &str) -> Result<Deck, CoreError> {
        let s = self.state.read();
        s.decks.get(&deck_key(name)).cloned().ok_or(CoreError::NotFound("deck"))
    }

    async fn list_decks(&self) -> Result<Vec<Deck>, CoreError> {
        let s = self.state.read();
        Ok(s.decks.values().cloned().collect())
    }

    async fn delete_deck(&self, name: &str) -> Result<(), CoreError> {
        let removed = self.state.write().decks.remove(&deck_key(name));
        if removed.is_none() {
            return Err(CoreError::NotFound("deck"));
        }
        self.save().await
    }

    async fn add_card(
        &self,
        deck: &str,
        target_word: &str,
        phonetic: &str,
        explain: &str,
        sound: Option<&str>,
    ) -> Result<Card, CoreError> {
        let card = {
            let mut s = self.state.write();
            let Some(d) = s.decks.get_mut(&deck_key(deck)) else {
                return Err(CoreError::NotFound("deck"));
            };
            append_card(d, target_word, phonetic, explain, sound)?
        };
        self.save().await?;
        Ok(card)
    }

    async fn set_correction_flag(&self, deck: &str, card: CardId, flag: bool) -> Result<(), CoreError> {
        {
            let mut s = self.state.write();
            let Some(d) = s.decks.get_mut(&deck_key(deck)) else {
                return Err(CoreError::NotFound("deck"));
            };
            flag_card(d, card, flag)?;
        }
        self.save().await
    }
}
