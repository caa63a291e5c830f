use crate::settings::CardOrigins;
use lexicard_core::{BucketEngine, SessionScore};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

pub type SessionId = Uuid;

/// One learner's practice state. Engines are never shared between sessions.
pub struct Session {
    pub decks: Vec<String>,
    pub engine: BucketEngine,
    pub origins: CardOrigins,
    pub score: SessionScore,
}

/// Session-keyed engine store. Each session sits behind its own mutex so one
/// learner's requests are serialized without blocking anyone else.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<Session>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, decks: Vec<String>, engine: BucketEngine, origins: CardOrigins) -> SessionId {
        let id = Uuid::new_v4();
        let session = Session {
            decks,
            engine,
            origins,
            score: SessionScore::default(),
        };
        self.sessions.write().insert(id, Arc::new(Mutex::new(session)));
        id
    }

    pub fn get(&self, id: &SessionId) -> Option<Arc<Mutex<Session>>> {
        self.sessions.read().get(id).cloned()
    }

    pub fn remove(&self, id: &SessionId) -> bool {
        self.sessions.write().remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
