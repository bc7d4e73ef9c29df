use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use chrono::{DateTime, Utc};
use log::{debug, info};
use tokio::sync::{Mutex, MutexGuard, RwLock};

use crate::{
    error::EditorError,
    logic::editor::{LayoutEditor, DEFAULT_COLS, DEFAULT_ROWS},
    models::layout::FarmGrid,
    storage::LayoutPersistence,
};

/// One user's editor plus the flag that keeps saves from overlapping.
#[derive(Debug, Default)]
pub struct EditorSession {
    editor: Mutex<LayoutEditor>,
    saving: AtomicBool,
}

impl EditorSession {
    pub async fn editor(&self) -> MutexGuard<'_, LayoutEditor> {
        self.editor.lock().await
    }

    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::SeqCst)
    }

    fn begin_save(&self) -> Option<SaveGuard<'_>> {
        self.saving
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| SaveGuard(&self.saving))
    }
}

/// Clears the saving flag when the save finishes, fails or is dropped.
struct SaveGuard<'a>(&'a AtomicBool);

impl Drop for SaveGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Whether `load` found a saved layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Restored,
    Fresh,
}

/// Editor sessions keyed by username, bridged to durable storage.
pub struct LayoutService {
    sessions: RwLock<HashMap<String, Arc<EditorSession>>>,
    persistence: LayoutPersistence,
}

impl LayoutService {
    pub fn new(persistence: LayoutPersistence) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            persistence,
        }
    }

    /// Returns the user's session, starting a default one on first use.
    pub async fn session(&self, user: &str) -> Arc<EditorSession> {
        if let Some(session) = self.sessions.read().await.get(user) {
            return session.clone();
        }
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(user.to_string())
            .or_insert_with(|| {
                debug!("starting editor session for '{user}'");
                Arc::new(EditorSession::default())
            })
            .clone()
    }

    /// Replaces the user's layout with the saved one, or with an empty default
    /// grid when nothing was saved. A storage failure leaves the session as it was.
    pub async fn load(&self, user: &str) -> Result<LoadStatus, EditorError> {
        let session = self.session(user).await;
        let mut editor = session.editor().await;
        match self.persistence.load(user).await? {
            Some(loaded) => {
                editor.load(loaded.grid);
                Ok(LoadStatus::Restored)
            }
            None => {
                info!("starting '{user}' on an empty {DEFAULT_ROWS}x{DEFAULT_COLS} layout");
                editor.load(FarmGrid::empty(DEFAULT_ROWS, DEFAULT_COLS));
                Ok(LoadStatus::Fresh)
            }
        }
    }

    /// Saves the current grid. Editing stays possible while the write is in
    /// flight; a second save for the same user is refused until it completes.
    pub async fn save(&self, user: &str) -> Result<DateTime<Utc>, EditorError> {
        let session = self.session(user).await;
        let _guard = session.begin_save().ok_or(EditorError::SaveInProgress)?;
        let snapshot = session.editor().await.grid().clone();
        Ok(self.persistence.save(user, &snapshot).await?)
    }
}
