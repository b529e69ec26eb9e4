//! In-process store used when no database is configured, and by the tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use betukereso_core::EngineError;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::Store;
use crate::error::{ApiError, Result};
use crate::models::*;

#[derive(Default)]
struct MemoryState {
    children: HashMap<Uuid, Child>,
    stickers: Vec<Sticker>,
    sessions: Vec<SessionRecord>,
}

/// Store backed by a lock-protected map. Data is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an outage: every call fails until switched back.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ApiError::Engine(EngineError::PersistenceUnavailable(
                "memory store is offline".to_string(),
            )));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn list_children(&self) -> Result<Vec<Child>> {
        self.check_online()?;
        let state = self.state.read().await;
        let mut children: Vec<Child> = state.children.values().cloned().collect();
        children.sort_by_key(|c| c.created_at);
        Ok(children)
    }

    async fn get_child(&self, id: Uuid) -> Result<Option<Child>> {
        self.check_online()?;
        Ok(self.state.read().await.children.get(&id).cloned())
    }

    async fn insert_child(&self, child: &Child) -> Result<()> {
        self.check_online()?;
        self.state
            .write()
            .await
            .children
            .insert(child.id, child.clone());
        Ok(())
    }

    async fn update_child(&self, child: &Child) -> Result<bool> {
        self.check_online()?;
        let mut state = self.state.write().await;
        match state.children.get_mut(&child.id) {
            Some(existing) => {
                existing.name = child.name.clone();
                existing.settings = child.settings.clone();
                existing.updated_at = child.updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_child(&self, id: Uuid) -> Result<bool> {
        self.check_online()?;
        let mut state = self.state.write().await;
        let removed = state.children.remove(&id).is_some();
        state.stickers.retain(|s| s.child_id != id);
        state.sessions.retain(|s| s.child_id != id);
        Ok(removed)
    }

    async fn list_stickers(&self, child_id: Uuid) -> Result<Vec<Sticker>> {
        self.check_online()?;
        let state = self.state.read().await;
        // appended in order, so reversing gives newest first
        Ok(state
            .stickers
            .iter()
            .rev()
            .filter(|s| s.child_id == child_id)
            .cloned()
            .collect())
    }

    async fn list_sessions(&self, child_id: Uuid) -> Result<Vec<SessionRecord>> {
        self.check_online()?;
        let state = self.state.read().await;
        Ok(state
            .sessions
            .iter()
            .filter(|s| s.child_id == child_id)
            .cloned()
            .collect())
    }

    async fn commit_answer(
        &self,
        child: &Child,
        sticker: Option<&Sticker>,
        record: &SessionRecord,
    ) -> Result<()> {
        self.check_online()?;
        let mut state = self.state.write().await;
        let Some(existing) = state.children.get_mut(&child.id) else {
            return Err(ApiError::NotFound(format!("Child {}", child.id)));
        };
        existing.streak = child.streak;
        existing.total_stickers = child.total_stickers;
        existing.progress = child.progress.clone();
        existing.claimed_thresholds = child.claimed_thresholds.clone();
        existing.updated_at = child.updated_at;

        if let Some(sticker) = sticker {
            state.stickers.push(sticker.clone());
        }
        state.sessions.push(record.clone());
        Ok(())
    }
}
