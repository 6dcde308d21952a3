use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::{ChampionshipSource, SourceError};
use crate::models::championship::{Championship, ChampionshipSnapshot};

/// Snapshots held in memory, for tests and local runs without Postgres
#[derive(Debug, Clone, Default)]
pub struct InMemoryChampionshipSource {
    snapshots: Arc<RwLock<HashMap<Uuid, ChampionshipSnapshot>>>,
}

impl InMemoryChampionshipSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, snapshot: ChampionshipSnapshot) {
        self.snapshots
            .write()
            .await
            .insert(snapshot.championship.id, snapshot);
    }

    /// Apply `change` to a stored snapshot; returns false if it is unknown
    pub async fn update<F>(&self, championship_id: Uuid, change: F) -> bool
    where
        F: FnOnce(&mut ChampionshipSnapshot),
    {
        match self.snapshots.write().await.get_mut(&championship_id) {
            Some(snapshot) => {
                change(snapshot);
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl ChampionshipSource for InMemoryChampionshipSource {
    async fn list_championships(&self) -> Result<Vec<Championship>, SourceError> {
        let mut championships: Vec<Championship> = self
            .snapshots
            .read()
            .await
            .values()
            .map(|snapshot| snapshot.championship.clone())
            .collect();
        championships.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(championships)
    }

    async fn load_snapshot(&self, championship_id: Uuid) -> Result<Option<ChampionshipSnapshot>, SourceError> {
        Ok(self.snapshots.read().await.get(&championship_id).cloned())
    }
}
