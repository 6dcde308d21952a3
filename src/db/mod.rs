//! Read access to the platform's championship data.
//!
//! The ranking core never talks to storage directly: it receives one
//! [`ChampionshipSnapshot`] per computation from a [`ChampionshipSource`].

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::championship::{Championship, ChampionshipSnapshot};

pub mod championship_queries;
pub mod memory;

pub use championship_queries::PgChampionshipSource;
pub use memory::InMemoryChampionshipSource;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Inconsistent championship data: {0}")]
    Inconsistent(String),
}

#[async_trait]
pub trait ChampionshipSource: Send + Sync {
    async fn list_championships(&self) -> Result<Vec<Championship>, SourceError>;

    /// Complete, consistent view of one championship; `None` if unknown
    async fn load_snapshot(&self, championship_id: Uuid) -> Result<Option<ChampionshipSnapshot>, SourceError>;
}
