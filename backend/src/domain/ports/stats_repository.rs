//! Port for the singleton usage-counter record.
//!
//! Counters only ever move forward; the adapter is expected to use its
//! store's atomic increment rather than read-modify-write.

use async_trait::async_trait;

use crate::domain::UsageStats;

/// Errors raised by stats repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatsRepositoryError {
    /// Repository connection could not be established.
    #[error("stats repository connection failed: {message}")]
    Connection {
        /// Driver-level description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("stats repository query failed: {message}")]
    Query {
        /// Driver-level description.
        message: String,
    },
}

impl StatsRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for reading and advancing the usage counters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Create the counter record with zeroes if it does not exist yet.
    async fn ensure_initialised(&self) -> Result<(), StatsRepositoryError>;

    /// Read the current counters. A missing record reads as zeroes.
    async fn fetch(&self) -> Result<UsageStats, StatsRepositoryError>;

    /// Atomically add one to the search counter.
    async fn record_search(&self) -> Result<(), StatsRepositoryError>;

    /// Atomically add one to the favorite counter.
    async fn record_favorite(&self) -> Result<(), StatsRepositoryError>;
}

/// Fixture implementation: counters read as zero and increments vanish.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStatsRepository;

#[async_trait]
impl StatsRepository for FixtureStatsRepository {
    async fn ensure_initialised(&self) -> Result<(), StatsRepositoryError> {
        Ok(())
    }

    async fn fetch(&self) -> Result<UsageStats, StatsRepositoryError> {
        Ok(UsageStats::default())
    }

    async fn record_search(&self) -> Result<(), StatsRepositoryError> {
        Ok(())
    }

    async fn record_favorite(&self) -> Result<(), StatsRepositoryError> {
        Ok(())
    }
}
