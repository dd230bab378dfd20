//! PostgreSQL-backed `StatsRepository` implementation using Diesel.
//!
//! Counters advance with `SET n = n + 1` so concurrent increments compose
//! at the database. The singleton row is keyed by a fixed id and seeded at
//! startup.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::UsageStats;
use crate::domain::ports::{StatsRepository, StatsRepositoryError};

use super::models::StatsRow;
use super::pool::{DbPool, PoolError};
use super::schema::app_stats;

/// Fixed key of the singleton counter row.
const STATS_ROW_ID: &str = "app_stats";

/// Diesel-backed implementation of the `StatsRepository` port.
#[derive(Clone)]
pub struct DieselStatsRepository {
    pool: DbPool,
}

impl DieselStatsRepository {
    /// Create a new repository over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> StatsRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            StatsRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> StatsRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StatsRepositoryError::connection("database connection error")
        }
        _ => StatsRepositoryError::query("database error"),
    }
}

fn counter_to_u64(value: i64) -> u64 {
    // Counters only ever increment from zero; a negative value would mean
    // someone edited the row by hand. Clamp rather than crash.
    u64::try_from(value).unwrap_or(0)
}

#[async_trait]
impl StatsRepository for DieselStatsRepository {
    async fn ensure_initialised(&self) -> Result<(), StatsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(app_stats::table)
            .values(StatsRow {
                stat_id: STATS_ROW_ID.to_owned(),
                search_count: 0,
                favorite_count: 0,
            })
            .on_conflict(app_stats::stat_id)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn fetch(&self) -> Result<UsageStats, StatsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<StatsRow> = app_stats::table
            .find(STATS_ROW_ID)
            .select(StatsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map_or_else(UsageStats::default, |row| UsageStats {
            search_count: counter_to_u64(row.search_count),
            favorite_count: counter_to_u64(row.favorite_count),
        }))
    }

    async fn record_search(&self) -> Result<(), StatsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(app_stats::table.find(STATS_ROW_ID))
            .set(app_stats::search_count.eq(app_stats::search_count + 1_i64))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn record_favorite(&self) -> Result<(), StatsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(app_stats::table.find(STATS_ROW_ID))
            .set(app_stats::favorite_count.eq(app_stats::favorite_count + 1_i64))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
