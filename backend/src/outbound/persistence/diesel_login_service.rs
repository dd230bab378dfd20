//! PostgreSQL-backed `LoginService` implementation using Diesel.
//!
//! Registration relies on the unique index over `email`: the insert either
//! lands or reports a conflict, so there is no check-then-insert race.
//! Authentication compares stored and supplied password digests.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::LoginService;
use crate::domain::{Error, LoginCredentials, User, UserId};

use super::diesel_user_repository::row_to_user;
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `LoginService` port.
#[derive(Clone)]
pub struct DieselLoginService {
    pool: DbPool,
}

impl DieselLoginService {
    /// Create a new service over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> Error {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            Error::service_unavailable(format!("account store unavailable: {message}"))
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> Error {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            Error::conflict("email already registered")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            Error::service_unavailable("database connection error")
        }
        _ => Error::internal("account store error"),
    }
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn register(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewUserRow {
            id: *UserId::random().as_uuid(),
            email: credentials.email().to_string(),
            password_digest: credentials.digest(),
            favorites: Vec::new(),
            created_at: Utc::now(),
        };

        let inserted: UserRow = diesel::insert_into(users::table)
            .values(row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_user(inserted)
            .map_err(|error| Error::internal(format!("account store error: {error}")))
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(credentials.email().as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match row {
            Some(stored) if stored.password_digest == credentials.digest() => {
                Ok(UserId::from_uuid(stored.id))
            }
            // Same error for unknown email and wrong password; no account
            // enumeration through the login endpoint.
            _ => Err(Error::unauthorized("invalid credentials")),
        }
    }
}
