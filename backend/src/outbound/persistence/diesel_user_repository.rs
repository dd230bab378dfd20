//! PostgreSQL-backed `UserRepository` implementation using Diesel.
//!
//! Favorite mutations use `array_append`/`array_remove` in a single UPDATE
//! so they are atomic at the database. The append is guarded with a
//! containment filter to stay idempotent.

use async_trait::async_trait;
use diesel::dsl::not;
use diesel::prelude::*;
use diesel::sql_types;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{EmailAddress, RecipeId, User, UserId};

use super::models::UserRow;
use super::pool::{DbPool, PoolError};
use super::schema::users;

diesel::define_sql_function! {
    /// PostgreSQL `array_append` for UUID arrays.
    fn array_append(
        arr: sql_types::Array<sql_types::Uuid>,
        elem: sql_types::Uuid,
    ) -> sql_types::Array<sql_types::Uuid>
}

diesel::define_sql_function! {
    /// PostgreSQL `array_remove` for UUID arrays.
    fn array_remove(
        arr: sql_types::Array<sql_types::Uuid>,
        elem: sql_types::Uuid,
    ) -> sql_types::Array<sql_types::Uuid>
}

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserRepositoryError::connection("database connection error")
        }
        _ => UserRepositoryError::query("database error"),
    }
}

pub(crate) fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let email = EmailAddress::new(&row.email).map_err(|error| {
        warn!(user_id = %row.id, error = %error, "invalid stored email");
        UserRepositoryError::query("invalid stored email")
    })?;

    Ok(User {
        id: UserId::from_uuid(row.id),
        email,
        favorites: row.favorites.into_iter().map(RecipeId::from_uuid).collect(),
        created_at: row.created_at,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn add_favorite(
        &self,
        user: &UserId,
        recipe: &RecipeId,
    ) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Zero rows affected means the id was already present; that is the
        // idempotent success case, not an error.
        diesel::update(
            users::table
                .find(user.as_uuid())
                .filter(not(users::favorites.contains(vec![*recipe.as_uuid()]))),
        )
        .set(users::favorites.eq(array_append(users::favorites, *recipe.as_uuid())))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn remove_favorite(
        &self,
        user: &UserId,
        recipe: &RecipeId,
    ) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(users::table.find(user.as_uuid()))
            .set(users::favorites.eq(array_remove(users::favorites, *recipe.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn remove_favorite_everywhere(
        &self,
        recipe: &RecipeId,
    ) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(users::table.filter(users::favorites.contains(vec![*recipe.as_uuid()])))
            .set(users::favorites.eq(array_remove(users::favorites, *recipe.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
