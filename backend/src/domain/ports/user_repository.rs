//! Port for user account storage and favorite-set mutation.
//!
//! Favorite updates are set operations: adding is idempotent, removing a
//! missing id is a no-op, and both are atomic at the adapter level.

use async_trait::async_trait;

use crate::domain::{RecipeId, User, UserId};

/// Errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection {
        /// Driver-level description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query {
        /// Driver-level description.
        message: String,
    },
}

impl UserRepositoryError {
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

/// Port for user lookup and favorite-set mutation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Add `recipe` to the user's favorite set. Idempotent.
    async fn add_favorite(
        &self,
        user: &UserId,
        recipe: &RecipeId,
    ) -> Result<(), UserRepositoryError>;

    /// Remove `recipe` from the user's favorite set. A missing id is a
    /// no-op.
    async fn remove_favorite(
        &self,
        user: &UserId,
        recipe: &RecipeId,
    ) -> Result<(), UserRepositoryError>;

    /// Remove `recipe` from every user's favorite set. Used when a recipe
    /// is deleted so stored sets do not accumulate dangling ids.
    async fn remove_favorite_everywhere(
        &self,
        recipe: &RecipeId,
    ) -> Result<(), UserRepositoryError>;
}

/// Fixture implementation: no users exist and mutations are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    async fn add_favorite(
        &self,
        _user: &UserId,
        _recipe: &RecipeId,
    ) -> Result<(), UserRepositoryError> {
        Ok(())
    }

    async fn remove_favorite(
        &self,
        _user: &UserId,
        _recipe: &RecipeId,
    ) -> Result<(), UserRepositoryError> {
        Ok(())
    }

    async fn remove_favorite_everywhere(
        &self,
        _recipe: &RecipeId,
    ) -> Result<(), UserRepositoryError> {
        Ok(())
    }
}
