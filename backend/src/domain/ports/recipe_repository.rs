//! Port for recipe persistence.
//!
//! Adapters provide durable storage for the recipe collection. Services own
//! the business rules (ownership checks, event publication); the repository
//! only stores and retrieves.

use async_trait::async_trait;

use crate::domain::{Recipe, RecipeId, UserId};

/// Errors raised by recipe repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeRepositoryError {
    /// Repository connection could not be established.
    #[error("recipe repository connection failed: {message}")]
    Connection {
        /// Driver-level description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("recipe repository query failed: {message}")]
    Query {
        /// Driver-level description.
        message: String,
    },
}

impl RecipeRepositoryError {
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

/// Port for recipe storage and retrieval.
///
/// Listing operations return newest-first so callers that need the default
/// presentation order do not re-sort.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Fetch every recipe, newest first.
    async fn list_all(&self) -> Result<Vec<Recipe>, RecipeRepositoryError>;

    /// Fetch one recipe by id.
    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError>;

    /// Fetch the recipes created by `creator`, newest first.
    async fn list_by_creator(
        &self,
        creator: &UserId,
    ) -> Result<Vec<Recipe>, RecipeRepositoryError>;

    /// Persist a newly created recipe.
    async fn insert(&self, recipe: &Recipe) -> Result<(), RecipeRepositoryError>;

    /// Replace the stored content of an existing recipe.
    ///
    /// Returns `false` when no recipe with that id exists (deleted
    /// concurrently); callers surface that as not-found.
    async fn save(&self, recipe: &Recipe) -> Result<bool, RecipeRepositoryError>;

    /// Delete a recipe by id. Returns `false` when it was already gone.
    async fn delete(&self, id: &RecipeId) -> Result<bool, RecipeRepositoryError>;
}

/// Fixture implementation for tests and persistence-less development runs.
///
/// Lookups come back empty and writes are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecipeRepository;

#[async_trait]
impl RecipeRepository for FixtureRecipeRepository {
    async fn list_all(&self) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: &RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError> {
        Ok(None)
    }

    async fn list_by_creator(
        &self,
        _creator: &UserId,
    ) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert(&self, _recipe: &Recipe) -> Result<(), RecipeRepositoryError> {
        Ok(())
    }

    async fn save(&self, _recipe: &Recipe) -> Result<bool, RecipeRepositoryError> {
        Ok(false)
    }

    async fn delete(&self, _id: &RecipeId) -> Result<bool, RecipeRepositoryError> {
        Ok(false)
    }
}
