//! Recipe CRUD use-cases.
//!
//! Enforces the ownership invariant (only the creator mutates or deletes),
//! assigns identity and timestamps at creation, publishes change-feed
//! events, and prunes deleted recipe ids from stored favorite sets.

use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use crate::domain::ports::{
    RecipeEventPublisher, RecipeRepository, RecipeRepositoryError, UserRepository,
    UserRepositoryError,
};
use crate::domain::{Error, Recipe, RecipeDraft, RecipeEvent, RecipeId, RecipeSort, UserId};

/// Recipe CRUD service over the repository ports.
#[derive(Clone)]
pub struct RecipeService {
    recipes: Arc<dyn RecipeRepository>,
    users: Arc<dyn UserRepository>,
    events: Arc<dyn RecipeEventPublisher>,
}

pub(crate) fn map_recipe_repository_error(error: RecipeRepositoryError) -> Error {
    match error {
        RecipeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("recipe repository unavailable: {message}"))
        }
        RecipeRepositoryError::Query { message } => {
            Error::internal(format!("recipe repository error: {message}"))
        }
    }
}

pub(crate) fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

impl RecipeService {
    /// Create a new service over the given ports.
    pub fn new(
        recipes: Arc<dyn RecipeRepository>,
        users: Arc<dyn UserRepository>,
        events: Arc<dyn RecipeEventPublisher>,
    ) -> Self {
        Self {
            recipes,
            users,
            events,
        }
    }

    /// Create a recipe owned by `creator` from a validated draft.
    pub async fn create(&self, creator: UserId, draft: RecipeDraft) -> Result<Recipe, Error> {
        let recipe = Recipe::from_draft(RecipeId::random(), creator, Utc::now(), draft);
        self.recipes
            .insert(&recipe)
            .await
            .map_err(map_recipe_repository_error)?;
        self.events.publish(RecipeEvent::Added {
            recipe: recipe.clone(),
        });
        Ok(recipe)
    }

    /// Replace the content of an existing recipe.
    ///
    /// Only the creator may edit; the id and creation timestamp are
    /// preserved. A recipe deleted concurrently surfaces as not-found.
    pub async fn update(
        &self,
        actor: &UserId,
        id: &RecipeId,
        draft: RecipeDraft,
    ) -> Result<Recipe, Error> {
        let existing = self.fetch_owned(actor, id).await?;
        let updated = draft.apply_to(&existing);
        let stored = self
            .recipes
            .save(&updated)
            .await
            .map_err(map_recipe_repository_error)?;
        if !stored {
            return Err(Error::not_found("recipe not found"));
        }
        self.events.publish(RecipeEvent::Modified {
            recipe: updated.clone(),
        });
        Ok(updated)
    }

    /// Delete a recipe and prune its id from all stored favorite sets.
    pub async fn delete(&self, actor: &UserId, id: &RecipeId) -> Result<(), Error> {
        self.fetch_owned(actor, id).await?;
        let deleted = self
            .recipes
            .delete(id)
            .await
            .map_err(map_recipe_repository_error)?;
        if !deleted {
            return Err(Error::not_found("recipe not found"));
        }

        // The recipe is gone regardless; favorite pruning is best effort and
        // the read path drops any id it misses.
        if let Err(error) = self.users.remove_favorite_everywhere(id).await {
            warn!(recipe_id = %id, error = %error, "favorite pruning failed after delete");
        }

        self.events.publish(RecipeEvent::Removed { recipe_id: *id });
        Ok(())
    }

    /// List all recipes in the requested order.
    pub async fn list(&self, sort: RecipeSort) -> Result<Vec<Recipe>, Error> {
        let mut recipes = self
            .recipes
            .list_all()
            .await
            .map_err(map_recipe_repository_error)?;
        sort.apply(&mut recipes);
        Ok(recipes)
    }

    /// Fetch a single recipe.
    pub async fn get(&self, id: &RecipeId) -> Result<Recipe, Error> {
        self.recipes
            .find_by_id(id)
            .await
            .map_err(map_recipe_repository_error)?
            .ok_or_else(|| Error::not_found("recipe not found"))
    }

    async fn fetch_owned(&self, actor: &UserId, id: &RecipeId) -> Result<Recipe, Error> {
        let recipe = self.get(id).await?;
        if recipe.creator_id != *actor {
            return Err(Error::forbidden("only the creator may modify this recipe"));
        }
        Ok(recipe)
    }
}
