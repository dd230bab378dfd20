//! PostgreSQL-backed `RecipeRepository` implementation using Diesel.
//!
//! A thin adapter: translates between Diesel rows and domain recipes and
//! maps driver errors to the port's error enum. No business logic.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::ports::{RecipeRepository, RecipeRepositoryError};
use crate::domain::{Recipe, RecipeId, Tag, UserId};

use super::models::{RecipeContentUpdate, RecipeRow};
use super::pool::{DbPool, PoolError};
use super::schema::recipes;

/// Diesel-backed implementation of the `RecipeRepository` port.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    /// Create a new repository over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecipeRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RecipeRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> RecipeRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RecipeRepositoryError::connection("database connection error")
        }
        _ => RecipeRepositoryError::query("database error"),
    }
}

fn row_to_recipe(row: RecipeRow) -> Recipe {
    let tags = row
        .tags
        .into_iter()
        .filter_map(|raw| match Tag::new(&raw) {
            Ok(tag) => Some(tag),
            Err(error) => {
                warn!(value = raw, recipe_id = %row.id, error = %error, "skipping invalid stored tag");
                None
            }
        })
        .collect();

    Recipe {
        id: RecipeId::from_uuid(row.id),
        title: row.title,
        ingredients: row.ingredients,
        steps: row.steps,
        tags,
        creator_id: UserId::from_uuid(row.creator_id),
        created_at: row.created_at,
    }
}

fn recipe_to_row(recipe: &Recipe) -> RecipeRow {
    RecipeRow {
        id: *recipe.id.as_uuid(),
        title: recipe.title.clone(),
        ingredients: recipe.ingredients.clone(),
        steps: recipe.steps.clone(),
        tags: recipe.tags.iter().map(ToString::to_string).collect(),
        creator_id: *recipe.creator_id.as_uuid(),
        created_at: recipe.created_at,
    }
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn list_all(&self) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RecipeRow> = recipes::table
            .order(recipes::created_at.desc())
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_recipe).collect())
    }

    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<RecipeRow> = recipes::table
            .find(id.as_uuid())
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_recipe))
    }

    async fn list_by_creator(
        &self,
        creator: &UserId,
    ) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RecipeRow> = recipes::table
            .filter(recipes::creator_id.eq(creator.as_uuid()))
            .order(recipes::created_at.desc())
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_recipe).collect())
    }

    async fn insert(&self, recipe: &Recipe) -> Result<(), RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(recipes::table)
            .values(recipe_to_row(recipe))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn save(&self, recipe: &Recipe) -> Result<bool, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(recipes::table.find(recipe.id.as_uuid()))
            .set(RecipeContentUpdate {
                title: recipe.title.clone(),
                ingredients: recipe.ingredients.clone(),
                steps: recipe.steps.clone(),
                tags: recipe.tags.iter().map(ToString::to_string).collect(),
            })
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }

    async fn delete(&self, id: &RecipeId) -> Result<bool, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(recipes::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
