//! Dashboard summary assembly.

use std::sync::Arc;

use crate::domain::dashboard::{RECENT_RECIPES_LIMIT, TOP_TAGS_LIMIT};
use crate::domain::ports::{RecipeRepository, StatsRepository, StatsRepositoryError};
use crate::domain::recipe_service::map_recipe_repository_error;
use crate::domain::{DashboardSummary, Error, UserId, top_tags};

fn map_stats_repository_error(error: StatsRepositoryError) -> Error {
    match error {
        StatsRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("stats repository unavailable: {message}"))
        }
        StatsRepositoryError::Query { message } => {
            Error::internal(format!("stats repository error: {message}"))
        }
    }
}

/// Dashboard use-case over the recipe and stats ports.
///
/// Each request recomputes the aggregates from a full scan; at this corpus
/// size that is one listing query, which keeps the read model trivially
/// consistent with the store.
#[derive(Clone)]
pub struct DashboardService {
    recipes: Arc<dyn RecipeRepository>,
    stats: Arc<dyn StatsRepository>,
}

impl DashboardService {
    /// Create a new service over the given ports.
    pub fn new(recipes: Arc<dyn RecipeRepository>, stats: Arc<dyn StatsRepository>) -> Self {
        Self { recipes, stats }
    }

    /// Assemble the dashboard for `user_id`.
    pub async fn summary(&self, user_id: &UserId) -> Result<DashboardSummary, Error> {
        let stats = self
            .stats
            .fetch()
            .await
            .map_err(map_stats_repository_error)?;

        let mine = self
            .recipes
            .list_by_creator(user_id)
            .await
            .map_err(map_recipe_repository_error)?;
        let my_recipe_count = mine.len() as u64;
        let mut recent_recipes = mine;
        recent_recipes.truncate(RECENT_RECIPES_LIMIT);

        let corpus = self
            .recipes
            .list_all()
            .await
            .map_err(map_recipe_repository_error)?;

        Ok(DashboardSummary {
            stats,
            my_recipe_count,
            recent_recipes,
            top_tags: top_tags(&corpus, TOP_TAGS_LIMIT),
        })
    }
}
