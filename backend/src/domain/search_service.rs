//! Search execution over the recipe corpus.
//!
//! The pure filter lives in [`crate::domain::search`]; this service adds
//! the corpus fetch and the search-counter side effect. A failed counter
//! write is logged and does not fail the search itself.

use std::sync::Arc;

use tracing::warn;

use crate::domain::ports::{RecipeRepository, StatsRepository};
use crate::domain::recipe_service::map_recipe_repository_error;
use crate::domain::{Error, Recipe, SearchQuery, filter_recipes};

/// Search use-case over the recipe and stats ports.
#[derive(Clone)]
pub struct SearchService {
    recipes: Arc<dyn RecipeRepository>,
    stats: Arc<dyn StatsRepository>,
}

impl SearchService {
    /// Create a new service over the given ports.
    pub fn new(recipes: Arc<dyn RecipeRepository>, stats: Arc<dyn StatsRepository>) -> Self {
        Self { recipes, stats }
    }

    /// Execute a validated query against the full corpus.
    ///
    /// Results preserve the repository's newest-first order. Each executed
    /// search advances the global search counter.
    pub async fn run(&self, query: &SearchQuery) -> Result<Vec<Recipe>, Error> {
        let corpus = self
            .recipes
            .list_all()
            .await
            .map_err(map_recipe_repository_error)?;

        if let Err(error) = self.stats.record_search().await {
            warn!(error = %error, "search counter update failed");
        }

        Ok(filter_recipes(corpus, query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        MockRecipeRepository, MockStatsRepository, StatsRepositoryError,
    };
    use crate::domain::{RecipeDraft, RecipeId, UserId};
    use chrono::Utc;

    fn corpus() -> Vec<Recipe> {
        let mk = |title: &str, ingredient: &str| {
            Recipe::from_draft(
                RecipeId::random(),
                UserId::random(),
                Utc::now(),
                RecipeDraft::try_new(
                    title,
                    vec![ingredient.to_owned()],
                    vec!["cook".to_owned()],
                    Vec::new(),
                )
                .expect("valid draft"),
            )
        };
        vec![mk("Roast", "Chicken breast"), mk("Salad", "lettuce")]
    }

    #[tokio::test]
    async fn run_filters_and_counts_the_search() {
        let mut recipes = MockRecipeRepository::new();
        recipes.expect_list_all().returning(|| Ok(corpus()));
        let mut stats = MockStatsRepository::new();
        stats.expect_record_search().times(1).returning(|| Ok(()));

        let service = SearchService::new(Arc::new(recipes), Arc::new(stats));
        let query = SearchQuery::try_new(vec!["chicken".to_owned()], Vec::new()).expect("valid");
        let results = service.run(&query).await.expect("searched");

        assert_eq!(results.len(), 1);
        assert_eq!(results.first().map(|r| r.title.as_str()), Some("Roast"));
    }

    #[tokio::test]
    async fn counter_failure_does_not_fail_the_search() {
        let mut recipes = MockRecipeRepository::new();
        recipes.expect_list_all().returning(|| Ok(corpus()));
        let mut stats = MockStatsRepository::new();
        stats
            .expect_record_search()
            .returning(|| Err(StatsRepositoryError::query("write failed")));

        let service = SearchService::new(Arc::new(recipes), Arc::new(stats));
        let query = SearchQuery::try_new(vec!["lettuce".to_owned()], Vec::new()).expect("valid");
        let results = service.run(&query).await.expect("searched");

        assert_eq!(results.len(), 1);
    }
}
