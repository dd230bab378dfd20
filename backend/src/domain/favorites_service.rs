//! Favorite-set use-cases.
//!
//! Toggling flips membership in the stored set and reports the confirmed
//! new state; there is no optimistic local state to roll back. The global
//! favorite counter advances on additions only, so it stays monotonic.
//!
//! Listing resolves favorite ids against live recipes and silently drops
//! ids whose recipe has been deleted; stored sets are pruned separately
//! when a recipe is deleted.

use std::sync::Arc;

use tracing::warn;

use crate::domain::ports::{RecipeRepository, StatsRepository, UserRepository};
use crate::domain::recipe_service::{map_recipe_repository_error, map_user_repository_error};
use crate::domain::{Error, Recipe, RecipeId, User, UserId};

/// Confirmed outcome of a favorite toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoriteToggle {
    /// The recipe whose membership was flipped.
    pub recipe_id: RecipeId,
    /// Whether the recipe is a favorite after the toggle.
    pub favorite: bool,
}

/// Favorites use-case over the user, recipe, and stats ports.
#[derive(Clone)]
pub struct FavoritesService {
    users: Arc<dyn UserRepository>,
    recipes: Arc<dyn RecipeRepository>,
    stats: Arc<dyn StatsRepository>,
}

impl FavoritesService {
    /// Create a new service over the given ports.
    pub fn new(
        users: Arc<dyn UserRepository>,
        recipes: Arc<dyn RecipeRepository>,
        stats: Arc<dyn StatsRepository>,
    ) -> Self {
        Self {
            users,
            recipes,
            stats,
        }
    }

    async fn fetch_user(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::not_found("user not found"))
    }

    /// Fetch the account record, favorites included.
    pub async fn profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.fetch_user(user_id).await
    }

    /// Flip membership of `recipe_id` in the user's favorite set.
    ///
    /// Membership is not validated against live recipes; the invariant that
    /// favorites reference existing recipes is repaired at delete time and
    /// tolerated at read time instead.
    pub async fn toggle(
        &self,
        user_id: &UserId,
        recipe_id: &RecipeId,
    ) -> Result<FavoriteToggle, Error> {
        let user = self.fetch_user(user_id).await?;

        if user.is_favorite(recipe_id) {
            self.users
                .remove_favorite(user_id, recipe_id)
                .await
                .map_err(map_user_repository_error)?;
            Ok(FavoriteToggle {
                recipe_id: *recipe_id,
                favorite: false,
            })
        } else {
            self.users
                .add_favorite(user_id, recipe_id)
                .await
                .map_err(map_user_repository_error)?;
            // Counter semantics: add-to-favorites events only; removals do
            // not touch it, keeping the counter monotonic.
            if let Err(error) = self.stats.record_favorite().await {
                warn!(error = %error, "favorite counter update failed");
            }
            Ok(FavoriteToggle {
                recipe_id: *recipe_id,
                favorite: true,
            })
        }
    }

    /// Resolve the user's favorites against live recipes, preserving the
    /// stored membership order and dropping dangling ids.
    pub async fn list(&self, user_id: &UserId) -> Result<Vec<Recipe>, Error> {
        let user = self.fetch_user(user_id).await?;

        let mut resolved = Vec::with_capacity(user.favorites.len());
        for favorite in &user.favorites {
            match self
                .recipes
                .find_by_id(favorite)
                .await
                .map_err(map_recipe_repository_error)?
            {
                Some(recipe) => resolved.push(recipe),
                // Deleted while favorited; the stored set is repaired on
                // delete, so a miss here is just stale data to skip.
                None => warn!(recipe_id = %favorite, "dropping dangling favorite"),
            }
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{
        MockRecipeRepository, MockStatsRepository, MockUserRepository,
    };
    use crate::domain::{EmailAddress, RecipeDraft};
    use chrono::Utc;

    fn user_with_favorites(id: UserId, favorites: Vec<RecipeId>) -> User {
        let mut user = User::new(
            id,
            EmailAddress::new("cook@example.com").expect("valid"),
            Utc::now(),
        );
        user.favorites = favorites;
        user
    }

    fn recipe_with_id(id: RecipeId) -> Recipe {
        Recipe::from_draft(
            id,
            UserId::random(),
            Utc::now(),
            RecipeDraft::try_new(
                "r",
                vec!["i".to_owned()],
                vec!["s".to_owned()],
                Vec::new(),
            )
            .expect("valid draft"),
        )
    }

    #[tokio::test]
    async fn adding_a_favorite_advances_the_counter() {
        let user_id = UserId::random();
        let recipe_id = RecipeId::random();

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user_with_favorites(user_id, Vec::new()))));
        users
            .expect_add_favorite()
            .times(1)
            .returning(|_, _| Ok(()));
        let mut stats = MockStatsRepository::new();
        stats.expect_record_favorite().times(1).returning(|| Ok(()));

        let service = FavoritesService::new(
            Arc::new(users),
            Arc::new(MockRecipeRepository::new()),
            Arc::new(stats),
        );

        let outcome = service.toggle(&user_id, &recipe_id).await.expect("toggled");
        assert!(outcome.favorite);
    }

    #[tokio::test]
    async fn removing_a_favorite_leaves_the_counter_alone() {
        let user_id = UserId::random();
        let recipe_id = RecipeId::random();

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user_with_favorites(user_id, vec![recipe_id]))));
        users
            .expect_remove_favorite()
            .times(1)
            .returning(|_, _| Ok(()));
        let mut stats = MockStatsRepository::new();
        stats.expect_record_favorite().never();

        let service = FavoritesService::new(
            Arc::new(users),
            Arc::new(MockRecipeRepository::new()),
            Arc::new(stats),
        );

        let outcome = service.toggle(&user_id, &recipe_id).await.expect("toggled");
        assert!(!outcome.favorite);
    }

    #[tokio::test]
    async fn toggle_for_unknown_user_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));

        let service = FavoritesService::new(
            Arc::new(users),
            Arc::new(MockRecipeRepository::new()),
            Arc::new(MockStatsRepository::new()),
        );

        let error = service
            .toggle(&UserId::random(), &RecipeId::random())
            .await
            .expect_err("must fail");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn listing_drops_dangling_favorites() {
        let user_id = UserId::random();
        let live = RecipeId::random();
        let dangling = RecipeId::random();

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user_with_favorites(user_id, vec![dangling, live]))));
        let mut recipes = MockRecipeRepository::new();
        recipes.expect_find_by_id().returning(move |id| {
            if *id == live {
                Ok(Some(recipe_with_id(live)))
            } else {
                Ok(None)
            }
        });

        let service = FavoritesService::new(
            Arc::new(users),
            Arc::new(recipes),
            Arc::new(MockStatsRepository::new()),
        );

        let resolved = service.list(&user_id).await.expect("listed");
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved.first().map(|r| r.id), Some(live));
    }
}
