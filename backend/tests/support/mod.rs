//! Shared test doubles and app harness for integration tests.
//!
//! `InMemoryStore` implements every driven port over plain mutex-guarded
//! collections so end-to-end flows run without a database, per the
//! repository-interface design the domain is built around.

pub mod http;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use backend::Trace;
use backend::domain::ports::{
    LoginService, RecipeRepository, RecipeRepositoryError, StatsRepository,
    StatsRepositoryError, UserRepository, UserRepositoryError,
};
use backend::domain::{
    DashboardService, Error, FavoritesService, LoginCredentials, Recipe, RecipeId,
    RecipeService, SearchService, UsageStats, User, UserId,
};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::{dashboard, favorites, recipes, users};
use backend::inbound::ws::RecipeFeed;

struct StoredUser {
    user: User,
    password_digest: String,
}

/// In-memory implementation of all driven ports.
#[derive(Default)]
pub struct InMemoryStore {
    users: Mutex<HashMap<Uuid, StoredUser>>,
    recipes: Mutex<Vec<Recipe>>,
    stats: Mutex<UsageStats>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Read the counters directly, bypassing the HTTP surface.
    pub fn stats_snapshot(&self) -> UsageStats {
        *self.stats.lock().expect("stats lock")
    }
}

#[async_trait]
impl LoginService for InMemoryStore {
    async fn register(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let mut guard = self.users.lock().expect("users lock");
        if guard
            .values()
            .any(|stored| stored.user.email == *credentials.email())
        {
            return Err(Error::conflict("email already registered"));
        }
        let user = User::new(UserId::random(), credentials.email().clone(), Utc::now());
        guard.insert(
            *user.id.as_uuid(),
            StoredUser {
                user: user.clone(),
                password_digest: credentials.digest(),
            },
        );
        Ok(user)
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let guard = self.users.lock().expect("users lock");
        guard
            .values()
            .find(|stored| {
                stored.user.email == *credentials.email()
                    && stored.password_digest == credentials.digest()
            })
            .map(|stored| stored.user.id)
            .ok_or_else(|| Error::unauthorized("invalid credentials"))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let guard = self.users.lock().expect("users lock");
        Ok(guard.get(id.as_uuid()).map(|stored| stored.user.clone()))
    }

    async fn add_favorite(
        &self,
        user: &UserId,
        recipe: &RecipeId,
    ) -> Result<(), UserRepositoryError> {
        let mut guard = self.users.lock().expect("users lock");
        if let Some(stored) = guard.get_mut(user.as_uuid()) {
            if !stored.user.favorites.contains(recipe) {
                stored.user.favorites.push(*recipe);
            }
        }
        Ok(())
    }

    async fn remove_favorite(
        &self,
        user: &UserId,
        recipe: &RecipeId,
    ) -> Result<(), UserRepositoryError> {
        let mut guard = self.users.lock().expect("users lock");
        if let Some(stored) = guard.get_mut(user.as_uuid()) {
            stored.user.favorites.retain(|id| id != recipe);
        }
        Ok(())
    }

    async fn remove_favorite_everywhere(
        &self,
        recipe: &RecipeId,
    ) -> Result<(), UserRepositoryError> {
        let mut guard = self.users.lock().expect("users lock");
        for stored in guard.values_mut() {
            stored.user.favorites.retain(|id| id != recipe);
        }
        Ok(())
    }
}

#[async_trait]
impl RecipeRepository for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let guard = self.recipes.lock().expect("recipes lock");
        let mut recipes = guard.clone();
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(recipes)
    }

    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let guard = self.recipes.lock().expect("recipes lock");
        Ok(guard.iter().find(|recipe| recipe.id == *id).cloned())
    }

    async fn list_by_creator(
        &self,
        creator: &UserId,
    ) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let guard = self.recipes.lock().expect("recipes lock");
        let mut recipes: Vec<Recipe> = guard
            .iter()
            .filter(|recipe| recipe.creator_id == *creator)
            .cloned()
            .collect();
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(recipes)
    }

    async fn insert(&self, recipe: &Recipe) -> Result<(), RecipeRepositoryError> {
        let mut guard = self.recipes.lock().expect("recipes lock");
        guard.push(recipe.clone());
        Ok(())
    }

    async fn save(&self, recipe: &Recipe) -> Result<bool, RecipeRepositoryError> {
        let mut guard = self.recipes.lock().expect("recipes lock");
        match guard.iter_mut().find(|stored| stored.id == recipe.id) {
            Some(stored) => {
                *stored = recipe.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &RecipeId) -> Result<bool, RecipeRepositoryError> {
        let mut guard = self.recipes.lock().expect("recipes lock");
        let before = guard.len();
        guard.retain(|recipe| recipe.id != *id);
        Ok(guard.len() < before)
    }
}

#[async_trait]
impl StatsRepository for InMemoryStore {
    async fn ensure_initialised(&self) -> Result<(), StatsRepositoryError> {
        Ok(())
    }

    async fn fetch(&self) -> Result<UsageStats, StatsRepositoryError> {
        Ok(self.stats_snapshot())
    }

    async fn record_search(&self) -> Result<(), StatsRepositoryError> {
        self.stats.lock().expect("stats lock").search_count += 1;
        Ok(())
    }

    async fn record_favorite(&self) -> Result<(), StatsRepositoryError> {
        self.stats.lock().expect("stats lock").favorite_count += 1;
        Ok(())
    }
}

/// Wire an `HttpState` over a shared in-memory store.
pub fn state_over(store: &Arc<InMemoryStore>, feed: &RecipeFeed) -> HttpState {
    let login: Arc<dyn LoginService> = store.clone();
    let user_repo: Arc<dyn UserRepository> = store.clone();
    let recipe_repo: Arc<dyn RecipeRepository> = store.clone();
    let stats_repo: Arc<dyn StatsRepository> = store.clone();

    HttpState {
        login,
        recipes: RecipeService::new(
            recipe_repo.clone(),
            user_repo.clone(),
            Arc::new(feed.clone()),
        ),
        search: SearchService::new(recipe_repo.clone(), stats_repo.clone()),
        favorites: FavoritesService::new(user_repo, recipe_repo.clone(), stats_repo.clone()),
        dashboard: DashboardService::new(recipe_repo, stats_repo),
    }
}

/// Build the application under test: full API surface over the given state
/// with a relaxed cookie session so the test client can round-trip it.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".into())
        .cookie_secure(false)
        .build();

    App::new()
        .app_data(web::Data::new(state))
        .wrap(session)
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .service(users::register)
                .service(users::login)
                .service(users::logout)
                .service(users::current_user)
                .service(recipes::search_recipes)
                .service(recipes::list_recipes)
                .service(recipes::create_recipe)
                .service(recipes::get_recipe)
                .service(recipes::update_recipe)
                .service(recipes::delete_recipe)
                .service(favorites::list_favorites)
                .service(favorites::toggle_favorite)
                .service(dashboard::get_dashboard),
        )
}
