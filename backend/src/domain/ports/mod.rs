//! Domain ports for the hexagonal boundary.
//!
//! Driven-side repository traits live here together with their per-port
//! error enums and fixture implementations. Mock implementations are
//! generated by `mockall` for tests.

mod login_service;
mod recipe_events;
mod recipe_repository;
mod stats_repository;
mod user_repository;

#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FIXTURE_USER_ID, FixtureLoginService, LoginService};
pub use recipe_events::{NoOpRecipeEventPublisher, RecipeEventPublisher};
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{FixtureRecipeRepository, RecipeRepository, RecipeRepositoryError};
#[cfg(test)]
pub use stats_repository::MockStatsRepository;
pub use stats_repository::{FixtureStatsRepository, StatsRepository, StatsRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserRepository, UserRepositoryError};
