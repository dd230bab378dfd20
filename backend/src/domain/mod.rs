//! Domain primitives, aggregates, and use-case services.
//!
//! Purpose: define strongly typed domain entities and the pure
//! search/aggregation logic used by the API and persistence layers, plus
//! the services that drive the ports. Types are kept immutable where
//! practical and document their invariants and serde contracts in each
//! type's Rustdoc. Nothing in this module performs I/O directly; all
//! effects go through the traits in [`ports`].

mod credentials;
pub mod dashboard;
mod dashboard_service;
pub mod error;
mod favorites_service;
pub mod ports;
pub mod recipe;
mod recipe_service;
pub mod search;
mod search_service;
pub mod stats;
pub mod user;

pub use self::credentials::{LoginCredentials, LoginValidationError};
pub use self::dashboard::{
    DashboardSummary, RECENT_RECIPES_LIMIT, TOP_TAGS_LIMIT, TagCount, top_tags,
};
pub use self::dashboard_service::DashboardService;
pub use self::error::{Error, ErrorCode};
pub use self::favorites_service::{FavoriteToggle, FavoritesService};
pub use self::recipe::{
    ParseRecipeSortError, Recipe, RecipeDraft, RecipeEvent, RecipeId, RecipeSort, Tag,
    RecipeValidationError,
};
pub use self::recipe_service::RecipeService;
pub use self::search::{SearchQuery, SearchValidationError, filter_recipes};
pub use self::search_service::SearchService;
pub use self::stats::UsageStats;
pub use self::user::{EmailAddress, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
