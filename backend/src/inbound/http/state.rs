//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::LoginService;
use crate::domain::{DashboardService, FavoritesService, RecipeService, SearchService};

/// Dependency bundle for HTTP handlers.
///
/// Services are cheap clones over `Arc`'d ports; the login port is the one
/// handlers use directly.
#[derive(Clone)]
pub struct HttpState {
    /// Registration and authentication port.
    pub login: Arc<dyn LoginService>,
    /// Recipe CRUD use-cases.
    pub recipes: RecipeService,
    /// Search use-case.
    pub search: SearchService,
    /// Favorites use-cases.
    pub favorites: FavoritesService,
    /// Dashboard use-case.
    pub dashboard: DashboardService,
}
