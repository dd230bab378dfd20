//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API: every HTTP endpoint from the inbound layer, the DTO
//! schemas, and the session-cookie security scheme. The generated document
//! backs Swagger UI in debug builds and is exported via
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::error::{Error, ErrorCode};
use crate::inbound::http::dashboard::{DashboardResponse, TagCountResponse};
use crate::inbound::http::favorites::FavoriteToggleResponse;
use crate::inbound::http::recipes::{RecipeRequest, RecipeResponse, SearchRequest};
use crate::inbound::http::users::{CredentialsRequest, UserResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login or /register.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "CookEasy backend API",
        description = "HTTP interface for recipe management: accounts, \
                       recipes, search, favorites, and the usage dashboard."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::get_recipe,
        crate::inbound::http::recipes::update_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::recipes::search_recipes,
        crate::inbound::http::favorites::list_favorites,
        crate::inbound::http::favorites::toggle_favorite,
        crate::inbound::http::dashboard::get_dashboard,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CredentialsRequest,
        UserResponse,
        RecipeRequest,
        RecipeResponse,
        SearchRequest,
        FavoriteToggleResponse,
        DashboardResponse,
        TagCountResponse,
        Error,
        ErrorCode,
    )),
    tags(
        (name = "users", description = "Accounts and sessions"),
        (name = "recipes", description = "Recipe CRUD and search"),
        (name = "favorites", description = "Per-user favorite sets"),
        (name = "dashboard", description = "Usage statistics"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;
