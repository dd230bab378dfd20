//! Favorites HTTP handlers.
//!
//! ```text
//! GET /api/v1/users/me/favorites
//! PUT /api/v1/users/me/favorites/{id}
//! ```
//!
//! The toggle endpoint is a `PUT` because flipping membership is idempotent
//! per direction: the response reports the confirmed state.

use actix_web::{get, put, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Error, FavoriteToggle, RecipeId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::recipes::RecipeResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::invalid_field_error;

/// Confirmed outcome of a favorite toggle.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteToggleResponse {
    /// The recipe whose membership was flipped.
    pub recipe_id: String,
    /// Whether the recipe is a favorite after the toggle.
    pub favorite: bool,
}

impl From<FavoriteToggle> for FavoriteToggleResponse {
    fn from(value: FavoriteToggle) -> Self {
        Self {
            recipe_id: value.recipe_id.to_string(),
            favorite: value.favorite,
        }
    }
}

fn parse_recipe_id(raw: &str) -> Result<RecipeId, Error> {
    RecipeId::new(raw).map_err(|_| {
        invalid_field_error("id", raw, "invalid_id", "recipe id must be a valid UUID")
    })
}

/// List the authenticated user's favorite recipes.
///
/// Ids referencing deleted recipes are dropped from the result.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/favorites",
    responses(
        (status = 200, description = "Favorite recipes", body = [RecipeResponse]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Account record missing", body = Error)
    ),
    tags = ["favorites"],
    operation_id = "listFavorites"
)]
#[get("/users/me/favorites")]
pub async fn list_favorites(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<RecipeResponse>>> {
    let user_id = session.require_user_id()?;
    let recipes = state.favorites.list(&user_id).await?;
    Ok(web::Json(
        recipes.into_iter().map(RecipeResponse::from).collect(),
    ))
}

/// Flip a recipe's membership in the authenticated user's favorites.
#[utoipa::path(
    put,
    path = "/api/v1/users/me/favorites/{id}",
    params(("id" = String, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Confirmed state", body = FavoriteToggleResponse),
        (status = 400, description = "Invalid recipe id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Account record missing", body = Error)
    ),
    tags = ["favorites"],
    operation_id = "toggleFavorite"
)]
#[put("/users/me/favorites/{id}")]
pub async fn toggle_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<FavoriteToggleResponse>> {
    let user_id = session.require_user_id()?;
    let id = parse_recipe_id(&path.into_inner())?;
    let outcome = state.favorites.toggle(&user_id, &id).await?;
    Ok(web::Json(FavoriteToggleResponse::from(outcome)))
}
