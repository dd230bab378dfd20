//! Dashboard HTTP handler.
//!
//! ```text
//! GET /api/v1/dashboard
//! ```

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{DashboardSummary, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::recipes::RecipeResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// A tag with its recipe frequency.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagCountResponse {
    /// The tag.
    pub tag: String,
    /// Number of recipes carrying the tag.
    pub count: u64,
}

/// Dashboard payload: global counters plus per-user aggregates.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// Number of searches executed, all users.
    pub search_count: u64,
    /// Number of add-to-favorites events, all users.
    pub favorite_count: u64,
    /// Recipes created by the requesting user.
    pub my_recipe_count: u64,
    /// Most frequent tags across all recipes, count descending.
    pub top_tags: Vec<TagCountResponse>,
    /// The requesting user's most recent recipes, newest first.
    pub recent_recipes: Vec<RecipeResponse>,
}

impl From<DashboardSummary> for DashboardResponse {
    fn from(value: DashboardSummary) -> Self {
        Self {
            search_count: value.stats.search_count,
            favorite_count: value.stats.favorite_count,
            my_recipe_count: value.my_recipe_count,
            top_tags: value
                .top_tags
                .into_iter()
                .map(|entry| TagCountResponse {
                    tag: entry.tag.to_string(),
                    count: entry.count,
                })
                .collect(),
            recent_recipes: value
                .recent_recipes
                .into_iter()
                .map(RecipeResponse::from)
                .collect(),
        }
    }
}

/// Usage dashboard for the authenticated user.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Stats store unavailable", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "getDashboard"
)]
#[get("/dashboard")]
pub async fn get_dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<DashboardResponse>> {
    let user_id = session.require_user_id()?;
    let summary = state.dashboard.summary(&user_id).await?;
    Ok(web::Json(DashboardResponse::from(summary)))
}
