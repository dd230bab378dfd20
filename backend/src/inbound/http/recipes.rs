//! Recipe HTTP handlers.
//!
//! ```text
//! GET    /api/v1/recipes?sort=newest
//! POST   /api/v1/recipes
//! GET    /api/v1/recipes/{id}
//! PUT    /api/v1/recipes/{id}
//! DELETE /api/v1/recipes/{id}
//! POST   /api/v1/recipes/search
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, Recipe, RecipeDraft, RecipeId, RecipeSort, RecipeValidationError, SearchQuery,
    SearchValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{invalid_field_error, missing_field_error};

/// Request payload for creating or replacing a recipe.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    /// Display title.
    pub title: Option<String>,
    /// Ordered ingredient lines.
    pub ingredients: Option<Vec<String>>,
    /// Ordered preparation steps.
    pub steps: Option<Vec<String>>,
    /// Tags; lower-cased server-side.
    pub tags: Option<Vec<String>>,
}

/// Recipe payload returned by all recipe endpoints.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    /// Stable identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Ordered ingredient lines.
    pub ingredients: Vec<String>,
    /// Ordered preparation steps.
    pub steps: Vec<String>,
    /// Lower-cased tags.
    pub tags: Vec<String>,
    /// Creating user's id.
    pub creator_id: String,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
}

impl From<Recipe> for RecipeResponse {
    fn from(value: Recipe) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title,
            ingredients: value.ingredients,
            steps: value.steps,
            tags: value.tags.into_iter().map(String::from).collect(),
            creator_id: value.creator_id.to_string(),
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// Search payload: free-text ingredient terms plus selected tags.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Free-text ingredient terms, matched as case-insensitive substrings.
    pub ingredients: Option<Vec<String>>,
    /// Tags the results must all carry.
    pub tags: Option<Vec<String>>,
}

/// Listing query parameters.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListParams {
    /// Sort order: `newest` (default), `oldest`, `az`, or `za`.
    pub sort: Option<String>,
}

fn map_draft_error(err: &RecipeValidationError) -> Error {
    match err {
        RecipeValidationError::InvalidId => {
            invalid_field_error("id", "", "invalid_id", "recipe id must be a valid UUID")
        }
        RecipeValidationError::EmptyTitle => missing_field_error("title"),
        RecipeValidationError::NoIngredients => missing_field_error("ingredients"),
        RecipeValidationError::NoSteps => missing_field_error("steps"),
        RecipeValidationError::EmptyTag => {
            invalid_field_error("tags", "", "empty_tag", "tags must not be empty")
        }
    }
}

fn parse_recipe_request(payload: RecipeRequest) -> Result<RecipeDraft, Error> {
    let title = payload.title.ok_or_else(|| missing_field_error("title"))?;
    let ingredients = payload
        .ingredients
        .ok_or_else(|| missing_field_error("ingredients"))?;
    let steps = payload.steps.ok_or_else(|| missing_field_error("steps"))?;
    let tags = payload.tags.unwrap_or_default();

    RecipeDraft::try_new(title, ingredients, steps, tags).map_err(|err| map_draft_error(&err))
}

fn parse_recipe_id(raw: &str) -> Result<RecipeId, Error> {
    RecipeId::new(raw).map_err(|_| {
        invalid_field_error("id", raw, "invalid_id", "recipe id must be a valid UUID")
    })
}

fn parse_sort(params: ListParams) -> Result<RecipeSort, Error> {
    match params.sort {
        None => Ok(RecipeSort::default()),
        Some(raw) => raw.parse().map_err(|_| {
            invalid_field_error(
                "sort",
                raw,
                "invalid_sort",
                "sort must be one of newest, oldest, az, za",
            )
        }),
    }
}

fn map_search_error(err: &SearchValidationError) -> Error {
    match err {
        SearchValidationError::EmptyQuery => Error::invalid_request(
            "enter at least one ingredient or select a tag",
        )
        .with_details(serde_json::json!({ "code": "empty_search" })),
        SearchValidationError::EmptyTag => {
            invalid_field_error("tags", "", "empty_tag", "tags must not be empty")
        }
    }
}

/// List all recipes in the requested order.
#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    params(ListParams),
    responses(
        (status = 200, description = "Recipes", body = [RecipeResponse]),
        (status = 400, description = "Invalid sort order", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes"
)]
#[get("/recipes")]
pub async fn list_recipes(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<ListParams>,
) -> ApiResult<web::Json<Vec<RecipeResponse>>> {
    session.require_user_id()?;
    let sort = parse_sort(params.into_inner())?;
    let recipes = state.recipes.list(sort).await?;
    Ok(web::Json(
        recipes.into_iter().map(RecipeResponse::from).collect(),
    ))
}

/// Create a recipe owned by the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/recipes",
    request_body = RecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let draft = parse_recipe_request(payload.into_inner())?;
    let recipe = state.recipes.create(user_id, draft).await?;
    Ok(HttpResponse::Created().json(RecipeResponse::from(recipe)))
}

/// Fetch one recipe by id.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    params(("id" = String, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe", body = RecipeResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "getRecipe"
)]
#[get("/recipes/{id}")]
pub async fn get_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<RecipeResponse>> {
    session.require_user_id()?;
    let id = parse_recipe_id(&path.into_inner())?;
    let recipe = state.recipes.get(&id).await?;
    Ok(web::Json(RecipeResponse::from(recipe)))
}

/// Replace the content of a recipe. Only the creator may edit.
#[utoipa::path(
    put,
    path = "/api/v1/recipes/{id}",
    params(("id" = String, Path, description = "Recipe id")),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Updated recipe", body = RecipeResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the creator", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "updateRecipe"
)]
#[put("/recipes/{id}")]
pub async fn update_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<web::Json<RecipeResponse>> {
    let user_id = session.require_user_id()?;
    let id = parse_recipe_id(&path.into_inner())?;
    let draft = parse_recipe_request(payload.into_inner())?;
    let recipe = state.recipes.update(&user_id, &id, draft).await?;
    Ok(web::Json(RecipeResponse::from(recipe)))
}

/// Delete a recipe. Only the creator may delete.
#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}",
    params(("id" = String, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the creator", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe"
)]
#[delete("/recipes/{id}")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let id = parse_recipe_id(&path.into_inner())?;
    state.recipes.delete(&user_id, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Search recipes by ingredient terms and tags.
///
/// A request with neither is rejected; run an unfiltered listing instead.
#[utoipa::path(
    post,
    path = "/api/v1/recipes/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matching recipes", body = [RecipeResponse]),
        (status = 400, description = "Empty search", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "searchRecipes"
)]
#[post("/recipes/search")]
pub async fn search_recipes(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SearchRequest>,
) -> ApiResult<web::Json<Vec<RecipeResponse>>> {
    session.require_user_id()?;
    let request = payload.into_inner();
    let query = SearchQuery::try_new(
        request.ingredients.unwrap_or_default(),
        request.tags.unwrap_or_default(),
    )
    .map_err(|err| map_search_error(&err))?;

    let results = state.search.run(&query).await?;
    Ok(web::Json(
        results.into_iter().map(RecipeResponse::from).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde_json::Value;

    fn full_request() -> RecipeRequest {
        RecipeRequest {
            title: Some("Stir fry".to_owned()),
            ingredients: Some(vec!["rice".to_owned()]),
            steps: Some(vec!["cook".to_owned()]),
            tags: Some(vec!["Dinner".to_owned()]),
        }
    }

    #[test]
    fn parse_accepts_a_complete_request_and_lower_cases_tags() {
        let draft = parse_recipe_request(full_request()).expect("valid");
        assert_eq!(draft.title(), "Stir fry");
        let tags: Vec<&str> = draft.tags().iter().map(AsRef::as_ref).collect();
        assert_eq!(tags, vec!["dinner"]);
    }

    #[rstest]
    #[case(RecipeRequest { title: None, ..full_request() }, "title")]
    #[case(RecipeRequest { ingredients: None, ..full_request() }, "ingredients")]
    #[case(RecipeRequest { steps: None, ..full_request() }, "steps")]
    fn parse_rejects_missing_fields(#[case] payload: RecipeRequest, #[case] field: &str) {
        let error = parse_recipe_request(payload).expect_err("must be rejected");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let details = error.details().expect("details present");
        assert_eq!(details.get("field").and_then(Value::as_str), Some(field));
    }

    #[test]
    fn tags_are_optional_on_create() {
        let draft = parse_recipe_request(RecipeRequest {
            tags: None,
            ..full_request()
        })
        .expect("valid without tags");
        assert!(draft.tags().is_empty());
    }

    #[rstest]
    #[case(None, RecipeSort::Newest)]
    #[case(Some("oldest".to_owned()), RecipeSort::Oldest)]
    #[case(Some("az".to_owned()), RecipeSort::TitleAsc)]
    fn sort_parsing(#[case] raw: Option<String>, #[case] expected: RecipeSort) {
        assert_eq!(
            parse_sort(ListParams { sort: raw }).expect("valid"),
            expected
        );
    }

    #[test]
    fn unknown_sort_is_a_validation_error() {
        let error = parse_sort(ListParams {
            sort: Some("latest".to_owned()),
        })
        .expect_err("must be rejected");
        let details = error.details().expect("details present");
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some("invalid_sort")
        );
    }

    #[test]
    fn empty_search_maps_to_the_dedicated_code() {
        let error = SearchQuery::try_new(Vec::new(), Vec::new())
            .map_err(|err| map_search_error(&err))
            .expect_err("must be rejected");
        let details = error.details().expect("details present");
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some("empty_search")
        );
    }
}
