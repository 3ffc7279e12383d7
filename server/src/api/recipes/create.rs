use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use potluck_core::{RecipeDraft, RecipeService};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::RecipeResponse;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub category: String,
    /// Minutes, defaults to 0
    pub prep_time: Option<i32>,
    /// Minutes, defaults to 0
    pub cook_time: Option<i32>,
    /// Easy, Medium or Hard; defaults to Easy
    pub difficulty: Option<String>,
    /// Image URL
    pub image: Option<String>,
    /// Defaults to false (private)
    pub is_public: Option<bool>,
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created successfully", body = RecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(recipes): State<Arc<RecipeService>>,
    Json(request): Json<CreateRecipeRequest>,
) -> impl IntoResponse {
    let draft = RecipeDraft {
        title: request.title,
        ingredients: request.ingredients,
        steps: request.steps,
        category: request.category,
        prep_time: request.prep_time,
        cook_time: request.cook_time,
        difficulty: request.difficulty,
        image: request.image,
        is_public: request.is_public,
    };

    match recipes.create(user.id, draft) {
        Ok(recipe) => (StatusCode::CREATED, Json(RecipeResponse::from(recipe))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
