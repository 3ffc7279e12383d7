use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use axum::{extract::State, response::IntoResponse, Json};
use potluck_core::RecipeService;
use std::sync::Arc;

use super::RecipeResponse;

#[utoipa::path(
    get,
    path = "/api/recipes/my",
    tag = "recipes",
    responses(
        (status = 200, description = "All of the caller's recipes, private included", body = [RecipeResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_my_recipes(
    AuthUser(user): AuthUser,
    State(recipes): State<Arc<RecipeService>>,
) -> impl IntoResponse {
    match recipes.list_owned(user.id) {
        Ok(owned) => {
            let body: Vec<RecipeResponse> = owned.into_iter().map(RecipeResponse::from).collect();
            Json(body).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
