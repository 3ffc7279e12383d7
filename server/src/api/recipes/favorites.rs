use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use axum::{extract::State, response::IntoResponse, Json};
use potluck_core::RecipeService;
use std::sync::Arc;

use super::RecipeResponse;

#[utoipa::path(
    get,
    path = "/api/recipes/favorites",
    tag = "recipes",
    responses(
        (status = 200, description = "The caller's favorite recipes, oldest favorite first", body = [RecipeResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_favorite_recipes(
    AuthUser(user): AuthUser,
    State(recipes): State<Arc<RecipeService>>,
) -> impl IntoResponse {
    match recipes.list_favorites(user.id) {
        Ok(favorites) => {
            let body: Vec<RecipeResponse> =
                favorites.into_iter().map(RecipeResponse::from).collect();
            Json(body).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
