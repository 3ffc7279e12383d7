use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use potluck_core::RecipeService;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ToggleFavoriteResponse {
    /// "added" or "removed"
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/favorite",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Favorite toggled", body = ToggleFavoriteResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn toggle_favorite(
    AuthUser(user): AuthUser,
    State(recipes): State<Arc<RecipeService>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match recipes.toggle_favorite(user.id, id) {
        Ok(toggle) => Json(ToggleFavoriteResponse {
            message: toggle.as_str().to_string(),
        })
        .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
