use crate::api::{ApiError, ErrorResponse};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use potluck_core::{PublicQuery, PublicRecipe, RecipeService, SortSpec};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListPublicRecipesParams {
    /// Exact category match
    pub category: Option<String>,
    /// Exact difficulty match (Easy, Medium or Hard)
    pub difficulty: Option<String>,
    /// Inclusive lower bound on prep_time (minutes)
    pub min_prep: Option<i32>,
    /// Inclusive upper bound on prep_time (minutes)
    pub max_prep: Option<i32>,
    /// Sort field: created_at, prep_time, cook_time or title.
    /// Prefix with '-' for descending. Unrecognized values are ignored.
    pub sort: Option<String>,
}

/// Public recipe joined with its owner's display name
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PublicRecipeResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    /// Display name of the owner, absent if the account no longer exists
    pub owner_name: Option<String>,
    pub title: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub category: String,
    pub prep_time: i32,
    pub cook_time: i32,
    pub difficulty: String,
    pub image: Option<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

impl From<PublicRecipe> for PublicRecipeResponse {
    fn from(public: PublicRecipe) -> Self {
        let recipe = public.recipe;
        PublicRecipeResponse {
            id: recipe.id,
            owner_id: recipe.owner_id,
            owner_name: public.owner_name,
            title: recipe.title,
            ingredients: recipe.ingredients,
            steps: recipe.steps,
            category: recipe.category,
            prep_time: recipe.prep_time,
            cook_time: recipe.cook_time,
            difficulty: recipe.difficulty.as_str().to_string(),
            image: recipe.image,
            is_public: recipe.is_public,
            created_at: recipe.created_at,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListPublicRecipesParams),
    responses(
        (status = 200, description = "Public recipes matching the filters", body = [PublicRecipeResponse]),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_public_recipes(
    State(recipes): State<Arc<RecipeService>>,
    Query(params): Query<ListPublicRecipesParams>,
) -> impl IntoResponse {
    let query = PublicQuery {
        category: params.category,
        difficulty: params.difficulty,
        min_prep: params.min_prep,
        max_prep: params.max_prep,
        sort: params.sort.as_deref().and_then(SortSpec::parse),
    };

    match recipes.list_public(&query) {
        Ok(listed) => {
            let body: Vec<PublicRecipeResponse> =
                listed.into_iter().map(PublicRecipeResponse::from).collect();
            Json(body).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
