pub mod create;
pub mod delete;
pub mod favorite;
pub mod favorites;
pub mod list;
pub mod my;
pub mod update;

use crate::AppState;
use axum::routing::{get, post, put};
use axum::Router;
use chrono::{DateTime, Utc};
use potluck_core::Recipe;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list::list_public_recipes).post(create::create_recipe),
        )
        .route("/my", get(my::list_my_recipes))
        .route("/favorites", get(favorites::list_favorite_recipes))
        .route(
            "/{id}",
            put(update::update_recipe).delete(delete::delete_recipe),
        )
        .route("/{id}/favorite", post(favorite::toggle_favorite))
}

/// Full recipe payload, shared by every recipe endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
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

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        RecipeResponse {
            id: recipe.id,
            owner_id: recipe.owner_id,
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

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_recipe,
        list::list_public_recipes,
        my::list_my_recipes,
        update::update_recipe,
        delete::delete_recipe,
        favorite::toggle_favorite,
        favorites::list_favorite_recipes,
    ),
    components(schemas(
        RecipeResponse,
        create::CreateRecipeRequest,
        list::PublicRecipeResponse,
        update::UpdateRecipeRequest,
        delete::DeleteRecipeResponse,
        favorite::ToggleFavoriteResponse,
    ))
)]
pub struct ApiDoc;
