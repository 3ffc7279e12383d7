pub mod error;
pub mod filter;
pub mod service;
pub mod store;
pub mod types;

pub use error::{RecipeError, StoreError};
pub use filter::{PublicQuery, RecipeFilter, SortDirection, SortField, SortSpec};
pub use service::RecipeService;
pub use store::{FavoriteStore, FavoriteToggle, OwnerDirectory, RecipeStore};
pub use types::{Difficulty, NewRecipe, PublicRecipe, Recipe, RecipeDraft, RecipePatch};
