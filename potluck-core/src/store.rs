use std::collections::HashMap;
use uuid::Uuid;

use crate::error::StoreError;
use crate::filter::{RecipeFilter, SortSpec};
use crate::types::{NewRecipe, Recipe, RecipePatch};

/// Result of a favorite toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggle {
    Added,
    Removed,
}

impl FavoriteToggle {
    pub fn as_str(&self) -> &'static str {
        match self {
            FavoriteToggle::Added => "added",
            FavoriteToggle::Removed => "removed",
        }
    }
}

/// Persistence interface for recipes. Implementations provide per-call
/// atomicity; anything beyond that is the service's problem.
pub trait RecipeStore: Send + Sync {
    /// Inserts the recipe and returns it with its generated id and
    /// creation time filled in.
    fn insert(&self, recipe: NewRecipe) -> Result<Recipe, StoreError>;

    fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, StoreError>;

    /// Resolves a set of ids. Ids with no backing recipe are omitted from
    /// the result, not errors. Result order is unspecified.
    fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Recipe>, StoreError>;

    /// All recipes matching the filter. `sort` of `None` means store order.
    fn find_many(
        &self,
        filter: &RecipeFilter,
        sort: Option<SortSpec>,
    ) -> Result<Vec<Recipe>, StoreError>;

    /// Applies the set fields of the patch and returns the updated recipe,
    /// or `None` when the id does not exist. Must not be called with an
    /// empty patch.
    fn update_fields(&self, id: Uuid, patch: &RecipePatch) -> Result<Option<Recipe>, StoreError>;

    /// Returns whether a row was actually deleted
    fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// Persistence interface for the per-user favorites relation. The pair
/// (user, recipe) is unique; `add` on an existing pair is a no-op.
pub trait FavoriteStore: Send + Sync {
    fn contains(&self, user_id: Uuid, recipe_id: Uuid) -> Result<bool, StoreError>;

    fn add(&self, user_id: Uuid, recipe_id: Uuid) -> Result<(), StoreError>;

    fn remove(&self, user_id: Uuid, recipe_id: Uuid) -> Result<(), StoreError>;

    /// Favorited recipe ids for one user, oldest first. May contain ids of
    /// recipes that no longer exist.
    fn recipe_ids_for(&self, user_id: Uuid) -> Result<Vec<Uuid>, StoreError>;
}

/// Lookup of user display names for the public listing
pub trait OwnerDirectory: Send + Sync {
    /// Names for the given user ids; unknown ids are simply absent from
    /// the map.
    fn display_names(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, String>, StoreError>;
}
