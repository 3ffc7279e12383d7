use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::RecipeError;
use crate::filter::{PublicQuery, RecipeFilter};
use crate::store::{FavoriteStore, FavoriteToggle, OwnerDirectory, RecipeStore};
use crate::types::{Difficulty, NewRecipe, PublicRecipe, Recipe, RecipeDraft, RecipePatch};

/// Ownership and visibility rules for recipes, layered over the store
/// traits. All access control lives here; the HTTP layer only maps wire
/// formats and the stores only persist.
pub struct RecipeService {
    recipes: Arc<dyn RecipeStore>,
    favorites: Arc<dyn FavoriteStore>,
    owners: Arc<dyn OwnerDirectory>,
}

impl RecipeService {
    pub fn new(
        recipes: Arc<dyn RecipeStore>,
        favorites: Arc<dyn FavoriteStore>,
        owners: Arc<dyn OwnerDirectory>,
    ) -> Self {
        RecipeService {
            recipes,
            favorites,
            owners,
        }
    }

    /// Validates the draft, applies defaults and inserts the recipe for
    /// `owner_id`.
    pub fn create(&self, owner_id: Uuid, draft: RecipeDraft) -> Result<Recipe, RecipeError> {
        validate_title(&draft.title)?;
        validate_category(&draft.category)?;
        validate_ingredients(&draft.ingredients)?;
        validate_steps(&draft.steps)?;

        let prep_time = draft.prep_time.unwrap_or(0);
        let cook_time = draft.cook_time.unwrap_or(0);
        validate_minutes("Prep time", prep_time)?;
        validate_minutes("Cook time", cook_time)?;

        let difficulty = match draft.difficulty.as_deref() {
            Some(s) => validate_difficulty(s)?,
            None => Difficulty::default(),
        };

        let recipe = self.recipes.insert(NewRecipe {
            owner_id,
            title: draft.title,
            ingredients: draft.ingredients,
            steps: draft.steps,
            category: draft.category,
            prep_time,
            cook_time,
            difficulty,
            image: draft.image,
            is_public: draft.is_public.unwrap_or(false),
        })?;

        Ok(recipe)
    }

    /// Public recipes matching the query, each joined with its owner's
    /// display name. The visibility predicate is added here so callers
    /// cannot widen it.
    pub fn list_public(&self, query: &PublicQuery) -> Result<Vec<PublicRecipe>, RecipeError> {
        let mut filter = RecipeFilter::public_only();
        if let Some(ref category) = query.category {
            filter = filter.with_category(category.clone());
        }
        if let Some(ref difficulty) = query.difficulty {
            filter = filter.with_difficulty(difficulty.clone());
        }
        filter = filter.with_prep_between(query.min_prep, query.max_prep);

        let recipes = self.recipes.find_many(&filter, query.sort)?;

        let mut owner_ids: Vec<Uuid> = recipes.iter().map(|r| r.owner_id).collect();
        owner_ids.sort_unstable();
        owner_ids.dedup();
        let names = self.owners.display_names(&owner_ids)?;

        Ok(recipes
            .into_iter()
            .map(|recipe| {
                let owner_name = names.get(&recipe.owner_id).cloned();
                PublicRecipe { recipe, owner_name }
            })
            .collect())
    }

    /// All of one owner's recipes, private ones included
    pub fn list_owned(&self, owner_id: Uuid) -> Result<Vec<Recipe>, RecipeError> {
        Ok(self
            .recipes
            .find_many(&RecipeFilter::owned_by(owner_id), None)?)
    }

    /// Applies a partial update on behalf of `caller_id`. The id is
    /// resolved before the owner check, so a missing recipe is `NotFound`
    /// even when the caller would not have owned it.
    pub fn update(
        &self,
        recipe_id: Uuid,
        caller_id: Uuid,
        patch: RecipePatch,
    ) -> Result<Recipe, RecipeError> {
        if let Some(ref title) = patch.title {
            validate_title(title)?;
        }
        if let Some(ref category) = patch.category {
            validate_category(category)?;
        }
        if let Some(ref ingredients) = patch.ingredients {
            validate_ingredients(ingredients)?;
        }
        if let Some(ref steps) = patch.steps {
            validate_steps(steps)?;
        }
        if let Some(prep_time) = patch.prep_time {
            validate_minutes("Prep time", prep_time)?;
        }
        if let Some(cook_time) = patch.cook_time {
            validate_minutes("Cook time", cook_time)?;
        }
        if let Some(ref difficulty) = patch.difficulty {
            validate_difficulty(difficulty)?;
        }

        let existing = self
            .recipes
            .find_by_id(recipe_id)?
            .ok_or(RecipeError::NotFound)?;
        if existing.owner_id != caller_id {
            return Err(RecipeError::Forbidden);
        }

        if patch.is_empty() {
            return Ok(existing);
        }

        match self.recipes.update_fields(recipe_id, &patch)? {
            Some(updated) => Ok(updated),
            None => Err(RecipeError::NotFound),
        }
    }

    /// Deletes the recipe on behalf of `caller_id`. Favorites pointing at
    /// the recipe are left in place; they stop resolving on read.
    pub fn delete(&self, recipe_id: Uuid, caller_id: Uuid) -> Result<(), RecipeError> {
        let existing = self
            .recipes
            .find_by_id(recipe_id)?
            .ok_or(RecipeError::NotFound)?;
        if existing.owner_id != caller_id {
            return Err(RecipeError::Forbidden);
        }

        if !self.recipes.delete_by_id(recipe_id)? {
            return Err(RecipeError::NotFound);
        }

        Ok(())
    }

    /// Flips membership of the recipe in the caller's favorites. The
    /// recipe id is not checked against the store: favoriting something
    /// that does not exist succeeds and resolves to nothing on read.
    pub fn toggle_favorite(
        &self,
        caller_id: Uuid,
        recipe_id: Uuid,
    ) -> Result<FavoriteToggle, RecipeError> {
        if self.favorites.contains(caller_id, recipe_id)? {
            self.favorites.remove(caller_id, recipe_id)?;
            Ok(FavoriteToggle::Removed)
        } else {
            self.favorites.add(caller_id, recipe_id)?;
            Ok(FavoriteToggle::Added)
        }
    }

    /// The caller's favorited recipes, oldest favorite first. Dangling
    /// favorite ids are omitted.
    pub fn list_favorites(&self, caller_id: Uuid) -> Result<Vec<Recipe>, RecipeError> {
        let ids = self.favorites.recipe_ids_for(caller_id)?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut by_id: HashMap<Uuid, Recipe> = self
            .recipes
            .find_by_ids(&ids)?
            .into_iter()
            .map(|r| (r.id, r))
            .collect();

        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }
}

fn validate_title(title: &str) -> Result<(), RecipeError> {
    if title.trim().is_empty() {
        return Err(RecipeError::Validation("Title cannot be empty".to_string()));
    }
    Ok(())
}

fn validate_category(category: &str) -> Result<(), RecipeError> {
    if category.trim().is_empty() {
        return Err(RecipeError::Validation(
            "Category cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_ingredients(ingredients: &[String]) -> Result<(), RecipeError> {
    if ingredients.is_empty() {
        return Err(RecipeError::Validation(
            "At least one ingredient is required".to_string(),
        ));
    }
    if ingredients.iter().any(|i| i.trim().is_empty()) {
        return Err(RecipeError::Validation(
            "Ingredients cannot contain empty entries".to_string(),
        ));
    }
    Ok(())
}

fn validate_steps(steps: &[String]) -> Result<(), RecipeError> {
    if steps.is_empty() {
        return Err(RecipeError::Validation(
            "At least one step is required".to_string(),
        ));
    }
    if steps.iter().any(|s| s.trim().is_empty()) {
        return Err(RecipeError::Validation(
            "Steps cannot contain empty entries".to_string(),
        ));
    }
    Ok(())
}

fn validate_minutes(label: &str, minutes: i32) -> Result<(), RecipeError> {
    if minutes < 0 {
        return Err(RecipeError::Validation(format!(
            "{} cannot be negative",
            label
        )));
    }
    Ok(())
}

fn validate_difficulty(value: &str) -> Result<Difficulty, RecipeError> {
    Difficulty::from_str(value).ok_or_else(|| {
        RecipeError::Validation("Difficulty must be one of Easy, Medium, Hard".to_string())
    })
}
