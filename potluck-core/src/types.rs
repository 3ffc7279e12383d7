use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Recipe difficulty level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Easy" => Some(Difficulty::Easy),
            "Medium" => Some(Difficulty::Medium),
            "Hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// A persisted recipe. `id` and `created_at` are assigned by the store;
/// `owner_id` never changes after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub category: String,
    pub prep_time: i32,
    pub cook_time: i32,
    pub difficulty: Difficulty,
    pub image: Option<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

/// A validated recipe ready for insertion. Built by the service from a
/// [`RecipeDraft`], never directly from caller input.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub owner_id: Uuid,
    pub title: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub category: String,
    pub prep_time: i32,
    pub cook_time: i32,
    pub difficulty: Difficulty,
    pub image: Option<String>,
    pub is_public: bool,
}

/// Raw creation input as the caller supplied it. Optional fields fall back
/// to their defaults during validation.
#[derive(Debug, Clone, Default)]
pub struct RecipeDraft {
    pub title: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub category: String,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub difficulty: Option<String>,
    pub image: Option<String>,
    pub is_public: Option<bool>,
}

/// Partial update. Only these fields are patchable; ownership, id and
/// creation time are not representable here at all.
#[derive(Debug, Clone, Default)]
pub struct RecipePatch {
    pub title: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub steps: Option<Vec<String>>,
    pub category: Option<String>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub difficulty: Option<String>,
    pub image: Option<String>,
    pub is_public: Option<bool>,
}

impl RecipePatch {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.ingredients.is_none()
            && self.steps.is_none()
            && self.category.is_none()
            && self.prep_time.is_none()
            && self.cook_time.is_none()
            && self.difficulty.is_none()
            && self.image.is_none()
            && self.is_public.is_none()
    }
}

/// A public recipe together with its owner's display name. The name is
/// absent when the owning account no longer resolves.
#[derive(Debug, Clone, PartialEq)]
pub struct PublicRecipe {
    pub recipe: Recipe,
    pub owner_name: Option<String>,
}
