use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use potluck_core::{
    Difficulty, FavoriteStore, FavoriteToggle, NewRecipe, OwnerDirectory, PublicQuery, Recipe,
    RecipeDraft, RecipeError, RecipeFilter, RecipePatch, RecipeService, RecipeStore, SortSpec,
    StoreError,
};
use uuid::Uuid;

#[derive(Default)]
struct MemoryState {
    recipes: Vec<Recipe>,
    favorites: Vec<(Uuid, Uuid)>,
    users: HashMap<Uuid, String>,
}

/// In-memory stand-in for the persistent stores, with the same contracts:
/// insertion order is the default order, favorites are unique pairs, and
/// id lookups skip missing entries.
#[derive(Default)]
struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    fn add_user(&self, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.state
            .lock()
            .unwrap()
            .users
            .insert(id, name.to_string());
        id
    }

    fn favorite_pairs(&self) -> Vec<(Uuid, Uuid)> {
        self.state.lock().unwrap().favorites.clone()
    }
}

fn matches(filter: &RecipeFilter, recipe: &Recipe) -> bool {
    if let Some(owner_id) = filter.owner_id() {
        if recipe.owner_id != owner_id {
            return false;
        }
    }
    if let Some(is_public) = filter.is_public() {
        if recipe.is_public != is_public {
            return false;
        }
    }
    if let Some(category) = filter.category() {
        if recipe.category != category {
            return false;
        }
    }
    if let Some(difficulty) = filter.difficulty() {
        if recipe.difficulty.as_str() != difficulty {
            return false;
        }
    }
    if let Some(min) = filter.min_prep() {
        if recipe.prep_time < min {
            return false;
        }
    }
    if let Some(max) = filter.max_prep() {
        if recipe.prep_time > max {
            return false;
        }
    }
    true
}

impl RecipeStore for MemoryStore {
    fn insert(&self, recipe: NewRecipe) -> Result<Recipe, StoreError> {
        let stored = Recipe {
            id: Uuid::new_v4(),
            owner_id: recipe.owner_id,
            title: recipe.title,
            ingredients: recipe.ingredients,
            steps: recipe.steps,
            category: recipe.category,
            prep_time: recipe.prep_time,
            cook_time: recipe.cook_time,
            difficulty: recipe.difficulty,
            image: recipe.image,
            is_public: recipe.is_public,
            created_at: Utc::now(),
        };
        self.state.lock().unwrap().recipes.push(stored.clone());
        Ok(stored)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, StoreError> {
        let state = self.state.lock().unwrap();
        Ok(state.recipes.iter().find(|r| r.id == id).cloned())
    }

    fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Recipe>, StoreError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .recipes
            .iter()
            .filter(|r| ids.contains(&r.id))
            .cloned()
            .collect())
    }

    fn find_many(
        &self,
        filter: &RecipeFilter,
        sort: Option<SortSpec>,
    ) -> Result<Vec<Recipe>, StoreError> {
        use potluck_core::{SortDirection, SortField};

        let state = self.state.lock().unwrap();
        let mut results: Vec<Recipe> = state
            .recipes
            .iter()
            .filter(|r| matches(filter, r))
            .cloned()
            .collect();

        if let Some(spec) = sort {
            results.sort_by(|a, b| {
                let ord = match spec.field {
                    SortField::CreatedAt => a.created_at.cmp(&b.created_at),
                    SortField::PrepTime => a.prep_time.cmp(&b.prep_time),
                    SortField::CookTime => a.cook_time.cmp(&b.cook_time),
                    SortField::Title => a.title.cmp(&b.title),
                };
                match spec.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }

        Ok(results)
    }

    fn update_fields(&self, id: Uuid, patch: &RecipePatch) -> Result<Option<Recipe>, StoreError> {
        let mut state = self.state.lock().unwrap();
        let recipe = match state.recipes.iter_mut().find(|r| r.id == id) {
            Some(r) => r,
            None => return Ok(None),
        };

        if let Some(ref title) = patch.title {
            recipe.title = title.clone();
        }
        if let Some(ref ingredients) = patch.ingredients {
            recipe.ingredients = ingredients.clone();
        }
        if let Some(ref steps) = patch.steps {
            recipe.steps = steps.clone();
        }
        if let Some(ref category) = patch.category {
            recipe.category = category.clone();
        }
        if let Some(prep_time) = patch.prep_time {
            recipe.prep_time = prep_time;
        }
        if let Some(cook_time) = patch.cook_time {
            recipe.cook_time = cook_time;
        }
        if let Some(ref difficulty) = patch.difficulty {
            recipe.difficulty = Difficulty::from_str(difficulty).unwrap_or_default();
        }
        if let Some(ref image) = patch.image {
            recipe.image = Some(image.clone());
        }
        if let Some(is_public) = patch.is_public {
            recipe.is_public = is_public;
        }

        Ok(Some(recipe.clone()))
    }

    fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut state = self.state.lock().unwrap();
        let before = state.recipes.len();
        state.recipes.retain(|r| r.id != id);
        Ok(state.recipes.len() < before)
    }
}

impl FavoriteStore for MemoryStore {
    fn contains(&self, user_id: Uuid, recipe_id: Uuid) -> Result<bool, StoreError> {
        let state = self.state.lock().unwrap();
        Ok(state.favorites.contains(&(user_id, recipe_id)))
    }

    fn add(&self, user_id: Uuid, recipe_id: Uuid) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        if !state.favorites.contains(&(user_id, recipe_id)) {
            state.favorites.push((user_id, recipe_id));
        }
        Ok(())
    }

    fn remove(&self, user_id: Uuid, recipe_id: Uuid) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        state.favorites.retain(|f| *f != (user_id, recipe_id));
        Ok(())
    }

    fn recipe_ids_for(&self, user_id: Uuid) -> Result<Vec<Uuid>, StoreError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .favorites
            .iter()
            .filter(|(u, _)| *u == user_id)
            .map(|(_, r)| *r)
            .collect())
    }
}

impl OwnerDirectory for MemoryStore {
    fn display_names(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, String>, StoreError> {
        let state = self.state.lock().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| state.users.get(id).map(|name| (*id, name.clone())))
            .collect())
    }
}

/// Store double where every operation fails
struct FaultyStore;

fn fault() -> StoreError {
    StoreError::Unavailable("connection pool timed out".to_string())
}

impl RecipeStore for FaultyStore {
    fn insert(&self, _recipe: NewRecipe) -> Result<Recipe, StoreError> {
        Err(fault())
    }

    fn find_by_id(&self, _id: Uuid) -> Result<Option<Recipe>, StoreError> {
        Err(fault())
    }

    fn find_by_ids(&self, _ids: &[Uuid]) -> Result<Vec<Recipe>, StoreError> {
        Err(fault())
    }

    fn find_many(
        &self,
        _filter: &RecipeFilter,
        _sort: Option<SortSpec>,
    ) -> Result<Vec<Recipe>, StoreError> {
        Err(fault())
    }

    fn update_fields(&self, _id: Uuid, _patch: &RecipePatch) -> Result<Option<Recipe>, StoreError> {
        Err(fault())
    }

    fn delete_by_id(&self, _id: Uuid) -> Result<bool, StoreError> {
        Err(fault())
    }
}

impl FavoriteStore for FaultyStore {
    fn contains(&self, _user_id: Uuid, _recipe_id: Uuid) -> Result<bool, StoreError> {
        Err(fault())
    }

    fn add(&self, _user_id: Uuid, _recipe_id: Uuid) -> Result<(), StoreError> {
        Err(fault())
    }

    fn remove(&self, _user_id: Uuid, _recipe_id: Uuid) -> Result<(), StoreError> {
        Err(fault())
    }

    fn recipe_ids_for(&self, _user_id: Uuid) -> Result<Vec<Uuid>, StoreError> {
        Err(fault())
    }
}

impl OwnerDirectory for FaultyStore {
    fn display_names(&self, _ids: &[Uuid]) -> Result<HashMap<Uuid, String>, StoreError> {
        Err(fault())
    }
}

fn fixture() -> (Arc<MemoryStore>, RecipeService) {
    let store = Arc::new(MemoryStore::default());
    let service = RecipeService::new(store.clone(), store.clone(), store.clone());
    (store, service)
}

fn faulty_fixture() -> RecipeService {
    let store = Arc::new(FaultyStore);
    RecipeService::new(store.clone(), store.clone(), store)
}

fn draft(title: &str) -> RecipeDraft {
    RecipeDraft {
        title: title.to_string(),
        ingredients: vec!["2 eggs".to_string(), "100g flour".to_string()],
        steps: vec!["Mix".to_string(), "Fry".to_string()],
        category: "Breakfast".to_string(),
        ..Default::default()
    }
}

fn assert_validation(result: Result<Recipe, RecipeError>, expected: &str) {
    match result {
        Err(RecipeError::Validation(msg)) => assert_eq!(msg, expected),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn create_applies_defaults() {
    let (store, service) = fixture();
    let owner = store.add_user("alice");

    let recipe = service.create(owner, draft("Pancakes")).unwrap();

    assert_eq!(recipe.owner_id, owner);
    assert_eq!(recipe.prep_time, 0);
    assert_eq!(recipe.cook_time, 0);
    assert_eq!(recipe.difficulty, Difficulty::Easy);
    assert_eq!(recipe.image, None);
    assert!(!recipe.is_public);
}

#[test]
fn create_keeps_explicit_fields() {
    let (store, service) = fixture();
    let owner = store.add_user("alice");

    let recipe = service
        .create(
            owner,
            RecipeDraft {
                prep_time: Some(25),
                cook_time: Some(40),
                difficulty: Some("Hard".to_string()),
                image: Some("https://example.com/cake.jpg".to_string()),
                is_public: Some(true),
                ..draft("Cake")
            },
        )
        .unwrap();

    assert_eq!(recipe.prep_time, 25);
    assert_eq!(recipe.cook_time, 40);
    assert_eq!(recipe.difficulty, Difficulty::Hard);
    assert_eq!(recipe.image.as_deref(), Some("https://example.com/cake.jpg"));
    assert!(recipe.is_public);
}

#[test]
fn create_rejects_blank_title() {
    let (store, service) = fixture();
    let owner = store.add_user("alice");

    let result = service.create(owner, draft("   "));
    assert_validation(result, "Title cannot be empty");
}

#[test]
fn create_rejects_empty_ingredients() {
    let (store, service) = fixture();
    let owner = store.add_user("alice");

    let result = service.create(
        owner,
        RecipeDraft {
            ingredients: vec![],
            ..draft("Toast")
        },
    );
    assert_validation(result, "At least one ingredient is required");
}

#[test]
fn create_rejects_blank_ingredient_entry() {
    let (store, service) = fixture();
    let owner = store.add_user("alice");

    let result = service.create(
        owner,
        RecipeDraft {
            ingredients: vec!["bread".to_string(), "  ".to_string()],
            ..draft("Toast")
        },
    );
    assert_validation(result, "Ingredients cannot contain empty entries");
}

#[test]
fn create_rejects_empty_steps() {
    let (store, service) = fixture();
    let owner = store.add_user("alice");

    let result = service.create(
        owner,
        RecipeDraft {
            steps: vec![],
            ..draft("Toast")
        },
    );
    assert_validation(result, "At least one step is required");
}

#[test]
fn create_rejects_negative_prep_time() {
    let (store, service) = fixture();
    let owner = store.add_user("alice");

    let result = service.create(
        owner,
        RecipeDraft {
            prep_time: Some(-5),
            ..draft("Toast")
        },
    );
    assert_validation(result, "Prep time cannot be negative");
}

#[test]
fn create_rejects_unknown_difficulty() {
    let (store, service) = fixture();
    let owner = store.add_user("alice");

    let result = service.create(
        owner,
        RecipeDraft {
            difficulty: Some("Impossible".to_string()),
            ..draft("Toast")
        },
    );
    assert_validation(result, "Difficulty must be one of Easy, Medium, Hard");
}

#[test]
fn list_public_excludes_private_recipes() {
    let (store, service) = fixture();
    let owner = store.add_user("alice");

    service.create(owner, draft("Private soup")).unwrap();
    let public = service
        .create(
            owner,
            RecipeDraft {
                is_public: Some(true),
                ..draft("Public soup")
            },
        )
        .unwrap();

    let listed = service.list_public(&PublicQuery::default()).unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].recipe.id, public.id);
}

#[test]
fn list_public_joins_owner_names() {
    let (store, service) = fixture();
    let alice = store.add_user("alice");
    let bob = store.add_user("bob");

    service
        .create(
            alice,
            RecipeDraft {
                is_public: Some(true),
                ..draft("Alice dish")
            },
        )
        .unwrap();
    service
        .create(
            bob,
            RecipeDraft {
                is_public: Some(true),
                ..draft("Bob dish")
            },
        )
        .unwrap();

    let listed = service.list_public(&PublicQuery::default()).unwrap();

    let names: Vec<Option<&str>> = listed.iter().map(|p| p.owner_name.as_deref()).collect();
    assert_eq!(names, vec![Some("alice"), Some("bob")]);
}

#[test]
fn list_public_leaves_name_empty_for_unknown_owner() {
    let (_, service) = fixture();
    // Owner id that was never registered in the directory
    let ghost = Uuid::new_v4();

    service
        .create(
            ghost,
            RecipeDraft {
                is_public: Some(true),
                ..draft("Orphan dish")
            },
        )
        .unwrap();

    let listed = service.list_public(&PublicQuery::default()).unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].owner_name, None);
}

#[test]
fn list_public_filters_combine() {
    let (store, service) = fixture();
    let owner = store.add_user("alice");

    let wanted = service
        .create(
            owner,
            RecipeDraft {
                category: "Dessert".to_string(),
                difficulty: Some("Medium".to_string()),
                is_public: Some(true),
                ..draft("Tiramisu")
            },
        )
        .unwrap();
    // Same category, different difficulty
    service
        .create(
            owner,
            RecipeDraft {
                category: "Dessert".to_string(),
                difficulty: Some("Hard".to_string()),
                is_public: Some(true),
                ..draft("Croquembouche")
            },
        )
        .unwrap();
    // Same difficulty, different category
    service
        .create(
            owner,
            RecipeDraft {
                category: "Breakfast".to_string(),
                difficulty: Some("Medium".to_string()),
                is_public: Some(true),
                ..draft("Omelette")
            },
        )
        .unwrap();

    let listed = service
        .list_public(&PublicQuery {
            category: Some("Dessert".to_string()),
            difficulty: Some("Medium".to_string()),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].recipe.id, wanted.id);
}

#[test]
fn list_public_unknown_difficulty_matches_nothing() {
    let (store, service) = fixture();
    let owner = store.add_user("alice");

    service
        .create(
            owner,
            RecipeDraft {
                is_public: Some(true),
                ..draft("Soup")
            },
        )
        .unwrap();

    let listed = service
        .list_public(&PublicQuery {
            difficulty: Some("Expert".to_string()),
            ..Default::default()
        })
        .unwrap();

    assert!(listed.is_empty());
}

#[test]
fn list_public_prep_time_bounds_are_inclusive() {
    let (store, service) = fixture();
    let owner = store.add_user("alice");

    for prep in [5, 15, 30] {
        service
            .create(
                owner,
                RecipeDraft {
                    prep_time: Some(prep),
                    is_public: Some(true),
                    ..draft(&format!("Dish {}", prep))
                },
            )
            .unwrap();
    }

    let listed = service
        .list_public(&PublicQuery {
            min_prep: Some(10),
            max_prep: Some(20),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].recipe.prep_time, 15);
}

#[test]
fn list_public_sorts_by_prep_time_descending() {
    let (store, service) = fixture();
    let owner = store.add_user("alice");

    for prep in [15, 5, 30] {
        service
            .create(
                owner,
                RecipeDraft {
                    prep_time: Some(prep),
                    is_public: Some(true),
                    ..draft(&format!("Dish {}", prep))
                },
            )
            .unwrap();
    }

    let listed = service
        .list_public(&PublicQuery {
            sort: SortSpec::parse("-prep_time"),
            ..Default::default()
        })
        .unwrap();

    let times: Vec<i32> = listed.iter().map(|p| p.recipe.prep_time).collect();
    assert_eq!(times, vec![30, 15, 5]);
}

#[test]
fn list_public_sorts_by_title() {
    let (store, service) = fixture();
    let owner = store.add_user("alice");

    for title in ["Waffles", "Bagels", "Muffins"] {
        service
            .create(
                owner,
                RecipeDraft {
                    is_public: Some(true),
                    ..draft(title)
                },
            )
            .unwrap();
    }

    let listed = service
        .list_public(&PublicQuery {
            sort: SortSpec::parse("title"),
            ..Default::default()
        })
        .unwrap();

    let titles: Vec<&str> = listed.iter().map(|p| p.recipe.title.as_str()).collect();
    assert_eq!(titles, vec!["Bagels", "Muffins", "Waffles"]);
}

#[test]
fn list_owned_includes_private_recipes() {
    let (store, service) = fixture();
    let alice = store.add_user("alice");
    let bob = store.add_user("bob");

    let private = service.create(alice, draft("Secret sauce")).unwrap();
    let public = service
        .create(
            alice,
            RecipeDraft {
                is_public: Some(true),
                ..draft("House bread")
            },
        )
        .unwrap();
    service
        .create(
            bob,
            RecipeDraft {
                is_public: Some(true),
                ..draft("Bob's stew")
            },
        )
        .unwrap();

    let owned = service.list_owned(alice).unwrap();

    let ids: Vec<Uuid> = owned.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![private.id, public.id]);
}

#[test]
fn update_merges_only_present_fields() {
    let (store, service) = fixture();
    let owner = store.add_user("alice");

    let recipe = service
        .create(
            owner,
            RecipeDraft {
                prep_time: Some(10),
                ..draft("Pasta")
            },
        )
        .unwrap();

    let updated = service
        .update(
            recipe.id,
            owner,
            RecipePatch {
                title: Some("Pasta al forno".to_string()),
                cook_time: Some(45),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(updated.title, "Pasta al forno");
    assert_eq!(updated.cook_time, 45);
    // Untouched fields survive
    assert_eq!(updated.prep_time, 10);
    assert_eq!(updated.ingredients, recipe.ingredients);
    assert_eq!(updated.owner_id, owner);
    assert_eq!(updated.id, recipe.id);
}

#[test]
fn update_empty_patch_is_a_no_op() {
    let (store, service) = fixture();
    let owner = store.add_user("alice");

    let recipe = service.create(owner, draft("Pasta")).unwrap();
    let updated = service
        .update(recipe.id, owner, RecipePatch::default())
        .unwrap();

    assert_eq!(updated, recipe);
}

#[test]
fn update_missing_recipe_is_not_found() {
    let (store, service) = fixture();
    let owner = store.add_user("alice");

    let result = service.update(
        Uuid::new_v4(),
        owner,
        RecipePatch {
            title: Some("New title".to_string()),
            ..Default::default()
        },
    );

    assert!(matches!(result, Err(RecipeError::NotFound)));
}

#[test]
fn update_by_non_owner_is_forbidden_and_changes_nothing() {
    let (store, service) = fixture();
    let alice = store.add_user("alice");
    let mallory = store.add_user("mallory");

    let recipe = service.create(alice, draft("Pasta")).unwrap();

    let result = service.update(
        recipe.id,
        mallory,
        RecipePatch {
            title: Some("Stolen pasta".to_string()),
            is_public: Some(true),
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(RecipeError::Forbidden)));

    let unchanged = service.update(recipe.id, alice, RecipePatch::default()).unwrap();
    assert_eq!(unchanged, recipe);
}

#[test]
fn update_rejects_blank_title() {
    let (store, service) = fixture();
    let owner = store.add_user("alice");

    let recipe = service.create(owner, draft("Pasta")).unwrap();
    let result = service.update(
        recipe.id,
        owner,
        RecipePatch {
            title: Some("   ".to_string()),
            ..Default::default()
        },
    );

    assert_validation(result, "Title cannot be empty");
}

#[test]
fn update_rejects_empty_ingredient_list() {
    let (store, service) = fixture();
    let owner = store.add_user("alice");

    let recipe = service.create(owner, draft("Pasta")).unwrap();
    let result = service.update(
        recipe.id,
        owner,
        RecipePatch {
            ingredients: Some(vec![]),
            ..Default::default()
        },
    );

    assert_validation(result, "At least one ingredient is required");
}

#[test]
fn delete_removes_recipe() {
    let (store, service) = fixture();
    let owner = store.add_user("alice");

    let recipe = service.create(owner, draft("Pasta")).unwrap();
    service.delete(recipe.id, owner).unwrap();

    assert!(service.list_owned(owner).unwrap().is_empty());
    assert!(matches!(
        service.delete(recipe.id, owner),
        Err(RecipeError::NotFound)
    ));
}

#[test]
fn delete_by_non_owner_is_forbidden() {
    let (store, service) = fixture();
    let alice = store.add_user("alice");
    let mallory = store.add_user("mallory");

    let recipe = service.create(alice, draft("Pasta")).unwrap();

    let result = service.delete(recipe.id, mallory);
    assert!(matches!(result, Err(RecipeError::Forbidden)));
    assert_eq!(service.list_owned(alice).unwrap().len(), 1);
}

#[test]
fn toggle_favorite_adds_then_removes() {
    let (store, service) = fixture();
    let alice = store.add_user("alice");
    let bob = store.add_user("bob");

    let recipe = service
        .create(
            alice,
            RecipeDraft {
                is_public: Some(true),
                ..draft("Pasta")
            },
        )
        .unwrap();

    assert_eq!(
        service.toggle_favorite(bob, recipe.id).unwrap(),
        FavoriteToggle::Added
    );
    assert_eq!(service.list_favorites(bob).unwrap().len(), 1);

    assert_eq!(
        service.toggle_favorite(bob, recipe.id).unwrap(),
        FavoriteToggle::Removed
    );
    assert!(service.list_favorites(bob).unwrap().is_empty());
}

#[test]
fn toggle_favorite_accepts_unknown_recipe_id() {
    let (store, service) = fixture();
    let bob = store.add_user("bob");
    let ghost_id = Uuid::new_v4();

    assert_eq!(
        service.toggle_favorite(bob, ghost_id).unwrap(),
        FavoriteToggle::Added
    );
    // The dangling id is stored but resolves to nothing
    assert_eq!(store.favorite_pairs(), vec![(bob, ghost_id)]);
    assert!(service.list_favorites(bob).unwrap().is_empty());
}

#[test]
fn list_favorites_returns_oldest_first() {
    let (store, service) = fixture();
    let alice = store.add_user("alice");
    let bob = store.add_user("bob");

    let first = service
        .create(
            alice,
            RecipeDraft {
                is_public: Some(true),
                ..draft("First")
            },
        )
        .unwrap();
    let second = service
        .create(
            alice,
            RecipeDraft {
                is_public: Some(true),
                ..draft("Second")
            },
        )
        .unwrap();

    service.toggle_favorite(bob, second.id).unwrap();
    service.toggle_favorite(bob, first.id).unwrap();

    let favorites = service.list_favorites(bob).unwrap();
    let ids: Vec<Uuid> = favorites.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[test]
fn favorites_are_per_user() {
    let (store, service) = fixture();
    let alice = store.add_user("alice");
    let bob = store.add_user("bob");
    let carol = store.add_user("carol");

    let recipe = service
        .create(
            alice,
            RecipeDraft {
                is_public: Some(true),
                ..draft("Pasta")
            },
        )
        .unwrap();

    service.toggle_favorite(bob, recipe.id).unwrap();

    assert_eq!(service.list_favorites(bob).unwrap().len(), 1);
    assert!(service.list_favorites(carol).unwrap().is_empty());
}

#[test]
fn deleting_a_recipe_leaves_favorites_dangling() {
    let (store, service) = fixture();
    let alice = store.add_user("alice");
    let bob = store.add_user("bob");

    let recipe = service
        .create(
            alice,
            RecipeDraft {
                is_public: Some(true),
                ..draft("Pasta")
            },
        )
        .unwrap();

    // Bob finds it in the public listing and favorites it
    let listed = service.list_public(&PublicQuery::default()).unwrap();
    assert_eq!(listed[0].recipe.id, recipe.id);
    service.toggle_favorite(bob, recipe.id).unwrap();
    assert_eq!(service.list_favorites(bob).unwrap()[0].id, recipe.id);

    // Alice deletes the recipe; the favorite row stays behind
    service.delete(recipe.id, alice).unwrap();

    assert!(service.list_favorites(bob).unwrap().is_empty());
    assert_eq!(store.favorite_pairs(), vec![(bob, recipe.id)]);
}

#[test]
fn list_public_surfaces_store_faults() {
    let service = faulty_fixture();

    // A failing store must be an error, never an empty success
    let result = service.list_public(&PublicQuery::default());
    assert!(matches!(
        result,
        Err(RecipeError::Store(StoreError::Unavailable(_)))
    ));
}

#[test]
fn favorite_operations_surface_store_faults() {
    let service = faulty_fixture();
    let caller = Uuid::new_v4();

    assert!(matches!(
        service.toggle_favorite(caller, Uuid::new_v4()),
        Err(RecipeError::Store(_))
    ));
    assert!(matches!(
        service.list_favorites(caller),
        Err(RecipeError::Store(_))
    ));
}
