use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use potluck_core::{
    Difficulty, FavoriteStore, NewRecipe, OwnerDirectory, Recipe, RecipeFilter, RecipePatch,
    RecipeStore, SortDirection, SortField, SortSpec, StoreError,
};
use uuid::Uuid;

use crate::db::DbPool;
use crate::schema::{favorites, recipes, users};

type PgConn = PooledConnection<ConnectionManager<PgConnection>>;

/// PostgreSQL implementation of the core storage traits, one struct for
/// all three so a single pool serves the whole service.
pub struct PgStore {
    pool: Arc<DbPool>,
}

impl PgStore {
    pub fn new(pool: Arc<DbPool>) -> Self {
        PgStore { pool }
    }

    fn conn(&self) -> Result<PgConn, StoreError> {
        self.pool
            .get()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

fn query_error(e: diesel::result::Error) -> StoreError {
    StoreError::Query(e.to_string())
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct RecipeRow {
    id: Uuid,
    owner_id: Uuid,
    title: String,
    ingredients: Vec<Option<String>>,
    steps: Vec<Option<String>>,
    category: String,
    prep_time: i32,
    cook_time: i32,
    difficulty: String,
    image: Option<String>,
    is_public: bool,
    created_at: DateTime<Utc>,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Recipe {
            id: row.id,
            owner_id: row.owner_id,
            title: row.title,
            ingredients: row.ingredients.into_iter().flatten().collect(),
            steps: row.steps.into_iter().flatten().collect(),
            category: row.category,
            prep_time: row.prep_time,
            cook_time: row.cook_time,
            // Unrecognized text in the column falls back rather than failing the read
            difficulty: Difficulty::from_str(&row.difficulty).unwrap_or_default(),
            image: row.image,
            is_public: row.is_public,
            created_at: row.created_at,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = recipes)]
struct NewRecipeRow<'a> {
    owner_id: Uuid,
    title: &'a str,
    ingredients: &'a [Option<String>],
    steps: &'a [Option<String>],
    category: &'a str,
    prep_time: i32,
    cook_time: i32,
    difficulty: &'a str,
    image: Option<&'a str>,
    is_public: bool,
}

/// Partial update row. `None` fields are left untouched by diesel.
#[derive(AsChangeset)]
#[diesel(table_name = recipes)]
struct RecipeChangeset<'a> {
    title: Option<&'a str>,
    ingredients: Option<Vec<Option<String>>>,
    steps: Option<Vec<Option<String>>>,
    category: Option<&'a str>,
    prep_time: Option<i32>,
    cook_time: Option<i32>,
    difficulty: Option<&'a str>,
    image: Option<&'a str>,
    is_public: Option<bool>,
}

impl<'a> RecipeChangeset<'a> {
    fn from_patch(patch: &'a RecipePatch) -> Self {
        RecipeChangeset {
            title: patch.title.as_deref(),
            ingredients: patch
                .ingredients
                .as_ref()
                .map(|v| v.iter().cloned().map(Some).collect()),
            steps: patch
                .steps
                .as_ref()
                .map(|v| v.iter().cloned().map(Some).collect()),
            category: patch.category.as_deref(),
            prep_time: patch.prep_time,
            cook_time: patch.cook_time,
            difficulty: patch.difficulty.as_deref(),
            image: patch.image.as_deref(),
            is_public: patch.is_public,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = favorites)]
struct NewFavorite {
    user_id: Uuid,
    recipe_id: Uuid,
}

impl RecipeStore for PgStore {
    fn insert(&self, recipe: NewRecipe) -> Result<Recipe, StoreError> {
        let mut conn = self.conn()?;

        let ingredients: Vec<Option<String>> =
            recipe.ingredients.into_iter().map(Some).collect();
        let steps: Vec<Option<String>> = recipe.steps.into_iter().map(Some).collect();

        let row = NewRecipeRow {
            owner_id: recipe.owner_id,
            title: &recipe.title,
            ingredients: &ingredients,
            steps: &steps,
            category: &recipe.category,
            prep_time: recipe.prep_time,
            cook_time: recipe.cook_time,
            difficulty: recipe.difficulty.as_str(),
            image: recipe.image.as_deref(),
            is_public: recipe.is_public,
        };

        let inserted: RecipeRow = diesel::insert_into(recipes::table)
            .values(&row)
            .returning(RecipeRow::as_returning())
            .get_result(&mut conn)
            .map_err(query_error)?;

        Ok(inserted.into())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, StoreError> {
        let mut conn = self.conn()?;

        match recipes::table
            .find(id)
            .select(RecipeRow::as_select())
            .first::<RecipeRow>(&mut conn)
        {
            Ok(row) => Ok(Some(row.into())),
            Err(diesel::NotFound) => Ok(None),
            Err(e) => Err(query_error(e)),
        }
    }

    fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Recipe>, StoreError> {
        let mut conn = self.conn()?;

        let rows: Vec<RecipeRow> = recipes::table
            .filter(recipes::id.eq_any(ids))
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .map_err(query_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn find_many(
        &self,
        filter: &RecipeFilter,
        sort: Option<SortSpec>,
    ) -> Result<Vec<Recipe>, StoreError> {
        let mut conn = self.conn()?;

        let mut query = recipes::table.into_boxed();

        if let Some(owner_id) = filter.owner_id() {
            query = query.filter(recipes::owner_id.eq(owner_id));
        }
        if let Some(is_public) = filter.is_public() {
            query = query.filter(recipes::is_public.eq(is_public));
        }
        if let Some(category) = filter.category() {
            query = query.filter(recipes::category.eq(category.to_string()));
        }
        if let Some(difficulty) = filter.difficulty() {
            query = query.filter(recipes::difficulty.eq(difficulty.to_string()));
        }
        if let Some(min) = filter.min_prep() {
            query = query.filter(recipes::prep_time.ge(min));
        }
        if let Some(max) = filter.max_prep() {
            query = query.filter(recipes::prep_time.le(max));
        }

        // Insertion order is the default
        let query = match sort {
            Some(spec) => match (spec.field, spec.direction) {
                (SortField::CreatedAt, SortDirection::Asc) => {
                    query.order(recipes::created_at.asc())
                }
                (SortField::CreatedAt, SortDirection::Desc) => {
                    query.order(recipes::created_at.desc())
                }
                (SortField::PrepTime, SortDirection::Asc) => query.order(recipes::prep_time.asc()),
                (SortField::PrepTime, SortDirection::Desc) => {
                    query.order(recipes::prep_time.desc())
                }
                (SortField::CookTime, SortDirection::Asc) => query.order(recipes::cook_time.asc()),
                (SortField::CookTime, SortDirection::Desc) => {
                    query.order(recipes::cook_time.desc())
                }
                (SortField::Title, SortDirection::Asc) => query.order(recipes::title.asc()),
                (SortField::Title, SortDirection::Desc) => query.order(recipes::title.desc()),
            },
            None => query.order(recipes::created_at.asc()),
        };

        let rows: Vec<RecipeRow> = query
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .map_err(query_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn update_fields(&self, id: Uuid, patch: &RecipePatch) -> Result<Option<Recipe>, StoreError> {
        let mut conn = self.conn()?;

        match diesel::update(recipes::table.find(id))
            .set(&RecipeChangeset::from_patch(patch))
            .returning(RecipeRow::as_returning())
            .get_result::<RecipeRow>(&mut conn)
        {
            Ok(row) => Ok(Some(row.into())),
            Err(diesel::NotFound) => Ok(None),
            Err(e) => Err(query_error(e)),
        }
    }

    fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(recipes::table.find(id))
            .execute(&mut conn)
            .map_err(query_error)?;

        Ok(deleted > 0)
    }
}

impl FavoriteStore for PgStore {
    fn contains(&self, user_id: Uuid, recipe_id: Uuid) -> Result<bool, StoreError> {
        let mut conn = self.conn()?;

        let count: i64 = favorites::table
            .filter(favorites::user_id.eq(user_id))
            .filter(favorites::recipe_id.eq(recipe_id))
            .count()
            .get_result(&mut conn)
            .map_err(query_error)?;

        Ok(count > 0)
    }

    fn add(&self, user_id: Uuid, recipe_id: Uuid) -> Result<(), StoreError> {
        let mut conn = self.conn()?;

        // The pair is the primary key; a concurrent duplicate add is a no-op
        diesel::insert_into(favorites::table)
            .values(&NewFavorite { user_id, recipe_id })
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .map_err(query_error)?;

        Ok(())
    }

    fn remove(&self, user_id: Uuid, recipe_id: Uuid) -> Result<(), StoreError> {
        let mut conn = self.conn()?;

        diesel::delete(
            favorites::table
                .filter(favorites::user_id.eq(user_id))
                .filter(favorites::recipe_id.eq(recipe_id)),
        )
        .execute(&mut conn)
        .map_err(query_error)?;

        Ok(())
    }

    fn recipe_ids_for(&self, user_id: Uuid) -> Result<Vec<Uuid>, StoreError> {
        let mut conn = self.conn()?;

        favorites::table
            .filter(favorites::user_id.eq(user_id))
            .order(favorites::created_at.asc())
            .select(favorites::recipe_id)
            .load(&mut conn)
            .map_err(query_error)
    }
}

impl OwnerDirectory for PgStore {
    fn display_names(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, String>, StoreError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut conn = self.conn()?;

        let pairs: Vec<(Uuid, String)> = users::table
            .filter(users::id.eq_any(ids))
            .select((users::id, users::name))
            .load(&mut conn)
            .map_err(query_error)?;

        Ok(pairs.into_iter().collect())
    }
}
