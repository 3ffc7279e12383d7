use uuid::Uuid;

/// Conjunction of recipe predicates. Constructed once and handed to the
/// store by reference; there is no way to loosen a filter after it is
/// built, only to add further conditions.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    owner_id: Option<Uuid>,
    is_public: Option<bool>,
    category: Option<String>,
    difficulty: Option<String>,
    min_prep: Option<i32>,
    max_prep: Option<i32>,
}

impl RecipeFilter {
    /// Filter for one owner's recipes, public or not
    pub fn owned_by(owner_id: Uuid) -> Self {
        RecipeFilter {
            owner_id: Some(owner_id),
            ..Default::default()
        }
    }

    /// Filter that only matches publicly visible recipes
    pub fn public_only() -> Self {
        RecipeFilter {
            is_public: Some(true),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: String) -> Self {
        self.category = Some(category);
        self
    }

    /// Matched as raw text: an unknown difficulty value matches nothing
    pub fn with_difficulty(mut self, difficulty: String) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Inclusive prep time bounds; either side may be open
    pub fn with_prep_between(mut self, min: Option<i32>, max: Option<i32>) -> Self {
        self.min_prep = min;
        self.max_prep = max;
        self
    }

    pub fn owner_id(&self) -> Option<Uuid> {
        self.owner_id
    }

    pub fn is_public(&self) -> Option<bool> {
        self.is_public
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn difficulty(&self) -> Option<&str> {
        self.difficulty.as_deref()
    }

    pub fn min_prep(&self) -> Option<i32> {
        self.min_prep
    }

    pub fn max_prep(&self) -> Option<i32> {
        self.max_prep
    }
}

/// Sortable recipe fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    PrepTime,
    CookTime,
    Title,
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// A parsed sort specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Parses sort values like `prep_time` or `-created_at`. A leading `-`
    /// means descending. Empty or unrecognized input yields `None`, which
    /// callers treat as "store order".
    pub fn parse(s: &str) -> Option<SortSpec> {
        let (direction, name) = match s.strip_prefix('-') {
            Some(rest) => (SortDirection::Desc, rest),
            None => (SortDirection::Asc, s),
        };

        let field = match name {
            "created_at" => SortField::CreatedAt,
            "prep_time" => SortField::PrepTime,
            "cook_time" => SortField::CookTime,
            "title" => SortField::Title,
            _ => return None,
        };

        Some(SortSpec { field, direction })
    }
}

/// Caller-facing query for the public recipe listing. Everything is
/// optional; the service conjoins whatever is present with its own
/// visibility predicate.
#[derive(Debug, Clone, Default)]
pub struct PublicQuery {
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub min_prep: Option<i32>,
    pub max_prep: Option<i32>,
    pub sort: Option<SortSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ascending_fields() {
        assert_eq!(
            SortSpec::parse("created_at"),
            Some(SortSpec {
                field: SortField::CreatedAt,
                direction: SortDirection::Asc,
            })
        );
        assert_eq!(
            SortSpec::parse("title"),
            Some(SortSpec {
                field: SortField::Title,
                direction: SortDirection::Asc,
            })
        );
    }

    #[test]
    fn test_parse_descending_prefix() {
        assert_eq!(
            SortSpec::parse("-prep_time"),
            Some(SortSpec {
                field: SortField::PrepTime,
                direction: SortDirection::Desc,
            })
        );
        assert_eq!(
            SortSpec::parse("-cook_time"),
            Some(SortSpec {
                field: SortField::CookTime,
                direction: SortDirection::Desc,
            })
        );
    }

    #[test]
    fn test_parse_rejects_unknown_input() {
        assert_eq!(SortSpec::parse(""), None);
        assert_eq!(SortSpec::parse("-"), None);
        assert_eq!(SortSpec::parse("rating"), None);
        assert_eq!(SortSpec::parse("PREP_TIME"), None);
        assert_eq!(SortSpec::parse("--created_at"), None);
    }

    #[test]
    fn test_filter_builders_compose() {
        let filter = RecipeFilter::public_only()
            .with_category("Dessert".to_string())
            .with_prep_between(Some(10), None);

        assert_eq!(filter.is_public(), Some(true));
        assert_eq!(filter.category(), Some("Dessert"));
        assert_eq!(filter.min_prep(), Some(10));
        assert_eq!(filter.max_prep(), None);
        assert_eq!(filter.owner_id(), None);
    }
}
