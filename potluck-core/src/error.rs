use thiserror::Error;

/// Failures from the backing store, stripped of driver-specific types
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Query failed: {0}")]
    Query(String),
}

/// Outcome taxonomy for recipe operations
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Caller input violated a field invariant; the message is caller-facing
    #[error("{0}")]
    Validation(String),

    #[error("Recipe not found")]
    NotFound,

    #[error("Not authorized")]
    Forbidden,

    #[error(transparent)]
    Store(#[from] StoreError),
}
