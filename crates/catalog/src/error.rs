//! Error types for catalog operations.

/// Errors produced by catalog mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("app {0} is not in the catalog")]
    NotFound(String),
}
