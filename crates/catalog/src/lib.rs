//! In-memory catalog of owned games.
//!
//! The catalog is the single source of truth for selection state. Views
//! shown to the user are derived from it with [`filter::visible`] and never
//! hold state of their own.
//!
//! # Operations
//!
//! - **Replace** — swap in a freshly fetched list, dropping duplicate app ids
//! - **Toggle** — flip the selection of one entry
//! - **Selected** — the entries to generate manifests for, in catalog order
//! - **Visible** — case-insensitive title search over the catalog

pub mod catalog;
pub mod entry;
pub mod error;
pub mod filter;

// Re-export primary types for convenience.
pub use catalog::Catalog;
pub use entry::GameEntry;
pub use error::CatalogError;
pub use filter::visible;
