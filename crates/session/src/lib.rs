//! Session state and the operations a front end drives.
//!
//! This crate implements the **business logic** of the manifest generator.
//! It has no UI dependencies: a front end supplies the profile id, search
//! text and toggles, then renders [`Session::visible`] and the
//! [`WriteReport`] returned by [`Session::generate`].
//!
//! # Operations
//!
//! - **Fetch** — load the owned-games feed into a fresh catalog
//! - **Search** — set the query that drives the visible view
//! - **Toggle** — flip the selection of a single game
//! - **Generate** — write `appmanifest_<appid>.acf` for every selected game

pub mod error;
pub mod session;

// Re-export primary types for convenience.
pub use appmanifest_catalog::GameEntry;
pub use appmanifest_steam::WriteReport;
pub use error::{ErrorKind, SessionError};
pub use session::{CatalogSource, ProfileSummary, Session};
