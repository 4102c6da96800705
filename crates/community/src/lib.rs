//! Steam Community client for the public owned-games feed.
//!
//! Fetches `https://steamcommunity.com/id/<name>/games?tab=all&xml=1` (or the
//! `/profiles/<steamid64>/` variant) and turns the XML into catalog entries.

pub mod client;
pub mod error;
pub mod feed;
pub mod profile;

pub use client::Client;
pub use error::CommunityError;
pub use feed::Feed;
pub use profile::ProfileId;
