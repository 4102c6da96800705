//! Domain types for catalog entries.

use serde::{Deserialize, Serialize};

/// An owned game as listed in the profile feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEntry {
    pub app_id: String,
    pub title: String,
    #[serde(default)]
    pub selected: bool,
}

impl GameEntry {
    /// Creates an unselected entry.
    pub fn new(app_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            title: title.into(),
            selected: false,
        }
    }
}
