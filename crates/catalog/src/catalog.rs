//! The selectable collection of owned games.

use std::collections::HashSet;

use crate::entry::GameEntry;
use crate::error::CatalogError;

/// Ordered collection of games with per-entry selection state.
///
/// Order is the order the feed listed the games in. App ids are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<GameEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from `entries`, see [`Catalog::replace`].
    pub fn from_entries(entries: impl IntoIterator<Item = GameEntry>) -> Self {
        let mut catalog = Self::new();
        catalog.replace(entries);
        catalog
    }

    /// Replaces the whole collection.
    ///
    /// Later entries sharing an app id with an earlier one are dropped.
    /// Returns how many duplicates were dropped.
    pub fn replace(&mut self, entries: impl IntoIterator<Item = GameEntry>) -> usize {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        let mut dropped = 0;

        for entry in entries {
            if seen.insert(entry.app_id.clone()) {
                kept.push(entry);
            } else {
                tracing::debug!(app_id = %entry.app_id, title = %entry.title, "dropping duplicate app id");
                dropped += 1;
            }
        }

        self.entries = kept;
        dropped
    }

    /// Flips the selection of `app_id` and returns the new state.
    pub fn toggle(&mut self, app_id: &str) -> Result<bool, CatalogError> {
        let entry = self.get_mut(app_id)?;
        entry.selected = !entry.selected;
        Ok(entry.selected)
    }

    /// Sets the selection of `app_id`.
    pub fn set_selected(&mut self, app_id: &str, selected: bool) -> Result<(), CatalogError> {
        self.get_mut(app_id)?.selected = selected;
        Ok(())
    }

    /// Returns the selected entries in catalog order.
    pub fn selected(&self) -> Vec<&GameEntry> {
        self.entries.iter().filter(|e| e.selected).collect()
    }

    pub fn get(&self, app_id: &str) -> Option<&GameEntry> {
        self.entries.iter().find(|e| e.app_id == app_id)
    }

    fn get_mut(&mut self, app_id: &str) -> Result<&mut GameEntry, CatalogError> {
        self.entries
            .iter_mut()
            .find(|e| e.app_id == app_id)
            .ok_or_else(|| CatalogError::NotFound(app_id.to_string()))
    }

    pub fn entries(&self) -> &[GameEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::from_entries([
            GameEntry::new("10", "Half-Life"),
            GameEntry::new("20", "Portal"),
            GameEntry::new("30", "Day of Defeat"),
        ])
    }

    fn ids(entries: &[&GameEntry]) -> Vec<String> {
        entries.iter().map(|e| e.app_id.clone()).collect()
    }

    #[test]
    fn replace_keeps_feed_order() {
        let catalog = sample();
        let ids: Vec<&str> = catalog.entries().iter().map(|e| e.app_id.as_str()).collect();
        assert_eq!(ids, vec!["10", "20", "30"]);
    }

    #[test]
    fn replace_drops_later_duplicates() {
        let mut catalog = Catalog::new();
        let dropped = catalog.replace([
            GameEntry::new("10", "Half-Life"),
            GameEntry::new("20", "Portal"),
            GameEntry::new("10", "Half-Life (duplicate)"),
        ]);

        assert_eq!(dropped, 1);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("10").unwrap().title, "Half-Life");
    }

    #[test]
    fn replace_discards_previous_state() {
        let mut catalog = sample();
        catalog.toggle("20").unwrap();

        catalog.replace([GameEntry::new("20", "Portal"), GameEntry::new("40", "Opposing Force")]);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.selected().is_empty());
        assert!(catalog.get("10").is_none());
    }

    #[test]
    fn toggle_is_an_involution() {
        let mut catalog = sample();
        let before = catalog.clone();

        assert!(catalog.toggle("20").unwrap());
        assert!(!catalog.toggle("20").unwrap());
        assert_eq!(catalog, before);
    }

    #[test]
    fn toggle_affects_only_target() {
        let mut catalog = sample();
        catalog.toggle("20").unwrap();

        assert!(!catalog.get("10").unwrap().selected);
        assert!(catalog.get("20").unwrap().selected);
        assert!(!catalog.get("30").unwrap().selected);
    }

    #[test]
    fn toggle_unknown_app() {
        let mut catalog = sample();
        let before = catalog.clone();
        assert_eq!(
            catalog.toggle("99"),
            Err(CatalogError::NotFound("99".into()))
        );
        assert_eq!(catalog, before);
    }

    #[test]
    fn selected_preserves_catalog_order() {
        let mut catalog = sample();
        catalog.toggle("30").unwrap();
        catalog.toggle("10").unwrap();
        assert_eq!(ids(&catalog.selected()), vec!["10", "30"]);
    }

    #[test]
    fn set_selected_is_absolute() {
        let mut catalog = sample();
        catalog.set_selected("10", true).unwrap();
        catalog.set_selected("10", true).unwrap();
        assert!(catalog.get("10").unwrap().selected);

        catalog.set_selected("10", false).unwrap();
        assert!(catalog.selected().is_empty());
        assert!(catalog.set_selected("99", true).is_err());
    }

    #[test]
    fn empty_catalog() {
        let catalog = Catalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.selected().is_empty());
    }
}
