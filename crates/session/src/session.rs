//! Session — owns the catalog, the search query and the feed source.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use appmanifest_catalog::{Catalog, GameEntry, filter};
use appmanifest_community::{Client, CommunityError, Feed};
use appmanifest_steam::{ManifestRecord, WriteReport, manifest};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::SessionError;

/// Abstract source of owned-games feeds.
///
/// [`appmanifest_community::Client`] is the production implementation.
pub trait CatalogSource: Send + Sync {
    /// Fetches the feed of `profile_id`.
    fn fetch<'a>(
        &'a self,
        profile_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Feed, CommunityError>> + Send + 'a>>;
}

impl CatalogSource for Client {
    fn fetch<'a>(
        &'a self,
        profile_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Feed, CommunityError>> + Send + 'a>> {
        Box::pin(Client::fetch(self, profile_id))
    }
}

/// Whose library is currently loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub profile_id: String,
    pub steam_id64: Option<String>,
    pub name: Option<String>,
}

/// One user session of the manifest generator.
pub struct Session {
    source: Box<dyn CatalogSource>,
    catalog: Catalog,
    query: String,
    profile: Option<ProfileSummary>,
}

impl Session {
    /// Creates an empty session backed by `source`.
    pub fn new(source: impl CatalogSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            catalog: Catalog::new(),
            query: String::new(),
            profile: None,
        }
    }

    /// Loads the owned games of `profile_id` into a fresh catalog.
    ///
    /// On failure the previous catalog stays as it was. Returns the number
    /// of games now in the catalog.
    pub async fn fetch_catalog(&mut self, profile_id: &str) -> Result<usize, SessionError> {
        let feed = self.source.fetch(profile_id).await?;

        let dropped = self.catalog.replace(feed.games);
        if dropped > 0 {
            debug!(dropped, "feed listed duplicate app ids");
        }
        self.profile = Some(ProfileSummary {
            profile_id: profile_id.trim().to_string(),
            steam_id64: feed.steam_id64,
            name: feed.profile_name,
        });

        info!(profile = profile_id.trim(), games = self.catalog.len(), "catalog loaded");
        Ok(self.catalog.len())
    }

    /// Sets the search text used by [`Session::visible`].
    pub fn set_query(&mut self, text: &str) {
        self.query = text.to_string();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the entries matching the current query, in catalog order.
    pub fn visible(&self) -> Vec<&GameEntry> {
        filter::visible(self.catalog.entries(), &self.query)
    }

    /// Flips the selection of `app_id` and returns the new state.
    pub fn toggle(&mut self, app_id: &str) -> Result<bool, SessionError> {
        Ok(self.catalog.toggle(app_id)?)
    }

    /// Selects or deselects every currently visible entry.
    ///
    /// Returns how many entries the call covered.
    pub fn select_visible(&mut self, selected: bool) -> Result<usize, SessionError> {
        let ids: Vec<String> = self.visible().iter().map(|e| e.app_id.clone()).collect();
        for id in &ids {
            self.catalog.set_selected(id, selected)?;
        }
        Ok(ids.len())
    }

    pub fn selected(&self) -> Vec<&GameEntry> {
        self.catalog.selected()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn profile(&self) -> Option<&ProfileSummary> {
        self.profile.as_ref()
    }

    /// Writes a manifest for every selected entry.
    ///
    /// Uses `library_root` when given, otherwise the detected Steam library.
    /// An unusable root fails before anything is written; per-game failures
    /// are reported in the returned [`WriteReport`].
    pub fn generate(&self, library_root: Option<&Path>) -> Result<WriteReport, SessionError> {
        let root: PathBuf = match library_root {
            Some(path) => path.to_path_buf(),
            None => appmanifest_steam::resolve()?,
        };

        let records: Vec<ManifestRecord> = self
            .catalog
            .selected()
            .into_iter()
            .map(|e| ManifestRecord::queued(&e.app_id, &e.title))
            .collect();

        debug!(root = %root.display(), count = records.len(), "generating manifests");
        Ok(manifest::write(&records, &root)?)
    }
}
