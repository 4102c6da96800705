//! Steam Community HTTP client.
//!
//! Async HTTP client using `reqwest` with a bounded request timeout.

use std::time::Duration;

use crate::error::CommunityError;
use crate::feed::{self, Feed};
use crate::profile::ProfileId;

const DEFAULT_BASE_URL: &str = "https://steamcommunity.com";

/// Default upper bound for one feed request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Steam Community feed client.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl Client {
    /// Creates a client with the default timeout.
    pub fn new() -> Result<Self, CommunityError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a client whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, CommunityError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("steam-appmanifest/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CommunityError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
        })
    }

    /// Sets a custom base URL (mirrors, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Returns the feed URL for `profile`.
    pub fn feed_url(&self, profile: &ProfileId) -> String {
        format!("{}{}", self.base_url, profile.feed_path())
    }

    /// Fetches and parses the owned-games feed of `profile_id`.
    ///
    /// Transport failures and timeouts map to [`CommunityError::Network`];
    /// error statuses and unusable bodies map to
    /// [`CommunityError::InvalidProfile`].
    pub async fn fetch(&self, profile_id: &str) -> Result<Feed, CommunityError> {
        let profile = ProfileId::parse(profile_id)?;
        let url = self.feed_url(&profile);
        tracing::debug!(%url, "fetching games feed");

        let resp = self.http.get(&url).send().await.map_err(|e| self.network_error(e))?;
        let status = resp.status();

        if !status.is_success() {
            return Err(CommunityError::InvalidProfile(format!(
                "{profile}: HTTP {}",
                status.as_u16()
            )));
        }

        let body = resp.text().await.map_err(|e| self.network_error(e))?;
        let feed = feed::parse(&body)?;

        tracing::info!(
            profile = %profile,
            games = feed.games.len(),
            "fetched games feed"
        );
        Ok(feed)
    }

    fn network_error(&self, e: reqwest::Error) -> CommunityError {
        if e.is_timeout() {
            CommunityError::Network(format!("request timed out after {:?}", self.timeout))
        } else {
            CommunityError::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Starts a mock HTTP server that answers one request with `status` and
    /// `body`, and hands back the request line it received.
    async fn mock_server(
        status: u16,
        body: &str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let url = format!("http://127.0.0.1:{port}");
        let body = body.to_string();

        let handle = tokio::spawn(async move {
            let mut request_line = String::new();
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = vec![0u8; 8192];
                let n = stream.read(&mut buf).await.unwrap_or(0);
                request_line = String::from_utf8_lossy(&buf[..n])
                    .lines()
                    .next()
                    .unwrap_or_default()
                    .to_string();

                let resp = format!(
                    "HTTP/1.1 {status} Status\r\nContent-Type: text/xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = stream.write_all(resp.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
            request_line
        });

        (url, handle)
    }

    const FEED: &str = "<gamesList><games>\
        <game><appID>10</appID><name><![CDATA[Half-Life]]></name></game>\
        <game><appID>20</appID><name><![CDATA[Portal]]></name></game>\
        </games></gamesList>";

    #[tokio::test]
    async fn fetch_returns_games() {
        let (url, handle) = mock_server(200, FEED).await;

        let client = Client::new().unwrap().with_base_url(url);
        let feed = client.fetch("gaben").await.unwrap();

        assert_eq!(feed.games.len(), 2);
        assert_eq!(feed.games[1].title, "Portal");

        let request_line = handle.await.unwrap();
        assert!(
            request_line.starts_with("GET /id/gaben/games?tab=all&xml=1 "),
            "{request_line}"
        );
    }

    #[tokio::test]
    async fn fetch_steam_id64_path() {
        let (url, handle) = mock_server(200, FEED).await;

        let client = Client::new().unwrap().with_base_url(url);
        client.fetch("76561197960287930").await.unwrap();

        let request_line = handle.await.unwrap();
        assert!(request_line.contains("/profiles/76561197960287930/games"));
    }

    #[tokio::test]
    async fn fetch_error_status_is_invalid_profile() {
        let (url, handle) = mock_server(404, "not found").await;

        let client = Client::new().unwrap().with_base_url(url);
        let err = client.fetch("nobody").await.unwrap_err();
        assert!(matches!(err, CommunityError::InvalidProfile(_)));
        assert!(err.to_string().contains("404"), "{err}");

        handle.abort();
    }

    #[tokio::test]
    async fn fetch_garbage_body_is_invalid_profile() {
        let (url, handle) = mock_server(200, "<html>oops").await;

        let client = Client::new().unwrap().with_base_url(url);
        let err = client.fetch("gaben").await.unwrap_err();
        assert!(matches!(err, CommunityError::InvalidProfile(_)));

        handle.abort();
    }

    #[tokio::test]
    async fn fetch_unreachable_is_network_error() {
        // Grab a free port, then close it so nothing is listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = Client::new()
            .unwrap()
            .with_base_url(format!("http://127.0.0.1:{port}"));
        let err = client.fetch("gaben").await.unwrap_err();
        assert!(matches!(err, CommunityError::Network(_)), "{err}");
    }

    #[tokio::test]
    async fn fetch_timeout_is_network_error() {
        // Accepts the connection but never answers.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let handle = tokio::spawn(async move {
            let (_stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let client = Client::with_timeout(Duration::from_millis(200))
            .unwrap()
            .with_base_url(format!("http://127.0.0.1:{port}"));
        let err = client.fetch("gaben").await.unwrap_err();
        assert!(matches!(err, CommunityError::Network(_)), "{err}");
        assert!(err.to_string().contains("timed out"), "{err}");

        handle.abort();
    }

    #[tokio::test]
    async fn fetch_empty_profile_skips_network() {
        let client = Client::new()
            .unwrap()
            .with_base_url("http://127.0.0.1:1");
        let err = client.fetch("  ").await.unwrap_err();
        assert!(matches!(err, CommunityError::InvalidProfile(_)));
    }

    #[test]
    fn feed_url_format() {
        let client = Client::new()
            .unwrap()
            .with_base_url("https://steamcommunity.com/");
        let profile = ProfileId::parse("gaben").unwrap();
        assert_eq!(
            client.feed_url(&profile),
            "https://steamcommunity.com/id/gaben/games?tab=all&xml=1"
        );
    }
}
