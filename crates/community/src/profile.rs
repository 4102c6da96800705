//! Profile identifier parsing.

use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::error::CommunityError;

/// Characters escaped when a vanity name is placed in a URL path.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Prefix shared by every individual-account SteamID64.
const STEAM_ID64_PREFIX: &str = "7656119";

/// A public profile identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileId {
    /// Custom URL name, as in `steamcommunity.com/id/<name>`.
    Vanity(String),
    /// 64-bit account id, as in `steamcommunity.com/profiles/<id>`.
    SteamId64(String),
}

impl ProfileId {
    /// Parses user input.
    ///
    /// Accepts a vanity name, a SteamID64, or a pasted profile URL.
    pub fn parse(input: &str) -> Result<Self, CommunityError> {
        let input = input.trim();

        let (kind, value) = match (input.find("/id/"), input.find("/profiles/")) {
            (Some(i), _) => (Some(false), &input[i + "/id/".len()..]),
            (_, Some(i)) => (Some(true), &input[i + "/profiles/".len()..]),
            _ => (None, input),
        };
        let value = value.split('/').next().unwrap_or_default().trim();

        if value.is_empty() {
            return Err(CommunityError::InvalidProfile(
                "profile id is empty".into(),
            ));
        }

        let looks_like_id64 = value.len() == 17
            && value.starts_with(STEAM_ID64_PREFIX)
            && value.bytes().all(|b| b.is_ascii_digit());

        match kind {
            Some(true) if !looks_like_id64 => Err(CommunityError::InvalidProfile(format!(
                "'{value}' is not a SteamID64"
            ))),
            Some(true) => Ok(Self::SteamId64(value.to_string())),
            Some(false) => Ok(Self::Vanity(value.to_string())),
            None if looks_like_id64 => Ok(Self::SteamId64(value.to_string())),
            None => Ok(Self::Vanity(value.to_string())),
        }
    }

    /// Returns the URL path of the games feed, relative to the community host.
    pub fn feed_path(&self) -> String {
        match self {
            Self::Vanity(name) => format!(
                "/id/{}/games?tab=all&xml=1",
                utf8_percent_encode(name, PATH_SEGMENT)
            ),
            Self::SteamId64(id) => format!("/profiles/{id}/games?tab=all&xml=1"),
        }
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vanity(name) => write!(f, "{name}"),
            Self::SteamId64(id) => write!(f, "{id}"),
        }
    }
}
