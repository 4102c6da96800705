//! Parser for the owned-games XML feed.
//!
//! The feed looks like:
//!
//! ```xml
//! <gamesList>
//!   <steamID64>76561197960287930</steamID64>
//!   <steamID><![CDATA[Rabscuttle]]></steamID>
//!   <games>
//!     <game>
//!       <appID>10</appID>
//!       <name><![CDATA[Counter-Strike]]></name>
//!       ...
//!     </game>
//!   </games>
//! </gamesList>
//! ```
//!
//! Unknown profiles come back as `<response><error>...</error></response>`
//! and private ones as a `gamesList` carrying an `<error>` element.

use appmanifest_catalog::GameEntry;
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::CommunityError;

/// A parsed games feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feed {
    /// Account id reported by the feed, if present.
    pub steam_id64: Option<String>,
    /// Display name reported by the feed, if present.
    pub profile_name: Option<String>,
    /// Well-formed games, in document order, all unselected.
    pub games: Vec<GameEntry>,
}

/// Fields collected while inside a `<game>` element.
///
/// `depth` is the element path length at the opening tag; `order` is the
/// position of that tag among all `<game>` elements.
struct PartialGame {
    depth: usize,
    order: usize,
    app_id: String,
    name: String,
}

impl PartialGame {
    fn new(depth: usize, order: usize) -> Self {
        Self {
            depth,
            order,
            app_id: String::new(),
            name: String::new(),
        }
    }

    fn finish(self) -> Option<GameEntry> {
        let app_id = self.app_id.trim();
        let name = self.name.trim();
        if app_id.is_empty() || !app_id.bytes().all(|b| b.is_ascii_digit()) || name.is_empty() {
            return None;
        }
        Some(GameEntry::new(app_id, name))
    }
}

/// Parses a feed document.
///
/// Games missing an app id or a name are skipped. A document that is not
/// well-formed XML, is not a games list, or carries an `<error>` element
/// fails with [`CommunityError::InvalidProfile`].
pub fn parse(xml: &str) -> Result<Feed, CommunityError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut feed = Feed::default();
    let mut path: Vec<String> = Vec::new();
    let mut root: Option<String> = None;
    // Open <game> elements, innermost last.
    let mut open: Vec<PartialGame> = Vec::new();
    let mut finished: Vec<(usize, GameEntry)> = Vec::new();
    let mut started = 0usize;
    let mut error: Option<String> = None;
    let mut skipped = 0usize;

    loop {
        let event = reader.read_event().map_err(|e| {
            CommunityError::InvalidProfile(format!(
                "malformed feed XML at position {}: {e}",
                reader.error_position()
            ))
        })?;

        match event {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if root.is_none() {
                    root = Some(name.clone());
                }
                if name == "game" {
                    open.push(PartialGame::new(path.len(), started));
                    started += 1;
                }
                path.push(name);
            }
            Event::End(_) => {
                let closed = path.pop();
                if closed.as_deref() != Some("game")
                    || !open.last().is_some_and(|g| g.depth == path.len())
                {
                    continue;
                }
                let Some(partial) = open.pop() else {
                    continue;
                };
                let order = partial.order;
                match partial.finish() {
                    Some(entry) => finished.push((order, entry)),
                    None => skipped += 1,
                }
            }
            Event::Empty(e) => {
                if root.is_none() {
                    root = Some(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
                }
                if e.local_name().as_ref() == b"game" {
                    started += 1;
                    skipped += 1;
                }
            }
            Event::Text(t) => {
                let text = t.unescape().map_err(|e| {
                    CommunityError::InvalidProfile(format!("malformed feed text: {e}"))
                })?;
                collect_text(&path, &text, &mut feed, open.last_mut(), &mut error);
            }
            Event::CData(c) => {
                let text = String::from_utf8_lossy(&c);
                collect_text(&path, &text, &mut feed, open.last_mut(), &mut error);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !path.is_empty() {
        return Err(CommunityError::InvalidProfile(format!(
            "truncated feed: <{}> is never closed",
            path.join("><")
        )));
    }

    if let Some(message) = error {
        return Err(CommunityError::InvalidProfile(message));
    }

    match root.as_deref() {
        Some("gamesList") => {}
        Some(other) => {
            return Err(CommunityError::InvalidProfile(format!(
                "unexpected feed root <{other}>"
            )));
        }
        None => return Err(CommunityError::InvalidProfile("empty feed".into())),
    }

    // Inner games close before their parent; report them in opening order.
    finished.sort_by_key(|(order, _)| *order);
    feed.games = finished.into_iter().map(|(_, entry)| entry).collect();

    if skipped > 0 {
        tracing::debug!(skipped, "skipped incomplete game entries");
    }

    Ok(feed)
}

/// Routes a text node to the field it belongs to, based on the element path.
fn collect_text(
    path: &[String],
    text: &str,
    feed: &mut Feed,
    game: Option<&mut PartialGame>,
    error: &mut Option<String>,
) {
    let Some(leaf) = path.last() else {
        return;
    };

    if let Some(partial) = game {
        // Only direct children of the innermost open <game> count.
        if path.len() == partial.depth + 2 {
            match leaf.as_str() {
                "appID" => partial.app_id.push_str(text),
                "name" => partial.name.push_str(text),
                _ => {}
            }
        }
        return;
    }

    if path.len() != 2 {
        return;
    }
    match leaf.as_str() {
        "steamID64" => feed.steam_id64 = Some(text.trim().to_string()),
        "steamID" => feed.profile_name = Some(text.trim().to_string()),
        "error" => error
            .get_or_insert_with(String::new)
            .push_str(text.trim()),
        _ => {}
    }
}
