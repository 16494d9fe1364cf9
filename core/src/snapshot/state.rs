//! The shared stream-state snapshot
//!
//! A point-in-time copy of what the broadcast server knows: the currently
//! playing track, the latest milestone names, and the recent chatter
//! roster. Produced by the snapshot endpoint; the engine never mutates one.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Currently playing media.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NowPlaying {
    #[serde(default)]
    pub title: String,

    /// Artwork URL
    #[serde(default)]
    pub image: String,

    /// Track page URL (informational, never displayed by the engine)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One snapshot of the shared broadcast state.
///
/// Milestone fields are `None` until the server has observed a value for
/// them. The chatter cache maps display names to server-side metadata the
/// engine treats as opaque.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamSnapshot {
    #[serde(default)]
    pub playing: NowPlaying,

    #[serde(default)]
    pub follower: Option<String>,

    #[serde(default)]
    pub subscriber: Option<String>,

    #[serde(default)]
    pub first: Option<String>,

    #[serde(default)]
    pub chatter_cache: HashMap<String, serde_json::Value>,

    #[serde(default)]
    pub online: bool,
}

impl StreamSnapshot {
    /// Chatter display names in a stable order (insertion order of the
    /// underlying map is irrelevant per the endpoint contract).
    pub fn chatter_roster(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.chatter_cache.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
