//! Shared configuration types for LIMELIGHT
//!
//! This crate contains serializable configuration types shared between the
//! engine (limelight-core), the overlay instances (limelight-overlay), and
//! the CLI. Everything here is plain data; behavior lives in the consumers.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Endpoints
// ─────────────────────────────────────────────────────────────────────────────

/// Where the engine reaches the broadcast server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointSettings {
    /// Snapshot endpoint returning the shared stream state as JSON
    #[serde(default = "default_snapshot_url")]
    pub snapshot_url: String,

    /// Server-sent-events endpoint delivering alert push messages
    #[serde(default = "default_push_url")]
    pub push_url: String,
}

fn default_snapshot_url() -> String {
    "http://127.0.0.1:4343/data/stream_state".to_string()
}

fn default_push_url() -> String {
    "http://127.0.0.1:4343/sse/alerts".to_string()
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            snapshot_url: default_snapshot_url(),
            push_url: default_push_url(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-Overlay Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Push-driven alert pop-up overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertsOverlayConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for AlertsOverlayConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Now-playing ticker: polls the snapshot and transitions when the
/// currently playing title changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NowPlayingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Seconds between snapshot polls
    #[serde(default = "default_now_playing_poll_secs")]
    pub poll_secs: u64,

    /// Fade animation length in milliseconds
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,

    /// Pause between fade-out and fade-in in milliseconds
    #[serde(default = "default_swap_settle_ms")]
    pub settle_ms: u64,
}

fn default_now_playing_poll_secs() -> u64 {
    5
}

fn default_fade_ms() -> u64 {
    800
}

fn default_swap_settle_ms() -> u64 {
    100
}

impl Default for NowPlayingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_secs: default_now_playing_poll_secs(),
            fade_ms: default_fade_ms(),
            settle_ms: default_swap_settle_ms(),
        }
    }
}

/// A single slot in the milestone rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneSlot {
    /// Snapshot field this slot displays
    pub field: MilestoneField,

    /// Artwork shown next to the value
    pub image: String,
}

/// Which snapshot field a milestone slot reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "text")]
pub enum MilestoneField {
    First,
    Follower,
    Subscriber,
    /// Fixed decorative text, shown every round regardless of state
    Mascot(String),
}

/// Rotating milestone ticker (first redeem / latest follower / latest sub).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestonesConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Milliseconds each slot stays on screen
    #[serde(default = "default_milestone_hold_ms")]
    pub hold_ms: u64,

    /// Fade animation length in milliseconds
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,

    /// Re-fetch the snapshot every Nth rotation round (1 = every round)
    #[serde(default = "default_refetch_every")]
    pub refetch_every: u32,

    /// Slots shown in round-robin order
    #[serde(default = "default_milestone_slots")]
    pub slots: Vec<MilestoneSlot>,
}

fn default_milestone_hold_ms() -> u64 {
    8000
}

fn default_refetch_every() -> u32 {
    2
}

fn default_milestone_slots() -> Vec<MilestoneSlot> {
    vec![
        MilestoneSlot {
            field: MilestoneField::First,
            image: "/static/images/cat_hype.png".to_string(),
        },
        MilestoneSlot {
            field: MilestoneField::Follower,
            image: "/static/images/cat_love.png".to_string(),
        },
        MilestoneSlot {
            field: MilestoneField::Subscriber,
            image: "/static/images/cat_star.png".to_string(),
        },
        MilestoneSlot {
            field: MilestoneField::Mascot("NonEssentialFish".to_string()),
            image: "/static/images/fish.png".to_string(),
        },
    ]
}

impl Default for MilestonesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            hold_ms: default_milestone_hold_ms(),
            fade_ms: default_fade_ms(),
            refetch_every: default_refetch_every(),
            slots: default_milestone_slots(),
        }
    }
}

/// Chatter wall: reveals a tile per recent chat participant when the
/// roster changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatterWallConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Seconds between snapshot polls
    #[serde(default = "default_chatter_poll_secs")]
    pub poll_secs: u64,

    /// Milliseconds each chatter tile takes to reveal
    #[serde(default = "default_reveal_ms")]
    pub reveal_ms: u64,

    /// Artwork shown on each tile
    #[serde(default = "default_chatter_image")]
    pub image: String,
}

fn default_chatter_poll_secs() -> u64 {
    4
}

fn default_reveal_ms() -> u64 {
    400
}

fn default_chatter_image() -> String {
    "/static/images/cat_hype.png".to_string()
}

impl Default for ChatterWallConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_secs: default_chatter_poll_secs(),
            reveal_ms: default_reveal_ms(),
            image: default_chatter_image(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// App Config
// ─────────────────────────────────────────────────────────────────────────────

/// Which overlay instances run and how they behave.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlaySettings {
    #[serde(default)]
    pub alerts: AlertsOverlayConfig,
    #[serde(default)]
    pub now_playing: NowPlayingConfig,
    #[serde(default)]
    pub milestones: MilestonesConfig,
    #[serde(default)]
    pub chatter_wall: ChatterWallConfig,
}

/// Top-level application configuration, persisted as TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub endpoints: EndpointSettings,

    #[serde(default)]
    pub overlays: OverlaySettings,
}

// ═══════════════════════════════════════════════════════════════════════════
// Serde Helpers
// ═══════════════════════════════════════════════════════════════════════════

fn default_true() -> bool {
    true
}
