//! Shared numeric constants for the tier-board engine.

// ── History ─────────────────────────────────────────────────────

/// Maximum retained undo snapshots; the oldest entry is evicted first.
pub const HISTORY_CAP: usize = 60;

// ── Persistence ─────────────────────────────────────────────────

/// Debounce window for scheduled saves, in milliseconds. Bursts of
/// mutations inside one window produce a single write.
pub const SAVE_DEBOUNCE_MS: u64 = 200;

// ── Labels ──────────────────────────────────────────────────────

/// Maximum tier label length in characters after whitespace removal.
pub const LABEL_MAX_CHARS: usize = 12;

/// Glyph shown for a label that normalizes to nothing.
pub const LABEL_PLACEHOLDER: &str = "?";

/// Ranks of a freshly created board, top to bottom.
pub const DEFAULT_TIER_LABELS: [&str; 5] = ["S", "A", "B", "C", "D"];

/// Suggested label once every single letter E..=Z is taken.
pub const EXHAUSTED_LABEL: &str = "NEW";

// ── Picker geometry ─────────────────────────────────────────────

/// Picker panel width in CSS pixels.
pub const PICKER_PANEL_W: f64 = 220.0;

/// Picker panel height in CSS pixels.
pub const PICKER_PANEL_H: f64 = 120.0;

/// Diameter of one destination button.
pub const PICKER_BUTTON_DIAMETER: f64 = 46.0;

/// Minimum gap between the rims of adjacent buttons.
pub const PICKER_MIN_GAP: f64 = 6.0;

/// Arc radius never shrinks below this; governs one- and two-tier arcs.
pub const PICKER_FLOOR_RADIUS: f64 = 72.0;

/// Clearance kept between the panel and every viewport edge.
pub const PICKER_EDGE_MARGIN: f64 = 8.0;

/// Vertical offset between the tapped item and the panel edge.
pub const PICKER_ANCHOR_LIFT: f64 = 12.0;

/// The arc hinge sits this far above the panel's bottom edge.
pub const PICKER_HINGE_INSET: f64 = 6.0;

// ── Seeding ─────────────────────────────────────────────────────

/// Hue step between consecutive seeded items, in degrees.
pub const GOLDEN_ANGLE_DEG: f64 = 137.508;

/// Placeholder items inserted into the storage pool of a fresh board.
pub const SEED_NAMES: [&str; 31] = [
    "Anette", "Authority", "B7", "Cindy", "Clamy", "Clay", "Cody", "Denver", "Devon", "Dexy",
    "Domo", "Gavin", "Jay", "Jeremy", "Katie", "Keyon", "Kiev", "Kikki", "Kyle", "Lewis",
    "Meegan", "Munch", "Paper", "Ray", "Safoof", "Temz", "TomTom", "V", "Versse", "Wobbles",
    "Xavier",
];
