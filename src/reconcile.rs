//! Reconciliation inputs: gesture outcomes as reported by the display
//! layer, and the tier label-suggestion policy.
//!
//! The display layer is free to reorder its own elements while a drag is
//! in flight; canonical order lives only on the board. When a gesture
//! completes, its outcome arrives here as data — either a single drop
//! ([`DragOutcome`]) or a full observed [`Arrangement`] — and the session
//! commits it through the board's primitives as one mutation with one
//! undo snapshot, no matter how many rows the gesture touched.

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod reconcile_test;

use crate::board::{Board, Destination, ItemId, TierId};
use crate::consts::EXHAUSTED_LABEL;

/// How a drag gesture ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// The item was released over a valid container.
    Dropped {
        /// Tier or pool the item landed in.
        dest: Destination,
        /// Sibling to insert before, when the gesture resolved one;
        /// absent means append.
        before: Option<ItemId>,
    },
    /// No valid target at release; the item snaps back and canonical
    /// state is untouched.
    Cancelled,
}

/// The complete post-gesture placement observed by the display layer:
/// every tier's item order plus the pool order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arrangement {
    /// Per-tier observed item order.
    pub tiers: Vec<(TierId, Vec<ItemId>)>,
    /// Observed pool order.
    pub pool: Vec<ItemId>,
}

impl Arrangement {
    /// Capture the board's current canonical order — the starting point a
    /// gesture library mutates from.
    #[must_use]
    pub fn of(board: &Board) -> Self {
        Self {
            tiers: board.tiers().iter().map(|t| (t.id, t.items.clone())).collect(),
            pool: board.pool().to_vec(),
        }
    }
}

/// Suggest a label for a new tier: the first single letter in `E..=Z`
/// not already used (case-insensitively), scanning from the start of the
/// alphabet every time; [`EXHAUSTED_LABEL`] once all letters are taken.
#[must_use]
pub fn next_label(board: &Board) -> String {
    let used: Vec<String> = board.tiers().iter().map(|t| t.label.to_uppercase()).collect();
    ('E'..='Z')
        .map(String::from)
        .find(|candidate| !used.contains(candidate))
        .unwrap_or_else(|| EXHAUSTED_LABEL.to_string())
}
