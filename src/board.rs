//! Canonical board model: tiers, items, the storage pool, and the
//! mutation primitives that keep placement consistent.
//!
//! The board is the aggregate the renderer projects from and the only
//! holder of item ownership: the item table maps id to item, while tiers
//! and the pool hold ordered id sequences. Every mutation primitive
//! preserves the placement invariant atomically — each item id appears in
//! exactly one of {one tier's order, the pool}, and every placed id
//! exists in the table. Primitives validate their references up front and
//! return [`BoardError::NotFound`] without touching anything when a
//! reference is unknown.

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{
    DEFAULT_TIER_LABELS, GOLDEN_ANGLE_DEG, LABEL_MAX_CHARS, LABEL_PLACEHOLDER, SEED_NAMES,
};
use crate::error::BoardError;

/// Unique identifier for an item.
pub type ItemId = Uuid;

/// Unique identifier for a tier.
pub type TierId = Uuid;

/// Content of a placeable item. The variant carries only the fields that
/// exist for its kind, so an image item cannot hold a text color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemContent {
    /// Short label rendered on a colored disc.
    Text {
        /// Display text (a name or emoji).
        text: String,
        /// Display color; opaque to this crate.
        color: String,
    },
    /// Uploaded picture.
    Image {
        /// Opaque reference to already-encoded image data.
        image_ref: String,
        /// Optional caption supplied at upload time.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
}

/// A placeable unit, owned exclusively by the board's item table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique, immutable identifier.
    pub id: ItemId,
    /// Kind-specific content.
    #[serde(flatten)]
    pub content: ItemContent,
    /// Ephemeral items are excluded from the persisted payload and do not
    /// survive a reload.
    #[serde(default)]
    pub ephemeral: bool,
}

/// An ordered, labeled row. Owns placement, never items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    /// Unique identifier.
    pub id: TierId,
    /// Display label; always normalized (no whitespace, length-capped,
    /// never empty).
    pub label: String,
    /// Ordered item ids placed in this row.
    pub items: Vec<ItemId>,
}

/// Where an item can be placed: a tier, or the unplaced storage pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// A tier row, by id.
    Tier(TierId),
    /// The storage pool.
    Pool,
}

/// The aggregate root: title, ordered tiers, the item table, and the
/// storage pool of unplaced items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    title: String,
    tiers: Vec<Tier>,
    items: BTreeMap<ItemId, Item>,
    pool: Vec<ItemId>,
}

impl Board {
    /// An empty board with no tiers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh board carrying the default rank rows and an empty pool.
    #[must_use]
    pub fn with_default_tiers() -> Self {
        Self {
            title: String::new(),
            tiers: DEFAULT_TIER_LABELS
                .iter()
                .map(|label| Tier {
                    id: Uuid::new_v4(),
                    label: (*label).to_string(),
                    items: Vec::new(),
                })
                .collect(),
            items: BTreeMap::new(),
            pool: Vec::new(),
        }
    }

    /// Populate an empty pool with the fixed placeholder palette. Colors
    /// step the golden angle through the hue wheel at fixed
    /// saturation/lightness so neighbors stay distinguishable. Runs once;
    /// a non-empty pool is left alone.
    pub fn seed_if_empty(&mut self) {
        if !self.pool.is_empty() {
            return;
        }
        let mut hue = 0.0_f64;
        for name in SEED_NAMES {
            let color = format!("hsl({} 50% 72%)", (hue % 360.0).round());
            let id = Uuid::new_v4();
            self.items.insert(
                id,
                Item {
                    id,
                    content: ItemContent::Text { text: name.to_string(), color },
                    ephemeral: false,
                },
            );
            self.pool.push(id);
            hue += GOLDEN_ANGLE_DEG;
        }
    }

    // ── Read access ─────────────────────────────────────────────

    /// Board title; may be empty.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Tiers in display order.
    #[must_use]
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Look up a tier by id.
    #[must_use]
    pub fn tier(&self, id: &TierId) -> Option<&Tier> {
        self.tiers.iter().find(|t| t.id == *id)
    }

    /// Unplaced item ids in pool order.
    #[must_use]
    pub fn pool(&self) -> &[ItemId] {
        &self.pool
    }

    /// Look up an item by id.
    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    /// Whether a tier with this id exists.
    #[must_use]
    pub fn contains_tier(&self, id: &TierId) -> bool {
        self.tiers.iter().any(|t| t.id == *id)
    }

    /// Whether an item with this id exists.
    #[must_use]
    pub fn contains_item(&self, id: &ItemId) -> bool {
        self.items.contains_key(id)
    }

    /// Number of items in the table.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Whether the placement invariant holds: every table id placed
    /// exactly once, every placed id in the table. Loaded payloads are
    /// checked with this before being trusted.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut seen = BTreeSet::new();
        let placed = self.pool.iter().chain(self.tiers.iter().flat_map(|t| t.items.iter()));
        for id in placed {
            if !self.items.contains_key(id) || !seen.insert(*id) {
                return false;
            }
        }
        seen.len() == self.items.len()
    }

    // ── Mutation primitives ─────────────────────────────────────

    /// Set the board title, trimmed.
    pub fn set_title(&mut self, title: &str) {
        self.title = title.trim().to_string();
    }

    /// Append a new empty tier with the normalized label. Returns its id.
    pub fn add_tier(&mut self, label: &str) -> TierId {
        let id = Uuid::new_v4();
        self.tiers.push(Tier { id, label: normalize_label(label), items: Vec::new() });
        id
    }

    /// Replace a tier's label with the normalized form.
    ///
    /// # Errors
    ///
    /// [`BoardError::NotFound`] if the tier does not exist.
    pub fn relabel_tier(&mut self, tier: &TierId, label: &str) -> Result<(), BoardError> {
        let row = self
            .tiers
            .iter_mut()
            .find(|t| t.id == *tier)
            .ok_or(BoardError::NotFound(*tier))?;
        row.label = normalize_label(label);
        Ok(())
    }

    /// Delete a tier. Its items are prepended to the pool in their
    /// relative order, so recently evicted items surface first; deletion
    /// never drops items.
    ///
    /// # Errors
    ///
    /// [`BoardError::NotFound`] if the tier does not exist.
    pub fn remove_tier(&mut self, tier: &TierId) -> Result<(), BoardError> {
        let idx = self
            .tiers
            .iter()
            .position(|t| t.id == *tier)
            .ok_or(BoardError::NotFound(*tier))?;
        let removed = self.tiers.remove(idx);
        let mut next = removed.items;
        next.extend(self.pool.drain(..));
        self.pool = next;
        Ok(())
    }

    /// Create an item and place it in the pool — at the front for scratch
    /// items, at the back for uploads. Returns the new id.
    pub fn add_item(&mut self, content: ItemContent, ephemeral: bool, front: bool) -> ItemId {
        let id = Uuid::new_v4();
        self.items.insert(id, Item { id, content, ephemeral });
        if front {
            self.pool.insert(0, id);
        } else {
            self.pool.push(id);
        }
        id
    }

    /// Destroy an item, purging its id from wherever it is placed.
    ///
    /// # Errors
    ///
    /// [`BoardError::NotFound`] if the item does not exist.
    pub fn remove_item(&mut self, item: &ItemId) -> Result<(), BoardError> {
        if self.items.remove(item).is_none() {
            return Err(BoardError::NotFound(*item));
        }
        self.detach(item);
        Ok(())
    }

    /// Move an item to `dest`, inserting immediately before `before` when
    /// that sibling is present in the destination, else at the end. Both
    /// endpoints are validated before anything is detached.
    ///
    /// # Errors
    ///
    /// [`BoardError::NotFound`] if the item or the destination tier does
    /// not exist; the board is untouched.
    pub fn move_item(
        &mut self,
        item: &ItemId,
        dest: Destination,
        before: Option<&ItemId>,
    ) -> Result<(), BoardError> {
        if !self.items.contains_key(item) {
            return Err(BoardError::NotFound(*item));
        }
        let dest_idx = match dest {
            Destination::Pool => None,
            Destination::Tier(tid) => Some(
                self.tiers
                    .iter()
                    .position(|t| t.id == tid)
                    .ok_or(BoardError::NotFound(tid))?,
            ),
        };
        self.detach(item);
        let order = match dest_idx {
            None => &mut self.pool,
            Some(idx) => &mut self.tiers[idx].items,
        };
        let at = before
            .and_then(|b| order.iter().position(|id| id == b))
            .unwrap_or(order.len());
        order.insert(at, *item);
        Ok(())
    }

    /// Rewrite every tier's order and the pool from an observed
    /// post-gesture arrangement, as one atomic mutation. The arrangement
    /// must name each of the board's tiers exactly once and place each
    /// table item exactly once; tier display order is kept from the
    /// board, not the arrangement.
    ///
    /// # Errors
    ///
    /// [`BoardError::NotFound`] for an unknown tier or item id;
    /// [`BoardError::InvalidState`] when coverage is wrong (a tier or
    /// item missing, or placed twice). Nothing is applied on error.
    pub fn apply_arrangement(
        &mut self,
        tiers: &[(TierId, Vec<ItemId>)],
        pool: &[ItemId],
    ) -> Result<(), BoardError> {
        if tiers.len() != self.tiers.len() {
            return Err(BoardError::InvalidState("arrangement must cover every tier exactly once"));
        }
        let mut tier_seen = BTreeSet::new();
        for (tid, _) in tiers {
            if !self.contains_tier(tid) {
                return Err(BoardError::NotFound(*tid));
            }
            if !tier_seen.insert(*tid) {
                return Err(BoardError::InvalidState(
                    "arrangement must cover every tier exactly once",
                ));
            }
        }
        let mut item_seen = BTreeSet::new();
        for id in tiers.iter().flat_map(|(_, items)| items).chain(pool) {
            if !self.items.contains_key(id) {
                return Err(BoardError::NotFound(*id));
            }
            if !item_seen.insert(*id) {
                return Err(BoardError::InvalidState("arrangement places an item twice"));
            }
        }
        if item_seen.len() != self.items.len() {
            return Err(BoardError::InvalidState("arrangement must place every item exactly once"));
        }
        for (tid, items) in tiers {
            if let Some(row) = self.tiers.iter_mut().find(|t| t.id == *tid) {
                row.items = items.clone();
            }
        }
        self.pool = pool.to_vec();
        Ok(())
    }

    /// Destructive clear: empties every tier, the pool, and the item
    /// table. Distinct from [`Board::remove_tier`], which preserves items.
    pub fn clear_board(&mut self) {
        for tier in &mut self.tiers {
            tier.items.clear();
        }
        self.pool.clear();
        self.items.clear();
    }

    /// Copy of this board with every ephemeral item scrubbed from the
    /// table, tiers, and pool. The persisted payload must never reference
    /// an ephemeral item.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let mut copy = self.clone();
        let keep: BTreeSet<ItemId> =
            copy.items.values().filter(|i| !i.ephemeral).map(|i| i.id).collect();
        copy.items.retain(|id, _| keep.contains(id));
        for tier in &mut copy.tiers {
            tier.items.retain(|id| keep.contains(id));
        }
        copy.pool.retain(|id| keep.contains(id));
        copy
    }

    /// Remove an item id from the pool and from every tier order.
    fn detach(&mut self, item: &ItemId) {
        self.pool.retain(|id| id != item);
        for tier in &mut self.tiers {
            tier.items.retain(|id| id != item);
        }
    }
}

/// Normalize a tier label: drop all whitespace, cap the length, and fall
/// back to the placeholder glyph when nothing remains.
fn normalize_label(raw: &str) -> String {
    let stripped: String =
        raw.chars().filter(|c| !c.is_whitespace()).take(LABEL_MAX_CHARS).collect();
    if stripped.is_empty() {
        LABEL_PLACEHOLDER.to_string()
    } else {
        stripped
    }
}
