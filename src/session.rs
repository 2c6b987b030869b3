//! `BoardSession`: the single aggregate owning the live board, the undo
//! history, the save scheduler, and the storage handle.
//!
//! A host constructs one session per application lifetime. Every mutating
//! entry point funnels through one commit path that captures an undo
//! snapshot, applies the mutation, and — only on success — retains the
//! snapshot and arms the debounced save. A failed mutation therefore
//! leaves the board, the history, and the scheduler exactly as they
//! were. All calls happen on the host's single event-handling context;
//! the only delayed work is the save flush the host drives via
//! [`BoardSession::tick`].

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::time::{SystemTime, UNIX_EPOCH};

use log::warn;

use crate::board::{Board, Destination, ItemContent, ItemId, TierId};
use crate::error::BoardError;
use crate::history::{History, Snapshot};
use crate::persist::{self, SaveScheduler, StateStore};
use crate::picker::{self, PickerLayout, Point, Viewport};
use crate::reconcile::{self, Arrangement, DragOutcome};

/// Millisecond clock driving the save debounce.
pub trait Clock {
    /// Current time in milliseconds. Only differences matter.
    fn now_ms(&self) -> u64;
}

/// Wall-clock milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}

/// The application-lifetime aggregate root.
pub struct BoardSession<S: StateStore, C: Clock = SystemClock> {
    board: Board,
    history: History,
    saver: SaveScheduler,
    store: S,
    clock: C,
}

impl<S: StateStore> BoardSession<S> {
    /// Open a session against `store` using the system clock. Performs
    /// the one-shot load; a missing or corrupt payload yields a fresh
    /// default board seeded with the placeholder palette.
    #[must_use]
    pub fn open(store: S) -> Self {
        Self::open_with_clock(store, SystemClock)
    }
}

impl<S: StateStore, C: Clock> BoardSession<S, C> {
    /// Open a session with an explicit clock.
    #[must_use]
    pub fn open_with_clock(store: S, clock: C) -> Self {
        let board = persist::load(&store).unwrap_or_else(|| {
            let mut fresh = Board::with_default_tiers();
            fresh.seed_if_empty();
            fresh
        });
        Self { board, history: History::new(), saver: SaveScheduler::new(), store, clock }
    }

    // ── Read access ─────────────────────────────────────────────

    /// The live board; the renderer's read projection.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Whether the undo control should be enabled.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a debounced save is armed.
    #[must_use]
    pub fn save_pending(&self) -> bool {
        self.saver.is_pending()
    }

    /// The storage handle.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Geometry for the tap-to-place picker over the current tiers.
    ///
    /// # Errors
    ///
    /// [`BoardError::InvalidState`] when the board has no tiers; the
    /// picker must not open.
    pub fn picker_layout(
        &self,
        anchor: Point,
        viewport: Viewport,
    ) -> Result<PickerLayout, BoardError> {
        let tiers: Vec<(TierId, String)> =
            self.board.tiers().iter().map(|t| (t.id, t.label.clone())).collect();
        picker::layout(anchor, viewport, &tiers)
    }

    // ── Gesture reconciliation ──────────────────────────────────

    /// Commit a completed drag. A cancelled gesture is a no-op: no
    /// mutation, no snapshot, no save.
    ///
    /// # Errors
    ///
    /// [`BoardError::NotFound`] for an unknown item or destination tier;
    /// nothing changes.
    pub fn complete_drag(&mut self, item: &ItemId, outcome: DragOutcome) -> Result<(), BoardError> {
        match outcome {
            DragOutcome::Cancelled => Ok(()),
            DragOutcome::Dropped { dest, before } => {
                self.commit(|b| b.move_item(item, dest, before.as_ref()))
            }
        }
    }

    /// Place a picker-selected item at the end of the chosen tier.
    ///
    /// # Errors
    ///
    /// [`BoardError::NotFound`] for an unknown item or tier.
    pub fn place_from_picker(&mut self, item: &ItemId, tier: &TierId) -> Result<(), BoardError> {
        self.commit(|b| b.move_item(item, Destination::Tier(*tier), None))
    }

    /// Re-derive every order from the observed post-gesture arrangement
    /// as a single mutation — one undo snapshot per gesture, not one per
    /// row.
    ///
    /// # Errors
    ///
    /// [`BoardError::NotFound`] or [`BoardError::InvalidState`] per
    /// [`Board::apply_arrangement`]; nothing changes.
    pub fn apply_drag_resync(&mut self, observed: &Arrangement) -> Result<(), BoardError> {
        self.commit(|b| b.apply_arrangement(&observed.tiers, &observed.pool))
    }

    // ── Toolbar / dialog mutations ──────────────────────────────

    /// Append a tier. Without an explicit label the suggestion policy
    /// picks the first unused letter after the defaults.
    ///
    /// # Errors
    ///
    /// Does not fail for any current input; the `Result` mirrors the
    /// other mutation entry points.
    pub fn add_tier(&mut self, label: Option<&str>) -> Result<TierId, BoardError> {
        self.commit(|b| {
            let label = label.map_or_else(|| reconcile::next_label(b), str::to_string);
            Ok(b.add_tier(&label))
        })
    }

    /// Delete a tier, moving its items to the front of the pool.
    ///
    /// # Errors
    ///
    /// [`BoardError::NotFound`] if the tier does not exist.
    pub fn remove_tier(&mut self, tier: &TierId) -> Result<(), BoardError> {
        self.commit(|b| b.remove_tier(tier))
    }

    /// Rename a tier; the label is normalized by the board.
    ///
    /// # Errors
    ///
    /// [`BoardError::NotFound`] if the tier does not exist.
    pub fn relabel_tier(&mut self, tier: &TierId, label: &str) -> Result<(), BoardError> {
        self.commit(|b| b.relabel_tier(tier, label))
    }

    /// Set the board title.
    ///
    /// # Errors
    ///
    /// Does not fail for any current input.
    pub fn set_title(&mut self, title: &str) -> Result<(), BoardError> {
        self.commit(|b| {
            b.set_title(title);
            Ok(())
        })
    }

    /// Add a scratch text item: ephemeral (dropped from the persisted
    /// payload) and surfaced at the front of the pool.
    ///
    /// # Errors
    ///
    /// Does not fail for any current input.
    pub fn add_text_item(&mut self, text: &str, color: &str) -> Result<ItemId, BoardError> {
        self.commit(|b| {
            Ok(b.add_item(
                ItemContent::Text { text: text.to_string(), color: color.to_string() },
                true,
                true,
            ))
        })
    }

    /// Add an uploaded image item: persistent, appended to the pool.
    /// Called by the upload collaborator once the image is encoded.
    ///
    /// # Errors
    ///
    /// Does not fail for any current input.
    pub fn add_image_item(
        &mut self,
        image_ref: &str,
        caption: Option<&str>,
    ) -> Result<ItemId, BoardError> {
        self.commit(|b| {
            Ok(b.add_item(
                ItemContent::Image {
                    image_ref: image_ref.to_string(),
                    caption: caption.map(str::to_string),
                },
                false,
                false,
            ))
        })
    }

    /// Destroy an item wherever it is placed.
    ///
    /// # Errors
    ///
    /// [`BoardError::NotFound`] if the item does not exist.
    pub fn remove_item(&mut self, item: &ItemId) -> Result<(), BoardError> {
        self.commit(|b| b.remove_item(item))
    }

    /// Destructive clear of every tier, the pool, and the item table.
    /// Confirmation is the dialog collaborator's job, not this crate's.
    ///
    /// # Errors
    ///
    /// Does not fail for any current input.
    pub fn clear_board(&mut self) -> Result<(), BoardError> {
        self.commit(|b| {
            b.clear_board();
            Ok(())
        })
    }

    // ── History ─────────────────────────────────────────────────

    /// Replace the live board with the most recent snapshot. Returns
    /// `Ok(false)` when the stack is empty (a disabled control, not an
    /// error). Undo is not itself undoable.
    ///
    /// # Errors
    ///
    /// [`BoardError::InvalidState`] if the popped snapshot no longer
    /// parses, which does not happen for snapshots this session captured.
    pub fn undo(&mut self) -> Result<bool, BoardError> {
        let Some(snapshot) = self.history.pop() else {
            return Ok(false);
        };
        self.board = snapshot.restore()?;
        self.saver.schedule(self.clock.now_ms());
        Ok(true)
    }

    // ── Persistence ─────────────────────────────────────────────

    /// Drive the debounced save; hosts call this from their timer.
    pub fn tick(&mut self) {
        self.saver.flush_due(self.clock.now_ms(), &self.board, &mut self.store);
    }

    /// Force an immediate save, bypassing the debounce window.
    pub fn save_now(&mut self) {
        self.saver.flush_now(&self.board, &mut self.store);
    }

    /// Wipe persisted state and recreate the seeded default board. Drops
    /// the undo history; not itself undoable.
    pub fn hard_reset(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!("failed to clear persisted board: {e}");
        }
        self.history.clear();
        self.saver.cancel();
        let mut fresh = Board::with_default_tiers();
        fresh.seed_if_empty();
        self.board = fresh;
        self.saver.schedule(self.clock.now_ms());
    }

    // ── Commit path ─────────────────────────────────────────────

    /// Snapshot, mutate, and only on success retain the snapshot and arm
    /// the save. The structural guarantee that no mutation escapes
    /// without its pre-mutation snapshot.
    fn commit<T>(
        &mut self,
        mutate: impl FnOnce(&mut Board) -> Result<T, BoardError>,
    ) -> Result<T, BoardError> {
        let snapshot = Snapshot::of(&self.board)?;
        let value = mutate(&mut self.board)?;
        self.history.push(snapshot);
        self.saver.schedule(self.clock.now_ms());
        Ok(value)
    }
}
