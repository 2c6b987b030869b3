//! Persistence bridge: the storage seam, sanitized payload encoding, and
//! the debounced save scheduler.
//!
//! The durable side is one string-keyed slot (browser `localStorage`, a
//! file, or memory) behind the [`StateStore`] trait. Saves are debounced:
//! each mutation re-arms a 200 ms deadline and the host pumps
//! [`SaveScheduler::flush_due`] from its timer, so a burst of mutations
//! produces one write. A save still pending at process exit is lost by
//! design; the next mutation reschedules. Storage failures are logged and
//! swallowed — the session degrades to in-memory operation, never a
//! user-facing error.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use log::warn;

use crate::board::Board;
use crate::consts::SAVE_DEBOUNCE_MS;
use crate::error::BoardError;

/// Single-slot durable string storage.
pub trait StateStore {
    /// Read the stored payload; `Ok(None)` when nothing has been written.
    ///
    /// # Errors
    ///
    /// [`BoardError::PersistenceUnavailable`] when the backing store
    /// cannot be read.
    fn read(&self) -> Result<Option<String>, BoardError>;

    /// Replace the stored payload.
    ///
    /// # Errors
    ///
    /// [`BoardError::PersistenceUnavailable`] when the backing store
    /// cannot be written.
    fn write(&mut self, payload: &str) -> Result<(), BoardError>;

    /// Delete the stored payload (hard reset).
    ///
    /// # Errors
    ///
    /// [`BoardError::PersistenceUnavailable`] when the backing store
    /// cannot be written.
    fn clear(&mut self) -> Result<(), BoardError>;
}

/// In-memory store: the test double, and the fallback when no durable
/// storage is available for the session.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Option<String>,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, BoardError> {
        Ok(self.slot.clone())
    }

    fn write(&mut self, payload: &str) -> Result<(), BoardError> {
        self.slot = Some(payload.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), BoardError> {
        self.slot = None;
        Ok(())
    }
}

/// Serialize the persisted form of a board: the sanitized copy with
/// every ephemeral item scrubbed.
///
/// # Errors
///
/// [`BoardError::PersistenceUnavailable`] when serialization fails, which
/// does not happen for boards this crate constructs.
pub fn encode(board: &Board) -> Result<String, BoardError> {
    serde_json::to_string(&board.sanitized())
        .map_err(|e| BoardError::PersistenceUnavailable(e.to_string()))
}

/// One-shot load at startup. A missing, unreadable, corrupt, or
/// inconsistent payload is `None` — callers fall back to a fresh seeded
/// board, never an error.
#[must_use]
pub fn load(store: &impl StateStore) -> Option<Board> {
    let raw = match store.read() {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!("saved board unavailable, starting fresh: {e}");
            return None;
        }
    };
    match serde_json::from_str::<Board>(&raw) {
        Ok(board) if board.is_consistent() => Some(board),
        Ok(_) => {
            warn!("saved board violates placement invariant, starting fresh");
            None
        }
        Err(e) => {
            warn!("discarding corrupt saved board: {e}");
            None
        }
    }
}

/// Debounces save requests so bursts of mutations produce one write.
#[derive(Debug, Default)]
pub struct SaveScheduler {
    deadline_ms: Option<u64>,
}

impl SaveScheduler {
    /// A scheduler with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or push back) the pending save deadline.
    pub fn schedule(&mut self, now_ms: u64) {
        self.deadline_ms = Some(now_ms + SAVE_DEBOUNCE_MS);
    }

    /// Whether a save is armed and waiting for its deadline.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// Write the board if the debounce deadline has passed; otherwise do
    /// nothing. Hosts call this from their timer.
    pub fn flush_due(&mut self, now_ms: u64, board: &Board, store: &mut impl StateStore) {
        let Some(deadline) = self.deadline_ms else {
            return;
        };
        if now_ms < deadline {
            return;
        }
        self.flush_now(board, store);
    }

    /// Write the board immediately, clearing any pending deadline.
    /// Storage failure is logged and dropped; the next mutation re-arms.
    pub fn flush_now(&mut self, board: &Board, store: &mut impl StateStore) {
        self.deadline_ms = None;
        match encode(board) {
            Ok(payload) => {
                if let Err(e) = store.write(&payload) {
                    warn!("board save failed, continuing in memory: {e}");
                }
            }
            Err(e) => warn!("board save failed, continuing in memory: {e}"),
        }
    }

    /// Drop any pending save without writing.
    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }
}
