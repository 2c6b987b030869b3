//! Bounded linear undo over whole-board snapshots.
//!
//! A snapshot is the entire board serialized to JSON, taken immediately
//! before a mutation. The stack holds at most [`HISTORY_CAP`] entries and
//! evicts the oldest on overflow. Undo pops the most recent entry and the
//! session replaces the live board wholesale; undo is not itself undoable
//! and there is no redo stack.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

use crate::board::Board;
use crate::consts::HISTORY_CAP;
use crate::error::BoardError;

/// An opaque serialized board snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(String);

impl Snapshot {
    /// Serialize the board. Callers capture before mutating and push the
    /// snapshot only once the mutation has succeeded.
    ///
    /// # Errors
    ///
    /// [`BoardError::InvalidState`] when serialization fails, which does
    /// not happen for boards this crate constructs.
    pub fn of(board: &Board) -> Result<Self, BoardError> {
        serde_json::to_string(board)
            .map(Self)
            .map_err(|_| BoardError::InvalidState("board snapshot failed to serialize"))
    }

    /// Deserialize the captured board.
    ///
    /// # Errors
    ///
    /// [`BoardError::InvalidState`] when the payload no longer parses.
    pub fn restore(&self) -> Result<Board, BoardError> {
        serde_json::from_str(&self.0)
            .map_err(|_| BoardError::InvalidState("board snapshot failed to parse"))
    }

    /// The raw serialized payload.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The undo stack: most recent snapshot at the back, FIFO eviction at
/// the front when full.
#[derive(Debug, Default)]
pub struct History {
    entries: VecDeque<Snapshot>,
}

impl History {
    /// An empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a pre-mutation snapshot, evicting the oldest entry at
    /// capacity.
    pub fn push(&mut self, snapshot: Snapshot) {
        if self.entries.len() == HISTORY_CAP {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot);
    }

    /// Pop the most recent snapshot, or `None` when the stack is empty.
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop_back()
    }

    /// Whether an undo is available. This is the UI's enabled/disabled
    /// signal, not an error path.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Number of retained snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the stack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry (hard reset).
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
