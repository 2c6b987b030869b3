//! Error taxonomy for the tier-board engine.
//!
//! Every fallible operation in this crate returns [`BoardError`]. Board
//! mutations are atomic: an `Err` means nothing changed — no partial
//! placement, no history entry, no scheduled save.

use uuid::Uuid;

/// Errors surfaced by board mutations and their collaborators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// A referenced tier or item id does not exist on this board.
    #[error("no tier or item with id {0}")]
    NotFound(Uuid),
    /// A caller violated a contract precondition, e.g. opening the picker
    /// with zero destinations or resyncing an arrangement that does not
    /// cover the board.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
    /// The backing store failed. Sessions log this and continue operating
    /// in memory; it is never surfaced as a user-facing failure.
    #[error("persistent storage unavailable: {0}")]
    PersistenceUnavailable(String),
}
