//! Tier-board state engine: the canonical model behind a drag-and-drop
//! tier-list maker.
//!
//! This crate owns everything between a completed user gesture and the
//! durable saved board: the tiers/items/pool aggregate and its placement
//! invariant, a bounded linear undo history of whole-board snapshots,
//! reconciliation of freeform drag results back into canonical order,
//! the radial tap-to-place picker geometry, and a debounced persistence
//! bridge over a single-slot key-value store. The host layer is
//! responsible only for rendering the read projections, detecting
//! gestures, and reporting their outcomes back through
//! [`session::BoardSession`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`session`] | Aggregate root owning board, history, and persistence |
//! | [`board`] | Canonical tiers/items/pool model and mutation primitives |
//! | [`history`] | Bounded linear undo over whole-board snapshots |
//! | [`reconcile`] | Gesture outcomes and the label-suggestion policy |
//! | [`picker`] | Radial tap-to-place geometry |
//! | [`persist`] | Debounced saves and the storage seam |
//! | [`consts`] | Shared numeric constants |
//! | [`error`] | Error taxonomy |

pub mod board;
pub mod consts;
pub mod error;
pub mod history;
pub mod persist;
pub mod picker;
pub mod reconcile;
pub mod session;
