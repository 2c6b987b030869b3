use super::*;

use crate::board::{Destination, ItemContent};
use crate::error::BoardError;

/// Store that counts writes and can be switched to fail.
#[derive(Debug, Default)]
struct CountingStore {
    inner: MemoryStore,
    writes: usize,
    failing: bool,
}

impl StateStore for CountingStore {
    fn read(&self) -> Result<Option<String>, BoardError> {
        if self.failing {
            return Err(BoardError::PersistenceUnavailable("store offline".to_string()));
        }
        self.inner.read()
    }

    fn write(&mut self, payload: &str) -> Result<(), BoardError> {
        if self.failing {
            return Err(BoardError::PersistenceUnavailable("store offline".to_string()));
        }
        self.writes += 1;
        self.inner.write(payload)
    }

    fn clear(&mut self) -> Result<(), BoardError> {
        self.inner.clear()
    }
}

fn small_board() -> Board {
    let mut board = Board::with_default_tiers();
    board.add_item(
        ItemContent::Text { text: "kept".to_string(), color: "#123".to_string() },
        false,
        false,
    );
    board
}

// =============================================================
// MemoryStore
// =============================================================

#[test]
fn memory_store_roundtrip() {
    let mut store = MemoryStore::new();
    assert_eq!(store.read().unwrap(), None);

    store.write("payload").unwrap();
    assert_eq!(store.read().unwrap().as_deref(), Some("payload"));

    store.clear().unwrap();
    assert_eq!(store.read().unwrap(), None);
}

// =============================================================
// encode / load
// =============================================================

#[test]
fn encode_excludes_ephemeral_items() {
    let mut board = small_board();
    let scratch = board.add_item(
        ItemContent::Text { text: "scratch".to_string(), color: "#456".to_string() },
        true,
        true,
    );
    let tier = board.tiers()[0].id;
    board.move_item(&scratch, Destination::Tier(tier), None).unwrap();

    let payload = encode(&board).unwrap();
    assert!(!payload.contains(&scratch.to_string()), "payload references an ephemeral item");

    let reloaded: Board = serde_json::from_str(&payload).unwrap();
    assert!(reloaded.is_consistent());
    assert_eq!(reloaded.item_count(), 1);
}

#[test]
fn load_roundtrips_a_saved_board() {
    let board = small_board();
    let mut store = MemoryStore::new();
    store.write(&encode(&board).unwrap()).unwrap();

    let loaded = load(&store);
    assert_eq!(loaded, Some(board));
}

#[test]
fn load_treats_missing_as_no_prior_state() {
    let store = MemoryStore::new();
    assert_eq!(load(&store), None);
}

#[test]
fn load_treats_corrupt_payload_as_no_prior_state() {
    let mut store = MemoryStore::new();
    store.write("{definitely not a board").unwrap();
    assert_eq!(load(&store), None);
}

#[test]
fn load_rejects_a_payload_violating_placement() {
    // Valid JSON shape, but the pool references an item missing from the
    // table.
    let mut store = MemoryStore::new();
    store
        .write(
            r#"{"title":"","tiers":[],"items":{},"pool":["00000000-0000-0000-0000-000000000001"]}"#,
        )
        .unwrap();
    assert_eq!(load(&store), None);
}

#[test]
fn load_survives_an_unreadable_store() {
    let store = CountingStore { failing: true, ..CountingStore::default() };
    assert_eq!(load(&store), None);
}

// =============================================================
// SaveScheduler
// =============================================================

#[test]
fn flush_waits_for_the_debounce_deadline() {
    let board = small_board();
    let mut store = CountingStore::default();
    let mut saver = SaveScheduler::new();

    saver.schedule(1_000);
    assert!(saver.is_pending());

    saver.flush_due(1_000 + SAVE_DEBOUNCE_MS - 1, &board, &mut store);
    assert_eq!(store.writes, 0, "must not write before the window closes");

    saver.flush_due(1_000 + SAVE_DEBOUNCE_MS, &board, &mut store);
    assert_eq!(store.writes, 1);
    assert!(!saver.is_pending());
}

#[test]
fn a_burst_of_schedules_produces_one_write() {
    let board = small_board();
    let mut store = CountingStore::default();
    let mut saver = SaveScheduler::new();

    saver.schedule(1_000);
    saver.schedule(1_050);
    saver.schedule(1_100);

    // The first deadline has passed but the burst pushed it back.
    saver.flush_due(1_210, &board, &mut store);
    assert_eq!(store.writes, 0);

    saver.flush_due(1_100 + SAVE_DEBOUNCE_MS, &board, &mut store);
    assert_eq!(store.writes, 1);

    // Nothing further is pending.
    saver.flush_due(10_000, &board, &mut store);
    assert_eq!(store.writes, 1);
}

#[test]
fn flush_now_writes_immediately_and_disarms() {
    let board = small_board();
    let mut store = CountingStore::default();
    let mut saver = SaveScheduler::new();

    saver.schedule(1_000);
    saver.flush_now(&board, &mut store);
    assert_eq!(store.writes, 1);
    assert!(!saver.is_pending());
}

#[test]
fn cancel_drops_the_pending_save() {
    let board = small_board();
    let mut store = CountingStore::default();
    let mut saver = SaveScheduler::new();

    saver.schedule(1_000);
    saver.cancel();
    saver.flush_due(10_000, &board, &mut store);
    assert_eq!(store.writes, 0);
}

#[test]
fn write_failure_is_swallowed_and_disarms() {
    let board = small_board();
    let mut store = CountingStore { failing: true, ..CountingStore::default() };
    let mut saver = SaveScheduler::new();

    saver.schedule(1_000);
    saver.flush_due(2_000, &board, &mut store);

    assert_eq!(store.writes, 0);
    assert!(!saver.is_pending(), "failed save must not retry until rescheduled");
}
