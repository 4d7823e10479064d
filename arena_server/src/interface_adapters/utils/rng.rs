use std::{
    sync::{
        OnceLock,
        atomic::{AtomicU64, Ordering},
    },
    time::{SystemTime, UNIX_EPOCH},
};

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Returns a process-unique game id such as `game-19a3f2c0b41`.
///
/// The counter starts at the boot time in milliseconds so ids from
/// successive runs do not repeat.
pub fn next_game_id() -> String {
    static COUNTER: OnceLock<AtomicU64> = OnceLock::new();
    let counter = COUNTER.get_or_init(|| AtomicU64::new(now_millis()));
    format!("game-{:x}", counter.fetch_add(1, Ordering::Relaxed))
}
