use std::time::Duration;

/// Timing rules for a round of the matching game.
///
/// Keep this separate from runtime/server configuration (ports, channel sizes, etc.).
#[derive(Debug, Clone, Copy)]
pub struct RoundTuning {
    /// How long a matched pair stays selected before the board unlocks.
    pub match_settle: Duration,

    /// How long a turn announcement stays on screen.
    pub turn_popup: Duration,

    /// Face-up time for a mismatched pair when nobody is taking turns.
    pub mismatch_reveal: Duration,

    /// Whether the mismatch announcement blocks clicks until it ends.
    /// When false, the next click flips the pair back and passes the turn at once.
    pub lock_during_announcement: bool,
}

impl Default for RoundTuning {
    fn default() -> Self {
        Self {
            match_settle: Duration::from_millis(750),
            turn_popup: Duration::from_millis(3000),
            mismatch_reveal: Duration::from_millis(3000),
            lock_during_announcement: true,
        }
    }
}
