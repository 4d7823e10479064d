use std::time::{Duration, Instant};

use serde::Serialize;

/// Announcement of whose turn it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnPopup {
    pub player_id: String,
    pub name: String,
    pub color: String,
}

/// What the round does when an announcement runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupAction {
    None,
    ResolveMismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupOptions {
    pub lock_board: bool,
    pub unlock_after: bool,
    pub on_complete: PopupAction,
}

impl Default for PopupOptions {
    fn default() -> Self {
        Self {
            lock_board: true,
            unlock_after: true,
            on_complete: PopupAction::None,
        }
    }
}

#[derive(Debug, Clone)]
struct Scheduled {
    popup: TurnPopup,
    options: PopupOptions,
    deadline: Instant,
}

/// Holds at most one announcement. Showing a new one drops the old one
/// without running its completion.
#[derive(Debug, Clone, Default)]
pub struct PopupSlot {
    current: Option<Scheduled>,
}

impl PopupSlot {
    pub fn show(&mut self, popup: TurnPopup, options: PopupOptions, now: Instant, duration: Duration) {
        self.current = Some(Scheduled {
            popup,
            options,
            deadline: now + duration,
        });
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&TurnPopup> {
        self.current.as_ref().map(|scheduled| &scheduled.popup)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.current.as_ref().map(|scheduled| scheduled.deadline)
    }

    /// Removes the announcement if its time is up and hands back its options.
    pub fn take_due(&mut self, now: Instant) -> Option<PopupOptions> {
        match &self.current {
            Some(scheduled) if scheduled.deadline <= now => {
                self.current.take().map(|scheduled| scheduled.options)
            }
            _ => None,
        }
    }
}
