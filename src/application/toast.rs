use std::time::{Duration, Instant};

use super::timer::SingleShotTimer;

pub const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Single-slot notification. A new message replaces the current one and
/// restarts the auto-dismiss countdown.
#[derive(Debug, Clone, Default)]
pub struct Toast {
    message: String,
    visible: bool,
    timer: SingleShotTimer,
}

impl Toast {
    pub fn show(&mut self, message: impl Into<String>, now: Instant) {
        self.message = message.into();
        self.visible = true;
        self.timer.schedule(now, TOAST_DURATION);
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
        self.timer.cancel();
    }

    /// Hides the toast once its countdown has run out. Returns whether it did.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.timer.fire_if_due(now) {
            self.visible = false;
            true
        } else {
            false
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The message while the toast is showing.
    pub fn message(&self) -> Option<&str> {
        self.visible.then_some(self.message.as_str())
    }
}
