mod console;
mod pushover;

pub use console::ConsoleNotifier;
pub use pushover::PushoverNotifier;

use crate::domain::Alert;
use crate::error::NotifyError;

pub struct NotifierHub {
    console: ConsoleNotifier,
    pushover: PushoverNotifier,
}

impl NotifierHub {
    pub fn new(console: ConsoleNotifier, pushover: PushoverNotifier) -> Self {
        Self { console, pushover }
    }

    /// Console echo always happens; the result is the relay's.
    pub async fn send(&self, alert: &Alert) -> Result<(), NotifyError> {
        self.console.send(alert);
        self.pushover.send(alert).await
    }
}
