//! Collaborators the countdown timer talks to but does not own.

use serde::{Deserialize, Serialize};

use crate::timer::RequestedDuration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Success,
}

/// Supplies the duration the user asked for.
pub trait InputSource {
    fn requested_duration(&self) -> RequestedDuration;
}

/// Renders the remaining time and the lifecycle label.
pub trait DisplaySink {
    fn render(&mut self, hours: u64, minutes: u64, seconds: u64);
    fn set_status(&mut self, label: &str);
}

/// Surfaces transient messages. Fire-and-forget.
pub trait NotificationSink {
    fn notify(&mut self, message: &str, severity: Severity);

    /// Audible cue played when a countdown completes.
    fn play_cue(&mut self) {}
}

impl InputSource for RequestedDuration {
    fn requested_duration(&self) -> RequestedDuration {
        *self
    }
}

impl<T: InputSource + ?Sized> InputSource for &T {
    fn requested_duration(&self) -> RequestedDuration {
        (**self).requested_duration()
    }
}

impl<T: DisplaySink + ?Sized> DisplaySink for &mut T {
    fn render(&mut self, hours: u64, minutes: u64, seconds: u64) {
        (**self).render(hours, minutes, seconds);
    }

    fn set_status(&mut self, label: &str) {
        (**self).set_status(label);
    }
}

impl<T: NotificationSink + ?Sized> NotificationSink for &mut T {
    fn notify(&mut self, message: &str, severity: Severity) {
        (**self).notify(message, severity);
    }

    fn play_cue(&mut self) {
        (**self).play_cue();
    }
}
