//! Terminal renditions of the timer's display and notification sinks.

use std::io::Write;

use devhub_core::storage::NotificationsConfig;
use devhub_core::{DisplaySink, Hms, NotificationSink, Severity};

/// Repaints a single status line in place.
///
/// In JSON mode nothing is drawn; the run loop prints events instead.
pub struct TerminalDisplay {
    hms: Hms,
    status: String,
    quiet: bool,
}

impl TerminalDisplay {
    pub fn new(quiet: bool) -> Self {
        Self {
            hms: Hms::from_secs(0),
            status: String::new(),
            quiet,
        }
    }

    fn paint(&self) {
        if self.quiet {
            return;
        }
        let mut out = std::io::stdout().lock();
        write!(out, "\r\x1b[2K{}  {}", self.hms, self.status).ok();
        out.flush().ok();
    }

    /// Move off the status line so following output starts clean.
    pub fn finish(&self) {
        if !self.quiet {
            println!();
        }
    }
}

impl DisplaySink for TerminalDisplay {
    fn render(&mut self, hours: u64, minutes: u64, seconds: u64) {
        self.hms = Hms {
            hours,
            minutes,
            seconds,
        };
        self.paint();
    }

    fn set_status(&mut self, label: &str) {
        self.status = label.to_string();
        self.paint();
    }
}

pub struct TerminalNotifier {
    enabled: bool,
    sound: bool,
}

impl TerminalNotifier {
    pub fn new(config: &NotificationsConfig) -> Self {
        Self {
            enabled: config.enabled,
            sound: config.sound,
        }
    }
}

impl NotificationSink for TerminalNotifier {
    fn notify(&mut self, message: &str, severity: Severity) {
        if !self.enabled {
            return;
        }
        let tag = match severity {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Success => "success",
        };
        eprintln!("\n[{tag}] {message}");
    }

    fn play_cue(&mut self) {
        if self.enabled && self.sound {
            let mut err = std::io::stderr().lock();
            // Terminal bell.
            write!(err, "\x07").ok();
            err.flush().ok();
        }
    }
}
