//! # DevTools Hub Core Library
//!
//! Business logic behind the DevTools Hub: a countdown timer, a task
//! checklist and a theme preference, all remembered between sessions.
//! The `devhub` CLI is a thin terminal layer over this crate.
//!
//! ## Architecture
//!
//! - **Timer**: a wall-clock-based countdown state machine. The caller
//!   invokes `tick()` periodically; remaining time is derived from the start
//!   instant, so missed ticks never cause drift.
//! - **Sinks**: traits for the collaborators the timer reports to (display,
//!   notifications) and reads from (requested duration).
//! - **Storage**: SQLite key-value store for session state and TOML-based
//!   configuration.
//!
//! ## Key Components
//!
//! - [`CountdownTimer`]: core timer state machine
//! - [`TimerController`]: routes commands to the timer and events to sinks
//! - [`TaskList`]: ordered checklist with progress
//! - [`Store`]: persisted state
//! - [`Config`]: application configuration

pub mod checklist;
pub mod error;
pub mod events;
pub mod sinks;
pub mod storage;
pub mod theme;
pub mod timer;

pub use checklist::{Progress, ProgressBand, Task, TaskList, TaskStatus};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::{Event, RejectReason};
pub use sinks::{DisplaySink, InputSource, NotificationSink, Severity};
pub use storage::{Config, Store, StoredInputs};
pub use theme::Theme;
pub use timer::{
    Clock, Command, CountdownTimer, Hms, ManualClock, Preset, RequestedDuration, SystemClock,
    TimerController, TimerState, MSG_COMPLETED, MSG_NO_DURATION,
};
