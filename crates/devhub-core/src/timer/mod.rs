mod clock;
mod controller;
mod duration;
mod engine;
mod preset;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{Command, TimerController, MSG_COMPLETED, MSG_NO_DURATION};
pub use duration::{Hms, RequestedDuration};
pub use engine::{CountdownTimer, TimerState};
pub use preset::{default_presets, Preset};
