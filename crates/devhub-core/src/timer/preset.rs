use serde::{Deserialize, Serialize};

use super::duration::RequestedDuration;

/// A one-click duration, stored as whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preset {
    pub minutes: u32,
}

impl Preset {
    pub fn from_minutes(minutes: u32) -> Self {
        Self { minutes }
    }

    /// Split into hours and minutes; seconds are always cleared.
    pub fn duration(&self) -> RequestedDuration {
        RequestedDuration::new(self.minutes / 60, self.minutes % 60, 0)
    }
}

pub fn default_presets() -> Vec<Preset> {
    [5, 15, 25, 60].into_iter().map(Preset::from_minutes).collect()
}
