use serde::{Deserialize, Serialize};

/// Inclusive working-hours window, in hours of the day (0..=23).
///
/// The window is the literal range `start..=end`. One whose `start` is after
/// its `end` is empty and matches no hour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: u8,
    pub end: u8,
}

impl WorkingHours {
    /// Build a window, rejecting hours outside 0..=23.
    pub fn new(start: u8, end: u8) -> Option<Self> {
        if start > 23 || end > 23 {
            return None;
        }
        Some(Self { start, end })
    }

    /// Whether `hour` falls inside the window. Hours outside 0..=23 never do.
    pub fn contains(&self, hour: u8) -> bool {
        hour <= 23 && (self.start..=self.end).contains(&hour)
    }
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self { start: 9, end: 17 }
    }
}

/// Per-user auto-send preferences.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub auto_send_enabled: bool,
    /// Minimum supervisor confidence, inclusive.
    pub confidence_threshold: f64,
    /// `None` when the window is unknown; the time-window gate then relies on
    /// `allow_after_hours` alone.
    pub working_hours: Option<WorkingHours>,
    pub allow_after_hours: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            auto_send_enabled: false,
            confidence_threshold: 0.85,
            working_hours: Some(WorkingHours::default()),
            allow_after_hours: false,
        }
    }
}

/// Per-channel kill switch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSettings {
    pub auto_send_enabled: bool,
}
