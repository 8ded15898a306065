//! Human-readable status strings for the display and control page.
//!
//! Durations up to and including 120 seconds are shown in seconds; longer
//! ones are floored to whole minutes. So 120 s reads "120 seconds" and
//! 121 s reads "2 minutes".

use core::fmt::{self, Write};

/// Fixed-capacity status text. Long enough for
/// `"No events for <i64::MAX> minutes"`.
pub type StatusMessage = heapless::String<48>;

/// Largest duration still rendered in seconds.
pub const SECONDS_DISPLAY_LIMIT: i64 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Seconds,
    Minutes,
}

/// A duration reduced to the value and unit shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration {
    pub value: i64,
    pub unit: DurationUnit,
}

impl HumanDuration {
    pub fn from_secs(secs: i64) -> Self {
        if secs > SECONDS_DISPLAY_LIMIT {
            Self {
                value: secs.div_euclid(60),
                unit: DurationUnit::Minutes,
            }
        } else {
            Self {
                value: secs,
                unit: DurationUnit::Seconds,
            }
        }
    }

    fn unit_label(&self) -> &'static str {
        match self.unit {
            DurationUnit::Minutes if self.value == 1 => "minute",
            DurationUnit::Minutes => "minutes",
            DurationUnit::Seconds => "seconds",
        }
    }
}

impl fmt::Display for HumanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit_label())
    }
}

/// What the relay has been doing, for the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    /// No transition since boot.
    NoEvents,
    Running,
    Stopped,
}

impl Activity {
    fn prefix(self) -> &'static str {
        match self {
            Self::NoEvents => "No events",
            Self::Running => "Running",
            Self::Stopped => "Stopped",
        }
    }
}

/// Render `"<activity> for <duration>"`.
pub fn format_status(activity: Activity, elapsed_secs: i64) -> StatusMessage {
    let mut msg = StatusMessage::new();
    // Capacity covers the longest possible rendering.
    let _ = write!(
        msg,
        "{} for {}",
        activity.prefix(),
        HumanDuration::from_secs(elapsed_secs)
    );
    msg
}
