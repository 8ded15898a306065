//! Operating mode of the humidistat.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Whether `evaluate` runs the hysteresis law or forces the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Mode {
    /// Relay forced off.
    Off = 0,
    /// Relay forced on.
    On = 1,
    /// Hysteresis control against the desired humidity.
    #[default]
    Auto = 2,
}

impl Mode {
    /// Numeric code used on the wire and in logs.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode a numeric mode code.
    pub const fn from_u8(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Off),
            1 => Some(Self::On),
            2 => Some(Self::Auto),
            _ => None,
        }
    }

    /// Label shown on the control page.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::On => "On",
            Self::Auto => "Auto",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a mode name is not one of `off`, `on`, `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownMode;

impl fmt::Display for UnknownMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown mode (expected off, on or auto)")
    }
}

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("off") {
            Ok(Self::Off)
        } else if s.eq_ignore_ascii_case("on") {
            Ok(Self::On)
        } else if s.eq_ignore_ascii_case("auto") {
            Ok(Self::Auto)
        } else {
            Err(UnknownMode)
        }
    }
}
