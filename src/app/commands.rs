//! Inbound commands to the application service.
//!
//! These represent configuration changes requested by the outside world
//! (control page, remote message) that the
//! [`AppService`](super::service::AppService) applies on the control task.

use core::fmt;

use serde::Deserialize;

use crate::control::Mode;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// New setpoint (% RH). Re-evaluates with the dwell windows overridden.
    SetHumidity(i32),

    /// New operating mode. Re-evaluates with the dwell windows overridden.
    SetMode(Mode),

    /// Set the enabled flag.
    Enable,

    /// Clear the enabled flag.
    Disable,
}

/// Commands carried by a single control-page request.
pub type RequestCommands = heapless::Vec<AppCommand, 2>;

/// Commands carried by a single remote message.
pub type RemoteCommands = heapless::Vec<AppCommand, 3>;

const SWITCH_QUERY: &str = "/?gpioSwitch=";
const SET_HUMIDITY_FIELD: &str = "set_humidity=";

/// Decode the commands in a raw control-page HTTP request.
///
/// - `GET /?gpioSwitch=on|off|auto` selects the mode;
/// - a `set_humidity=<digits>` form field anywhere in the request sets the
///   setpoint.
///
/// Anything else yields no command.
pub fn parse_http_request(request: &str) -> RequestCommands {
    let mut cmds = RequestCommands::new();

    if let Some(mode) = switch_mode(request) {
        let _ = cmds.push(AppCommand::SetMode(mode));
    }
    if let Some(value) = set_humidity_value(request) {
        let _ = cmds.push(AppCommand::SetHumidity(value));
    }
    cmds
}

/// The switch query must be the target of the request line.
fn switch_mode(request: &str) -> Option<Mode> {
    let line = request.lines().next()?;
    let target = line.split_whitespace().nth(1)?;
    let value = target.strip_prefix(SWITCH_QUERY)?;
    let value = value.split('&').next()?;
    value.parse().ok()
}

fn set_humidity_value(request: &str) -> Option<i32> {
    let start = request.find(SET_HUMIDITY_FIELD)? + SET_HUMIDITY_FIELD.len();
    let rest = &request[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

// ── Remote messages ───────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RemoteMessage {
    mode: Option<Mode>,
    humidity: Option<i32>,
    enabled: Option<bool>,
}

/// Remote message could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    Malformed,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed command message"),
        }
    }
}

/// Decode a JSON remote message such as
/// `{"mode":"auto","humidity":45,"enabled":true}`. Every field is optional.
///
/// The enabled flag is applied first, then the mode, then the setpoint.
pub fn parse_remote(payload: &[u8]) -> Result<RemoteCommands, CommandError> {
    let msg: RemoteMessage =
        serde_json::from_slice(payload).map_err(|_| CommandError::Malformed)?;

    let mut cmds = RemoteCommands::new();
    match msg.enabled {
        Some(true) => {
            let _ = cmds.push(AppCommand::Enable);
        }
        Some(false) => {
            let _ = cmds.push(AppCommand::Disable);
        }
        None => {}
    }
    if let Some(mode) = msg.mode {
        let _ = cmds.push(AppCommand::SetMode(mode));
    }
    if let Some(h) = msg.humidity {
        let _ = cmds.push(AppCommand::SetHumidity(h));
    }
    Ok(cmds)
}
