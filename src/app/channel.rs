//! Inter-task plumbing around the control task.
//!
//! The humidistat is confined to the control loop. Other contexts (the
//! control-page handler, the remote-message handler) never touch it:
//! they post [`AppCommand`]s into [`COMMAND_CHANNEL`] and read the last
//! published [`StatusSnapshot`] from [`STATUS`].
//!
//! The producers live in the transport adapters (control page, MQTT); the
//! binary here only runs the consuming side.
//!
//! ```text
//! ┌──────────────┐  AppCommand   ┌──────────────┐
//! │ Web / remote │──────────────▶│ Control loop │
//! │  handlers    │◀──────────────│ (owns state) │
//! └──────────────┘ StatusSnapshot└──────────────┘
//! ```

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use super::commands::AppCommand;
use super::service::StatusSnapshot;

/// Channel depth for inbound commands.
const CMD_DEPTH: usize = 8;

/// Inbound command channel: handlers → control loop.
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, AppCommand, CMD_DEPTH> =
    Channel::new();

/// Last status published by the control loop.
pub static STATUS: Mutex<CriticalSectionRawMutex, RefCell<Option<StatusSnapshot>>> =
    Mutex::new(RefCell::new(None));

/// Queue a command for the control loop. Returns `false` if the queue is
/// full and the command was dropped.
pub fn submit(cmd: AppCommand) -> bool {
    match COMMAND_CHANNEL.try_send(cmd) {
        Ok(()) => true,
        Err(_) => {
            log::warn!("Command queue full, dropping {:?}", cmd);
            false
        }
    }
}

/// Queue every command in `cmds`; returns how many were accepted.
pub fn submit_all(cmds: &[AppCommand]) -> usize {
    cmds.iter().filter(|&&c| submit(c)).count()
}

/// Take the next pending command, if any.
pub fn try_next() -> Option<AppCommand> {
    COMMAND_CHANNEL.try_receive().ok()
}

/// Replace the published status.
pub fn publish_status(snapshot: StatusSnapshot) {
    STATUS.lock(|cell| {
        *cell.borrow_mut() = Some(snapshot);
    });
}

/// Copy of the last published status, if the control loop has run.
pub fn latest_status() -> Option<StatusSnapshot> {
    STATUS.lock(|cell| cell.borrow().clone())
}
