//! Change notifications crossing the model/GUI boundary.
//!
//! The model layer never calls into the GUI. It emits these events through a
//! notifier channel; the GUI turns them into messages and re-renders from the
//! model's current state.

use crate::printer::ConnectionState;

/// Profile model change notifications
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    /// The profile list was rebuilt. Carries the revision after the rebuild
    /// so stale notifications can be recognized.
    ProfilesChanged { revision: u64 },
    /// A different profile became active
    ActiveProfileChanged { profile_id: String },
    /// The "has customized values" flag flipped
    CustomizedChanged { customized: bool },
}

/// Output device change notifications
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceEvent {
    /// A printer appeared on a port
    Attached { port: String },
    /// A printer disappeared from a port
    Detached { port: String },
    /// A tracked printer's connection state changed
    ConnectionStateChanged {
        port: String,
        state: ConnectionState,
    },
}
