//! Model layer for printprep.
//!
//! This crate owns the state the GUI observes: the quality profile catalog,
//! the active profile reference, per-setting overrides, and the printer
//! output devices. The GUI requests changes through [`ProfileStore`]
//! operations and learns about them through [`ModelEvent`] notifications;
//! it never mutates model state directly.
//!
//! * [`store`] - the profile store (catalog, active profile, overrides)
//! * [`storage`] - loading and saving user profile files
//! * [`devices`] - printer output device discovery and tracking

pub mod devices;
pub mod storage;
pub mod store;

pub use devices::{OutputDevice, OutputDeviceManager, PortProbe, SerialPortProbe, POLL_INTERVAL};
pub use storage::{ProfileLoadError, ProfileStorage};
pub use store::ProfileStore;

// Re-exported so GUI code only needs one model import for events.
pub use printprep_shared::events::{DeviceEvent, ModelEvent};
