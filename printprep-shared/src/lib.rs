//! Shared types for printprep.
//!
//! This crate contains the data structures exchanged between the printprep
//! model layer and the GUI. The model layer owns all mutable state (the
//! profile catalog, the active profile reference, per-setting overrides,
//! printer devices); the GUI only observes it and requests changes through
//! model operations.
//!
//! # Key components
//!
//! * [`QualityProfile`] - a named set of print settings, built-in or user-defined
//! * [`ProfileCatalog`] - the ordered, revisioned profile list the GUI renders
//! * [`ModelEvent`] - change notifications crossing the model/GUI boundary
//! * [`ConnectionState`] / [`PrinterTelemetry`] - printer output device state
//!
//! # Ownership boundary
//!
//! ```text
//! GUI (printprep-gui)                Model (printprep-model)
//!    │ ── activate_profile(id) ────► │
//!    │ ── add/update/reset/... ────► │
//!    │                              │
//!    │ ◄─── ModelEvent::ProfilesChanged ── │
//!    │ ◄─── ModelEvent::ActiveProfileChanged │
//!    │ ◄─── ModelEvent::CustomizedChanged ── │
//! ```

pub mod errors;
pub mod events;
pub mod printer;
pub mod profile_json;
pub mod profiles;

pub use errors::{DeviceError, ProfileError, ProfileResult, StorageError, StorageResult};
pub use events::{DeviceEvent, ModelEvent};
pub use printer::{ConnectionState, PrinterTelemetry};
pub use profiles::{AdhesionType, BuiltinQuality, ProfileCatalog, QualityProfile, QualitySettings};
