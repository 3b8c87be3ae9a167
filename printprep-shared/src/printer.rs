//! Printer output device state.
//!
//! A printer output device is assumed to be an FDM printer. The telemetry
//! setters return whether the value actually changed so callers only emit
//! change notifications for real transitions.

use serde::{Deserialize, Serialize};

/// Connection lifecycle of a printer output device
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    #[default]
    Closed,
    Connecting,
    Connected,
    /// Connected and currently printing or sending data
    Busy,
    Error,
}

impl ConnectionState {
    /// Whether the device is reachable (connected or busy)
    pub fn is_online(&self) -> bool {
        matches!(self, ConnectionState::Connected | ConnectionState::Busy)
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ConnectionState::Closed => "closed",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::Busy => "busy",
            ConnectionState::Error => "error",
        };
        write!(f, "{}", label)
    }
}

/// Live readings reported by a printer.
///
/// Head movement is modelled as head movement even on machines where the bed
/// moves instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrinterTelemetry {
    /// Current bed temperature in degrees Celsius
    pub bed_temperature: f32,
    /// Target bed temperature in degrees Celsius
    pub target_bed_temperature: f32,
    /// Current hotend temperatures, one entry per extruder
    pub hotend_temperatures: Vec<f32>,
    /// Target hotend temperatures, one entry per extruder
    pub target_hotend_temperatures: Vec<f32>,
    /// Head position in millimeters
    pub head_x: f32,
    pub head_y: f32,
    pub head_z: f32,
    /// Progress of the active job (0.0-100.0); `None` when no job is running
    pub progress: Option<f32>,
}

impl PrinterTelemetry {
    /// Create telemetry for a printer with the given number of extruders
    pub fn new(num_extruders: usize) -> Self {
        Self {
            bed_temperature: 0.0,
            target_bed_temperature: 0.0,
            hotend_temperatures: vec![0.0; num_extruders],
            target_hotend_temperatures: vec![0.0; num_extruders],
            head_x: 0.0,
            head_y: 0.0,
            head_z: 0.0,
            progress: None,
        }
    }

    /// Number of extruders this telemetry tracks
    pub fn num_extruders(&self) -> usize {
        self.hotend_temperatures.len()
    }

    /// Update the bed temperature. Returns true if the value changed.
    pub fn set_bed_temperature(&mut self, temperature: f32) -> bool {
        if self.bed_temperature == temperature {
            return false;
        }
        self.bed_temperature = temperature;
        true
    }

    /// Update the target bed temperature. Returns true if the value changed.
    pub fn set_target_bed_temperature(&mut self, temperature: f32) -> bool {
        if self.target_bed_temperature == temperature {
            return false;
        }
        self.target_bed_temperature = temperature;
        true
    }

    /// Update a hotend temperature. Returns true if the value changed;
    /// out-of-range extruder indices are ignored.
    pub fn set_hotend_temperature(&mut self, index: usize, temperature: f32) -> bool {
        match self.hotend_temperatures.get_mut(index) {
            Some(current) if *current != temperature => {
                *current = temperature;
                true
            }
            _ => false,
        }
    }

    /// Update a target hotend temperature. Returns true if the value changed;
    /// out-of-range extruder indices are ignored.
    pub fn set_target_hotend_temperature(&mut self, index: usize, temperature: f32) -> bool {
        match self.target_hotend_temperatures.get_mut(index) {
            Some(current) if *current != temperature => {
                *current = temperature;
                true
            }
            _ => false,
        }
    }

    /// Update the saved head position. Returns true if any axis changed.
    pub fn set_head_position(&mut self, x: f32, y: f32, z: f32) -> bool {
        let mut changed = false;
        if self.head_x != x {
            self.head_x = x;
            changed = true;
        }
        if self.head_y != y {
            self.head_y = y;
            changed = true;
        }
        if self.head_z != z {
            self.head_z = z;
            changed = true;
        }
        changed
    }

    /// Update the job progress. Returns true if the value changed.
    pub fn set_progress(&mut self, progress: Option<f32>) -> bool {
        if self.progress == progress {
            return false;
        }
        self.progress = progress;
        true
    }
}
