//! Printer output device discovery and tracking.
//!
//! The device manager polls a [`PortProbe`] for serial ports and keeps one
//! [`OutputDevice`] per detected printer. Probes are injected so the GUI and
//! the tests can drive the manager without real hardware.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

use printprep_shared::errors::DeviceError;
use printprep_shared::events::DeviceEvent;
use printprep_shared::printer::{ConnectionState, PrinterTelemetry};

/// How often the port probe is polled for attached printers
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Source of candidate printer ports
pub trait PortProbe {
    /// Return the currently visible port names, sorted
    fn scan(&self) -> Vec<String>;
}

/// Probe scanning a device directory for USB serial ports
/// (`ttyUSB*`/`ttyACM*`).
#[derive(Debug, Clone)]
pub struct SerialPortProbe {
    dev_dir: PathBuf,
}

impl Default for SerialPortProbe {
    fn default() -> Self {
        Self::new(PathBuf::from("/dev"))
    }
}

impl SerialPortProbe {
    pub fn new(dev_dir: PathBuf) -> Self {
        Self { dev_dir }
    }
}

impl PortProbe for SerialPortProbe {
    fn scan(&self) -> Vec<String> {
        let entries = match std::fs::read_dir(&self.dev_dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("failed to scan {:?} for printers: {}", self.dev_dir, e);
                return Vec::new();
            }
        };

        let mut ports: Vec<String> = entries
            .flatten()
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.starts_with("ttyUSB") || name.starts_with("ttyACM"))
            .collect();
        ports.sort();
        ports
    }
}

/// A tracked printer output device.
///
/// The manager only tracks presence and state; actually opening the port and
/// talking to the firmware is the job of a device driver outside this crate.
#[derive(Debug, Clone)]
pub struct OutputDevice {
    port: String,
    connection_state: ConnectionState,
    telemetry: PrinterTelemetry,
}

impl OutputDevice {
    /// A freshly detected device starts out connecting
    pub fn new(port: &str) -> Self {
        Self {
            port: port.to_string(),
            connection_state: ConnectionState::Connecting,
            telemetry: PrinterTelemetry::new(1),
        }
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.connection_state
    }

    pub fn telemetry(&self) -> &PrinterTelemetry {
        &self.telemetry
    }

    pub fn telemetry_mut(&mut self) -> &mut PrinterTelemetry {
        &mut self.telemetry
    }
}

/// Keeps one [`OutputDevice`] per detected printer port.
#[derive(Debug, Clone, Default)]
pub struct OutputDeviceManager {
    devices: BTreeMap<String, OutputDevice>,
}

impl OutputDeviceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile tracked devices against a probe scan.
    ///
    /// Newly visible ports are tracked as connecting devices; vanished ports
    /// are dropped. Returns the resulting events in port order.
    pub fn poll(&mut self, probe: &dyn PortProbe) -> Vec<DeviceEvent> {
        let ports = probe.scan();
        let mut events = Vec::new();

        let vanished: Vec<String> = self
            .devices
            .keys()
            .filter(|port| !ports.contains(port))
            .cloned()
            .collect();
        for port in vanished {
            self.devices.remove(&port);
            info!("printer on {} detached", port);
            events.push(DeviceEvent::Detached { port });
        }

        for port in ports {
            if !self.devices.contains_key(&port) {
                info!("printer detected on {}", port);
                self.devices.insert(port.clone(), OutputDevice::new(&port));
                events.push(DeviceEvent::Attached { port });
            }
        }

        events
    }

    /// Advance a tracked device's connection state.
    ///
    /// Returns the change event, or `None` when the state did not change.
    pub fn set_connection_state(
        &mut self,
        port: &str,
        state: ConnectionState,
    ) -> Result<Option<DeviceEvent>, DeviceError> {
        let device = self
            .devices
            .get_mut(port)
            .ok_or_else(|| DeviceError::UnknownDevice {
                port: port.to_string(),
            })?;

        if device.connection_state == state {
            return Ok(None);
        }
        device.connection_state = state;
        Ok(Some(DeviceEvent::ConnectionStateChanged {
            port: port.to_string(),
            state,
        }))
    }

    /// Tracked devices in port order
    pub fn devices(&self) -> impl Iterator<Item = &OutputDevice> {
        self.devices.values()
    }

    /// A tracked device by port
    pub fn device(&self, port: &str) -> Option<&OutputDevice> {
        self.devices.get(port)
    }

    /// Mutable access to a tracked device's telemetry
    pub fn device_mut(&mut self, port: &str) -> Option<&mut OutputDevice> {
        self.devices.get_mut(port)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// How many tracked devices are reachable
    pub fn online_count(&self) -> usize {
        self.devices
            .values()
            .filter(|d| d.connection_state.is_online())
            .count()
    }

    /// Average job progress across devices that report one.
    ///
    /// `None` when no tracked device has an active job.
    pub fn overall_progress(&self) -> Option<f32> {
        let reporting: Vec<f32> = self
            .devices
            .values()
            .filter_map(|d| d.telemetry.progress)
            .collect();
        if reporting.is_empty() {
            return None;
        }
        Some(reporting.iter().sum::<f32>() / reporting.len() as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Probe returning a scripted port list
    struct StaticProbe {
        ports: RefCell<Vec<String>>,
    }

    impl StaticProbe {
        fn new(ports: &[&str]) -> Self {
            Self {
                ports: RefCell::new(ports.iter().map(|s| s.to_string()).collect()),
            }
        }

        fn set_ports(&self, ports: &[&str]) {
            *self.ports.borrow_mut() = ports.iter().map(|s| s.to_string()).collect();
        }
    }

    impl PortProbe for StaticProbe {
        fn scan(&self) -> Vec<String> {
            self.ports.borrow().clone()
        }
    }

    #[test]
    fn test_poll_tracks_attach_and_detach() {
        let probe = StaticProbe::new(&["ttyUSB0", "ttyUSB1"]);
        let mut manager = OutputDeviceManager::new();

        let events = manager.poll(&probe);
        assert_eq!(
            events,
            vec![
                DeviceEvent::Attached {
                    port: "ttyUSB0".to_string()
                },
                DeviceEvent::Attached {
                    port: "ttyUSB1".to_string()
                },
            ]
        );
        assert_eq!(manager.len(), 2);

        // A stable scan produces no events.
        assert!(manager.poll(&probe).is_empty());

        probe.set_ports(&["ttyUSB1"]);
        let events = manager.poll(&probe);
        assert_eq!(
            events,
            vec![DeviceEvent::Detached {
                port: "ttyUSB0".to_string()
            }]
        );
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_new_devices_start_connecting() {
        let probe = StaticProbe::new(&["ttyACM0"]);
        let mut manager = OutputDeviceManager::new();
        manager.poll(&probe);

        let device = manager.device("ttyACM0").unwrap();
        assert_eq!(device.connection_state(), ConnectionState::Connecting);
        assert_eq!(manager.online_count(), 0);
    }

    #[test]
    fn test_connection_state_change_events() {
        let probe = StaticProbe::new(&["ttyUSB0"]);
        let mut manager = OutputDeviceManager::new();
        manager.poll(&probe);

        let event = manager
            .set_connection_state("ttyUSB0", ConnectionState::Connected)
            .unwrap();
        assert_eq!(
            event,
            Some(DeviceEvent::ConnectionStateChanged {
                port: "ttyUSB0".to_string(),
                state: ConnectionState::Connected,
            })
        );
        assert_eq!(manager.online_count(), 1);

        // Re-setting the same state is not a change.
        let event = manager
            .set_connection_state("ttyUSB0", ConnectionState::Connected)
            .unwrap();
        assert!(event.is_none());
    }

    #[test]
    fn test_connection_state_unknown_port() {
        let mut manager = OutputDeviceManager::new();
        let err = manager
            .set_connection_state("ttyUSB9", ConnectionState::Connected)
            .unwrap_err();
        assert!(matches!(err, DeviceError::UnknownDevice { .. }));
    }

    #[test]
    fn test_overall_progress_averages_reporting_devices() {
        let probe = StaticProbe::new(&["ttyUSB0", "ttyUSB1", "ttyUSB2"]);
        let mut manager = OutputDeviceManager::new();
        manager.poll(&probe);

        assert_eq!(manager.overall_progress(), None);

        manager
            .device_mut("ttyUSB0")
            .unwrap()
            .telemetry_mut()
            .set_progress(Some(20.0));
        manager
            .device_mut("ttyUSB1")
            .unwrap()
            .telemetry_mut()
            .set_progress(Some(60.0));
        // ttyUSB2 reports no job and is left out of the average.

        assert_eq!(manager.overall_progress(), Some(40.0));
    }

    #[test]
    fn test_serial_probe_filters_and_sorts() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("ttyUSB1"), "").unwrap();
        std::fs::write(temp.path().join("ttyACM0"), "").unwrap();
        std::fs::write(temp.path().join("ttyUSB0"), "").unwrap();
        std::fs::write(temp.path().join("sda"), "").unwrap();

        let probe = SerialPortProbe::new(temp.path().to_path_buf());
        assert_eq!(probe.scan(), vec!["ttyACM0", "ttyUSB0", "ttyUSB1"]);
    }

    #[test]
    fn test_serial_probe_missing_dir_is_empty() {
        let probe = SerialPortProbe::new(PathBuf::from("/nonexistent/dev"));
        assert!(probe.scan().is_empty());
    }
}
