// Hardware sensor source: refresh-then-read over an ordered device list

mod linux;
mod sysinfo_monitor;

pub use sysinfo_monitor::{SysinfoMonitor, classify_label};

use crate::models::{DeviceInfo, DeviceSnapshot, SensorReading};
use thiserror::Error;
use tracing::instrument;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("no CPU reported by the hardware monitor")]
    NoSensors,
    #[error("hardware monitor unavailable: {0}")]
    Unavailable(String),
}

/// External hardware-enumeration capability. Construction is the `open()` step.
///
/// `devices()` must keep the same order for the lifetime of the monitor.
pub trait HardwareMonitor {
    fn devices(&self) -> &[DeviceInfo];

    /// Refreshes the sensor cache of one device. Reading without it yields stale values.
    fn update(&mut self, index: usize);

    fn sensors(&self, index: usize) -> Vec<SensorReading>;
}

pub struct SensorSource {
    monitor: Box<dyn HardwareMonitor>,
}

impl SensorSource {
    pub fn new(monitor: Box<dyn HardwareMonitor>) -> Self {
        Self { monitor }
    }

    /// Updates and reads every device in enumeration order.
    #[instrument(skip(self), fields(repo = "sensors", operation = "snapshot"))]
    pub fn snapshot(&mut self) -> Vec<DeviceSnapshot> {
        let count = self.monitor.devices().len();
        let mut out = Vec::with_capacity(count);
        for index in 0..count {
            self.monitor.update(index);
            let readings = self.monitor.sensors(index);
            out.push(DeviceSnapshot {
                info: self.monitor.devices()[index].clone(),
                readings,
            });
        }
        out
    }

    pub fn device_count(&self) -> usize {
        self.monitor.devices().len()
    }
}
