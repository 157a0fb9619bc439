// Device and sensor reading models

use std::fmt;

/// Device type tag as reported by the hardware monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HardwareKind {
    Cpu,
    GpuAmd,
    GpuNvidia,
    GpuIntel,
    Storage,
    Network,
    Motherboard,
    Other,
}

impl fmt::Display for HardwareKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HardwareKind::Cpu => "Cpu",
            HardwareKind::GpuAmd => "GpuAmd",
            HardwareKind::GpuNvidia => "GpuNvidia",
            HardwareKind::GpuIntel => "GpuIntel",
            HardwareKind::Storage => "Storage",
            HardwareKind::Network => "Network",
            HardwareKind::Motherboard => "Motherboard",
            HardwareKind::Other => "Other",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Temperature,
    Clock,
    Load,
    Fan,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub kind: SensorKind,
    pub name: String,
    /// `None` when the hardware reported no valid value this tick.
    pub value: Option<f32>,
}

impl SensorReading {
    pub fn new(kind: SensorKind, name: impl Into<String>, value: Option<f32>) -> Self {
        Self {
            kind,
            name: name.into(),
            value,
        }
    }

    pub fn temperature(name: impl Into<String>, value: Option<f32>) -> Self {
        Self::new(SensorKind::Temperature, name, value)
    }

    pub fn clock(name: impl Into<String>, value: Option<f32>) -> Self {
        Self::new(SensorKind::Clock, name, value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub kind: HardwareKind,
    pub name: String,
}

impl DeviceInfo {
    pub fn new(kind: HardwareKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

/// One device and the readings taken from it during a single tick.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSnapshot {
    pub info: DeviceInfo,
    pub readings: Vec<SensorReading>,
}

impl DeviceSnapshot {
    /// First reading of `kind` that carries a value, in scan order.
    pub fn first_value(&self, kind: SensorKind) -> Option<f32> {
        self.readings
            .iter()
            .filter(|r| r.kind == kind)
            .find_map(|r| r.value)
    }
}
