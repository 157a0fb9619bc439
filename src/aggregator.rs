// Per-tick reduction of device snapshots + network sample into ordered display lines

use crate::models::{DeviceSnapshot, DisplayLine, HardwareKind, NetworkSample, SensorKind};
use crate::net_repo::NetworkRateSource;
use crate::sensor_repo::SensorSource;
use serde::Deserialize;
use tracing::debug;

/// Shown in place of a temperature the device did not report.
pub const PLACEHOLDER: &str = "--";

/// What a CPU or storage line does when its device has no temperature this tick.
/// GPU lines are always omitted in that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingReading {
    #[default]
    Placeholder,
    Omit,
}

pub struct TelemetryAggregator {
    sensors: SensorSource,
    network: Option<NetworkRateSource>,
    missing: MissingReading,
}

impl TelemetryAggregator {
    pub fn new(
        sensors: SensorSource,
        network: Option<NetworkRateSource>,
        missing: MissingReading,
    ) -> Self {
        Self {
            sensors,
            network,
            missing,
        }
    }

    pub fn has_network(&self) -> bool {
        self.network.is_some()
    }

    /// Reads every device, samples the network, and builds this tick's lines.
    pub fn refresh(&mut self) -> Vec<DisplayLine> {
        let devices = self.sensors.snapshot();
        let network = self.network.as_mut().map(NetworkRateSource::sample);
        let lines = reduce(&devices, network, self.missing);
        debug!(
            devices = devices.len(),
            lines = lines.len(),
            "telemetry refreshed"
        );
        lines
    }
}

/// Builds the lines for one tick: device contributions in enumeration order, network last.
pub fn reduce(
    devices: &[DeviceSnapshot],
    network: Option<NetworkSample>,
    missing: MissingReading,
) -> Vec<DisplayLine> {
    let mut lines = Vec::new();
    for device in devices {
        match device.info.kind {
            HardwareKind::Cpu => push_cpu(&mut lines, device, missing),
            HardwareKind::GpuAmd | HardwareKind::GpuNvidia => {
                if let Some(t) = device.first_value(SensorKind::Temperature) {
                    lines.push(temperature_line(&device.info.kind.to_string(), Some(t)));
                }
            }
            HardwareKind::Storage => {
                let t = device.first_value(SensorKind::Temperature);
                if t.is_some() || missing == MissingReading::Placeholder {
                    lines.push(temperature_line(&device.info.name, t));
                }
            }
            _ => {}
        }
    }
    if let Some(sample) = network {
        lines.push(network_line(sample));
    }
    lines
}

fn push_cpu(lines: &mut Vec<DisplayLine>, device: &DeviceSnapshot, missing: MissingReading) {
    let t = device.first_value(SensorKind::Temperature);
    if t.is_some() || missing == MissingReading::Placeholder {
        lines.push(temperature_line("CPU Temp", t));
    }
    if let Some(mhz) = mean_core_clock(device) {
        lines.push(DisplayLine::new(format!("CPU Clock: {} MHz", mhz)));
    }
}

/// Mean of per-core clock readings, rounded to whole MHz. `None` when no core clock has a value.
pub fn mean_core_clock(device: &DeviceSnapshot) -> Option<i64> {
    let clocks: Vec<f64> = device
        .readings
        .iter()
        .filter(|r| r.kind == SensorKind::Clock && r.name.to_lowercase().contains("core"))
        .filter_map(|r| r.value)
        .map(f64::from)
        .collect();
    if clocks.is_empty() {
        return None;
    }
    let mean = clocks.iter().sum::<f64>() / clocks.len() as f64;
    Some(mean.round() as i64)
}

fn temperature_line(label: &str, value: Option<f32>) -> DisplayLine {
    match value {
        Some(t) => DisplayLine::new(format!("{}: {} °C", label, f64::from(t).round() as i64)),
        None => DisplayLine::new(format!("{}: {} °C", label, PLACEHOLDER)),
    }
}

fn network_line(sample: NetworkSample) -> DisplayLine {
    DisplayLine::new(format!(
        "NET ↓ {:.2} MB/s ↑ {:.2} MB/s",
        round_hundredths(sample.down_mb_per_sec),
        round_hundredths(sample.up_mb_per_sec)
    ))
}

/// Two decimals, ties away from zero (`{:.2}` alone rounds ties to even).
fn round_hundredths(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
