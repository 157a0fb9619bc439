// HardwareMonitor over sysinfo: hwmon components grouped into devices, CPU clocks per core

use super::{HardwareMonitor, MonitorError, linux};
use crate::models::{DeviceInfo, HardwareKind, SensorReading};
use sysinfo::{Components, CpuRefreshKind, RefreshKind, System};
use tracing::{debug, info};

pub struct SysinfoMonitor {
    system: System,
    components: Components,
    devices: Vec<DeviceInfo>,
    /// Component indices per device, parallel to `devices`.
    members: Vec<Vec<usize>>,
}

impl SysinfoMonitor {
    /// Enumerates sensors once. The device list does not change afterwards.
    pub fn open() -> Result<Self, MonitorError> {
        let mut system = System::new_with_specifics(
            RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing().with_frequency()),
        );
        system.refresh_cpu_frequency();
        if system.cpus().is_empty() {
            return Err(MonitorError::NoSensors);
        }

        let components = Components::new_with_refreshed_list();
        let labels: Vec<String> = components
            .list()
            .iter()
            .map(|c| c.label().to_string())
            .collect();

        let cpu_name = linux::read_cpu_model()
            .or_else(|| {
                system
                    .cpus()
                    .first()
                    .map(|c| c.brand().trim().to_string())
                    .filter(|s| !s.is_empty())
            })
            .unwrap_or_else(|| "CPU".into());

        let nvme_models = linux::read_nvme_models();
        let mut devices = vec![DeviceInfo::new(HardwareKind::Cpu, cpu_name)];
        let mut members = vec![Vec::new()];
        for group in group_components(&labels) {
            if group.kind == HardwareKind::Cpu {
                members[0].extend(group.members);
                continue;
            }
            devices.push(DeviceInfo::new(group.kind, device_name(&group, &nvme_models)));
            members.push(group.members);
        }

        for (device, m) in devices.iter().zip(&members) {
            debug!(kind = %device.kind, name = %device.name, sensors = m.len(), "device enumerated");
        }
        info!(
            devices = devices.len(),
            components = labels.len(),
            cpus = system.cpus().len(),
            "hardware monitor opened"
        );

        Ok(Self {
            system,
            components,
            devices,
            members,
        })
    }
}

impl HardwareMonitor for SysinfoMonitor {
    fn devices(&self) -> &[DeviceInfo] {
        &self.devices
    }

    fn update(&mut self, index: usize) {
        let Some(members) = self.members.get(index) else {
            return;
        };
        if self.devices[index].kind == HardwareKind::Cpu {
            self.system.refresh_cpu_frequency();
        }
        let list = self.components.list_mut();
        for &c in members {
            if let Some(component) = list.get_mut(c) {
                component.refresh();
            }
        }
    }

    fn sensors(&self, index: usize) -> Vec<SensorReading> {
        let Some(members) = self.members.get(index) else {
            return Vec::new();
        };
        let list = self.components.list();
        let mut readings: Vec<SensorReading> = members
            .iter()
            .filter_map(|&c| list.get(c))
            .map(|c| {
                SensorReading::temperature(c.label(), c.temperature().filter(|t| t.is_finite()))
            })
            .collect();

        if self.devices[index].kind == HardwareKind::Cpu {
            readings.extend(self.system.cpus().iter().enumerate().map(|(i, cpu)| {
                let mhz = cpu.frequency();
                SensorReading::clock(format!("Core #{}", i + 1), (mhz > 0).then_some(mhz as f32))
            }));
        }
        readings
    }
}

/// Maps a hwmon component label (`"<chip> <sensor>"`, e.g. `"k10temp Tctl"`) to a device kind.
pub fn classify_label(label: &str) -> HardwareKind {
    let lower = label.to_lowercase();
    let (chip, _) = split_label(&lower);
    match chip {
        "nvme" | "drivetemp" => HardwareKind::Storage,
        "amdgpu" | "radeon" => HardwareKind::GpuAmd,
        "nvidia" | "nouveau" => HardwareKind::GpuNvidia,
        "i915" | "xe" => HardwareKind::GpuIntel,
        "coretemp" | "k10temp" | "zenpower" | "cpu_thermal" => HardwareKind::Cpu,
        _ if ["package id", "tctl", "tdie", "cpu"]
            .iter()
            .any(|p| lower.contains(p)) =>
        {
            HardwareKind::Cpu
        }
        _ => HardwareKind::Motherboard,
    }
}

fn split_label(label: &str) -> (&str, &str) {
    let label = label.trim();
    match label.split_once(char::is_whitespace) {
        Some((chip, sensor)) => (chip, sensor.trim()),
        None => (label, ""),
    }
}

#[derive(Debug, PartialEq)]
struct ComponentGroup {
    kind: HardwareKind,
    chip: String,
    /// Position among earlier groups of the same kind and chip.
    ordinal: usize,
    members: Vec<usize>,
}

/// `nvme_models` is indexed by NVMe group ordinal.
fn device_name(group: &ComponentGroup, nvme_models: &[Option<String>]) -> String {
    match group.kind {
        HardwareKind::Storage if group.chip == "nvme" => nvme_models
            .get(group.ordinal)
            .cloned()
            .flatten()
            .unwrap_or_else(|| format!("nvme #{}", group.ordinal + 1)),
        HardwareKind::Storage => format!("{} #{}", group.chip, group.ordinal + 1),
        HardwareKind::Motherboard => "Motherboard".into(),
        _ => group.chip.clone(),
    }
}

/// Groups component indices into devices, in first-appearance order.
///
/// CPU, GPU and motherboard sensors collapse into one device per kind. A storage device is a
/// run of adjacent components from the same chip; a repeated sensor name starts the next drive.
fn group_components(labels: &[String]) -> Vec<ComponentGroup> {
    let mut groups: Vec<ComponentGroup> = Vec::new();
    let mut open_storage: Option<(usize, Vec<String>)> = None;

    for (index, label) in labels.iter().enumerate() {
        let kind = classify_label(label);
        let (chip, sensor) = split_label(label);
        let chip = chip.to_lowercase();

        if kind == HardwareKind::Storage {
            let continues = matches!(
                &open_storage,
                Some((g, seen)) if groups[*g].chip == chip && !seen.iter().any(|s| s == sensor)
            );
            if continues {
                if let Some((g, seen)) = open_storage.as_mut() {
                    groups[*g].members.push(index);
                    seen.push(sensor.to_string());
                }
            } else {
                let ordinal = groups
                    .iter()
                    .filter(|g| g.kind == kind && g.chip == chip)
                    .count();
                groups.push(ComponentGroup {
                    kind,
                    chip,
                    ordinal,
                    members: vec![index],
                });
                open_storage = Some((groups.len() - 1, vec![sensor.to_string()]));
            }
            continue;
        }

        open_storage = None;
        match groups.iter_mut().find(|g| g.kind == kind) {
            Some(group) => group.members.push(index),
            None => groups.push(ComponentGroup {
                kind,
                chip,
                ordinal: 0,
                members: vec![index],
            }),
        }
    }
    groups
}
