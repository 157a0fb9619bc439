// Reduction rules: per-device-type lines, ordering, placeholders, network line

mod common;

use common::*;
use temps_overlay::aggregator::{MissingReading, PLACEHOLDER, TelemetryAggregator, reduce};
use temps_overlay::config::NetworkConfig;
use temps_overlay::models::*;
use temps_overlay::net_repo::NetworkRateSource;
use temps_overlay::sensor_repo::SensorSource;

fn texts(lines: &[DisplayLine]) -> Vec<String> {
    lines.iter().map(|l| l.as_str().to_string()).collect()
}

#[test]
fn cpu_temperature_and_mean_clock() {
    let cpu = device(
        HardwareKind::Cpu,
        "Ryzen",
        vec![
            temp(54.7),
            core_clock(1, 3800.0),
            core_clock(2, 4100.0),
            core_clock(3, 3950.0),
        ],
    );
    let lines = reduce(&[cpu], None, MissingReading::Placeholder);
    assert_eq!(texts(&lines), vec!["CPU Temp: 55 °C", "CPU Clock: 3950 MHz"]);
}

#[test]
fn cpu_without_temperature_keeps_clock_and_placeholder() {
    let cpu = device(HardwareKind::Cpu, "Ryzen", vec![core_clock(1, 4000.0)]);
    let lines = reduce(&[cpu], None, MissingReading::Placeholder);
    assert_eq!(
        texts(&lines),
        vec![
            format!("CPU Temp: {} °C", PLACEHOLDER),
            "CPU Clock: 4000 MHz".to_string()
        ]
    );
}

#[test]
fn cpu_without_temperature_omitted_under_omit_policy() {
    let cpu = device(HardwareKind::Cpu, "Ryzen", vec![core_clock(1, 4000.0)]);
    let lines = reduce(&[cpu], None, MissingReading::Omit);
    assert_eq!(texts(&lines), vec!["CPU Clock: 4000 MHz"]);
}

#[test]
fn cpu_uses_first_temperature_with_a_value() {
    let cpu = device(
        HardwareKind::Cpu,
        "Ryzen",
        vec![
            SensorReading::temperature("Tctl", None),
            SensorReading::temperature("Tdie", Some(61.2)),
            SensorReading::temperature("Tccd1", Some(70.0)),
        ],
    );
    let lines = reduce(&[cpu], None, MissingReading::Placeholder);
    assert_eq!(texts(&lines), vec!["CPU Temp: 61 °C"]);
}

#[test]
fn cpu_clock_ignores_non_core_and_empty_clocks() {
    let cpu = device(
        HardwareKind::Cpu,
        "Ryzen",
        vec![
            temp(40.0),
            SensorReading::clock("Bus Speed", Some(100.0)),
            SensorReading::clock("Core #1", None),
            SensorReading::clock("core #2", Some(3001.0)),
            SensorReading::clock("CORE #3", Some(3002.0)),
        ],
    );
    let lines = reduce(&[cpu], None, MissingReading::Placeholder);
    assert_eq!(texts(&lines), vec!["CPU Temp: 40 °C", "CPU Clock: 3002 MHz"]);
}

#[test]
fn gpu_lines_use_kind_name_and_are_omitted_without_temperature() {
    let amd = device(HardwareKind::GpuAmd, "amdgpu", vec![temp(48.4)]);
    let nvidia = device(HardwareKind::GpuNvidia, "nvidia", vec![]);
    let lines = reduce(&[amd, nvidia], None, MissingReading::Placeholder);
    assert_eq!(texts(&lines), vec!["GpuAmd: 48 °C"]);
}

#[test]
fn storage_uses_device_name_and_placeholder() {
    let a = device(HardwareKind::Storage, "Samsung SSD 980", vec![temp(38.5)]);
    let b = device(HardwareKind::Storage, "WDC WD40", vec![]);
    let lines = reduce(&[a, b], None, MissingReading::Placeholder);
    assert_eq!(
        texts(&lines),
        vec![
            "Samsung SSD 980: 39 °C".to_string(),
            format!("WDC WD40: {} °C", PLACEHOLDER)
        ]
    );
}

#[test]
fn storage_without_temperature_omitted_under_omit_policy() {
    let a = device(HardwareKind::Storage, "Samsung SSD 980", vec![temp(38.0)]);
    let b = device(HardwareKind::Storage, "WDC WD40", vec![]);
    let lines = reduce(&[a, b], None, MissingReading::Omit);
    assert_eq!(texts(&lines), vec!["Samsung SSD 980: 38 °C"]);
}

#[test]
fn unknown_device_kinds_contribute_nothing() {
    let board = device(HardwareKind::Motherboard, "Motherboard", vec![temp(30.0)]);
    let intel = device(HardwareKind::GpuIntel, "i915", vec![temp(50.0)]);
    assert!(reduce(&[board, intel], None, MissingReading::Placeholder).is_empty());
}

#[test]
fn network_line_formats_megabytes_with_two_decimals() {
    let sample = NetworkSample::from_bytes_per_sec(2_097_152.0, 524_288.0);
    let lines = reduce(&[], Some(sample), MissingReading::Placeholder);
    assert_eq!(texts(&lines), vec!["NET ↓ 2.00 MB/s ↑ 0.50 MB/s"]);
}

#[test]
fn network_line_rounds_ties_away_from_zero() {
    // 0.125 and 0.375 MB/s are exact in binary
    let sample = NetworkSample::from_bytes_per_sec(131_072.0, 393_216.0);
    let lines = reduce(&[], Some(sample), MissingReading::Placeholder);
    assert_eq!(texts(&lines), vec!["NET ↓ 0.13 MB/s ↑ 0.38 MB/s"]);
}

#[test]
fn lines_follow_enumeration_order_with_network_last() {
    let devices = vec![
        device(HardwareKind::Storage, "Disk A", vec![temp(35.0)]),
        device(HardwareKind::Cpu, "CPU", vec![temp(50.0), core_clock(1, 3000.0)]),
        device(HardwareKind::Motherboard, "Board", vec![temp(30.0)]),
        device(HardwareKind::GpuNvidia, "nvidia", vec![temp(60.0)]),
    ];
    let lines = reduce(&devices, Some(NetworkSample::default()), MissingReading::Placeholder);
    assert_eq!(
        texts(&lines),
        vec![
            "Disk A: 35 °C",
            "CPU Temp: 50 °C",
            "CPU Clock: 3000 MHz",
            "GpuNvidia: 60 °C",
            "NET ↓ 0.00 MB/s ↑ 0.00 MB/s",
        ]
    );
}

#[test]
fn line_count_is_bounded_by_known_devices_plus_network() {
    let devices = vec![
        device(HardwareKind::Cpu, "CPU", vec![temp(50.0)]),
        device(HardwareKind::GpuAmd, "amdgpu", vec![temp(60.0)]),
        device(HardwareKind::Storage, "Disk", vec![]),
        device(HardwareKind::Other, "x", vec![temp(1.0)]),
    ];
    let known = devices
        .iter()
        .filter(|d| {
            matches!(
                d.info.kind,
                HardwareKind::Cpu | HardwareKind::GpuAmd | HardwareKind::GpuNvidia | HardwareKind::Storage
            )
        })
        .count();
    let lines = reduce(&devices, Some(NetworkSample::default()), MissingReading::Placeholder);
    assert!(lines.len() <= known + 1);
}

#[test]
fn reduce_is_deterministic_for_the_same_snapshot() {
    let devices = vec![
        device(HardwareKind::Cpu, "CPU", vec![temp(50.5), core_clock(1, 3333.3)]),
        device(HardwareKind::Storage, "Disk", vec![temp(41.0)]),
    ];
    let sample = Some(NetworkSample::from_bytes_per_sec(1234.0, 5678.0));
    let first = reduce(&devices, sample, MissingReading::Placeholder);
    let second = reduce(&devices, sample, MissingReading::Placeholder);
    assert_eq!(first, second);
}

#[test]
fn refresh_reads_sources_and_appends_network() {
    let monitor = FakeMonitor::new(vec![device(HardwareKind::Cpu, "CPU", vec![temp(45.0)])]);
    let counters = FakeCounters::new(
        &["Ethernet"],
        vec![Some((0.0, 0.0)), Some((2_097_152.0, 524_288.0))],
    );
    let network = NetworkRateSource::init(Box::new(counters), &NetworkConfig::default());
    let mut aggregator = TelemetryAggregator::new(
        SensorSource::new(Box::new(monitor)),
        network,
        MissingReading::Placeholder,
    );
    assert!(aggregator.has_network());
    let lines = aggregator.refresh();
    assert_eq!(
        texts(&lines),
        vec!["CPU Temp: 45 °C", "NET ↓ 2.00 MB/s ↑ 0.50 MB/s"]
    );
}

#[test]
fn refresh_without_network_never_emits_network_line() {
    let monitor = FakeMonitor::new(vec![device(HardwareKind::Cpu, "CPU", vec![temp(45.0)])]);
    let mut aggregator = TelemetryAggregator::new(
        SensorSource::new(Box::new(monitor)),
        None,
        MissingReading::Placeholder,
    );
    for _ in 0..5 {
        let lines = aggregator.refresh();
        assert!(lines.iter().all(|l| !l.as_str().starts_with("NET")));
    }
}
