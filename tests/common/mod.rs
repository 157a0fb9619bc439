// Shared test fakes for the hardware, network, window and rendering collaborators

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use temps_overlay::click_through::{ClickThroughError, WindowHandle, WindowStyleApi};
use temps_overlay::models::*;
use temps_overlay::net_repo::NetworkCounters;
use temps_overlay::renderer::OverlayRenderer;
use temps_overlay::sensor_repo::HardwareMonitor;

pub fn device(kind: HardwareKind, name: &str, readings: Vec<SensorReading>) -> DeviceSnapshot {
    DeviceSnapshot {
        info: DeviceInfo::new(kind, name),
        readings,
    }
}

pub fn temp(value: f32) -> SensorReading {
    SensorReading::temperature("Temp", Some(value))
}

pub fn core_clock(n: usize, mhz: f32) -> SensorReading {
    SensorReading::clock(format!("CPU Core #{}", n), Some(mhz))
}

/// Monitor whose readings are only visible after `update()` for that device.
pub struct FakeMonitor {
    devices: Vec<DeviceInfo>,
    live: Vec<Vec<SensorReading>>,
    cached: Vec<Vec<SensorReading>>,
    pub updates: Arc<Mutex<Vec<usize>>>,
}

impl FakeMonitor {
    pub fn new(snapshots: Vec<DeviceSnapshot>) -> Self {
        let devices = snapshots.iter().map(|d| d.info.clone()).collect();
        let live: Vec<Vec<SensorReading>> = snapshots.into_iter().map(|d| d.readings).collect();
        let cached = live.iter().map(|_| Vec::new()).collect();
        Self {
            devices,
            live,
            cached,
            updates: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl HardwareMonitor for FakeMonitor {
    fn devices(&self) -> &[DeviceInfo] {
        &self.devices
    }

    fn update(&mut self, index: usize) {
        self.updates.lock().unwrap().push(index);
        self.cached[index] = self.live[index].clone();
    }

    fn sensors(&self, index: usize) -> Vec<SensorReading> {
        self.cached[index].clone()
    }
}

/// Counters replaying scripted (received, sent) rates for every listed interface.
pub struct FakeCounters {
    names: Vec<String>,
    rates: VecDeque<Option<(f64, f64)>>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl FakeCounters {
    pub fn new(names: &[&str], rates: Vec<Option<(f64, f64)>>) -> Self {
        Self {
            names: names.iter().map(|s| s.to_string()).collect(),
            rates: rates.into(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl NetworkCounters for FakeCounters {
    fn interface_names(&mut self) -> Vec<String> {
        self.names.clone()
    }

    fn next_rates(&mut self, interface: &str) -> Option<(f64, f64)> {
        self.calls.lock().unwrap().push(interface.to_string());
        self.rates.pop_front().unwrap_or(Some((0.0, 0.0)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelOp {
    Clear,
    Append(String),
    Present,
    Opacity(f32),
    Finish,
}

/// Renderer that records every call.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    pub ops: Arc<Mutex<Vec<PanelOp>>>,
}

impl RecordingRenderer {
    pub fn ops(&self) -> Vec<PanelOp> {
        self.ops.lock().unwrap().clone()
    }

    /// Lines of each rendered frame, in order.
    pub fn frames(&self) -> Vec<Vec<String>> {
        let mut frames = Vec::new();
        let mut current: Option<Vec<String>> = None;
        for op in self.ops() {
            match op {
                PanelOp::Clear => current = Some(Vec::new()),
                PanelOp::Append(line) => {
                    if let Some(frame) = current.as_mut() {
                        frame.push(line);
                    }
                }
                PanelOp::Present => {
                    if let Some(frame) = current.take() {
                        frames.push(frame);
                    }
                }
                _ => {}
            }
        }
        frames
    }
}

impl OverlayRenderer for RecordingRenderer {
    fn clear(&mut self) {
        self.ops.lock().unwrap().push(PanelOp::Clear);
    }

    fn append(&mut self, line: &DisplayLine, _style: &LineStyle) {
        self.ops
            .lock()
            .unwrap()
            .push(PanelOp::Append(line.as_str().to_string()));
    }

    fn present(&mut self) {
        self.ops.lock().unwrap().push(PanelOp::Present);
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.ops.lock().unwrap().push(PanelOp::Opacity(opacity));
    }

    fn finish(&mut self) {
        self.ops.lock().unwrap().push(PanelOp::Finish);
    }
}

/// In-memory extended style field; optionally failing reads or writes.
#[derive(Clone, Default)]
pub struct FakeWindowStyle {
    pub bits: Arc<Mutex<u32>>,
    pub writes: Arc<Mutex<u32>>,
    pub alpha: Arc<Mutex<Option<u8>>>,
    pub fail_get: bool,
    pub fail_set: bool,
    pub fail_alpha: bool,
}

impl FakeWindowStyle {
    pub fn with_bits(bits: u32) -> Self {
        Self {
            bits: Arc::new(Mutex::new(bits)),
            ..Default::default()
        }
    }

    pub fn bits(&self) -> u32 {
        *self.bits.lock().unwrap()
    }

    pub fn writes(&self) -> u32 {
        *self.writes.lock().unwrap()
    }

    pub fn alpha(&self) -> Option<u8> {
        *self.alpha.lock().unwrap()
    }
}

impl WindowStyleApi for FakeWindowStyle {
    fn get_extended_style(&self, _window: WindowHandle) -> Result<u32, ClickThroughError> {
        if self.fail_get {
            return Err(ClickThroughError::GetStyle(1400));
        }
        Ok(self.bits())
    }

    fn set_extended_style(&self, _window: WindowHandle, bits: u32) -> Result<(), ClickThroughError> {
        if self.fail_set {
            return Err(ClickThroughError::SetStyle(5));
        }
        *self.bits.lock().unwrap() = bits;
        *self.writes.lock().unwrap() += 1;
        Ok(())
    }

    fn set_layered_alpha(&self, _window: WindowHandle, alpha: u8) -> Result<(), ClickThroughError> {
        if self.fail_alpha {
            return Err(ClickThroughError::SetAlpha(87));
        }
        *self.alpha.lock().unwrap() = Some(alpha);
        Ok(())
    }
}
