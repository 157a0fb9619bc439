// Domain models: devices, readings, network samples, display lines

mod display;
mod network;
mod sensor;

pub use display::{DisplayLine, LineStyle, PanelRect, Rgb};
pub use network::{BYTES_PER_MEGABYTE, NetworkSample};
pub use sensor::{DeviceInfo, DeviceSnapshot, HardwareKind, SensorKind, SensorReading};
