// Network throughput sample

pub const BYTES_PER_MEGABYTE: f64 = 1_048_576.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NetworkSample {
    pub down_mb_per_sec: f64,
    pub up_mb_per_sec: f64,
}

impl NetworkSample {
    /// Converts raw counter rates (bytes/sec) into MB/s.
    pub fn from_bytes_per_sec(received: f64, sent: f64) -> Self {
        Self {
            down_mb_per_sec: received / BYTES_PER_MEGABYTE,
            up_mb_per_sec: sent / BYTES_PER_MEGABYTE,
        }
    }
}
