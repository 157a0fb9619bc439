// Network throughput for one selected interface, delta-based, primed at init

mod sysinfo_counters;

pub use sysinfo_counters::SysinfoCounters;

use crate::config::NetworkConfig;
use crate::models::NetworkSample;
use tracing::{info, instrument, warn};

/// OS per-interface byte counters.
pub trait NetworkCounters {
    /// Interface names in a stable order.
    fn interface_names(&mut self) -> Vec<String>;

    /// Bytes/sec (received, sent) since the previous call for `interface`.
    /// The first call for an interface has no prior interval and its value is meaningless.
    /// `None` when the interface is no longer reported.
    fn next_rates(&mut self, interface: &str) -> Option<(f64, f64)>;
}

pub struct NetworkRateSource {
    counters: Box<dyn NetworkCounters>,
    interface: String,
    warned_missing: bool,
}

impl NetworkRateSource {
    /// Selects the interface and takes the priming read. `None` means no eligible interface;
    /// callers keep it that way for the lifetime of the process.
    pub fn init(mut counters: Box<dyn NetworkCounters>, config: &NetworkConfig) -> Option<Self> {
        let names = counters.interface_names();
        let Some(interface) = select_interface(&names, config) else {
            info!(
                candidates = names.len(),
                "no eligible network interface; network line disabled"
            );
            return None;
        };

        let _ = counters.next_rates(&interface);
        info!(interface = %interface, "network interface selected");
        Some(Self {
            counters,
            interface,
            warned_missing: false,
        })
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    #[instrument(skip(self), fields(repo = "network", operation = "sample", interface = %self.interface))]
    pub fn sample(&mut self) -> NetworkSample {
        match self.counters.next_rates(&self.interface) {
            Some((received, sent)) => {
                self.warned_missing = false;
                NetworkSample::from_bytes_per_sec(received, sent)
            }
            None => {
                if !self.warned_missing {
                    warn!(
                        operation = "network_sample",
                        interface = %self.interface,
                        "interface no longer reported; showing zero throughput"
                    );
                    self.warned_missing = true;
                }
                NetworkSample::default()
            }
        }
    }
}

/// The configured interface if it is enumerated, else the first name matching no exclude
/// pattern (case-insensitive substring).
pub fn select_interface(names: &[String], config: &NetworkConfig) -> Option<String> {
    if let Some(pinned) = &config.interface {
        return names.iter().find(|n| *n == pinned).cloned();
    }
    let exclude: Vec<String> = config.exclude.iter().map(|p| p.to_lowercase()).collect();
    names
        .iter()
        .find(|name| {
            let lower = name.to_lowercase();
            !exclude.iter().any(|p| lower.contains(p.as_str()))
        })
        .cloned()
}
