// NetworkCounters over sysinfo::Networks

use super::NetworkCounters;
use std::time::Instant;
use sysinfo::Networks;

pub struct SysinfoCounters {
    networks: Networks,
    last_refresh: Option<Instant>,
}

impl Default for SysinfoCounters {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoCounters {
    pub fn new() -> Self {
        Self {
            networks: Networks::new_with_refreshed_list(),
            last_refresh: None,
        }
    }
}

impl NetworkCounters for SysinfoCounters {
    /// Sorted names; interfaces whose addresses are all loopback are left out.
    fn interface_names(&mut self) -> Vec<String> {
        let mut names: Vec<String> = self
            .networks
            .list()
            .iter()
            .filter(|(_, data)| {
                let nets = data.ip_networks();
                nets.is_empty() || !nets.iter().all(|n| n.addr.is_loopback())
            })
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    fn next_rates(&mut self, interface: &str) -> Option<(f64, f64)> {
        self.networks.refresh(true);
        let now = Instant::now();
        let elapsed = self
            .last_refresh
            .replace(now)
            .map(|prev| now.duration_since(prev).as_secs_f64())
            .filter(|secs| *secs > 0.0)
            .unwrap_or(1.0);

        let data = self.networks.list().get(interface)?;
        Some((
            data.received() as f64 / elapsed,
            data.transmitted() as f64 / elapsed,
        ))
    }
}
