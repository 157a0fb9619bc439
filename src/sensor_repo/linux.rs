// Linux-specific helpers: /proc and /sys lookups for device names.

/// Read first "model name" from /proc/cpuinfo (Linux). Preferred over sysinfo's brand, which may be empty.
pub(super) fn read_cpu_model() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/proc/cpuinfo").ok()?;
        for line in content.lines() {
            if line.starts_with("model name") {
                let name = line
                    .find(": ")
                    .map(|i| line[i + 2..].trim())
                    .filter(|s| !s.is_empty())?;
                return Some(name.to_string());
            }
        }
    }
    None
}

/// Model string per NVMe hwmon entry, in /sys/class/hwmon listing order (Linux).
///
/// Each entry is resolved through its `device` link to the owning `nvmeN` controller. sysinfo
/// walks the same listing, so entry n belongs to the n-th NVMe sensor group; this is best effort
/// and an entry is `None` when the link or model cannot be read.
pub(super) fn read_nvme_models() -> Vec<Option<String>> {
    #[cfg(target_os = "linux")]
    {
        let Ok(entries) = std::fs::read_dir("/sys/class/hwmon") else {
            return Vec::new();
        };
        entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|dir| {
                std::fs::read_to_string(dir.join("name")).is_ok_and(|n| n.trim() == "nvme")
            })
            .map(|dir| {
                let device = std::fs::canonicalize(dir.join("device")).ok()?;
                let controller = nvme_controller(&device).or_else(|| {
                    // older kernels link the PCI function; the controller sits below it
                    std::fs::read_dir(device.join("nvme"))
                        .ok()?
                        .filter_map(|e| e.ok())
                        .find_map(|e| nvme_controller(&e.path()))
                })?;
                let model =
                    std::fs::read_to_string(format!("/sys/class/nvme/{}/model", controller)).ok()?;
                let model = model.trim();
                (!model.is_empty()).then(|| model.to_string())
            })
            .collect()
    }
    #[cfg(not(target_os = "linux"))]
    {
        Vec::new()
    }
}

/// `nvmeN` when the last path component names an NVMe controller.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn nvme_controller(path: &std::path::Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let digits = name.strip_prefix("nvme")?;
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then(|| name.to_string())
}
