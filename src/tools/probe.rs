// ABOUTME: Probes PATH for required and optional tools and reports what was found
// Results are a snapshot of one pass; nothing here caches between passes

use crate::config::{AppConfig, RequiredTool};
use crate::host::Host;
use crate::session::StatusSink;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolAvailability {
    pub found: Vec<String>,
    pub missing: Vec<RequiredTool>,
    pub protonvpn: bool,
    pub anonsurf: bool,
}

impl ToolAvailability {
    pub fn all_required_present(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn missing_packages(&self) -> Vec<String> {
        let mut packages: Vec<String> = Vec::new();
        for tool in &self.missing {
            if !packages.contains(&tool.package) {
                packages.push(tool.package.clone());
            }
        }
        packages
    }

    pub fn has(&self, binary: &str) -> bool {
        self.found.iter().any(|b| b == binary)
    }

    /// Log one line per tool, in the order tools were probed.
    pub fn report(&self, config: &AppConfig, sink: &StatusSink) {
        for tool in &config.required_tools {
            if self.has(&tool.binary) {
                sink.info(format!("[OK] {} found", tool.binary));
            } else {
                sink.info(format!("[Missing] {}", tool.binary));
            }
        }

        if !self.protonvpn {
            sink.info(format!(
                "[Info] {} not found (ProtonVPN features disabled until installed).",
                config.protonvpn.binary
            ));
        } else {
            sink.info(format!("[OK] {} found", config.protonvpn.binary));
        }

        if self.anonsurf {
            sink.info(format!("[OK] {} found", config.anonsurf.binary));
        } else {
            sink.info(format!(
                "[Info] {} not found (AnonSurf features disabled until installed).",
                config.anonsurf.binary
            ));
        }
    }
}

/// AnonSurf counts as present when it is on PATH or at one of the installer's known locations.
pub fn anonsurf_present(host: &dyn Host, config: &AppConfig) -> bool {
    host.is_installed(&config.anonsurf.binary)
        || config
            .anonsurf
            .fallback_paths
            .iter()
            .any(|path| host.path_exists(path))
}

pub fn probe(host: &dyn Host, config: &AppConfig) -> ToolAvailability {
    let mut availability = ToolAvailability::default();

    for tool in &config.required_tools {
        if host.is_installed(&tool.binary) {
            availability.found.push(tool.binary.clone());
        } else {
            availability.missing.push(tool.clone());
        }
    }

    availability.protonvpn = host.is_installed(&config.protonvpn.binary);
    availability.anonsurf = anonsurf_present(host, config);
    availability
}
