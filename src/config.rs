// ABOUTME: Application configuration loaded from TOML with defaults for every field
// Covers the network interface, Tor endpoint, proxychains paths and third-party tool locations

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// A tool that must be on PATH, and the apt package that provides it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredTool {
    pub binary: String,
    pub package: String,
}

impl RequiredTool {
    pub fn new(binary: &str, package: &str) -> Self {
        Self {
            binary: binary.to_string(),
            package: package.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorConfig {
    pub service: String,
    pub socks_host: String,
    pub socks_port: u16,
}

impl Default for TorConfig {
    fn default() -> Self {
        Self {
            service: "tor".to_string(),
            socks_host: "127.0.0.1".to_string(),
            socks_port: 9050,
        }
    }
}

impl TorConfig {
    /// The proxychains directive routing through the local Tor SOCKS port.
    pub fn socks_line(&self) -> String {
        format!("socks5 {} {}", self.socks_host, self.socks_port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxychainsConfig {
    pub binary: String,
    /// Candidate config files; the first that exists is edited.
    pub config_paths: Vec<PathBuf>,
    pub marker: String,
    pub ip_check_url: String,
}

impl Default for ProxychainsConfig {
    fn default() -> Self {
        Self {
            binary: "proxychains4".to_string(),
            config_paths: vec![
                PathBuf::from("/etc/proxychains4.conf"),
                PathBuf::from("/etc/proxychains.conf"),
            ],
            marker: "# added by anonmode".to_string(),
            ip_check_url: "ifconfig.me".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnonsurfConfig {
    pub binary: String,
    pub repo: String,
    pub install_dir: PathBuf,
    /// Checked when the binary does not resolve on PATH (installer may drop it outside PATH).
    pub fallback_paths: Vec<PathBuf>,
}

impl Default for AnonsurfConfig {
    fn default() -> Self {
        Self {
            binary: "anonsurf".to_string(),
            repo: "https://github.com/Und3rf10w/kali-anonsurf.git".to_string(),
            install_dir: PathBuf::from("/opt/kali-anonsurf"),
            fallback_paths: vec![
                PathBuf::from("/usr/local/bin/anonsurf"),
                PathBuf::from("/usr/bin/anonsurf"),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtonVpnConfig {
    pub binary: String,
    pub package: String,
}

impl Default for ProtonVpnConfig {
    fn default() -> Self {
        Self {
            binary: "protonvpn-cli".to_string(),
            package: "protonvpn-cli".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub interface: String,
    /// Pause between orchestrator steps so interface and service changes settle.
    pub settle_delay_ms: u64,
    /// Pause after an install before tools are probed again.
    pub install_recheck_delay_ms: u64,
    /// Pick ProtonVPN over AnonSurf when both are installed.
    pub prefer_vpn: bool,
    pub history_paths: Vec<PathBuf>,
    pub required_tools: Vec<RequiredTool>,
    pub tor: TorConfig,
    pub proxychains: ProxychainsConfig,
    pub anonsurf: AnonsurfConfig,
    pub protonvpn: ProtonVpnConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            interface: "eth0".to_string(),
            settle_delay_ms: 1000,
            install_recheck_delay_ms: 2000,
            prefer_vpn: false,
            history_paths: default_history_paths(),
            required_tools: vec![
                RequiredTool::new("tor", "tor"),
                RequiredTool::new("proxychains4", "proxychains4"),
                RequiredTool::new("macchanger", "macchanger"),
                RequiredTool::new("curl", "curl"),
                RequiredTool::new("git", "git"),
            ],
            tor: TorConfig::default(),
            proxychains: ProxychainsConfig::default(),
            anonsurf: AnonsurfConfig::default(),
            protonvpn: ProtonVpnConfig::default(),
        }
    }
}

fn default_history_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("/root/.bash_history"),
        PathBuf::from("/root/.zsh_history"),
    ];
    if let Some(home) = dirs::home_dir() {
        for name in [".bash_history", ".zsh_history"] {
            let path = home.join(name);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }
    paths
}

impl AppConfig {
    /// Default location: `<config dir>/anonmode/config.toml`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("anonmode")
            .join("config.toml")
    }

    /// Load from the default location, falling back to defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn install_recheck_delay(&self) -> Duration {
        Duration::from_millis(self.install_recheck_delay_ms)
    }
}
