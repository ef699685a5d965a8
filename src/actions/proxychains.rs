// ABOUTME: Proxychains configuration edit and the ifconfig.me routing check
// The edit itself is a pure text transform so it can be tested without touching /etc

use super::{ensure_installed, ActionError};
use crate::host::CommandSpec;
use crate::session::{Resource, SessionContext};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::{Path, PathBuf};

lazy_static! {
    static ref COMMENTED_DYNAMIC_CHAIN: Regex = Regex::new(r"(?m)^#dynamic_chain").unwrap();
    static ref STRICT_CHAIN: Regex = Regex::new(r"(?m)^strict_chain").unwrap();
}

/// Result of routing a proxychains config through the local Tor SOCKS port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxychainsEdit {
    pub contents: String,
    pub enabled_dynamic_chain: bool,
    pub disabled_strict_chain: bool,
    pub appended_socks: bool,
}

impl ProxychainsEdit {
    /// Switch to `dynamic_chain`, comment out `strict_chain`, and append the SOCKS line
    /// unless it (or the marker) is already there.
    pub fn apply(original: &str, socks_line: &str, marker: &str) -> Self {
        let enabled_dynamic_chain = COMMENTED_DYNAMIC_CHAIN.is_match(original);
        let disabled_strict_chain = STRICT_CHAIN.is_match(original);

        let contents = COMMENTED_DYNAMIC_CHAIN.replace_all(original, "dynamic_chain");
        let mut contents = STRICT_CHAIN
            .replace_all(&contents, "#strict_chain")
            .into_owned();

        let appended_socks = !has_directive(original, socks_line) && !original.contains(marker);
        if appended_socks {
            contents.push_str(&format!("\n{}\n{}\n", marker, socks_line));
        }

        Self {
            contents,
            enabled_dynamic_chain,
            disabled_strict_chain,
            appended_socks,
        }
    }

    pub fn changed(&self) -> bool {
        self.enabled_dynamic_chain || self.disabled_strict_chain || self.appended_socks
    }
}

/// True when some line holds exactly the directive's tokens. Commented lines do not count.
fn has_directive(config: &str, directive: &str) -> bool {
    config
        .lines()
        .any(|line| line.split_whitespace().eq(directive.split_whitespace()))
}

pub fn backup_path(config_path: &Path) -> PathBuf {
    let mut name = config_path.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}

fn find_config(ctx: &SessionContext) -> Option<PathBuf> {
    ctx.config
        .proxychains
        .config_paths
        .iter()
        .find(|path| ctx.host.path_exists(path))
        .cloned()
}

/// Rewrite the first existing proxychains config to route through Tor.
///
/// A `.bak` copy is taken before the first modification and never overwritten.
pub async fn configure(ctx: &SessionContext) -> Result<ProxychainsEdit, ActionError> {
    let _turn = ctx.queues.acquire(Resource::ProxychainsConfig).await;
    ctx.sink.info("Configuring proxychains to use Tor...");

    let path = find_config(ctx).ok_or(ActionError::ConfigNotFound)?;
    let original = tokio::fs::read_to_string(&path).await?;
    let socks_line = ctx.config.tor.socks_line();
    let edit = ProxychainsEdit::apply(&original, &socks_line, &ctx.config.proxychains.marker);

    if edit.changed() {
        let backup = backup_path(&path);
        if !ctx.host.path_exists(&backup) {
            tokio::fs::copy(&path, &backup).await?;
            ctx.sink
                .info(format!("Backed up {} to {}", path.display(), backup.display()));
        }
        tokio::fs::write(&path, &edit.contents).await?;
    }

    if edit.enabled_dynamic_chain {
        ctx.sink.info("Enabled dynamic_chain.");
    }
    if edit.disabled_strict_chain {
        ctx.sink.info("Disabled strict_chain.");
    }
    if edit.appended_socks {
        ctx.sink
            .info(format!("Added {} to proxychains config.", socks_line));
    }
    if !edit.changed() {
        ctx.sink
            .info(format!("{} already routes through Tor.", path.display()));
    }

    ctx.sink.success("Proxychains configured.");
    Ok(edit)
}

/// Fetch the public IP through proxychains and report it.
pub async fn test_via_curl(ctx: &SessionContext) -> Result<String, ActionError> {
    let url = ctx.config.proxychains.ip_check_url.as_str();
    let binary = ctx.config.proxychains.binary.as_str();

    ctx.sink
        .info(format!("Testing proxychains + Tor via {} ...", url));
    ensure_installed(ctx, "tor")?;
    ensure_installed(ctx, binary)?;

    let output = ctx
        .run_checked(&CommandSpec::new(binary).args(["-q", "curl", "-s", url]))
        .await?;
    let address = output.stdout.trim().to_string();
    ctx.sink
        .success(format!("Proxychains {} -> {}", url, address));
    Ok(address)
}
