// ABOUTME: Network interface actions: MAC address randomization and read-back
// Reads the resulting address from `ip -j` JSON instead of scraping text

use super::{ensure_installed, ActionError};
use crate::host::CommandSpec;
use crate::session::{Resource, SessionContext};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct LinkInfo {
    ifname: String,
    #[serde(default)]
    address: Option<String>,
}

fn link_set(interface: &str, state: &str) -> CommandSpec {
    CommandSpec::new("ip").args(["link", "set", interface, state])
}

/// Extract the link-layer address of `interface` from `ip -j link show` output.
pub fn parse_link_address(json: &str, interface: &str) -> Result<Option<String>, ActionError> {
    let links: Vec<LinkInfo> =
        serde_json::from_str(json).map_err(|e| ActionError::Parse(e.to_string()))?;
    Ok(links
        .into_iter()
        .find(|link| link.ifname == interface)
        .and_then(|link| link.address))
}

pub async fn read_mac(ctx: &SessionContext, interface: &str) -> Result<Option<String>, ActionError> {
    let spec = CommandSpec::new("ip").args(["-j", "link", "show", interface]);
    let output = ctx.host.run(&spec).await?;
    if !output.is_success() {
        return Err(ActionError::CommandFailed {
            command: spec.to_string(),
            code: output.code,
        });
    }
    parse_link_address(&output.stdout, interface)
}

/// Bring the interface down, randomize its MAC, and bring it back up.
///
/// The interface is brought back up even when randomization fails.
pub async fn spoof_mac(ctx: &SessionContext) -> Result<(), ActionError> {
    let _turn = ctx.queues.acquire(Resource::NetworkInterface).await;
    let interface = ctx.config.interface.as_str();

    ctx.sink.info(format!("Bringing {} down...", interface));
    ctx.run(&link_set(interface, "down")).await?;

    let randomized = match ensure_installed(ctx, "macchanger") {
        Ok(()) => {
            ctx.sink.info("Running macchanger -r ...");
            ctx.run_checked(&CommandSpec::new("macchanger").args(["-r", interface]))
                .await
                .map(|_| ())
        }
        Err(e) => Err(e),
    };

    let brought_up = ctx.run_checked(&link_set(interface, "up")).await;
    randomized?;
    brought_up?;

    match read_mac(ctx, interface).await? {
        Some(mac) => {
            ctx.sink
                .success(format!("MAC spoof complete. {} is now {}", interface, mac));
            Ok(())
        }
        None => Err(ActionError::Parse(format!(
            "Could not read new MAC for {}",
            interface
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IP_JSON: &str = r#"[
        {"ifindex":1,"ifname":"lo","flags":["LOOPBACK","UP"],"link_type":"loopback","address":"00:00:00:00:00:00"},
        {"ifindex":2,"ifname":"eth0","flags":["BROADCAST","UP"],"link_type":"ether","address":"3e:a1:9c:00:4b:12"},
        {"ifindex":3,"ifname":"tun0","flags":["POINTOPOINT"],"link_type":"none"}
    ]"#;

    #[test]
    fn test_parse_finds_named_interface() {
        assert_eq!(
            parse_link_address(IP_JSON, "eth0").unwrap(),
            Some("3e:a1:9c:00:4b:12".to_string())
        );
    }

    #[test]
    fn test_parse_interface_without_address() {
        assert_eq!(parse_link_address(IP_JSON, "tun0").unwrap(), None);
        assert_eq!(parse_link_address(IP_JSON, "wlan0").unwrap(), None);
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let err = parse_link_address("2: eth0: <BROADCAST>", "eth0").unwrap_err();
        assert!(matches!(err, ActionError::Parse(_)));
    }
}
