// ABOUTME: Tests for the full anonymous sequence and stop-all against a recording fake host

mod common;

use anonmode::host::CommandOutput;
use anonmode::orchestrator::{self, Step, TunnelChoice};
use anonmode::session::StatusLevel;
use common::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_sequence_continues_after_first_three_steps_fail() {
    let dir = TempDir::new().unwrap();
    let host = Arc::new(FakeHost::new().fail("systemctl"));
    let (ctx, mut rx) = context(test_config(dir.path()), host.clone());

    let report = orchestrator::start_full_anonymous(&ctx).await;

    let steps: Vec<Step> = report.steps.iter().map(|outcome| outcome.step).collect();
    assert_eq!(steps, Step::SEQUENCE.to_vec());
    assert_eq!(
        report.failed_steps(),
        vec![Step::SpoofMac, Step::StartTor, Step::ConfigureProxychains]
    );
    assert_eq!(report.tunnel, TunnelChoice::None);

    let lines = status_lines(&drain(&mut rx));
    assert!(has_line(&lines, StatusLevel::Error, "MAC spoof failed"));
    assert!(has_line(&lines, StatusLevel::Error, "Tor start failed"));
    assert!(has_line(&lines, StatusLevel::Info, "sequence completed"));
}

#[tokio::test]
async fn test_every_step_runs_when_all_four_fail() {
    let dir = TempDir::new().unwrap();
    let host = Arc::new(
        FakeHost::new()
            .with_installed(&["anonsurf"])
            .fail("systemctl")
            .fail("anonsurf start"),
    );
    let (ctx, mut rx) = context(test_config(dir.path()), host.clone());

    let report = orchestrator::start_full_anonymous(&ctx).await;

    assert_eq!(report.steps.len(), 4);
    assert_eq!(report.failed_steps(), Step::SEQUENCE.to_vec());
    assert_eq!(report.tunnel, TunnelChoice::Anonsurf);
    assert!(host.ran("anonsurf start"));

    let lines = status_lines(&drain(&mut rx));
    assert!(has_line(&lines, StatusLevel::Error, "System-wide tunnel failed"));
    assert!(has_line(&lines, StatusLevel::Info, "sequence completed"));
}

#[tokio::test]
async fn test_interface_brought_back_up_after_failed_spoof() {
    let dir = TempDir::new().unwrap();
    let host = Arc::new(FakeHost::new());
    let (ctx, _rx) = context(test_config(dir.path()), host.clone());

    orchestrator::start_full_anonymous(&ctx).await;

    let calls = host.calls();
    let down = calls.iter().position(|c| c == "ip link set eth0 down").unwrap();
    let up = calls.iter().position(|c| c == "ip link set eth0 up").unwrap();
    assert!(down < up);
    assert!(!host.ran("macchanger"));
}

#[tokio::test]
async fn test_clean_run_prefers_anonsurf() {
    let dir = TempDir::new().unwrap();
    write_proxychains(dir.path());
    let host = Arc::new(
        FakeHost::new()
            .with_installed(&["macchanger", "anonsurf", "protonvpn-cli"])
            .respond(
                "ip -j link show eth0",
                CommandOutput::success().with_stdout(IP_LINK_JSON),
            ),
    );
    let (ctx, mut rx) = context(test_config(dir.path()), host.clone());

    let report = orchestrator::start_full_anonymous(&ctx).await;

    assert!(report.failed_steps().is_empty());
    assert_eq!(report.tunnel, TunnelChoice::Anonsurf);
    assert!(host.ran("anonsurf start"));
    assert!(!host.ran("protonvpn-cli c"));

    let lines = status_lines(&drain(&mut rx));
    assert!(has_line(&lines, StatusLevel::Info, "Using AnonSurf"));
    assert!(has_line(&lines, StatusLevel::Success, "3e:a1:9c:00:4b:12"));
}

#[tokio::test]
async fn test_prefer_vpn_switches_tunnel() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path());
    config.prefer_vpn = true;
    let host = Arc::new(FakeHost::new().with_installed(&["anonsurf", "protonvpn-cli"]));
    let (ctx, _rx) = context(config, host.clone());

    let report = orchestrator::start_full_anonymous(&ctx).await;

    assert_eq!(report.tunnel, TunnelChoice::ProtonVpn);
    assert!(host.ran("protonvpn-cli c -f"));
    assert!(!host.ran("anonsurf start"));
}

#[tokio::test]
async fn test_no_tunnel_warns_about_leaks() {
    let dir = TempDir::new().unwrap();
    let host = Arc::new(FakeHost::new().with_installed(&["macchanger"]));
    let (ctx, mut rx) = context(test_config(dir.path()), host.clone());

    let report = orchestrator::start_full_anonymous(&ctx).await;

    assert_eq!(report.tunnel, TunnelChoice::None);
    assert!(!host.ran("anonsurf"));
    assert!(!host.ran("protonvpn-cli"));
    let lines = status_lines(&drain(&mut rx));
    assert!(has_line(&lines, StatusLevel::Warning, "may leak"));
}

#[tokio::test]
async fn test_stop_all_with_nothing_running_is_informational() {
    let dir = TempDir::new().unwrap();
    let host = Arc::new(FakeHost::new().fail("systemctl stop tor"));
    let (ctx, mut rx) = context(test_config(dir.path()), host.clone());

    let report = orchestrator::stop_all(&ctx).await;

    assert_eq!(report.attempted, vec!["systemctl stop tor".to_string()]);
    assert_eq!(report.tolerated_failures, 1);
    let lines = status_lines(&drain(&mut rx));
    assert!(!lines.is_empty());
    assert!(lines.iter().all(|line| line.level == StatusLevel::Info));
    assert!(has_line(&lines, StatusLevel::Info, "(ignored)"));
}

#[tokio::test]
async fn test_stop_all_order_and_spawn_errors_tolerated() {
    let dir = TempDir::new().unwrap();
    let host = Arc::new(
        FakeHost::new()
            .with_installed(&["anonsurf", "protonvpn-cli"])
            .unspawnable("protonvpn-cli"),
    );
    let (ctx, mut rx) = context(test_config(dir.path()), host.clone());

    let report = orchestrator::stop_all(&ctx).await;

    assert_eq!(
        host.calls(),
        vec![
            "anonsurf stop".to_string(),
            "protonvpn-cli d".to_string(),
            "systemctl stop tor".to_string(),
        ]
    );
    assert_eq!(report.tolerated_failures, 1);
    let lines = status_lines(&drain(&mut rx));
    assert!(lines.iter().all(|line| line.level == StatusLevel::Info));
}
