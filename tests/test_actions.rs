// ABOUTME: Tests for single actions run through the job runner against a fake host

mod common;

use anonmode::actions::{self, Action, ActionError, Credentials, Job};
use anonmode::host::CommandOutput;
use anonmode::session::{StatusLevel, WorkerEvent};
use common::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_execute_reports_start_error_and_finish() {
    let dir = TempDir::new().unwrap();
    let host = Arc::new(FakeHost::new().fail("systemctl enable"));
    let (ctx, mut rx) = context(test_config(dir.path()), host);

    actions::execute(Job::Action(Action::StartTor), &ctx).await;

    let events = drain(&mut rx);
    assert!(matches!(events.first(), Some(WorkerEvent::Started(Action::StartTor))));
    assert!(matches!(events.last(), Some(WorkerEvent::Finished(Action::StartTor))));
    let lines = status_lines(&events);
    assert!(has_line(
        &lines,
        StatusLevel::Error,
        "`systemctl enable --now tor` exited with status 1"
    ));
}

#[tokio::test]
async fn test_failed_tor_start_still_reports_service_state() {
    let dir = TempDir::new().unwrap();
    let host = Arc::new(FakeHost::new().fail("systemctl enable"));
    let (ctx, mut rx) = context(test_config(dir.path()), host.clone());

    let err = actions::tor::start(&ctx).await.unwrap_err();

    assert!(matches!(err, ActionError::CommandFailed { .. }));
    assert_eq!(
        host.calls(),
        vec![
            "systemctl enable --now tor".to_string(),
            "systemctl is-active tor".to_string(),
        ]
    );
    let lines = status_lines(&drain(&mut rx));
    assert!(has_line(&lines, StatusLevel::Success, "Tor service is active"));
}

#[tokio::test]
async fn test_spoof_mac_runs_in_order() {
    let dir = TempDir::new().unwrap();
    let host = Arc::new(
        FakeHost::new()
            .with_installed(&["macchanger"])
            .respond(
                "ip -j link show eth0",
                CommandOutput::success().with_stdout(IP_LINK_JSON),
            ),
    );
    let (ctx, _rx) = context(test_config(dir.path()), host.clone());

    actions::network::spoof_mac(&ctx).await.unwrap();

    assert_eq!(
        host.calls(),
        vec![
            "ip link set eth0 down".to_string(),
            "macchanger -r eth0".to_string(),
            "ip link set eth0 up".to_string(),
            "ip -j link show eth0".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_failed_macchanger_still_restores_interface() {
    let dir = TempDir::new().unwrap();
    let host = Arc::new(
        FakeHost::new()
            .with_installed(&["macchanger"])
            .fail("macchanger"),
    );
    let (ctx, _rx) = context(test_config(dir.path()), host.clone());

    let err = actions::network::spoof_mac(&ctx).await.unwrap_err();

    assert!(matches!(err, ActionError::CommandFailed { .. }));
    assert!(host.ran("ip link set eth0 up"));
    assert!(!host.ran("ip -j"));
}

#[tokio::test]
async fn test_login_sends_credentials_on_stdin_only() {
    let dir = TempDir::new().unwrap();
    let host = Arc::new(FakeHost::new().with_installed(&["protonvpn-cli"]));
    let (ctx, mut rx) = context(test_config(dir.path()), host.clone());

    actions::execute(
        Job::ProtonVpnLogin(Credentials::new("alice", "hunter2")),
        &ctx,
    )
    .await;

    let specs = host.specs();
    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].args, vec!["login".to_string()]);
    assert_eq!(specs[0].stdin.as_deref(), Some("alice\nhunter2\n"));
    assert!(!format!("{:?}", specs[0]).contains("hunter2"));

    let lines = status_lines(&drain(&mut rx));
    assert!(lines.iter().all(|line| !line.text.contains("hunter2")));
    assert!(has_line(&lines, StatusLevel::Success, "login completed"));
}

#[tokio::test]
async fn test_clear_history_shreds_existing_files_only() {
    let dir = TempDir::new().unwrap();
    let bash = dir.path().join(".bash_history");
    std::fs::write(&bash, "ls\n").unwrap();
    let mut config = test_config(dir.path());
    config.history_paths = vec![bash.clone(), dir.path().join(".zsh_history")];
    let host = Arc::new(FakeHost::new());
    let (ctx, mut rx) = context(config, host.clone());

    actions::history::clear(&ctx).await.unwrap();

    assert_eq!(host.calls(), vec![format!("shred -u {}", bash.display())]);
    let lines = status_lines(&drain(&mut rx));
    assert!(has_line(&lines, StatusLevel::Info, "Deleted"));
}

#[tokio::test]
async fn test_anonsurf_install_without_installer_fails() {
    let dir = TempDir::new().unwrap();
    let host = Arc::new(FakeHost::new().with_installed(&["git"]));
    let (ctx, _rx) = context(test_config(dir.path()), host.clone());

    let err = actions::anonsurf::install(&ctx).await.unwrap_err();

    assert!(matches!(err, ActionError::MissingFile(_)));
    assert!(host.ran("git clone https://github.com/Und3rf10w/kali-anonsurf.git"));
    assert!(!host.ran("apt-get"));
}

#[tokio::test]
async fn test_gated_job_reports_missing_tool() {
    let dir = TempDir::new().unwrap();
    let host = Arc::new(FakeHost::new());
    let (ctx, mut rx) = context(test_config(dir.path()), host.clone());

    actions::execute(Job::Action(Action::ConnectProtonVpn), &ctx).await;

    assert!(host.calls().is_empty());
    let lines = status_lines(&drain(&mut rx));
    assert!(has_line(&lines, StatusLevel::Error, "protonvpn-cli not installed"));
}

#[tokio::test]
async fn test_proxychains_check_reports_exit_address() {
    let dir = TempDir::new().unwrap();
    let host = Arc::new(
        FakeHost::new()
            .with_installed(&["tor", "proxychains4"])
            .respond(
                "proxychains4 -q curl -s",
                CommandOutput::success().with_stdout("185.220.101.4\n"),
            ),
    );
    let (ctx, mut rx) = context(test_config(dir.path()), host.clone());

    let address = actions::proxychains::test_via_curl(&ctx).await.unwrap();

    assert_eq!(address, "185.220.101.4");
    assert_eq!(
        host.calls(),
        vec!["proxychains4 -q curl -s ifconfig.me".to_string()]
    );
    let lines = status_lines(&drain(&mut rx));
    assert!(has_line(&lines, StatusLevel::Success, "185.220.101.4"));
}

#[tokio::test]
async fn test_proxychains_check_requires_tor() {
    let dir = TempDir::new().unwrap();
    let host = Arc::new(FakeHost::new().with_installed(&["proxychains4"]));
    let (ctx, _rx) = context(test_config(dir.path()), host.clone());

    let err = actions::proxychains::test_via_curl(&ctx).await.unwrap_err();

    assert!(matches!(err, ActionError::ToolMissing(ref tool) if tool == "tor"));
    assert!(host.calls().is_empty());
}
