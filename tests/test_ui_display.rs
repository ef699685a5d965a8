// ABOUTME: Test UI display components including the action list, menu bar and overlays

use anonmode::actions::Action;
use anonmode::app::AppState;
use anonmode::components::LayoutComponent;
use anonmode::session::StatusLevel;
use anonmode::tools::ToolAvailability;
use ratatui::{backend::TestBackend, Terminal};

fn render(state: &AppState) -> String {
    let backend = TestBackend::new(120, 40);
    let mut terminal = Terminal::new(backend).unwrap();
    let mut layout = LayoutComponent::new();

    terminal
        .draw(|frame| {
            layout.render(frame, state);
        })
        .unwrap();

    let buffer = terminal.backend().buffer();
    buffer.content().iter().map(|cell| cell.symbol()).collect()
}

fn printable(content: &str) -> String {
    content
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .collect()
}

#[test]
fn test_main_screen_shows_actions_status_and_menu() {
    let mut state = AppState::default();
    state.append_status(StatusLevel::Info, "Checking required tools...");

    let content = render(&state);

    assert!(content.contains("Actions"), "missing action list: {}", printable(&content));
    assert!(content.contains("Check & Install Tools"));
    assert!(content.contains("[F] Start Full Anonymous Mode"));
    assert!(content.contains("Anonymity Status"));
    assert!(content.contains("Interface: eth0"));
    assert!(content.contains("Checking required tools..."));
    assert!(content.contains("[Enter]run"), "menu bar: {}", printable(&content));
    assert!(content.contains("[?]help"));
    assert!(content.contains("[q]uit"));
}

#[test]
fn test_help_screen_lists_hotkeys() {
    let mut state = AppState::default();
    state.help_visible = true;

    let content = render(&state);

    assert!(content.contains("Navigation:"));
    assert!(content.contains("Actions:"));
    assert!(content.contains("General:"));
    assert!(
        content.contains("S          Stop All (Tor+VPN+AnonSurf)"),
        "help: {}",
        printable(&content)
    );
}

#[test]
fn test_summary_lists_missing_tools() {
    let mut state = AppState::default();
    state.availability = Some(ToolAvailability {
        found: vec!["tor".to_string()],
        missing: vec![anonmode::config::RequiredTool::new("macchanger", "macchanger")],
        protonvpn: false,
        anonsurf: true,
    });

    let content = render(&state);

    assert!(content.contains("missing macchanger"), "{}", printable(&content));
    assert!(content.contains("AnonSurf yes / ProtonVPN no"));
}

#[test]
fn test_running_action_is_listed() {
    let mut state = AppState::default();
    state.running.push(Action::StartTor);

    let content = render(&state);

    assert!(content.contains("Running: Start Tor Service"));
}

#[test]
fn test_confirmation_dialog_is_drawn() {
    let mut state = AppState::default();
    state.show_install_confirmation(vec!["tor".to_string(), "curl".to_string()]);

    let content = render(&state);

    assert!(content.contains("Install missing tools"));
    assert!(content.contains("tor, curl"));
    assert!(content.contains("Yes"));
}

#[test]
fn test_login_prompt_masks_password() {
    let mut state = AppState::default();
    state.trigger_action(Action::ProtonVpnLogin);
    for ch in "alice".chars() {
        state.login_input(ch);
    }
    state.login_next_field();
    for ch in "pa55".chars() {
        state.login_input(ch);
    }

    let content = render(&state);

    assert!(content.contains("ProtonVPN Login"));
    assert!(content.contains("alice"));
    assert!(content.contains("****"));
    assert!(!content.contains("pa55"));
}

#[test]
fn test_notice_overlay_is_drawn() {
    let mut state = AppState::default();
    state.notice = Some("Please re-run with sudo.".to_string());

    let content = render(&state);

    assert!(content.contains("Please re-run with sudo."));
    assert!(content.contains("Press any key to continue"));
}

#[test]
fn test_newest_line_visible_after_long_command_output() {
    let mut state = AppState::default();
    state.append_status(StatusLevel::Command, "apt-get update -y");
    let output: Vec<String> = (0..60).map(|n| format!("apt output line {:02}", n)).collect();
    state.append_status(StatusLevel::Output, output.join("\n"));
    state.append_status(StatusLevel::Error, "Some installs failed");

    let content = render(&state);

    assert!(content.contains("Some installs failed"), "log: {}", printable(&content));
    assert!(content.contains("apt output line 59"));
    assert!(!content.contains("apt output line 00"));
    assert!(!content.contains("apt-get update -y"));
}
