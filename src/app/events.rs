// ABOUTME: Event handling system for keyboard input and app actions

use crate::actions::Action;
use crate::app::AppState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const PAGE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    NextAction,
    PreviousAction,
    GoToTop,
    GoToBottom,
    RunSelected,
    RunAction(Action),
    ToggleHelp,
    ScrollLogUp,
    ScrollLogDown,
    FollowLog,
    DismissNotice,
    // Confirmation dialog events
    ConfirmationToggle, // Switch between Yes/No
    ConfirmationChoose(bool),
    ConfirmationConfirm,
    ConfirmationCancel,
    // Login prompt events
    LoginInputChar(char),
    LoginBackspace,
    LoginNextField,
    LoginSubmit,
    LoginCancel,
}

pub struct EventHandler;

impl EventHandler {
    pub fn handle_key_event(key_event: KeyEvent, state: &mut AppState) -> Option<AppEvent> {
        if key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL)
        {
            return Some(AppEvent::Quit);
        }

        // The root notice swallows the first key
        if state.notice.is_some() {
            return Some(AppEvent::DismissNotice);
        }

        if state.confirmation_dialog.is_some() {
            return match key_event.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Tab => Some(AppEvent::ConfirmationToggle),
                KeyCode::Char('y') | KeyCode::Char('Y') => Some(AppEvent::ConfirmationChoose(true)),
                KeyCode::Char('n') | KeyCode::Char('N') => Some(AppEvent::ConfirmationChoose(false)),
                KeyCode::Enter => Some(AppEvent::ConfirmationConfirm),
                KeyCode::Esc => Some(AppEvent::ConfirmationCancel),
                _ => None,
            };
        }

        if state.login_prompt.is_some() {
            return Self::handle_login_keys(key_event);
        }

        if state.help_visible {
            return match key_event.code {
                KeyCode::Char('?') | KeyCode::Esc => Some(AppEvent::ToggleHelp),
                _ => None,
            };
        }

        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(AppEvent::Quit),
            KeyCode::Char('?') => Some(AppEvent::ToggleHelp),
            KeyCode::Char('j') | KeyCode::Down => Some(AppEvent::NextAction),
            KeyCode::Char('k') | KeyCode::Up => Some(AppEvent::PreviousAction),
            KeyCode::Char('g') | KeyCode::Home => Some(AppEvent::GoToTop),
            KeyCode::Char('G') => Some(AppEvent::GoToBottom),
            KeyCode::Enter | KeyCode::Char(' ') => Some(AppEvent::RunSelected),
            KeyCode::PageUp => Some(AppEvent::ScrollLogUp),
            KeyCode::PageDown => Some(AppEvent::ScrollLogDown),
            KeyCode::End => Some(AppEvent::FollowLog),
            KeyCode::Char(ch) => Action::from_hotkey(ch).map(AppEvent::RunAction),
            _ => None,
        }
    }

    fn handle_login_keys(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Esc => Some(AppEvent::LoginCancel),
            KeyCode::Tab | KeyCode::BackTab => Some(AppEvent::LoginNextField),
            KeyCode::Enter => Some(AppEvent::LoginSubmit),
            KeyCode::Backspace => Some(AppEvent::LoginBackspace),
            KeyCode::Char(ch) => Some(AppEvent::LoginInputChar(ch)),
            _ => None,
        }
    }

    pub fn process_event(event: AppEvent, state: &mut AppState) {
        match event {
            AppEvent::Quit => state.quit(),
            AppEvent::ToggleHelp => state.toggle_help(),
            AppEvent::NextAction => state.next_action(),
            AppEvent::PreviousAction => state.previous_action(),
            AppEvent::GoToTop => state.first_action(),
            AppEvent::GoToBottom => state.last_action(),
            AppEvent::RunSelected => {
                if let Some(action) = state.selected_action() {
                    state.trigger_action(action);
                }
            }
            AppEvent::RunAction(action) => {
                if let Some(index) = state.actions.iter().position(|a| *a == action) {
                    state.selected_action_index = index;
                }
                state.trigger_action(action);
            }
            AppEvent::ScrollLogUp => state.scroll_log_up(PAGE),
            AppEvent::ScrollLogDown => state.scroll_log_down(PAGE),
            AppEvent::FollowLog => state.follow_log(),
            AppEvent::DismissNotice => state.dismiss_notice(),
            AppEvent::ConfirmationToggle => {
                if let Some(ref mut dialog) = state.confirmation_dialog {
                    dialog.selected_option = !dialog.selected_option;
                }
            }
            AppEvent::ConfirmationChoose(choice) => {
                if let Some(ref mut dialog) = state.confirmation_dialog {
                    dialog.selected_option = choice;
                }
                state.confirm_dialog();
            }
            AppEvent::ConfirmationConfirm => state.confirm_dialog(),
            AppEvent::ConfirmationCancel => state.cancel_dialog(),
            AppEvent::LoginInputChar(ch) => state.login_input(ch),
            AppEvent::LoginBackspace => state.login_backspace(),
            AppEvent::LoginNextField => state.login_next_field(),
            AppEvent::LoginSubmit => state.login_submit(),
            AppEvent::LoginCancel => state.login_cancel(),
        }
        state.ui_needs_refresh = true;
    }
}
