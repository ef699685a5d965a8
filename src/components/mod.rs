// ABOUTME: UI components for the TUI interface including the action list, status log, and dialogs

pub mod action_list;
pub mod confirmation_dialog;
pub mod help;
pub mod layout;
pub mod login_prompt;
pub mod notice;
pub mod status_log;

pub use action_list::ActionListComponent;
pub use confirmation_dialog::ConfirmationDialogComponent;
pub use help::HelpComponent;
pub use layout::LayoutComponent;
pub use login_prompt::LoginPromptComponent;
pub use notice::NoticeComponent;
pub use status_log::StatusLogComponent;

use ratatui::prelude::*;

/// Rectangle of the given percentage size centered inside `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
