// ABOUTME: Main layout component handling split-pane arrangement and bottom menu bar

use ratatui::{
    prelude::*,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

use super::{
    ActionListComponent, ConfirmationDialogComponent, HelpComponent, LoginPromptComponent,
    NoticeComponent, StatusLogComponent,
};
use crate::app::{AppState, NotificationType};

pub struct LayoutComponent {
    action_list: ActionListComponent,
    status_log: StatusLogComponent,
    help: HelpComponent,
    confirmation_dialog: ConfirmationDialogComponent,
    login_prompt: LoginPromptComponent,
    notice: NoticeComponent,
}

impl LayoutComponent {
    pub fn new() -> Self {
        Self {
            action_list: ActionListComponent::new(),
            status_log: StatusLogComponent::new(),
            help: HelpComponent::new(),
            confirmation_dialog: ConfirmationDialogComponent::new(),
            login_prompt: LoginPromptComponent::new(),
            notice: NoticeComponent::new(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, state: &AppState) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Main content
                Constraint::Length(3), // Bottom menu bar
            ])
            .split(frame.size());

        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40), // Actions
                Constraint::Percentage(60), // Status
            ])
            .split(main_chunks[0]);

        self.action_list.render(frame, content_chunks[0], state);
        self.status_log.render(frame, content_chunks[1], state);
        self.render_menu_bar(frame, main_chunks[1], state);

        if state.help_visible {
            self.help.render(frame, frame.size());
        }

        if state.login_prompt.is_some() {
            self.login_prompt.render(frame, frame.size(), state);
        }

        if state.confirmation_dialog.is_some() {
            self.confirmation_dialog.render(frame, frame.size(), state);
        }

        // Drawn last so it sits above everything else
        if state.notice.is_some() {
            self.notice.render(frame, frame.size(), state);
        }
    }

    fn render_menu_bar(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let (menu_text, text_color) = match &state.notification {
            Some(n) => (
                n.message.clone(),
                match n.notification_type {
                    NotificationType::Info => Color::Green,
                    NotificationType::Warning => Color::Red,
                },
            ),
            None => (
                "[Enter]run [F]ull anon [S]top all [c]heck [?]help [q]uit".to_string(),
                Color::Yellow,
            ),
        };

        let menu = Paragraph::new(menu_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .style(Style::default().fg(text_color))
            .alignment(Alignment::Center);

        frame.render_widget(menu, area);
    }
}

impl Default for LayoutComponent {
    fn default() -> Self {
        Self::new()
    }
}
