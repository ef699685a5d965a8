// ABOUTME: ProtonVPN login form with a username field and a masked password field

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::centered_rect;
use crate::app::{AppState, LoginField};

pub struct LoginPromptComponent;

impl LoginPromptComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let Some(prompt) = &state.login_prompt else {
            return;
        };

        let popup_area = centered_rect(50, 30, area);
        frame.render_widget(Clear, popup_area);

        let field_style = |field: LoginField| {
            if prompt.field == field {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            }
        };
        let cursor = |field: LoginField| if prompt.field == field { "_" } else { "" };

        let text = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("Username: ", field_style(LoginField::Username)),
                Span::raw(format!("{}{}", prompt.username, cursor(LoginField::Username))),
            ]),
            Line::from(vec![
                Span::styled("Password: ", field_style(LoginField::Password)),
                Span::raw(format!(
                    "{}{}",
                    prompt.masked_password(),
                    cursor(LoginField::Password)
                )),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Tab switch field · Enter next/submit · Esc cancel",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(text).block(
            Block::default()
                .title("ProtonVPN Login")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        frame.render_widget(paragraph, popup_area);
    }
}

impl Default for LoginPromptComponent {
    fn default() -> Self {
        Self::new()
    }
}
