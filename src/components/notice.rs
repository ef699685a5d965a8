// ABOUTME: Modal notice shown at startup, e.g. when the process is not running as root

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::centered_rect;
use crate::app::AppState;

pub struct NoticeComponent;

impl NoticeComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let Some(message) = &state.notice else {
            return;
        };

        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let mut text = vec![
            Line::from(vec![Span::styled(
                "⚠️  Warning",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
        ];
        text.extend(message.lines().map(|line| Line::from(line.to_string())));
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            "Press any key to continue",
            Style::default().fg(Color::Gray),
        )));

        let paragraph = Paragraph::new(text)
            .block(
                Block::default()
                    .title("anonmode")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::White));

        frame.render_widget(paragraph, popup_area);
    }
}

impl Default for NoticeComponent {
    fn default() -> Self {
        Self::new()
    }
}
