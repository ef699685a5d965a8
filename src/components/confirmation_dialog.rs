// ABOUTME: Modal Yes/No dialog used for package installs and history shredding

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::centered_rect;
use crate::app::AppState;

pub struct ConfirmationDialogComponent;

impl ConfirmationDialogComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let Some(dialog) = &state.confirmation_dialog else {
            return;
        };

        let popup_area = centered_rect(50, 35, area);
        frame.render_widget(Clear, popup_area);

        let selected = Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let unselected = Style::default().fg(Color::White);
        let (yes_style, no_style) = if dialog.selected_option {
            (selected, unselected)
        } else {
            (unselected, selected)
        };

        let mut text: Vec<Line> = dialog
            .message
            .lines()
            .map(|line| Line::from(line.to_string()))
            .collect();
        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled(" Yes ", yes_style),
            Span::raw("    "),
            Span::styled(" No ", no_style),
        ]));
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            "←/→ select · Enter confirm · Esc cancel",
            Style::default().fg(Color::Gray),
        )));

        let paragraph = Paragraph::new(text)
            .block(
                Block::default()
                    .title(dialog.title.as_str())
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, popup_area);
    }
}

impl Default for ConfirmationDialogComponent {
    fn default() -> Self {
        Self::new()
    }
}
