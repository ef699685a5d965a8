// ABOUTME: Help overlay component displaying keyboard shortcuts and action hotkeys

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem},
};

use super::centered_rect;
use crate::actions::Action;

pub struct HelpComponent;

impl HelpComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 80, area);

        frame.render_widget(Clear, popup_area);

        let heading = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        let mut help_items = vec![
            ListItem::new("Navigation:").style(heading),
            ListItem::new("  j/↓        Move down"),
            ListItem::new("  k/↑        Move up"),
            ListItem::new("  g          Go to top"),
            ListItem::new("  G          Go to bottom"),
            ListItem::new("  Enter      Run selected action"),
            ListItem::new(""),
            ListItem::new("Status log:").style(heading),
            ListItem::new("  PgUp/PgDn  Scroll"),
            ListItem::new("  End        Follow new output"),
            ListItem::new(""),
            ListItem::new("Actions:").style(heading),
        ];

        help_items.extend(Action::ALL.iter().filter_map(|action| {
            action
                .hotkey()
                .map(|key| ListItem::new(format!("  {}          {}", key, action.label())))
        }));

        help_items.extend([
            ListItem::new(""),
            ListItem::new("General:").style(heading),
            ListItem::new("  ?          Toggle this help"),
            ListItem::new("  q/Esc      Quit application"),
            ListItem::new("  Ctrl+C     Force quit"),
        ]);

        let help_list = List::new(help_items).block(
            Block::default()
                .title("Help - Press ? or Esc to close")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        frame.render_widget(help_list, popup_area);
    }
}

impl Default for HelpComponent {
    fn default() -> Self {
        Self::new()
    }
}
