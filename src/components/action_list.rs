// ABOUTME: Action list component showing every action with its hotkey and availability
// Disabled actions are greyed out and running ones carry a spinner marker

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::actions::Action;
use crate::app::AppState;

pub struct ActionListComponent {
    list_state: ListState,
}

impl Default for ActionListComponent {
    fn default() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self { list_state }
    }
}

impl ActionListComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        self.list_state.select(Some(state.selected_action_index));

        let items: Vec<ListItem> = state
            .actions
            .iter()
            .map(|action| Self::build_item(*action, state))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title("Actions")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title_style(Style::default().fg(Color::Yellow)),
            )
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn build_item(action: Action, state: &AppState) -> ListItem<'static> {
        let key = action
            .hotkey()
            .map(|k| format!("[{}]", k))
            .unwrap_or_else(|| "   ".to_string());
        let marker = if state.is_running(action) { "⟳" } else { " " };

        match action.unavailable_reason(state.availability.as_ref()) {
            Some(_) => ListItem::new(format!("{} {} {}", marker, key, action.label()))
                .style(Style::default().fg(Color::DarkGray)),
            None => {
                let style = match action {
                    Action::StartFullAnonymous => {
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                    }
                    Action::StopAll => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    _ if state.is_running(action) => Style::default().fg(Color::Yellow),
                    _ => Style::default().fg(Color::White),
                };
                ListItem::new(format!("{} {} {}", marker, key, action.label())).style(style)
            }
        }
    }
}
