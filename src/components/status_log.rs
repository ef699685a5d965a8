// ABOUTME: Status pane with a tool summary header and the scrollable, timestamped status log

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::app::AppState;
use crate::session::{StatusLevel, StatusLine};

pub struct StatusLogComponent;

impl StatusLogComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6), // Summary
                Constraint::Min(0),    // Log
            ])
            .split(area);

        self.render_summary(frame, chunks[0], state);
        self.render_log(frame, chunks[1], state);
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let tools = match &state.availability {
            None => "checking...".to_string(),
            Some(availability) if availability.all_required_present() => {
                format!("all {} required tools found", availability.found.len())
            }
            Some(availability) => format!(
                "missing {}",
                availability
                    .missing
                    .iter()
                    .map(|tool| tool.binary.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        };
        let tunnels = match &state.availability {
            None => "unknown".to_string(),
            Some(a) => format!(
                "AnonSurf {} / ProtonVPN {}",
                if a.anonsurf { "yes" } else { "no" },
                if a.protonvpn { "yes" } else { "no" }
            ),
        };
        let running = if state.running.is_empty() {
            "idle".to_string()
        } else {
            state
                .running
                .iter()
                .map(|action| action.label())
                .collect::<Vec<_>>()
                .join(", ")
        };

        let info_text = format!(
            "Interface: {}\nTools: {}\nTunnels: {}\nRunning: {}",
            state.interface, tools, tunnels, running
        );

        let info = Paragraph::new(info_text)
            .block(
                Block::default()
                    .title("Anonymity Status")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .wrap(Wrap { trim: true });

        frame.render_widget(info, area);
    }

    fn render_log(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let lines = state.status_log.lines();
        let visible = area.height.saturating_sub(2) as usize;
        let end = lines.len().saturating_sub(state.log_scroll);

        let items: Vec<ListItem> = Self::tail_rows(&lines[..end], visible)
            .into_iter()
            .map(|(text, style)| ListItem::new(text).style(style))
            .collect();

        let title = if state.log_scroll > 0 {
            format!("Status (scrolled, {} newer)", state.log_scroll)
        } else {
            "Status".to_string()
        };

        let list = List::new(items).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        frame.render_widget(list, area);
    }

    /// The last `height` screen rows of `lines`, oldest first.
    ///
    /// Multi-line entries (captured tool output) take one row per line, so the
    /// newest entry always ends on the bottom row.
    pub fn tail_rows(lines: &[StatusLine], height: usize) -> Vec<(String, Style)> {
        let mut rows = Vec::with_capacity(height);
        for line in lines.iter().rev() {
            if rows.len() >= height {
                break;
            }
            let mut entry = Self::entry_rows(line);
            while let Some(row) = entry.pop() {
                if rows.len() >= height {
                    break;
                }
                rows.push(row);
            }
        }
        rows.reverse();
        rows
    }

    fn entry_rows(line: &StatusLine) -> Vec<(String, Style)> {
        let style = Self::level_style(line.level);
        let stamp = line.timestamp.format("%H:%M:%S").to_string();
        let indent = " ".repeat(stamp.len());

        let text = line.display_text();
        if text.is_empty() {
            return vec![(stamp, style)];
        }

        text.lines()
            .enumerate()
            .map(|(index, row)| {
                let lead = if index == 0 { stamp.as_str() } else { indent.as_str() };
                (format!("{} {}", lead, row), style)
            })
            .collect()
    }

    fn level_style(level: StatusLevel) -> Style {
        match level {
            StatusLevel::Info => Style::default().fg(Color::White),
            StatusLevel::Success => Style::default().fg(Color::Green),
            StatusLevel::Warning => Style::default().fg(Color::Yellow),
            StatusLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            StatusLevel::Command => Style::default().fg(Color::Blue),
            StatusLevel::Output => Style::default().fg(Color::Gray),
        }
    }
}

impl Default for StatusLogComponent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tail_rows_splits_output_and_keeps_newest_last() {
        let lines = vec![
            StatusLine::new(StatusLevel::Command, "macchanger -r eth0"),
            StatusLine::new(StatusLevel::Output, "Current MAC: a\nPermanent MAC: b\nNew MAC: c"),
            StatusLine::new(StatusLevel::Success, "MAC changed"),
        ];

        let rows = StatusLogComponent::tail_rows(&lines, 3);
        let texts: Vec<&str> = rows.iter().map(|(text, _)| text.trim_start()).collect();

        assert_eq!(rows.len(), 3);
        assert!(texts[0].ends_with("Permanent MAC: b"));
        assert!(texts[1].ends_with("New MAC: c"));
        assert!(texts[2].ends_with("MAC changed"));
    }

    #[test]
    fn test_tail_rows_fits_short_log() {
        let lines = vec![StatusLine::new(StatusLevel::Info, "one")];
        assert_eq!(StatusLogComponent::tail_rows(&lines, 10).len(), 1);
        assert!(StatusLogComponent::tail_rows(&lines, 0).is_empty());
    }
}
