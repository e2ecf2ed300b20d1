//! Analytics screen — read-only aggregate counts of the directory.
//!
//! This is the sibling view the refresh protocol feeds: it never fetches
//! anything itself and simply renders whatever summary the store holds.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use roster_core::AnalyticsSummary;

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct AnalyticsScreen {
    focused: bool,
    summary: Arc<AnalyticsSummary>,
}

impl AnalyticsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            summary: Arc::new(AnalyticsSummary::default()),
        }
    }

    fn render_tile(frame: &mut Frame, area: Rect, label: &str, value: u64) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [value_row, label_row] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(inner);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                value.to_string(),
                theme::title_style(),
            )))
            .centered(),
            value_row,
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(label.to_owned(), theme::key_hint())))
                .centered(),
            label_row,
        );
    }
}

impl Component for AnalyticsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('r') => Ok(Some(Action::RefreshUsers)),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::AnalyticsUpdated(summary) = action {
            self.summary = Arc::clone(summary);
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(" Analytics ", theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [tiles_row, _rest] =
            Layout::vertical([Constraint::Length(4), Constraint::Min(0)]).areas(inner);

        let tiles = Layout::horizontal([
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
        ])
        .split(tiles_row);

        let summary = &self.summary;
        Self::render_tile(frame, tiles[0], "Total users", summary.total_users);
        Self::render_tile(frame, tiles[1], "Admins", summary.admins);
        Self::render_tile(frame, tiles[2], "Members", summary.members);
        Self::render_tile(frame, tiles[3], "Male", summary.male);
        Self::render_tile(frame, tiles[4], "Female", summary.female);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
