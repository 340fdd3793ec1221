//! # TitleBar Component
//!
//! Top status line: who is signed in on the left, the status message in
//! the middle, the last refresh time on the right.
//!
//! Stateless; every field is a prop rebuilt each frame:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(reader_label, app.status_message.clone(), refreshed);
//! title_bar.render(frame, title_area);
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;

pub struct TitleBar {
    /// Who is signed in, or the app name before login
    pub heading: String,
    /// Transient status (e.g. "Загрузка...", "Найдено: 1 из 3")
    pub status_message: String,
    /// Right-aligned note, empty to hide
    pub trailing: String,
}

impl TitleBar {
    pub fn new(heading: String, status_message: String, trailing: String) -> Self {
        Self {
            heading,
            status_message,
            trailing,
        }
    }

    fn left_line(&self) -> Line<'_> {
        let mut spans = vec![Span::styled(
            self.heading.as_str(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::raw(self.status_message.as_str()));
        }
        Line::from(spans)
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let trailing_width = self.trailing.width() as u16;
        let [left_area, right_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(trailing_width)])
                .areas(area);

        frame.render_widget(self.left_line(), left_area);
        if trailing_width > 0 {
            frame.render_widget(
                Span::styled(self.trailing.as_str(), Style::default().fg(Color::DarkGray)),
                right_area,
            );
        }
    }
}
