//! # Book Detail Popup
//!
//! Centered overlay with every field of one book. Opened with Enter on
//! the book list, closed with Esc or Enter.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::api::BookRecord;
use crate::tui::component::Component;

pub struct BookDetail<'a> {
    pub book: &'a BookRecord,
}

impl<'a> BookDetail<'a> {
    pub fn new(book: &'a BookRecord) -> Self {
        Self { book }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let label = Style::default().fg(Color::DarkGray);
        let annotation = if self.book.novelty_annotation.trim().is_empty() {
            "—"
        } else {
            self.book.novelty_annotation.as_str()
        };
        vec![
            Line::from(Span::styled(
                self.book.title.as_str(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("Автор: ", label),
                Span::raw(self.book.author.as_str()),
            ]),
            Line::from(vec![
                Span::styled("Код: ", label),
                Span::raw(self.book.code.as_str()),
            ]),
            Line::from(vec![
                Span::styled("Год издания: ", label),
                Span::raw(self.book.year_published.to_string()),
            ]),
            Line::from(vec![
                Span::styled("Новизна и аннотации: ", label),
                Span::raw(annotation),
            ]),
        ]
    }
}

impl Component for BookDetail<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 50, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Книга ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Esc Закрыть ").centered())
            .padding(Padding::horizontal(1));

        let paragraph = Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, overlay);
    }
}

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
