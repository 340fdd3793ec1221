use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::core::book_screen::{BookListScreen, BooksPhase, MISSING_CARD_MESSAGE};
use crate::core::login::LoginScreen;
use crate::core::state::{App, Screen, Toast, ToastKind};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{BookDetail, BookListView, TitleBar};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub const EMPTY_STATE_MESSAGE: &str = "У вас нет выданных книг.";

const LOGIN_HELP: &str = " Enter Войти  Esc Выход ";
const BOOKS_HELP: &str = " ↑↓ Выбор  Enter Подробнее  F5 Обновить  Esc Сбросить поиск  Ctrl+C Выход ";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let [title_area, main_area, footer_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());

    let spinner = SPINNER[spinner_frame % SPINNER.len()];

    match &app.screen {
        Screen::Login(screen) => {
            TitleBar::new("Bookshelf".to_string(), app.status_message.clone(), String::new())
                .render(frame, title_area);
            draw_login(frame, main_area, app, screen, tui, spinner);
        }
        Screen::Books(screen) => {
            let trailing = screen
                .fetched_at()
                .map(|t| format!("обновлено {}", t.format("%H:%M")))
                .unwrap_or_default();
            TitleBar::new(reader_heading(screen), app.status_message.clone(), trailing)
                .render(frame, title_area);
            draw_books(frame, main_area, screen, tui, spinner);
        }
    }

    let help = match app.screen {
        Screen::Login(_) => LOGIN_HELP,
        Screen::Books(_) => BOOKS_HELP,
    };
    draw_footer(frame, footer_area, app.toast.as_ref(), help);
}

fn reader_heading(screen: &BookListScreen) -> String {
    match (screen.reader(), screen.card_number()) {
        (Some(reader), Some(card)) => {
            let full_name = match &reader.surname {
                Some(surname) => format!("{} {}", surname, reader.display_name()),
                None => reader.display_name(),
            };
            format!("{full_name} (билет {card})")
        }
        (None, Some(card)) => format!("Билет {card}"),
        _ => "Bookshelf".to_string(),
    }
}

fn draw_login(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    screen: &LoginScreen,
    tui: &mut TuiState,
    spinner: &str,
) {
    let [form] = Layout::horizontal([Constraint::Length(50)])
        .flex(Flex::Center)
        .areas(area);
    let [form] = Layout::vertical([Constraint::Length(10)])
        .flex(Flex::Center)
        .areas(form);

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Вход для читателя ");
    let inner = block.inner(form);
    frame.render_widget(block, form);

    use Constraint::Length;
    let [intro_area, input_area, status_area, server_area] =
        Layout::vertical([Length(2), Length(3), Length(1), Length(1)]).areas(inner);

    frame.render_widget(
        Paragraph::new("Введите номер читательского билета.")
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center),
        intro_area,
    );

    tui.login_input.focused = !screen.is_submitting();
    tui.login_input.render(frame, input_area);

    let status = if screen.is_submitting() {
        Line::from(Span::styled(
            format!("{spinner} Вход..."),
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(error) = screen.last_error() {
        Line::from(Span::styled(
            error.user_message(),
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::default()
    };
    frame.render_widget(status.centered(), status_area);

    frame.render_widget(
        Line::from(Span::styled(
            format!("Сервер: {}", app.base_url),
            Style::default().fg(Color::DarkGray),
        ))
        .centered(),
        server_area,
    );
}

fn draw_books(
    frame: &mut Frame,
    area: Rect,
    screen: &BookListScreen,
    tui: &mut TuiState,
    spinner: &str,
) {
    use Constraint::{Length, Min};
    let [search_area, content_area] = Layout::vertical([Length(3), Min(0)]).areas(area);

    tui.search_input.focused = screen.search_enabled() && !tui.detail_open;
    tui.search_input.render(frame, search_area);

    match screen.phase() {
        BooksPhase::Idle | BooksPhase::Loading(_) => draw_centered(
            frame,
            content_area,
            format!("{spinner} Загрузка списка книг..."),
            Style::default().fg(Color::Yellow),
        ),
        BooksPhase::Empty => draw_centered(
            frame,
            content_area,
            EMPTY_STATE_MESSAGE.to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        BooksPhase::MissingCard => draw_error(frame, content_area, MISSING_CARD_MESSAGE),
        BooksPhase::Failed(error) => draw_error(frame, content_area, &error.user_message()),
        BooksPhase::Populated => {
            let books = screen.books();
            if books.is_empty() {
                draw_centered(
                    frame,
                    content_area,
                    format!("Ничего не найдено по запросу «{}».", books.query().trim()),
                    Style::default().fg(Color::DarkGray),
                );
                return;
            }

            BookListView::new(books, &mut tui.book_list).render(frame, content_area);

            if tui.detail_open
                && let Some(book) = tui.book_list.selected().and_then(|i| books.get(i))
            {
                BookDetail::new(book).render(frame, content_area);
            }
        }
    }
}

fn draw_centered(frame: &mut Frame, area: Rect, text: String, style: Style) {
    let [line_area] = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .areas(area);
    frame.render_widget(
        Paragraph::new(text).style(style).alignment(Alignment::Center),
        line_area,
    );
}

fn draw_error(frame: &mut Frame, area: Rect, message: &str) {
    let [panel] = Layout::vertical([Constraint::Length(5)])
        .flex(Flex::Center)
        .areas(area);
    let paragraph = Paragraph::new(vec![
        Line::from(Span::styled(
            message,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "F5 — повторить",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(Block::bordered().title(" Ошибка ").border_style(Style::default().fg(Color::Red)))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, panel);
}

fn draw_footer(frame: &mut Frame, area: Rect, toast: Option<&Toast>, help: &str) {
    let line = match toast {
        Some(toast) => {
            let color = match toast.kind {
                ToastKind::Info => Color::Green,
                ToastKind::Error => Color::Red,
            };
            Line::from(Span::styled(
                format!(" {} ", toast.text),
                Style::default().fg(Color::Black).bg(color),
            ))
        }
        None => Line::from(Span::styled(help, Style::default().fg(Color::DarkGray))),
    };
    frame.render_widget(line, area);
}
