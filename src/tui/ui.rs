//! Main UI renderer

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::sentry::tag::TagsApi;
use crate::tui::app::App;
use crate::tui::screens::tags::{self, PendingDelete, CONFIRM_MESSAGE, CONFIRM_TITLE};
use crate::tui::theme::Theme;

/// Spinner frames shown while a request is in flight
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Render the UI
pub fn render<C: TagsApi>(frame: &mut Frame, app: &App<C>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    tags::render(frame, chunks[1], &app.tags);
    render_status_bar(frame, chunks[2], app);

    if let Some(pending) = &app.tags.confirm {
        render_confirm_dialog(frame, pending);
    }

    // Render help overlay on top if active
    if app.show_help {
        render_help_overlay(frame);
    }
}

/// Render the header
fn render_header<C: TagsApi>(frame: &mut Frame, area: Rect, app: &App<C>) {
    let title = format!(
        " project-tags │ {} │ {} ",
        app.tags.project.full_name(),
        tags::PAGE_TITLE
    );

    let header = Paragraph::new(title)
        .style(Theme::header())
        .block(Block::default().borders(Borders::BOTTOM));

    frame.render_widget(header, area);
}

/// Render the status bar
fn render_status_bar<C: TagsApi>(frame: &mut Frame, area: Rect, app: &App<C>) {
    let busy = app.tags.tags.is_loading() || !app.tags.deleting.is_empty();
    let spinner = if busy {
        SPINNER[(app.tick_counter % SPINNER.len() as u64) as usize]
    } else {
        " "
    };

    let status_text = match &app.tags.status_message {
        Some(msg) => format!(" {} {}", spinner, msg),
        None => format!(" {} ? for help ", spinner),
    };

    let status = Paragraph::new(status_text)
        .style(Theme::status_bar())
        .block(Block::default().borders(Borders::TOP));

    frame.render_widget(status, area);
}

/// Centered popup rectangle, clamped to the frame
fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Render the delete confirmation dialog
fn render_confirm_dialog(frame: &mut Frame, pending: &PendingDelete) {
    let area = popup_area(frame.area(), 56, 8);

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let text = vec![
        Line::from(""),
        Line::from(format!("  {}", CONFIRM_MESSAGE)),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(pending.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("  ({})", pending.key), Theme::muted()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [y/Enter]", Style::default().fg(Theme::ERROR)),
            Span::raw(" Remove   "),
            Span::styled("[n/Esc]", Style::default().fg(Theme::PRIMARY)),
            Span::raw(" Cancel"),
        ]),
    ];

    let dialog = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(format!(" {} ", CONFIRM_TITLE))
                .borders(Borders::ALL)
                .border_style(Theme::dialog_border()),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(dialog, area);
}

/// Render the help overlay
fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    // 60% width, 70% height
    let popup = popup_area(
        area,
        (area.width * 60 / 100).min(60),
        (area.height * 70 / 100).min(20),
    );

    frame.render_widget(Clear, popup);

    let text: Vec<Line> = help_content()
        .into_iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("  {:12}", key), Style::default().fg(Color::Cyan)),
                Span::raw(desc),
            ])
        })
        .collect();

    let help = Paragraph::new(text)
        .block(
            Block::default()
                .title(" Help - Tags ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help, popup);
}

fn help_content() -> Vec<(&'static str, &'static str)> {
    vec![
        ("j / ↓", "Move down"),
        ("k / ↑", "Move up"),
        ("d / Del", "Remove selected tag"),
        ("r", "Reload tags"),
        ("o", "Open tag documentation"),
        ("q / Esc", "Quit"),
        ("?", "Show this help"),
    ]
}
