//! Layout components (header, status bar, address bar)

use super::components::{render_dialog, DialogConfig};
use crate::app::App;
use crate::state::pages::{Page, ResetPasswordPage};
use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into header, content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the header: product name, current location and session
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let spans = vec![
        Span::styled(
            " Portal ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(app.state.location.href(), Style::default().fg(Color::Gray)),
    ];

    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    let session = match &app.state.session {
        Some(session) => format!(
            "● {} until {} ",
            session.email,
            session.expires_at().with_timezone(&Local).format("%H:%M")
        ),
        None => "○ signed out ".to_string(),
    };

    let width = session.chars().count() as u16;
    let session_area = Rect {
        x: area.x + area.width.saturating_sub(width),
        width: width.min(area.width),
        ..area
    };
    let color = if app.state.session.is_some() {
        Color::Green
    } else {
        Color::DarkGray
    };
    frame.render_widget(
        Paragraph::new(session).style(Style::default().fg(color)),
        session_area,
    );
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        format!(" {} ", get_page_hints(&app.state.page)),
        Style::default().fg(Color::Gray),
    )];

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw("| "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        width: (quit_hint.len() as u16).min(area.width),
        ..area
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Draw the address bar overlay while it is open
pub fn draw_route_prompt(frame: &mut Frame, input: &str) {
    let message = format!("{input}▌");
    let hint = vec![
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" to open, "),
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" to cancel"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: "Go to",
            title_color: Color::Cyan,
            border_color: Color::Cyan,
            message: &message,
            hint: Some(hint),
            ..Default::default()
        },
    );
}

/// Get keyboard hints for the mounted page
fn get_page_hints(page: &Page) -> &'static str {
    match page {
        Page::Home => "l:sign in  f:forgot password  b/p/a:modules  ::go to  q:quit",
        Page::Login(_) => "Tab:next  Enter:sign in  ^F:forgot  ^L:go to  Esc:back",
        Page::ForgotPassword(page) if page.link_sent() => "r:resend  l:sign in  Esc:back",
        Page::ForgotPassword(_) => "Enter:send link  ^L:go to  Esc:back",
        Page::ResetPassword(ResetPasswordPage::InvalidLink) => {
            "Enter:request new link  l:sign in  Esc:back"
        }
        Page::ResetPassword(ResetPasswordPage::Form(form)) if form.succeeded() => {
            "Enter:sign in now"
        }
        Page::ResetPassword(_) => "Tab:next  Enter:reset  ^L:go to  Esc:back",
        Page::Module { .. } | Page::NotFound { .. } => "h:home  ::go to  Esc:back",
    }
}
