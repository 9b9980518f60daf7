//! Non-form pages: home, remote modules and not found

use super::components::{centered, render_key_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::router::RemoteModule;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const HOME_ENTRIES: &[(&str, &str)] = &[
    ("l", "Sign in"),
    ("f", "Forgot password"),
    ("b", "Blog"),
    ("p", "Profile"),
    ("a", "Admin"),
];

pub fn draw_home(frame: &mut Frame, area: Rect, title: &str, app: &App) {
    let height = 3 + HOME_ENTRIES.len() as u16 * BUTTON_HEIGHT + 2;
    let card = centered(area, 40, height);

    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let mut constraints = vec![Constraint::Length(3)];
    constraints.extend(HOME_ENTRIES.iter().map(|_| Constraint::Length(BUTTON_HEIGHT)));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let greeting = match &app.state.session {
        Some(session) => Line::from(vec![
            Span::raw("Welcome back, "),
            Span::styled(&session.email, Style::default().add_modifier(Modifier::BOLD)),
        ]),
        None => Line::from("Welcome to the portal."),
    };
    frame.render_widget(Paragraph::new(greeting), chunks[0]);

    let signed_in = app.state.session.is_some();
    for (idx, (key, label)) in HOME_ENTRIES.iter().enumerate() {
        // Already signed in: the auth entries stay visible but dim
        let enabled = !(signed_in && idx < 2);
        render_key_button(frame, chunks[idx + 1], key, label, enabled);
    }
}

pub fn draw_module(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    module: RemoteModule,
    subpath: &str,
) {
    let location = if subpath.is_empty() {
        format!("/{}", module.prefix())
    } else {
        format!("/{}/{}", module.prefix(), subpath)
    };
    let lines = vec![
        Line::from(Span::styled(
            module.title(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("The {} module is mounted at {location}.", module.title())),
        Line::from("Its pages are served by the module itself."),
    ];
    draw_card(frame, area, title, Color::Cyan, lines);
}

pub fn draw_not_found(frame: &mut Frame, area: Rect, title: &str, path: &str) {
    let lines = vec![
        Line::from(Span::styled(
            "404",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Nothing is mounted at {path}.")),
    ];
    draw_card(frame, area, title, Color::Red, lines);
}

fn draw_card(frame: &mut Frame, area: Rect, title: &str, color: Color, lines: Vec<Line>) {
    let card = centered(area, 60, lines.len() as u16 + 2);
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
        card,
    );
}
