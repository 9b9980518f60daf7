//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities
//! - `login`, `forgot_password`, `reset_password`: the auth pages

mod field_renderer;
mod forgot_password;
mod login;
mod reset_password;

pub use forgot_password::draw_forgot_password;
pub use login::draw_login;
pub use reset_password::draw_reset_password;

use super::components::{centered, render_button, render_error_banner, BUTTON_HEIGHT};
use crate::state::forms::{Form, FormModel, SubmissionPhase};
use field_renderer::{draw_field, draw_help_text, FIELD_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const CARD_WIDTH: u16 = 64;
const BANNER_HEIGHT: u16 = 3;

/// Static text around an auth form
pub struct FormView<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub submit_label: &'a str,
    /// Button text while the submission is in flight
    pub busy_label: &'a str,
    pub help: &'a str,
}

/// Draw a centered card with the form's banner, fields and submit button
pub fn draw_form(frame: &mut Frame, area: Rect, view: &FormView, form: &FormModel) {
    let submission = form.submission();
    let banner = match submission.phase {
        SubmissionPhase::Failed => submission.error_message.as_deref(),
        _ => None,
    };

    let field_count = form.field_count() as u16;
    let banner_rows = if banner.is_some() { BANNER_HEIGHT } else { 0 };
    // borders + subtitle + banner + fields + button + help
    let card_height = 2 + 2 + banner_rows + field_count * FIELD_HEIGHT + BUTTON_HEIGHT + 1;
    let card = centered(area, CARD_WIDTH, card_height);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", view.title),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let mut constraints = vec![Constraint::Length(2)];
    if banner.is_some() {
        constraints.push(Constraint::Length(BANNER_HEIGHT));
    }
    constraints.extend((0..field_count).map(|_| Constraint::Length(FIELD_HEIGHT)));
    constraints.push(Constraint::Length(BUTTON_HEIGHT));
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    frame.render_widget(
        Paragraph::new(view.subtitle)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true }),
        chunks[0],
    );

    let mut next = 1;
    if let Some(message) = banner {
        render_error_banner(frame, chunks[next], message);
        next += 1;
    }

    let submitting = form.is_submitting();
    for idx in 0..form.field_count() {
        let Some(field) = form.get_field(idx) else {
            continue;
        };
        let is_active = !submitting && idx == form.active_field();
        draw_field(
            frame,
            chunks[next],
            field,
            is_active,
            form.error_for(&field.name),
        );
        next += 1;
    }

    let label = if submitting {
        view.busy_label
    } else {
        view.submit_label
    };
    render_button(frame, chunks[next], label, !submitting, !submitting);
    draw_help_text(frame, chunks[next + 1], view.help);
}

/// Draw a centered message card with a key hint line below the text
pub fn draw_message_card(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    color: Color,
    lines: Vec<Line>,
    hint: &str,
) {
    let height = lines.len() as u16 + 5;
    let card = centered(area, CARD_WIDTH, height);

    let block = Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }),
        chunks[0],
    );
    draw_help_text(frame, chunks[1], hint);
}
