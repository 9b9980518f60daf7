//! Reset-password views: invalid link, form, and success with redirect notice

use super::{draw_form, draw_message_card, FormView};
use crate::state::pages::{ResetPasswordForm, ResetPasswordPage};
use ratatui::{layout::Rect, style::Color, text::Line, Frame};

pub fn draw_reset_password(frame: &mut Frame, area: Rect, title: &str, page: &ResetPasswordPage) {
    match page {
        ResetPasswordPage::InvalidLink => draw_invalid_link(frame, area, title),
        ResetPasswordPage::Form(form) if form.succeeded() => {
            draw_success(frame, area, title, form)
        }
        ResetPasswordPage::Form(form) => {
            let view = FormView {
                title,
                subtitle: "Enter your new password below.",
                submit_label: "Reset password",
                busy_label: "Resetting...",
                help: "Tab:next  Enter:reset  Esc:back",
            };
            draw_form(frame, area, &view, &form.form);
        }
    }
}

fn draw_invalid_link(frame: &mut Frame, area: Rect, title: &str) {
    let lines = vec![
        Line::from("This password reset link is invalid or has expired."),
        Line::from(""),
        Line::from("Request a new link to reset your password."),
    ];
    draw_message_card(
        frame,
        area,
        title,
        Color::Red,
        lines,
        "Enter:request new link  l:sign in",
    );
}

fn draw_success(frame: &mut Frame, area: Rect, title: &str, form: &ResetPasswordForm) {
    let seconds = form
        .redirect()
        .map(|redirect| redirect.delay().as_secs_f32())
        .unwrap_or_default();
    let lines = vec![
        Line::from("Your password has been reset."),
        Line::from(""),
        Line::from(format!(
            "You will be redirected to the sign-in page in {seconds:.0} seconds."
        )),
    ];
    draw_message_card(
        frame,
        area,
        title,
        Color::Green,
        lines,
        "Enter:sign in now",
    );
}
