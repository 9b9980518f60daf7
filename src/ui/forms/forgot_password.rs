//! Forgot-password views: the request form and the "check your email" card

use super::{draw_form, draw_message_card, FormView};
use crate::state::pages::ForgotPasswordPage;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

pub fn draw_forgot_password(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    page: &ForgotPasswordPage,
) {
    if page.link_sent() {
        draw_link_sent(frame, area, title, page.form.value("email"));
        return;
    }

    let view = FormView {
        title,
        subtitle: "Enter your email address and we'll send you a link to reset your password.",
        submit_label: "Send reset link",
        busy_label: "Sending...",
        help: "Enter:send link  Esc:back",
    };
    draw_form(frame, area, &view, &page.form);
}

fn draw_link_sent(frame: &mut Frame, area: Rect, title: &str, email: &str) {
    let lines = vec![
        Line::from(vec![
            Span::raw("We've sent a password reset link to "),
            Span::styled(email, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("."),
        ]),
        Line::from(""),
        Line::from("Didn't receive the email? Check your spam folder or send another link."),
    ];
    draw_message_card(
        frame,
        area,
        title,
        Color::Green,
        lines,
        "r:resend  l:back to sign in",
    );
}
