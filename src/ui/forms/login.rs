use super::{draw_form, FormView};
use crate::state::pages::LoginPage;
use ratatui::{layout::Rect, Frame};

pub fn draw_login(frame: &mut Frame, area: Rect, title: &str, page: &LoginPage) {
    let view = FormView {
        title,
        subtitle: "Sign in to your portal account.",
        submit_label: "Sign in",
        busy_label: "Signing in...",
        help: "Tab:next  Enter:sign in  ^F:forgot password  Esc:back",
    };
    draw_form(frame, area, &view, &page.form);
}
