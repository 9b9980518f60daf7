//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod pages;

use crate::app::App;
use crate::state::pages::Page;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, main_area, status_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, app);

    // Draw main content for the mounted page
    let title = app.state.page.title();
    match &app.state.page {
        Page::Home => pages::draw_home(frame, main_area, &title, app),
        Page::Login(page) => forms::draw_login(frame, main_area, &title, page),
        Page::ForgotPassword(page) => {
            forms::draw_forgot_password(frame, main_area, &title, page)
        }
        Page::ResetPassword(page) => forms::draw_reset_password(frame, main_area, &title, page),
        Page::Module { module, subpath } => {
            pages::draw_module(frame, main_area, &title, *module, subpath)
        }
        Page::NotFound { path } => pages::draw_not_found(frame, main_area, &title, path),
    }

    layout::draw_status_bar(frame, status_area, app);

    if let Some(input) = &app.state.route_prompt {
        layout::draw_route_prompt(frame, input);
    }
}
