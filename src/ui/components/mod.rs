//! Reusable UI components

mod button;
mod dialog;

pub use button::{render_button, render_key_button, BUTTON_HEIGHT};
pub use dialog::{render_dialog, render_error_banner, DialogConfig};

use ratatui::layout::Rect;

/// A `width` x `height` rect centered in `area`, clamped to fit
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fits_inside() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered(area, 40, 10), Rect::new(20, 7, 40, 10));
    }

    #[test]
    fn test_centered_clamps_to_area() {
        let area = Rect::new(2, 1, 30, 8);
        assert_eq!(centered(area, 60, 20), area);
    }
}
