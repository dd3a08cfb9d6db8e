//! Popup placement shared by the help and detail overlays.

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// A `percent_x`-wide, `height`-tall rect centred in `r`. The height is
/// clamped to what `r` can hold.
pub fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(r.height))])
        .flex(Flex::Center)
        .areas(r);
    let [popup] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    popup
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_sits_in_the_middle() {
        let r = centered_rect(50, 10, Rect::new(0, 0, 100, 30));
        assert_eq!(r, Rect::new(25, 10, 50, 10));
    }

    #[test]
    fn height_is_clamped() {
        let r = centered_rect(50, 80, Rect::new(0, 0, 100, 30));
        assert_eq!(r.height, 30);
        assert_eq!(r.y, 0);
    }
}
