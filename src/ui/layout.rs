use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the scroll indicator column on the right edge.
const INDICATOR_WIDTH: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiLayout {
    pub nav: Rect,
    pub viewer: Rect,
    pub indicators: Rect,
    pub status: Rect,
}

pub fn split_layout(area: Rect, debug_status_visible: bool) -> UiLayout {
    let status_height = if debug_status_visible { 2 } else { 1 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(status_height),
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(INDICATOR_WIDTH)])
        .split(rows[1]);

    UiLayout {
        nav: rows[0],
        viewer: columns[0],
        indicators: columns[1],
        status: rows[2],
    }
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::split_layout;

    #[test]
    fn split_layout_reserves_nav_status_and_indicators() {
        let area = Rect::new(0, 0, 120, 40);

        let layout = split_layout(area, false);
        assert_eq!(layout.nav.height, 1);
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.viewer.height, 38);
        assert_eq!(layout.viewer.width, 118);
        assert_eq!(layout.indicators.width, 2);
        assert_eq!(layout.indicators.x, 118);
    }

    #[test]
    fn split_layout_with_debug_reserves_two_status_rows() {
        let layout = split_layout(Rect::new(0, 0, 120, 40), true);
        assert_eq!(layout.status.height, 2);
        assert_eq!(layout.viewer.height, 37);
    }
}
