use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions, shared by drawing and mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLayout {
    pub header: Rect,
    pub totals: [Rect; 3],
    pub ranked: Rect,
    pub chart: Rect,
    pub deaths: Rect,
    pub recovered: Rect,
    pub footer: Rect,
}

impl DashboardLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(1),
            ])
            .split(area);

        let totals = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(rows[1]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[2]);

        let detail = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(body[1]);

        let lists = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(detail[1]);

        Self {
            header: rows[0],
            totals: [totals[0], totals[1], totals[2]],
            ranked: body[0],
            chart: detail[0],
            deaths: lists[0],
            recovered: lists[1],
            footer: rows[3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_stack_without_overlap() {
        let layout = DashboardLayout::new(Rect::new(0, 0, 120, 40));

        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.footer.y, 39);
        assert_eq!(layout.ranked.y, 6);
        assert!(layout.ranked.right() <= layout.chart.x);
        assert!(layout.chart.bottom() <= layout.deaths.y);
        assert_eq!(layout.deaths.y, layout.recovered.y);
    }
}
