/// Full-density card grid over the current result set. Cards are laid out
/// row by row in response order; the selected card gets a highlighted
/// border.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use vidtui_lib::models::VideoSummary;

use super::card::{CardDensity, card_lines};

// Card height including its border.
const CARD_HEIGHT: u16 = 5;
const MIN_CARD_WIDTH: u16 = 38;

pub struct GridWidget {

    items: Vec<VideoSummary>,
    selected: usize,
    row_offset: usize,
    columns: usize
}

impl GridWidget {

    pub fn empty() -> Self {
        Self::with_items(Vec::new())
    }

    pub fn with_items(items: Vec<VideoSummary>) -> Self {

        Self {
            items,
            selected: 0,
            row_offset: 0,
            columns: 1
        }
    }

    pub fn selected(&self) -> Option<&VideoSummary> {
        self.items.get(self.selected)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn right(&mut self) {
        if self.selected + 1 < self.items.len() { self.selected += 1; }
    }

    pub fn left(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn down(&mut self) {
        let below = self.selected + self.columns;
        if below < self.items.len() { self.selected = below; }
    }

    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(self.columns);
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect) {

        self.columns = (area.width / MIN_CARD_WIDTH).max(1) as usize;
        let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;

        // Keep the selected card on screen.
        let selected_row = self.selected / self.columns;
        if selected_row < self.row_offset { self.row_offset = selected_row; }
        else if selected_row >= self.row_offset + visible_rows {
            self.row_offset = selected_row + 1 - visible_rows;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
            .split(area);

        for (row_ind, row_area) in rows.iter().enumerate() {

            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, self.columns as u32); self.columns])
                .split(*row_area);

            for (col_ind, cell) in cells.iter().enumerate() {

                let ind = (self.row_offset + row_ind) * self.columns + col_ind;
                let Some(video) = self.items.get(ind) else { continue };

                let border_color = if ind == self.selected { super::ACC_COLOR } else { Color::DarkGray };
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(border_color));

                let lines = card_lines(video, CardDensity::Full, cell.width.saturating_sub(2));
                frame.render_widget(Paragraph::new(lines).block(block), *cell);
            }
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn videos(n: usize) -> Vec<VideoSummary> {
        (0..n).map(|i| VideoSummary {
            video_id: Some(format!("video-{i}")),
            ..VideoSummary::default()
        }).collect()
    }

    #[test]
    fn movement_stays_in_bounds() {
        let mut grid = GridWidget::with_items(videos(5));
        grid.columns = 2;

        grid.left();
        assert_eq!(grid.selected().unwrap().video_id.as_deref(), Some("video-0"));

        grid.down();
        grid.down();
        assert_eq!(grid.selected().unwrap().video_id.as_deref(), Some("video-4"));
        grid.down();
        assert_eq!(grid.selected().unwrap().video_id.as_deref(), Some("video-4"));

        grid.up();
        grid.right();
        assert_eq!(grid.selected().unwrap().video_id.as_deref(), Some("video-3"));
    }

    #[test]
    fn empty_grid_selects_nothing() {
        let mut grid = GridWidget::empty();
        grid.right();
        grid.down();
        assert!(grid.selected().is_none());
    }
}
