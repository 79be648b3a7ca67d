use ratatui::Frame;
use ratatui::layout::{Rect, Layout, Constraint, Alignment};
use ratatui::style::Style;
use ratatui::widgets::Paragraph;

/// Animated placeholder for a panel whose fetch is still pending. Each
/// fetch slot owns one, so two panels loading at once animate on their own.
pub struct LoadingWidget {
    label: String,
    frame: u16,
}

impl LoadingWidget {

    pub fn new(label: &str) -> Self {

        Self {
            label: label.to_string(),
            frame: 0
        }
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect) {

        let dots = ".".repeat(1 + (self.frame as usize % 3));
        self.frame = (self.frame + 1) % 3;
        let text = format!("{}{dots}", self.label);

        let p = Paragraph::new(text)
            .style(Style::default().fg(super::ACC_COLOR))
            .alignment(Alignment::Center);

        if area.height <= 2 { frame.render_widget(p, area); }
        else {
            // Center the label vertically inside the panel.
            let pad = (area.height - 1) / 2;
            let chunks = Layout::default()
                .direction(ratatui::layout::Direction::Vertical)
                .constraints([Constraint::Length(pad), Constraint::Length(1), Constraint::Min(0)])
                .split(area);

            frame.render_widget(p, chunks[1]);
        }
    }
}
