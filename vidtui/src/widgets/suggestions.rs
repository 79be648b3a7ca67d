/// Sidebar with compact suggestion cards, one per video-typed entry of the
/// related-contents response, in response order.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{List, ListItem, ListState};
use vidtui_lib::models::VideoSummary;

use super::card::{CardDensity, card_lines};

pub struct SuggestionsWidget {

    items: Vec<VideoSummary>,
    state: ListState
}

impl SuggestionsWidget {

    pub fn empty() -> Self {

        Self {
            items: Vec::new(),
            state: ListState::default()
        }
    }

    pub fn with_items(items: Vec<VideoSummary>) -> Self {

        Self {
            items,
            state: ListState::default()
        }
    }

    pub fn selected(&self) -> Option<&VideoSummary> {
        self.items.get(self.state.selected()?)
    }

    pub fn next(&mut self) {

        if self.items.is_empty() { return; }
        let next = match self.state.selected() {
            Some(i) => (i + 1) % self.items.len(),
            None => 0
        };
        self.state.select(Some(next));
    }

    pub fn previous(&mut self) {

        if self.items.is_empty() { return; }
        let previous = match self.state.selected() {
            Some(0) | None => self.items.len() - 1,
            Some(i) => i - 1
        };
        self.state.select(Some(previous));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect) {

        let width = area.width.saturating_sub(5);
        let items: Vec<ListItem> = self.items.iter()
            .map(|video| ListItem::new(card_lines(video, CardDensity::Compact, width)))
            .collect();

        let list = List::new(items)
            .block(super::BLOCK.clone().title("Suggestions"))
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(super::ACC_COLOR)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        frame.render_stateful_widget(list, area, &mut self.state);
    }
}
