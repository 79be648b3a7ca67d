/// The primary section of the detail page: the player panel and the video
/// metadata below it. Renders entirely from its own fetch slot, so a
/// failed or slow related-contents fetch never blanks this section.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use vidtui_lib::api::ApiError;
use vidtui_lib::fetch::{FetchSlot, LoadState};
use vidtui_lib::format::abbreviate_count;
use vidtui_lib::models::{VideoSummary, watch_url};

use super::loading::LoadingWidget;

pub fn draw(frame: &mut Frame, area: Rect, video_id: &str, slot: &FetchSlot<VideoSummary>, loading: &mut LoadingWidget) {

    match slot.state() {
        LoadState::Idle | LoadState::Pending => {
            frame.render_widget(super::BLOCK.clone().title("Video"), area);
            loading.draw(frame, inner(area));
        },
        LoadState::Failed(ApiError::Network(_)) => draw_message(frame, area, "Couldn't reach the video service.\nPress R to retry.", Color::Red),
        // Malformed responses were already logged; to the user the video
        // simply isn't there.
        LoadState::Failed(_) => draw_message(frame, area, "Video not found.", Color::DarkGray),
        LoadState::Ready(video) => draw_video(frame, area, video_id, video)
    }
}

fn draw_video(frame: &mut Frame, area: Rect, video_id: &str, video: &VideoSummary) {

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);

    draw_player_panel(frame, chunks[0], video_id);
    draw_metadata(frame, chunks[1], video);
}

/// Playback itself belongs to the external player; this panel only shows
/// where the video lives and how to hand it off.
fn draw_player_panel(frame: &mut Frame, area: Rect, video_id: &str) {

    let lines = vec![
        Line::from(Span::styled(watch_url(video_id), Style::default().fg(super::ACC_COLOR))),
        Line::from(Span::styled("press P to play in mpv", Style::default().fg(Color::DarkGray)))
    ];

    let p = Paragraph::new(lines)
        .block(super::BLOCK.clone().title("Player"))
        .alignment(Alignment::Center);

    frame.render_widget(p, area);
}

fn draw_metadata(frame: &mut Frame, area: Rect, video: &VideoSummary) {

    let width = area.width.saturating_sub(4) as usize;
    let title = super::truncate_str(video.title.as_deref().unwrap_or("(untitled)"), width.max(8));

    let mut author_spans: Vec<Span> = Vec::new();
    if let Some(author) = video.author_title() {
        author_spans.push(Span::styled(author.to_string(), Style::default().fg(Color::Gray)));
    }
    if video.is_verified() {
        author_spans.push(Span::styled(" ✓", Style::default().fg(Color::DarkGray)));
    }
    if let Some(subscribers) = video.author.as_ref()
        .and_then(|a| a.stats.as_ref())
        .and_then(|s| s.subscribers_text.as_deref()) {
        author_spans.push(Span::styled(format!("  ·  {subscribers}"), Style::default().fg(Color::DarkGray)));
    }

    let mut stats_spans = vec![
        Span::styled(format!("{} views", abbreviate_count(video.views())), Style::default().fg(Color::DarkGray))
    ];
    if let Some(published) = &video.published_time_text {
        stats_spans.push(Span::styled(format!("  ·  {published}"), Style::default().fg(Color::DarkGray)));
    }

    let lines = vec![
        Line::from(Span::styled(title, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(author_spans),
        Line::from(stats_spans)
    ];

    frame.render_widget(Paragraph::new(lines).block(super::BLOCK.clone()), area);
}

fn draw_message(frame: &mut Frame, area: Rect, msg: &str, color: Color) {

    let p = Paragraph::new(msg)
        .style(Style::default().fg(color))
        .block(super::BLOCK.clone().title("Video"))
        .alignment(Alignment::Center);

    frame.render_widget(p, area);
}

fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2)
    }
}
