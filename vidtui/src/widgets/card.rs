/// The video card renderer.
///
/// One renderer for both the grid cards and the suggestion sidebar, with a
/// density option instead of two near-identical layouts. Pure: lines out,
/// no state touched, and any combination of missing fields renders blank
/// regions instead of failing.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use vidtui_lib::format::{abbreviate_count, duration_str};
use vidtui_lib::models::VideoSummary;

use super::truncate_str;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum CardDensity {
    /// Grid card: title, author, stats on separate lines.
    Full,
    /// Sidebar card: title plus a single metadata line.
    Compact
}

const NO_TITLE: &str = "(untitled)";

pub fn card_lines(video: &VideoSummary, density: CardDensity, width: u16) -> Vec<Line<'static>> {

    let width = width as usize;
    let title = truncate_str(video.title.as_deref().unwrap_or(NO_TITLE), width.max(8));
    let title_line = Line::from(Span::styled(title, Style::default().add_modifier(Modifier::BOLD)));

    match density {
        CardDensity::Full => vec![
            title_line,
            author_line(video),
            stats_line(video)
        ],
        CardDensity::Compact => {
            let mut spans = author_spans(video);
            if !spans.is_empty() { spans.push(Span::raw(" · ")); }
            spans.extend(stats_spans(video));
            vec![title_line, Line::from(spans)]
        }
    }
}

fn author_line(video: &VideoSummary) -> Line<'static> {
    Line::from(author_spans(video))
}

/// Author name plus the verification check. The check appears only when
/// the channel's first badge is the verified badge.
fn author_spans(video: &VideoSummary) -> Vec<Span<'static>> {

    let mut spans = Vec::new();
    if let Some(author) = video.author_title() {
        spans.push(Span::styled(author.to_string(), Style::default().fg(Color::Gray)));
    }
    if video.is_verified() {
        spans.push(Span::styled(" ✓", Style::default().fg(Color::DarkGray)));
    }

    spans
}

fn stats_line(video: &VideoSummary) -> Line<'static> {
    Line::from(stats_spans(video))
}

/// Abbreviated view count, published time and the duration tag. A video
/// with a known zero length still gets a "0:00" tag; only an unknown
/// length drops the tag entirely.
fn stats_spans(video: &VideoSummary) -> Vec<Span<'static>> {

    let mut spans = vec![
        Span::styled(format!("{} views", abbreviate_count(video.views())), Style::default().fg(Color::DarkGray))
    ];
    if let Some(published) = &video.published_time_text {
        spans.push(Span::styled(format!(" · {published}"), Style::default().fg(Color::DarkGray)));
    }
    if let Some(seconds) = video.length_seconds {
        spans.push(Span::styled(format!(" [{}]", duration_str(seconds)), Style::default().fg(super::ACC_COLOR)));
    }

    spans
}

#[cfg(test)]
mod tests {

    use super::*;
    use vidtui_lib::models::{Author, Badge, VideoStats};

    fn flatten(lines: &[Line]) -> String {
        lines.iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.as_ref()))
            .collect()
    }

    fn sample() -> VideoSummary {
        VideoSummary {
            video_id: Some(String::from("dQw4w9WgXcQ")),
            title: Some(String::from("Some video")),
            length_seconds: Some(212),
            author: Some(Author {
                title: Some(String::from("Some channel")),
                badges: vec![Badge { badge_type: String::from("VERIFIED_CHANNEL") }],
                ..Author::default()
            }),
            stats: Some(VideoStats { views: Some(1_234_567) }),
            published_time_text: Some(String::from("3 years ago")),
            ..VideoSummary::default()
        }
    }

    #[test]
    fn renders_every_field_in_both_densities() {
        for density in [CardDensity::Full, CardDensity::Compact] {
            let text = flatten(&card_lines(&sample(), density, 60));
            assert!(text.contains("Some video"));
            assert!(text.contains("Some channel"));
            assert!(text.contains(" ✓"));
            assert!(text.contains("1.2M views"));
            assert!(text.contains("3 years ago"));
            assert!(text.contains("[3:32]"));
        }
    }

    #[test]
    fn empty_record_renders_without_panicking() {
        let video = VideoSummary::default();
        for density in [CardDensity::Full, CardDensity::Compact] {
            let text = flatten(&card_lines(&video, density, 40));
            assert!(text.contains("(untitled)"));
            assert!(text.contains("- views"));
            assert!(!text.contains('✓'));
            assert!(!text.contains('['));
        }
    }

    #[test]
    fn zero_duration_is_distinct_from_missing_duration() {
        let mut video = sample();
        video.length_seconds = Some(0);
        assert!(flatten(&card_lines(&video, CardDensity::Full, 60)).contains("[0:00]"));

        video.length_seconds = None;
        assert!(!flatten(&card_lines(&video, CardDensity::Full, 60)).contains('['));
    }

    #[test]
    fn check_only_for_verified_first_badge() {
        let mut video = sample();
        video.author.as_mut().unwrap().badges[0].badge_type = String::from("OFFICIAL_ARTIST_CHANNEL");
        assert!(!flatten(&card_lines(&video, CardDensity::Compact, 60)).contains('✓'));

        video.author.as_mut().unwrap().badges.clear();
        assert!(!flatten(&card_lines(&video, CardDensity::Compact, 60)).contains('✓'));
    }

    #[test]
    fn long_titles_are_truncated() {
        let mut video = sample();
        video.title = Some("A very long title that would never fit on a narrow card".repeat(3));
        let lines = card_lines(&video, CardDensity::Full, 30);
        assert!(lines[0].spans[0].content.chars().count() <= 30);
    }
}
