pub mod card;
pub mod detail;
pub mod grid;
pub mod loading;
pub mod suggestions;

use ratatui::style::{Style, Color};
use ratatui::widgets::{Paragraph, Block, Borders, BorderType};
use ratatui::Frame;
use ratatui::layout::{Rect, Alignment, Layout, Constraint};
use lazy_static::lazy_static;


static FIGURE: &str  =
r"
     ;;;;;;;;;;;;;;;;;;;
     ;;;;;;;;;;;;;;;;;;;
     ;                 ;
     ;                 ;
     ;     (⋟ ﹏ ⋞)    ;
     ;                 ;
     ;                 ;
     ;                 ;
     ;                 ;
,;;;;;            ,;;;;;
;;;;;;            ;;;;;;
`;;;;'            `;;;;'      ";

static CONTROLS: &str =
"\
↑/↓  select a suggestion.
↵    open the selected video.
P    play the current video in mpv.
R    retry a failed fetch.
G    toggle the card grid.
Q    quit (or close the grid).

Press any key to close this screen.";

// Accent color.
pub const ACC_COLOR: Color = Color::LightBlue;
lazy_static! {

    // Default block.
    pub static ref BLOCK: Block<'static> = {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACC_COLOR))
    };
}

pub fn draw_controls_screen(frame: &mut Frame, area: Rect) {

    let p = Paragraph::new(CONTROLS)
        .block(BLOCK.clone().title("Controls"))
        .alignment(Alignment::Left);

    frame.render_widget(p, area);
}

pub fn draw_error_msg(frame: &mut Frame, msg: &str) {

    if frame.area().height < 20 {
        frame.render_widget(Paragraph::new(msg).style(Style::default().fg(Color::Red)).alignment(Alignment::Center), frame.area());
    }
    else {
        let chunks = Layout::default()
            .direction(ratatui::layout::Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Length(frame.area().height - 4)])
            .margin(1)
            .split(frame.area());

        frame.render_widget(Paragraph::new(msg).style(Style::default().fg(Color::Red)).alignment(Alignment::Center), chunks[0]);
        frame.render_widget(Paragraph::new(FIGURE).style(Style::default().fg(Color::Red)).alignment(Alignment::Center), chunks[1]);
    }
}

/// Truncates to a width, appending an ellipsis when something was cut.
pub fn truncate_str(text: &str, max_chars: usize) -> String {

    if text.chars().count() <= max_chars { return String::from(text); }
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn truncation() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("exactly ten", 11), "exactly ten");
        assert_eq!(truncate_str("a longer title here", 10), "a longer …");
        assert_eq!(truncate_str("anything", 0), "…");
    }
}
