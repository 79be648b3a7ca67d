use anyhow::Result;
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event;
use crossterm::event::{Event, KeyCode};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use tokio::runtime;
use tokio::sync::mpsc;

use vidtui_lib::api::{ApiClient, ApiError};
use vidtui_lib::fetch::{FetchSlot, LoadState};
use vidtui_lib::models::{RelatedResultSet, VideoSummary};

use crate::utils::{self, Message};
use crate::widgets::*;
use crate::widgets::grid::GridWidget;
use crate::widgets::loading::LoadingWidget;
use crate::widgets::suggestions::SuggestionsWidget;

#[derive(Clone, Copy)]
pub enum CurrentScreen {

    Detail,
    Grid,
    Controls,
    MpvError
}

pub struct VidtuiApp {

    current_screen: CurrentScreen,
    client: Arc<ApiClient>,
    runtime: Arc<runtime::Runtime>,
    sender: mpsc::Sender<Message>,
    recv: mpsc::Receiver<Message>,

    current_id: String,
    details: FetchSlot<VideoSummary>,
    related: FetchSlot<RelatedResultSet>,

    suggestions_widget: SuggestionsWidget,
    grid_widget: GridWidget,
    details_loading: LoadingWidget,
    related_loading: LoadingWidget
}

impl VidtuiApp {

    pub fn new(client: ApiClient, runtime: Arc<runtime::Runtime>, video_id: String) -> Self {

        let (sender, recv) = mpsc::channel::<Message>(5);
        Self {

            current_screen: CurrentScreen::Detail,
            client: Arc::new(client),
            runtime,
            sender,
            recv,

            current_id: video_id,
            details: FetchSlot::new(),
            related: FetchSlot::new(),

            suggestions_widget: SuggestionsWidget::empty(),
            grid_widget: GridWidget::empty(),
            details_loading: LoadingWidget::new("Fetching video details"),
            related_loading: LoadingWidget::new("Fetching related videos")
        }
    }

    pub fn run(&mut self) -> Result<()> {

        let tick_rate = Duration::from_millis(250);
        let mut last_tick = Instant::now();

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        self.open_video(self.current_id.clone());

        loop {

            terminal.draw(|f| self.draw(f))?;

            self.check_fetch_results();

            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));

            if crossterm::event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if self.process_input(key.code) { break; }
                }
            }
            if last_tick.elapsed() >= tick_rate { last_tick = Instant::now(); }
        }

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
        )?;

        terminal.show_cursor()?;

        Ok(())
    }

    /// Navigates to a video: this is the only trigger for the two fetches.
    /// Both slots start a new generation, so anything still in flight for
    /// the previous video can no longer land.
    pub fn open_video(&mut self, video_id: String) {

        log::info!("Opening video {video_id}");
        self.current_id = video_id;
        self.suggestions_widget = SuggestionsWidget::empty();
        self.grid_widget = GridWidget::empty();
        self.spawn_details_fetch();
        self.spawn_related_fetch();
    }

    fn spawn_details_fetch(&mut self) {

        let generation = self.details.begin();
        let client = Arc::clone(&self.client);
        let video_id = self.current_id.clone();
        let sender = self.sender.clone();
        self.runtime.spawn(async move {
            let result = client.fetch_video_details(&video_id).await;
            let _ = sender.send(Message::DetailsFetched(generation, result)).await;
        });
    }

    fn spawn_related_fetch(&mut self) {

        let generation = self.related.begin();
        let client = Arc::clone(&self.client);
        let video_id = self.current_id.clone();
        let sender = self.sender.clone();
        self.runtime.spawn(async move {
            let result = client.fetch_related_contents(&video_id).await;
            let _ = sender.send(Message::RelatedFetched(generation, result)).await;
        });
    }

    /// Re-issues only the slots that failed. Each slot retries on its own;
    /// a healthy slot is left alone.
    fn retry_failed(&mut self) {

        if self.details.failed().is_some() { self.spawn_details_fetch(); }
        if self.related.failed().is_some() { self.spawn_related_fetch(); }
    }

    fn check_fetch_results(&mut self) {

        while let Ok(message) = self.recv.try_recv() {
            self.handle_message(message);
        }
    }

    fn handle_message(&mut self, message: Message) {

        match message {
            Message::DetailsFetched(generation, result) => {
                if let Err(e) = &result { log::warn!("Video details fetch failed: {e}"); }
                self.details.commit(generation, result);
            },
            Message::RelatedFetched(generation, result) => {
                if let Err(e) = &result { log::warn!("Related contents fetch failed: {e}"); }
                if self.related.commit(generation, result) {
                    let videos: Vec<VideoSummary> = self.related.ready()
                        .map(|r| r.videos().cloned().collect())
                        .unwrap_or_default();
                    self.suggestions_widget = SuggestionsWidget::with_items(videos.clone());
                    self.grid_widget = GridWidget::with_items(videos);
                }
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame) {

        let area = frame.area();
        if area.width < 25 { draw_error_msg(frame, "-->(x_x)<--"); }
        else if area.height < 10 { draw_error_msg(frame, "Please make the terminal a bit taller :(") }
        else { match self.current_screen {

            CurrentScreen::Detail => self.draw_detail(frame, area),
            CurrentScreen::Grid => self.draw_grid(frame, area),
            CurrentScreen::Controls => draw_controls_screen(frame, area),
            CurrentScreen::MpvError => draw_error_msg(frame, "Please install mpv first.")
        }}
    }

    fn draw_detail(&mut self, frame: &mut Frame, area: Rect) {

        // The sidebar only fits on a reasonably wide terminal.
        if area.width < 70 {
            detail::draw(frame, area, &self.current_id, &self.details, &mut self.details_loading);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(40), Constraint::Length(44)].as_ref())
            .split(area);

        detail::draw(frame, chunks[0], &self.current_id, &self.details, &mut self.details_loading);
        self.draw_sidebar(frame, chunks[1]);
    }

    /// The related slot renders independently of the primary one: a failed
    /// or slow fetch here leaves the video section untouched.
    fn draw_sidebar(&mut self, frame: &mut Frame, area: Rect) {

        match self.related.state() {
            LoadState::Idle | LoadState::Pending => {
                frame.render_widget(BLOCK.clone().title("Suggestions"), area);
                self.related_loading.draw(frame, shrink(area));
            },
            LoadState::Failed(ApiError::Network(_)) => draw_sidebar_msg(frame, area, "Couldn't load suggestions.\nPress R to retry."),
            LoadState::Failed(_) => draw_sidebar_msg(frame, area, "No related videos."),
            LoadState::Ready(_) => {
                if self.suggestions_widget.is_empty() { draw_sidebar_msg(frame, area, "No related videos."); }
                else { self.suggestions_widget.draw(frame, area); }
            }
        }
    }

    fn draw_grid(&mut self, frame: &mut Frame, area: Rect) {

        match self.related.state() {
            LoadState::Idle | LoadState::Pending => self.related_loading.draw(frame, area),
            LoadState::Failed(ApiError::Network(_)) => draw_sidebar_msg(frame, area, "Couldn't load videos.\nPress R to retry."),
            LoadState::Failed(_) => draw_sidebar_msg(frame, area, "No videos to show."),
            LoadState::Ready(_) => {
                if self.grid_widget.is_empty() { draw_sidebar_msg(frame, area, "No videos to show."); }
                else { self.grid_widget.draw(frame, area); }
            }
        }
    }

    fn process_input(&mut self, key: KeyCode) -> bool {

        // The function returns true when the app needs to terminate.

        match self.current_screen {

            CurrentScreen::Detail => {
                match key {

                    KeyCode::Down => self.suggestions_widget.next(),
                    KeyCode::Up => self.suggestions_widget.previous(),
                    KeyCode::Enter => {
                        if let Some(video_id) = self.suggestions_widget.selected()
                            .and_then(|v| v.video_id.clone()) {
                            self.open_video(video_id);
                        }
                    },
                    KeyCode::Char('p') => self.play_current(),
                    KeyCode::Char('r') => self.retry_failed(),
                    KeyCode::Char('g') => { self.current_screen = CurrentScreen::Grid; },
                    KeyCode::Char('h') => { self.current_screen = CurrentScreen::Controls; },
                    KeyCode::Char('q') => return true,
                    _ => {}
                }
            },
            CurrentScreen::Grid => {
                match key {

                    KeyCode::Down => self.grid_widget.down(),
                    KeyCode::Up => self.grid_widget.up(),
                    KeyCode::Left => self.grid_widget.left(),
                    KeyCode::Right => self.grid_widget.right(),
                    KeyCode::Enter => {
                        if let Some(video_id) = self.grid_widget.selected()
                            .and_then(|v| v.video_id.clone()) {
                            self.open_video(video_id);
                            self.current_screen = CurrentScreen::Detail;
                        }
                    },
                    KeyCode::Char('r') => self.retry_failed(),
                    KeyCode::Char('g') | KeyCode::Char('q') | KeyCode::Esc => {
                        self.current_screen = CurrentScreen::Detail;
                    },
                    _ => {}
                }
            },
            CurrentScreen::Controls => { self.current_screen = CurrentScreen::Detail; },
            CurrentScreen::MpvError => { self.current_screen = CurrentScreen::Detail; }
        }

        false
    }

    fn play_current(&mut self) {

        if utils::probe_mpv() { utils::spawn_player(&self.current_id); }
        else { self.current_screen = CurrentScreen::MpvError; }
    }
}

fn draw_sidebar_msg(frame: &mut Frame, area: Rect, msg: &str) {

    let p = ratatui::widgets::Paragraph::new(msg)
        .block(BLOCK.clone().title("Suggestions"))
        .alignment(ratatui::layout::Alignment::Center);
    frame.render_widget(p, area);
}

fn shrink(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use vidtui_lib::models::RelatedEntry;

    fn test_app() -> VidtuiApp {
        // A current-thread runtime that is never driven: spawned fetch
        // tasks stay parked, so tests control settlement order by hand.
        let runtime = Arc::new(runtime::Builder::new_current_thread().build().unwrap());
        let client = ApiClient::new(String::from("http://127.0.0.1:9"), None);
        VidtuiApp::new(client, runtime, String::from("dQw4w9WgXcQ"))
    }

    fn video(id: &str) -> VideoSummary {
        VideoSummary { video_id: Some(String::from(id)), ..VideoSummary::default() }
    }

    fn related(ids: &[&str]) -> RelatedResultSet {
        let contents = ids.iter()
            .map(|&id| RelatedEntry {
                entry_type: String::from("video"),
                video: Some(video(id))
            })
            .collect();
        RelatedResultSet { contents }
    }

    #[test]
    fn stale_response_is_dropped_after_navigation() {
        let mut app = test_app();
        app.open_video(String::from("aaaaaaaaaaa"));
        // Navigate again while the first pair of fetches is in flight.
        app.open_video(String::from("bbbbbbbbbbb"));

        // Generation 1 belongs to the first navigation.
        app.handle_message(Message::DetailsFetched(1, Ok(video("aaaaaaaaaaa"))));
        assert!(app.details.ready().is_none());
        assert!(app.details.is_pending());

        app.handle_message(Message::DetailsFetched(2, Ok(video("bbbbbbbbbbb"))));
        assert_eq!(app.details.ready().unwrap().video_id.as_deref(), Some("bbbbbbbbbbb"));
    }

    #[test]
    fn slots_settle_independently() {
        let mut app = test_app();
        app.open_video(String::from("aaaaaaaaaaa"));

        app.handle_message(Message::RelatedFetched(1, Err(ApiError::Network(String::from("timed out")))));
        assert!(app.related.failed().is_some());
        // The primary slot is untouched by the sidebar failure.
        assert!(app.details.is_pending());

        app.handle_message(Message::DetailsFetched(1, Ok(video("aaaaaaaaaaa"))));
        assert!(app.details.ready().is_some());
        assert!(app.related.failed().is_some());
    }

    #[test]
    fn related_commit_rebuilds_suggestions_and_grid() {
        let mut app = test_app();
        app.open_video(String::from("aaaaaaaaaaa"));

        app.handle_message(Message::RelatedFetched(1, Ok(related(&["x", "y", "z"]))));
        assert_eq!(app.suggestions_widget.len(), 3);

        app.suggestions_widget.next();
        assert_eq!(app.suggestions_widget.selected().unwrap().video_id.as_deref(), Some("x"));
        assert_eq!(app.grid_widget.selected().unwrap().video_id.as_deref(), Some("x"));
    }

    #[test]
    fn navigation_clears_previous_suggestions() {
        let mut app = test_app();
        app.open_video(String::from("aaaaaaaaaaa"));
        app.handle_message(Message::RelatedFetched(1, Ok(related(&["x"]))));
        assert_eq!(app.suggestions_widget.len(), 1);

        app.open_video(String::from("bbbbbbbbbbb"));
        assert!(app.suggestions_widget.is_empty());
        assert!(app.related.is_pending());

        // The old related response arriving late changes nothing.
        app.handle_message(Message::RelatedFetched(1, Ok(related(&["x"]))));
        assert!(app.suggestions_widget.is_empty());
    }

    #[test]
    fn retry_reissues_only_failed_slots() {
        let mut app = test_app();
        app.open_video(String::from("aaaaaaaaaaa"));
        app.handle_message(Message::DetailsFetched(1, Ok(video("aaaaaaaaaaa"))));
        app.handle_message(Message::RelatedFetched(1, Err(ApiError::Network(String::from("boom")))));

        app.retry_failed();
        assert!(app.related.is_pending());
        // The successful details slot keeps its value.
        assert!(app.details.ready().is_some());

        // The retried fetch runs under generation 2.
        app.handle_message(Message::RelatedFetched(2, Ok(related(&["x"]))));
        assert_eq!(app.suggestions_widget.len(), 1);
    }
}
