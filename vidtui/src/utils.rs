use std::env;
use std::fs::create_dir_all;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use regex::Regex;
use vidtui_lib::api::ApiError;
use vidtui_lib::models::{RelatedResultSet, VideoSummary, watch_url};

/// Messages sent back to the app loop by the background fetch tasks. Each
/// carries the generation of the fetch that produced it.
#[derive(Debug)]
pub enum Message {
    DetailsFetched(u64, Result<VideoSummary, ApiError>),
    RelatedFetched(u64, Result<RelatedResultSet, ApiError>)
}

/// Extracts a video id from a watch URL, a short URL or a bare id.
pub fn parse_video_arg(arg: &str) -> Option<String> {

    let re = Regex::new(r"^https?://(?:w{3}\.)?(?:youtube\.com/watch\?(?:.+&)*v=|youtu\.be/)([A-Za-z0-9_-]{11})(?:[&?].*)?$").expect("Failed to compile regex.");
    if let Some(captures) = re.captures(arg) {
        return Some(String::from(&captures[1]));
    }

    let bare = Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("Failed to compile regex.");
    bare.is_match(arg).then(|| String::from(arg))
}

pub fn probe_mpv() -> bool {

    let child = Command::new("mpv")
        .arg("--version")
        .stderr(Stdio::null())
        .stdout(Stdio::null())
        .spawn();

    child.is_ok()
}

/// Hands the video off to mpv, which streams and plays it on its own. The
/// player is an external collaborator; a failed spawn is logged, not fatal.
pub fn spawn_player(video_id: &str) {

    let url = watch_url(video_id);
    let child = Command::new("mpv")
        .arg(&url)
        .stderr(Stdio::null())
        .stdout(Stdio::null())
        .spawn();

    match child {
        Ok(_) => log::info!("Spawned mpv for {url}"),
        Err(e) => log::warn!("Failed to spawn mpv: {e}")
    }
}

/// Directory where the data will be stored.
fn get_data_dir() -> PathBuf {
       let mut data_dir = dirs::data_dir().expect("Failed to create data directory.");
       data_dir.push("vidtui");
       create_dir_all(data_dir.clone()).expect("Failed to create data directory.");
       data_dir
}

pub fn get_log_path() -> Option<PathBuf> {

    match env::var("LOG_PATH") {
        Ok(var) => Some(PathBuf::from(var)),
        Err(_) => {
            let mut data_dir = get_data_dir();
            data_dir.push("log.txt");
            Some(data_dir)
        }
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    let mut config_dir = dirs::config_dir()?;
    config_dir.push("vidtui/vidtui.config");
    Some(config_dir)
}
