mod app;
mod utils;
mod widgets;

use std::env;
use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, bail};
use app::VidtuiApp;
use argh::FromArgs;
use simplelog::{Config, LevelFilter, WriteLogger};
use tokio::runtime;
use vidtui_lib::api::ApiClient;

#[derive(FromArgs)]
/// A terminal front end for browsing and watching online videos.
struct VidtuiArgs {

    /// video URL or 11 character video id to open.
    #[argh(positional)]
    pub video: String,
}

fn main() -> anyhow::Result<()> {

    let args: VidtuiArgs = argh::from_env();

    if let Some(config_path) = utils::get_config_path() {
        // Parse the config file. If it fails, plain env values will be used instead.
        let _ = dotenvy::from_path(config_path);
    }

    if let Some(log_path) = utils::get_log_path() {
        if let Ok(file) = File::create(&log_path) {
            let _ = WriteLogger::init(LevelFilter::Info, Config::default(), file);
        }
    }

    let Some(video_id) = utils::parse_video_arg(&args.video) else {
        bail!("Invalid argument: expected a video URL or an 11 character video id.");
    };

    let base_url = env::var("VIDTUI_API_URL")
        .context("VIDTUI_API_URL is not set. Add it to the config file or the environment.")?;
    let api_key = env::var("VIDTUI_API_KEY").ok();

    let runtime = Arc::new(runtime::Builder::new_multi_thread().enable_all().build()?);
    let client = ApiClient::new(base_url, api_key);

    let mut app = VidtuiApp::new(client, runtime, video_id);
    app.run()
}
