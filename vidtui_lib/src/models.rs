/// Structs for the video metadata returned by the remote API.
///
/// The API omits fields freely, so everything that can be missing is an
/// `Option` or defaults to empty. Rendering code must cope with any
/// combination of absent fields.

use serde::{Serialize, Deserialize};

const WATCH_URL_BASE: &str = "https://www.youtube.com/watch?v=";

/// Badge type that marks a verified channel.
pub const VERIFIED_CHANNEL: &str = "VERIFIED_CHANNEL";

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Thumbnail {
    #[serde(default)]
    pub url: String
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Badge {
    #[serde(rename = "type", default)]
    pub badge_type: String
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct AuthorStats {
    pub subscribers_text: Option<String>
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Author {
    pub title: Option<String>,
    #[serde(default)]
    pub avatar: Vec<Thumbnail>,
    #[serde(default)]
    pub badges: Vec<Badge>,
    pub stats: Option<AuthorStats>
}

impl Author {

    /// True only when the first badge is exactly the verified-channel badge.
    pub fn is_verified(&self) -> bool {
        self.badges.first().map(|b| b.badge_type == VERIFIED_CHANNEL).unwrap_or(false)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct VideoStats {
    pub views: Option<u64>
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub video_id: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub thumbnails: Vec<Thumbnail>,
    pub length_seconds: Option<u64>,
    pub author: Option<Author>,
    pub stats: Option<VideoStats>,
    pub published_time_text: Option<String>
}

impl VideoSummary {

    pub fn is_verified(&self) -> bool {
        self.author.as_ref().map(Author::is_verified).unwrap_or(false)
    }

    pub fn views(&self) -> Option<u64> {
        self.stats.as_ref().and_then(|s| s.views)
    }

    pub fn author_title(&self) -> Option<&str> {
        self.author.as_ref()?.title.as_deref()
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        Some(self.thumbnails.first()?.url.as_str())
    }

    /// Conventional watch URL for the external player. A missing id yields
    /// a degenerate URL with an empty id segment, never an error.
    pub fn watch_url(&self) -> String {
        watch_url(self.video_id.as_deref().unwrap_or(""))
    }
}

pub fn watch_url(video_id: &str) -> String {
    format!("{WATCH_URL_BASE}{video_id}")
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RelatedEntry {
    #[serde(rename = "type", default)]
    pub entry_type: String,
    pub video: Option<VideoSummary>
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RelatedResultSet {
    #[serde(default)]
    pub contents: Vec<RelatedEntry>
}

impl RelatedResultSet {

    /// Entries the sidebar can render: video-typed ones that actually carry
    /// a video, in response order. Playlists and other entry types are
    /// skipped.
    pub fn videos(&self) -> impl Iterator<Item = &VideoSummary> {
        self.contents.iter()
            .filter(|e| e.entry_type == "video")
            .filter_map(|e| e.video.as_ref())
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn empty_object_decodes_to_defaults() {
        let video: VideoSummary = serde_json::from_str("{}").unwrap();
        assert!(video.video_id.is_none());
        assert!(video.thumbnails.is_empty());
        assert!(video.length_seconds.is_none());
        assert!(!video.is_verified());
        assert!(video.views().is_none());
        assert_eq!(video.watch_url(), "https://www.youtube.com/watch?v=");
    }

    #[test]
    fn decodes_full_summary() {
        let video: VideoSummary = serde_json::from_str(r#"{
            "videoId": "dQw4w9WgXcQ",
            "title": "Some video",
            "thumbnails": [{"url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hq720.jpg"}],
            "lengthSeconds": 212,
            "author": {
                "title": "Some channel",
                "avatar": [{"url": "https://yt3.ggpht.com/a"}],
                "badges": [{"type": "VERIFIED_CHANNEL"}],
                "stats": {"subscribersText": "1.2M subscribers"}
            },
            "stats": {"views": 1234567},
            "publishedTimeText": "3 years ago"
        }"#).unwrap();

        assert_eq!(video.video_id.as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(video.length_seconds, Some(212));
        assert!(video.is_verified());
        assert_eq!(video.views(), Some(1234567));
        assert_eq!(video.author_title(), Some("Some channel"));
        assert_eq!(video.thumbnail_url(), Some("https://i.ytimg.com/vi/dQw4w9WgXcQ/hq720.jpg"));
        assert_eq!(video.watch_url(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }

    #[test]
    fn verification_checks_only_the_first_badge() {
        let author: Author = serde_json::from_str(r#"{
            "badges": [{"type": "OFFICIAL_ARTIST_CHANNEL"}, {"type": "VERIFIED_CHANNEL"}]
        }"#).unwrap();
        assert!(!author.is_verified());

        let author: Author = serde_json::from_str(r#"{"badges": []}"#).unwrap();
        assert!(!author.is_verified());

        let author: Author = serde_json::from_str(r#"{"badges": [{"type": "VERIFIED_CHANNEL"}]}"#).unwrap();
        assert!(author.is_verified());
    }

    #[test]
    fn related_videos_filter_keeps_video_entries_in_order() {
        let related: RelatedResultSet = serde_json::from_str(r#"{
            "contents": [
                {"type": "video", "video": {"videoId": "a"}},
                {"type": "playlist"},
                {"type": "video", "video": {"videoId": "b"}},
                {"type": "shelf", "video": {"videoId": "nope"}},
                {"type": "video"}
            ]
        }"#).unwrap();

        let ids: Vec<&str> = related.videos()
            .filter_map(|v| v.video_id.as_deref())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
