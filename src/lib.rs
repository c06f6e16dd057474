pub mod config;
pub mod error;
pub mod gemini;
pub mod pipeline;
pub mod server;
pub mod summarize;
pub mod transcript;
pub mod youtube;

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub use error::{Error, Result};

/// A single captioned segment as returned by the transcript provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// Identifier of a YouTube video, as captured from a URL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// Tried in order; the first match wins. An ID stops at `&`, `?`, `/` or whitespace.
static URL_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"youtube\.com/watch\?v=([^&?/\s]+)").unwrap(),
        Regex::new(r"youtu\.be/([^&?/\s]+)").unwrap(),
        Regex::new(r"youtube\.com/embed/([^&?/\s]+)").unwrap(),
    ]
});

/// Extract the video ID from a watch, short-host or embed URL
pub fn extract_video_id(url: &str) -> Result<VideoId> {
    URL_PATTERNS
        .iter()
        .find_map(|re| re.captures(url))
        .map(|caps| VideoId(caps[1].to_string()))
        .ok_or_else(|| Error::InvalidUrl { url: url.to_string() })
}
