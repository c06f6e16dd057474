use eyre::WrapErr;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::summarize::{SummaryResult, TextGenerator, generate_summary};
use crate::transcript::{TranscriptProvider, fetch_transcript};
use crate::{Error, Result, VideoId, extract_video_id};

pub const PLACEHOLDER_DURATION: &str = "N/A";

/// Body of a process request. Fields are optional on the wire so a missing
/// one is reported as a validation failure instead of a decode error.
#[derive(Clone, Default, Deserialize)]
pub struct ProcessRequest {
    #[serde(default)]
    pub youtube_url: Option<String>,
    #[serde(default)]
    pub gemini_api_key: Option<String>,
}

impl std::fmt::Debug for ProcessRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessRequest")
            .field("youtube_url", &self.youtube_url)
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ProcessRequest {
    pub fn new(youtube_url: impl Into<String>, gemini_api_key: impl Into<String>) -> Self {
        Self {
            youtube_url: Some(youtube_url.into()),
            gemini_api_key: Some(gemini_api_key.into()),
        }
    }

    /// Borrow both required fields, rejecting absent or empty values
    fn required_fields(&self) -> Result<(&str, &str)> {
        let url = required(&self.youtube_url, "youtube_url")?;
        let key = required(&self.gemini_api_key, "gemini_api_key")?;
        Ok((url, key))
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::RequestValidation(format!("missing required field: {name}"))),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub timestamp: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub video_title: String,
    pub duration: String,
    pub summary: String,
    pub chapters: Vec<Chapter>,
}

impl ProcessResponse {
    /// Build the response record; title and duration are placeholders
    pub fn assemble(video_id: &VideoId, result: SummaryResult) -> Result<Self> {
        let summary = serde_json::from_value(result.summary).wrap_err("summary is not a string")?;
        let chapters = result
            .chapters
            .into_iter()
            .enumerate()
            .map(|(i, chapter)| serde_json::from_value(chapter).wrap_err_with(|| format!("chapter {i} is malformed")))
            .collect::<eyre::Result<Vec<Chapter>>>()?;

        Ok(Self {
            video_title: format!("Video {video_id}"),
            duration: PLACEHOLDER_DURATION.to_string(),
            summary,
            chapters,
        })
    }
}

/// URL parser, transcript fetcher and summary generator run in sequence
pub struct Pipeline<T, G> {
    transcripts: T,
    generator: G,
}

impl<T: TranscriptProvider, G: TextGenerator> Pipeline<T, G> {
    pub fn new(transcripts: T, generator: G) -> Self {
        Self { transcripts, generator }
    }

    pub async fn process(&self, request: &ProcessRequest) -> Result<ProcessResponse> {
        let (url, api_key) = request.required_fields().inspect_err(|e| warn!("Rejected request: {e}"))?;
        info!("Processing video URL: {url}");

        let video_id = extract_video_id(url).inspect_err(|e| warn!("Invalid YouTube URL: {e}"))?;
        let transcript = fetch_transcript(&self.transcripts, &video_id).await?;
        let result = generate_summary(&self.generator, &transcript, api_key).await?;
        let response = ProcessResponse::assemble(&video_id, result)?;

        info!("Video processing completed for {video_id}");
        Ok(response)
    }
}
