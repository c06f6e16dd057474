use std::future::Future;

use log::{error, info};

use crate::{Error, Result, Segment, VideoId};

/// Source of timed caption segments for a video
pub trait TranscriptProvider: Send + Sync {
    /// Fetch the caption segments in provider order
    fn fetch_segments(&self, video_id: &VideoId) -> impl Future<Output = eyre::Result<Vec<Segment>>> + Send;
}

/// Fetch the transcript of a video as a single space-joined string
pub async fn fetch_transcript<P: TranscriptProvider>(provider: &P, video_id: &VideoId) -> Result<String> {
    info!("Fetching transcript for video ID: {video_id}");

    let segments = provider.fetch_segments(video_id).await.map_err(|e| {
        error!("Failed to fetch transcript for {video_id}: {e:#}");
        Error::TranscriptUnavailable { cause: format!("{e:#}") }
    })?;

    let text = join_segments(&segments);
    info!("Fetched transcript for {video_id} ({} chars)", text.chars().count());
    Ok(text)
}

/// Fetch the raw segments of a video, provider errors passed through untouched
pub async fn fetch_transcript_with_timestamps<P: TranscriptProvider>(
    provider: &P,
    video_id: &VideoId,
) -> eyre::Result<Vec<Segment>> {
    info!("Fetching transcript with timestamps for video ID: {video_id}");
    let segments = provider
        .fetch_segments(video_id)
        .await
        .inspect_err(|e| error!("Failed to fetch transcript with timestamps: {e:#}"))?;
    info!("Fetched {} transcript segments", segments.len());
    Ok(segments)
}

fn join_segments(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect::<Vec<_>>().join(" ")
}
