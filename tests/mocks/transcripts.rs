use std::sync::{Arc, Mutex};

use ytdigest::transcript::TranscriptProvider;
use ytdigest::{Segment, VideoId};

#[derive(Clone)]
pub struct MockTranscripts {
    pub segments: Vec<Segment>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockTranscripts {
    pub fn new(texts: &[&str]) -> Self {
        let segments = texts
            .iter()
            .enumerate()
            .map(|(i, text)| Segment {
                text: text.to_string(),
                start: i as f64 * 2.0,
                duration: 2.0,
            })
            .collect();
        Self {
            segments,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            segments: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl TranscriptProvider for MockTranscripts {
    async fn fetch_segments(&self, video_id: &VideoId) -> eyre::Result<Vec<Segment>> {
        self.calls.lock().unwrap().push(video_id.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(eyre::eyre!("{}", msg));
        }
        Ok(self.segments.clone())
    }
}
