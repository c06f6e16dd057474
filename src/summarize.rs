use std::future::Future;

use log::{error, info};
use serde_json::Value;

use crate::{Error, Result};

/// Longest prefix of a bad provider response kept for diagnostics
const PREVIEW_CHARS: usize = 500;

/// Generative-text backend: prompt in, free-form text out
pub trait TextGenerator: Send + Sync {
    /// Run one completion, authenticated with the caller's key
    fn generate(&self, prompt: &str, api_key: &str) -> impl Future<Output = eyre::Result<String>> + Send;
}

/// Parsed provider output. Chapter entries are passed through unchecked.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryResult {
    pub summary: Value,
    pub chapters: Vec<Value>,
}

pub fn build_prompt(transcript: &str) -> String {
    format!(
        r#"Analyze this YouTube video transcript and provide:
1. A concise summary (3-5 sentences)
2. Simple chapter breakdown with timestamps in format HH:MM:SS, titles, and brief descriptions

Format the response as JSON:
{{
  "summary": "...",
  "chapters": [
    {{"timestamp": "00:00:00", "title": "...", "description": "..."}},
    ...
  ]
}}

Transcript: {transcript}
"#
    )
}

/// Ask the generator for a summary and chapter list and validate its shape
pub async fn generate_summary<G: TextGenerator>(generator: &G, transcript: &str, api_key: &str) -> Result<SummaryResult> {
    info!("Generating summary and chapters ({} transcript chars)", transcript.chars().count());

    let prompt = build_prompt(transcript);
    let response_text = generator.generate(&prompt, api_key).await.map_err(|e| {
        error!("Generative text provider error: {e:#}");
        Error::ProviderFailure(format!("{e:#}"))
    })?;
    info!("Received response from generative text provider");

    let result = parse_summary(&response_text)?;
    info!("Generated summary and {} chapters", result.chapters.len());
    Ok(result)
}

/// Parse provider text into a [`SummaryResult`]
pub fn parse_summary(response_text: &str) -> Result<SummaryResult> {
    let json_text = extract_json_text(response_text);

    let parsed: Value = serde_json::from_str(json_text).map_err(|source| {
        let preview: String = response_text.chars().take(PREVIEW_CHARS).collect();
        error!("Failed to parse JSON response: {source}");
        error!("Response text: {preview}");
        Error::MalformedResponse { source, preview }
    })?;

    let Value::Object(mut fields) = parsed else {
        return Err(Error::IncompleteResponse);
    };
    let (Some(summary), Some(chapters)) = (fields.remove("summary"), fields.remove("chapters")) else {
        return Err(Error::IncompleteResponse);
    };
    let Value::Array(chapters) = chapters else {
        return Err(Error::InvalidChaptersShape);
    };

    Ok(SummaryResult { summary, chapters })
}

/// Pick the candidate JSON text out of a possibly fenced response
fn extract_json_text(text: &str) -> &str {
    if let Some(body) = fenced_body(text, "```json") {
        return body;
    }
    if let Some(body) = fenced_body(text, "```") {
        return body;
    }
    text
}

// Text between `opener` and the next closing fence; an unclosed block runs to the end
fn fenced_body<'a>(text: &'a str, opener: &str) -> Option<&'a str> {
    let start = text.find(opener)? + opener.len();
    let rest = &text[start..];
    let end = rest.find("```").unwrap_or(rest.len());
    Some(rest[..end].trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct StubGenerator {
        reply: std::result::Result<String, String>,
        keys: Mutex<Vec<String>>,
    }

    impl StubGenerator {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                keys: Mutex::new(Vec::new()),
            }
        }

        fn failing(msg: &str) -> Self {
            Self {
                reply: Err(msg.to_string()),
                keys: Mutex::new(Vec::new()),
            }
        }
    }

    impl TextGenerator for StubGenerator {
        async fn generate(&self, _prompt: &str, api_key: &str) -> eyre::Result<String> {
            self.keys.lock().unwrap().push(api_key.to_string());
            self.reply.clone().map_err(|msg| eyre::eyre!(msg))
        }
    }

    const PLAIN: &str = r#"{"summary":"Test summary","chapters":[{"timestamp":"00:00:00","title":"Start","description":"Beginning"}]}"#;

    #[test]
    fn test_prompt_embeds_transcript() {
        let prompt = build_prompt("the transcript text");
        assert!(prompt.contains("Transcript: the transcript text"));
        assert!(prompt.contains(r#""chapters": ["#));
    }

    #[test]
    fn test_extract_json_fence() {
        let text = format!("```json\n{PLAIN}\n```");
        assert_eq!(extract_json_text(&text), PLAIN);
    }

    #[test]
    fn test_extract_plain_fence_with_chatter() {
        let text = format!("Here you go:\n```\n{PLAIN}\n```\nAnything else?");
        assert_eq!(extract_json_text(&text), PLAIN);
    }

    #[test]
    fn test_extract_unfenced() {
        assert_eq!(extract_json_text(PLAIN), PLAIN);
    }

    #[test]
    fn test_extract_unclosed_fence() {
        let text = format!("```json\n{PLAIN}");
        assert_eq!(extract_json_text(&text), PLAIN);
    }

    #[test]
    fn test_fenced_and_plain_parse_identically() {
        let fenced = parse_summary(&format!("```json\n{PLAIN}\n```")).unwrap();
        let plain = parse_summary(PLAIN).unwrap();
        assert_eq!(fenced, plain);
        assert_eq!(fenced.summary, "Test summary");
        assert_eq!(fenced.chapters.len(), 1);
    }

    #[test]
    fn test_not_json_is_malformed() {
        let err = parse_summary("This is not valid JSON").unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { .. }));
    }

    #[test]
    fn test_malformed_preview_is_truncated() {
        let text = "x".repeat(2000);
        let Error::MalformedResponse { preview, .. } = parse_summary(&text).unwrap_err() else {
            panic!("expected MalformedResponse");
        };
        assert_eq!(preview.chars().count(), PREVIEW_CHARS);
    }

    #[test]
    fn test_missing_chapters_is_incomplete() {
        let err = parse_summary(r#"{"summary": "Test summary"}"#).unwrap_err();
        assert!(matches!(err, Error::IncompleteResponse));
        assert!(err.to_string().contains("missing required fields"));
    }

    #[test]
    fn test_missing_summary_is_incomplete() {
        let err = parse_summary(r#"{"chapters": []}"#).unwrap_err();
        assert!(matches!(err, Error::IncompleteResponse));
    }

    #[test]
    fn test_non_object_is_incomplete() {
        assert!(matches!(parse_summary("[1, 2, 3]").unwrap_err(), Error::IncompleteResponse));
    }

    #[test]
    fn test_chapters_must_be_a_list() {
        let err = parse_summary(r#"{"summary": "s", "chapters": {"timestamp": "00:00:00"}}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidChaptersShape));
        let err = parse_summary(r#"{"summary": "s", "chapters": "none"}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidChaptersShape));
    }

    #[test]
    fn test_chapter_contents_pass_through() {
        let result = parse_summary(r#"{"summary": "s", "chapters": [{"timestamp": 5}, "odd", null]}"#).unwrap();
        assert_eq!(result.chapters.len(), 3);
        assert_eq!(result.chapters[0]["timestamp"], 5);
    }

    #[tokio::test]
    async fn test_generate_summary_uses_callers_key() {
        let generator = StubGenerator::replying(PLAIN);
        let result = generate_summary(&generator, "Test transcript", "test_api_key").await.unwrap();
        assert_eq!(result.summary, "Test summary");
        assert_eq!(*generator.keys.lock().unwrap(), vec!["test_api_key".to_string()]);
    }

    #[tokio::test]
    async fn test_generate_summary_provider_error() {
        let generator = StubGenerator::failing("API Error");
        let err = generate_summary(&generator, "Test transcript", "k").await.unwrap_err();
        assert!(matches!(err, Error::ProviderFailure(ref msg) if msg == "API Error"));
    }

    #[tokio::test]
    async fn test_generate_summary_single_attempt() {
        let generator = StubGenerator::replying("not json");
        assert!(generate_summary(&generator, "t", "k").await.is_err());
        assert_eq!(generator.keys.lock().unwrap().len(), 1);
    }
}
