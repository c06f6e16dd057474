use thiserror::Error;

/// Failure categories of the summarize pipeline
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid request: {0}")]
    RequestValidation(String),

    #[error("could not extract video ID from URL: {url}")]
    InvalidUrl { url: String },

    #[error(
        "Could not retrieve transcript for this video. \
         The video may not have captions available or may be private. Error: {cause}"
    )]
    TranscriptUnavailable { cause: String },

    #[error("summary provider request failed: {0}")]
    ProviderFailure(String),

    #[error("failed to parse AI response as JSON: {source}")]
    MalformedResponse {
        #[source]
        source: serde_json::Error,
        /// Leading part of the raw provider text, for diagnostics
        preview: String,
    },

    #[error("response missing required fields (summary or chapters)")]
    IncompleteResponse,

    #[error("chapters must be a list")]
    InvalidChaptersShape,

    #[error(transparent)]
    Internal(#[from] eyre::Report),
}

impl Error {
    /// Stable category name reported to callers
    pub fn category(&self) -> &'static str {
        match self {
            Error::RequestValidation(_) => "RequestValidation",
            Error::InvalidUrl { .. } => "InvalidURL",
            Error::TranscriptUnavailable { .. } => "TranscriptUnavailable",
            Error::ProviderFailure(_) => "ProviderFailure",
            Error::MalformedResponse { .. } => "MalformedResponse",
            Error::IncompleteResponse => "IncompleteResponse",
            Error::InvalidChaptersShape => "InvalidChaptersShape",
            Error::Internal(_) => "Internal",
        }
    }

    /// True for failures raised while producing the summary
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            Error::ProviderFailure(_)
                | Error::MalformedResponse { .. }
                | Error::IncompleteResponse
                | Error::InvalidChaptersShape
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
