use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which path produced an [`Answer`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnswerSource {
    /// The remote model answered.
    Remote,
    /// The remote call failed; the answer was templated from local data.
    LocalFallback,
}

impl AnswerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerSource::Remote => "REMOTE",
            AnswerSource::LocalFallback => "LOCAL_FALLBACK",
        }
    }
}

impl core::fmt::Display for AnswerSource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Answer to one question. `text` is never empty.
///
/// This is an insight for display, not a domain fact; callers should surface
/// `source` to operators even though both paths read alike to end users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub source: AnswerSource,
}

impl Answer {
    pub fn remote(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: AnswerSource::Remote,
        }
    }

    pub fn fallback(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: AnswerSource::LocalFallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == AnswerSource::LocalFallback
    }
}

/// Failure of the remote inference collaborator.
///
/// Never reaches end users: the resolver recovers from every variant.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("remote model unavailable: {0}")]
    Unavailable(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("remote model rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("malformed completion: {0}")]
    MalformedResponse(String),

    #[error("remote model returned an empty completion")]
    EmptyCompletion,
}
