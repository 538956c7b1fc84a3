use crate::result::AiError;

/// Remote text-completion collaborator.
///
/// One prompt in, one completion out. Implementations make a single attempt
/// and report any failure as an [`AiError`]; retrying is not their job.
pub trait CompletionClient: Send + Sync {
    /// Model identifier, for logs.
    fn model(&self) -> &str;

    fn complete(&self, prompt: &str) -> Result<String, AiError>;
}

impl<C: CompletionClient + ?Sized> CompletionClient for Box<C> {
    fn model(&self) -> &str {
        (**self).model()
    }

    fn complete(&self, prompt: &str) -> Result<String, AiError> {
        (**self).complete(prompt)
    }
}

/// Client used when no remote model is configured. Always fails, so every
/// question is answered from local data.
#[derive(Debug, Default, Copy, Clone)]
pub struct OfflineCompletionClient;

impl CompletionClient for OfflineCompletionClient {
    fn model(&self) -> &str {
        "offline"
    }

    fn complete(&self, _prompt: &str) -> Result<String, AiError> {
        Err(AiError::Unavailable("no remote model configured".to_string()))
    }
}
