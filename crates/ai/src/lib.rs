//! `pharmaguard-ai`
//!
//! **Responsibility:** natural-language answers over the critical subset.
//!
//! This crate is intentionally kept at the edge of the domain:
//! - It consumes enriched records; it never computes risk itself.
//! - It must never fail a dashboard refresh: remote errors are recovered
//!   locally and reported only through [`AnswerSource`].

pub mod completion;
pub mod prompt;
pub mod resolver;
pub mod result;

pub use completion::{CompletionClient, OfflineCompletionClient};
pub use prompt::{DEFAULT_CONTEXT_LIMIT, PromptBuilder};
pub use resolver::{AnswerResolver, STABLE_ANSWER, fallback_answer};
pub use result::{AiError, Answer, AnswerSource};
