use tracing::{debug, info, warn};

use pharmaguard_inventory::EnrichedRecord;

use crate::completion::CompletionClient;
use crate::prompt::PromptBuilder;
use crate::result::{AiError, Answer};

/// Fallback answer when nothing is critical.
pub const STABLE_ANSWER: &str =
    "All monitored inventory is stable: no location is at critical risk of a stockout.";

/// Answers free-text questions about the critical subset.
///
/// Per question: one remote attempt, then either the remote text or a
/// templated answer built from the same records. Callers always get a usable
/// answer; the [`AnswerSource`](crate::AnswerSource) says which path ran.
#[derive(Debug, Clone)]
pub struct AnswerResolver<C> {
    client: C,
    prompt: PromptBuilder,
}

impl<C: CompletionClient> AnswerResolver<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            prompt: PromptBuilder::default(),
        }
    }

    pub fn with_prompt(mut self, prompt: PromptBuilder) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn answer(&self, question: &str, critical: &[EnrichedRecord]) -> Answer {
        let prompt = self.prompt.build(question, critical);
        debug!(
            model = self.client.model(),
            records = critical.len().min(self.prompt.context_limit()),
            "requesting remote answer"
        );

        match self.remote(&prompt) {
            Ok(text) => {
                info!(model = self.client.model(), source = "REMOTE", "question answered");
                Answer::remote(text)
            }
            Err(e) => {
                warn!(
                    model = self.client.model(),
                    source = "LOCAL_FALLBACK",
                    error = %e,
                    "remote answer failed; answering from local data"
                );
                Answer::fallback(fallback_answer(critical))
            }
        }
    }

    fn remote(&self, prompt: &str) -> Result<String, AiError> {
        let text = self.client.complete(prompt)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(AiError::EmptyCompletion);
        }
        Ok(text.to_string())
    }
}

/// Deterministic answer built from the shortest-runway record.
pub fn fallback_answer(critical: &[EnrichedRecord]) -> String {
    // `min_by` keeps the first of equal elements, so ties go to input order.
    let Some(worst) = critical
        .iter()
        .min_by(|a, b| a.days_runway.total_cmp(&b.days_runway))
    else {
        return STABLE_ANSWER.to_string();
    };

    format!(
        "'{}' is at highest risk for {}: only {} units left ({:.1} days of supply) against a \
{}-day lead time. Suggested reorder: {} units.",
        worst.location(),
        worst.item(),
        worst.record.current_stock,
        worst.days_runway,
        worst.record.lead_time_days,
        worst.suggested_reorder,
    )
}
