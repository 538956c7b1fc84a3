use std::fmt::Write as _;

use pharmaguard_inventory::EnrichedRecord;

/// Records beyond this are left out of the prompt.
pub const DEFAULT_CONTEXT_LIMIT: usize = 50;

pub const DEFAULT_PREAMBLE: &str = "You are a pharmaceutical supply-chain analyst. \
The records below are inventory positions at risk of stocking out before a reorder \
could arrive. Answer the question using only these records. Name locations and items \
exactly as written and keep the answer to a few sentences.";

/// Builds the bounded prompt sent to the remote model.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    preamble: String,
    context_limit: usize,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self {
            preamble: DEFAULT_PREAMBLE.to_string(),
            context_limit: DEFAULT_CONTEXT_LIMIT,
        }
    }
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = preamble.into();
        self
    }

    pub fn with_context_limit(mut self, context_limit: usize) -> Self {
        self.context_limit = context_limit;
        self
    }

    pub fn context_limit(&self) -> usize {
        self.context_limit
    }

    pub fn build(&self, question: &str, records: &[EnrichedRecord]) -> String {
        let mut prompt = String::with_capacity(self.preamble.len() + question.len() + 128);
        prompt.push_str(&self.preamble);
        prompt.push_str("\n\nCritical inventory:\n");

        let shown = records.len().min(self.context_limit);
        if records.is_empty() {
            prompt.push_str("(none)\n");
        }
        for r in &records[..shown] {
            let _ = writeln!(prompt, "- {}", describe(r));
        }
        if records.len() > shown {
            let _ = writeln!(prompt, "({} more records omitted)", records.len() - shown);
        }

        let _ = write!(prompt, "\nQuestion: {question}");
        prompt
    }
}

fn describe(r: &EnrichedRecord) -> String {
    format!(
        "location: {}; item: {}; current stock: {}; daily usage: {}; days of runway: {:.1}; \
lead time: {} days; suggested reorder: {}",
        r.location(),
        r.item(),
        r.record.current_stock,
        r.record.daily_usage_avg,
        r.days_runway,
        r.record.lead_time_days,
        r.suggested_reorder,
    )
}
