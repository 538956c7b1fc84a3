use chrono::{DateTime, Utc};
use tracing::info;

use pharmaguard_ai::{Answer, AnswerResolver, CompletionClient};
use pharmaguard_core::{DomainError, DomainResult};
use pharmaguard_infra::InventorySource;
use pharmaguard_inventory::{
    EnrichedRecord, Heatmap, InventorySnapshot, InventorySummary, RiskEngine, UsageStrategy,
    critical_subset, reorder_list,
};

/// Everything one refresh renders. Built from exactly one fetch.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub as_of: DateTime<Utc>,
    pub enriched: Vec<EnrichedRecord>,
    /// CRITICAL records in input order; AI context and CSV export.
    pub critical: Vec<EnrichedRecord>,
    /// CRITICAL records, most urgent first.
    pub reorder_list: Vec<EnrichedRecord>,
    pub heatmap: Heatmap,
    pub summary: InventorySummary,
}

impl DashboardSnapshot {
    pub fn build(snapshot: InventorySnapshot, strategy: &dyn UsageStrategy) -> DomainResult<Self> {
        if snapshot.is_empty() {
            return Err(DomainError::data_unavailable("inventory fetch returned no rows"));
        }

        let enriched = RiskEngine::new().enrich_rows(&snapshot.rows, strategy)?;
        let summary = InventorySummary::from_records(&enriched);

        Ok(Self {
            as_of: snapshot.as_of,
            critical: critical_subset(&enriched),
            reorder_list: reorder_list(&enriched),
            heatmap: Heatmap::from_records(&enriched),
            summary,
            enriched,
        })
    }
}

/// Refresh/question entry points with their collaborators passed in
/// explicitly.
pub struct Dashboard<S, C> {
    source: S,
    strategy: Box<dyn UsageStrategy>,
    resolver: AnswerResolver<C>,
}

impl<S, C> Dashboard<S, C>
where
    S: InventorySource,
    C: CompletionClient,
{
    pub fn new(source: S, strategy: Box<dyn UsageStrategy>, resolver: AnswerResolver<C>) -> Self {
        Self {
            source,
            strategy,
            resolver,
        }
    }

    /// Fetch and recompute. Any data error aborts the refresh.
    pub fn refresh(&self) -> DomainResult<DashboardSnapshot> {
        let snapshot = self.source.fetch()?;
        let dashboard = DashboardSnapshot::build(snapshot, self.strategy.as_ref())?;

        info!(
            as_of = %dashboard.as_of,
            strategy = self.strategy.name(),
            records = dashboard.enriched.len(),
            critical = dashboard.summary.critical,
            warning = dashboard.summary.warning,
            "dashboard refreshed"
        );
        Ok(dashboard)
    }

    /// Answer a question against a refresh's critical subset. Never fails.
    pub fn ask(&self, question: &str, dashboard: &DashboardSnapshot) -> Answer {
        self.resolver.answer(question, &dashboard.critical)
    }
}
