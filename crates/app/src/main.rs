use anyhow::Context;

use pharmaguard_ai::{AnswerResolver, PromptBuilder};
use pharmaguard_app::{AppConfig, Dashboard, DashboardSnapshot};
use pharmaguard_infra::write_reorder_csv_file;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    pharmaguard_observability::init(config.log_format);

    if config.data_path.is_none() {
        tracing::warn!("PHARMAGUARD_DATA_PATH not set; using built-in sample inventory");
    }

    let resolver = AnswerResolver::new(config.completion_client())
        .with_prompt(PromptBuilder::new().with_context_limit(config.context_limit));
    let dashboard = Dashboard::new(
        config.inventory_source(),
        config.usage_strategy(),
        resolver,
    );

    let snapshot = dashboard.refresh().context("dashboard refresh failed")?;
    print_report(&snapshot);

    let answer = dashboard.ask(&config.question, &snapshot);
    println!("\nQ: {}", config.question);
    println!("A [{}]: {}", answer.source, answer.text);

    if let Some(path) = &config.export_path {
        write_reorder_csv_file(path, &snapshot.critical)
            .with_context(|| format!("failed to export reorders to {}", path.display()))?;
        tracing::info!(path = %path.display(), rows = snapshot.critical.len(), "reorders exported");
    }

    Ok(())
}

fn print_report(snapshot: &DashboardSnapshot) {
    let s = &snapshot.summary;
    println!("PharmaGuard inventory as of {}", snapshot.as_of.to_rfc3339());
    println!(
        "locations: {}  total stock: {}  critical: {}  warning: {}  ok: {}",
        s.locations_monitored, s.total_stock, s.critical, s.warning, s.ok
    );

    println!("\nPriority reorder list:");
    if snapshot.reorder_list.is_empty() {
        println!("  (nothing critical)");
    }
    for r in &snapshot.reorder_list {
        println!(
            "  {:<20} {:<24} stock {:>8}  runway {:>6.1}d  reorder {:>6}",
            r.location(),
            r.item(),
            r.record.current_stock,
            r.days_runway,
            r.suggested_reorder
        );
    }

    println!("\nDays of supply:");
    let header: Vec<String> = snapshot
        .heatmap
        .items()
        .iter()
        .map(|i| format!("{:>22}", i.as_str()))
        .collect();
    println!("  {:<20}{}", "", header.join(""));
    for (location, cells) in snapshot.heatmap.rows() {
        let cells: Vec<String> = cells
            .iter()
            .map(|c| match c {
                Some(days) => format!("{days:>22.1}"),
                None => format!("{:>22}", "-"),
            })
            .collect();
        println!("  {:<20}{}", location.as_str(), cells.join(""));
    }
}
