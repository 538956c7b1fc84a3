use std::io::Write;

use chrono::Utc;

use pharmaguard_ai::{
    AiError, AnswerResolver, AnswerSource, CompletionClient, OfflineCompletionClient,
};
use pharmaguard_app::{Dashboard, DashboardSnapshot};
use pharmaguard_core::{DomainError, DomainResult, ItemName, Location};
use pharmaguard_infra::{
    CsvInventorySource, InventorySource, SampleInventorySource, write_reorder_csv,
};
use pharmaguard_inventory::{
    DirectUsage, InventorySnapshot, LookupUsage, StockMagnitudeUsage, StockRow, StockStatus,
};

struct EmptySource;

impl InventorySource for EmptySource {
    fn fetch(&self) -> DomainResult<InventorySnapshot> {
        Ok(InventorySnapshot::new(Utc::now(), Vec::new()))
    }
}

struct EchoClient;

impl CompletionClient for EchoClient {
    fn model(&self) -> &str {
        "echo"
    }

    fn complete(&self, prompt: &str) -> Result<String, AiError> {
        let records = prompt.matches("- location:").count();
        Ok(format!("saw {records} critical records"))
    }
}

fn offline_dashboard<S: InventorySource>(source: S) -> Dashboard<S, OfflineCompletionClient> {
    Dashboard::new(
        source,
        Box::new(DirectUsage),
        AnswerResolver::new(OfflineCompletionClient),
    )
}

#[test]
fn sample_inventory_flags_rural_clinic_insulin() {
    let dashboard = offline_dashboard(SampleInventorySource);
    let snapshot = dashboard.refresh().unwrap();

    assert_eq!(snapshot.enriched.len(), 9);
    assert_eq!(snapshot.summary.locations_monitored, 3);
    assert_eq!(snapshot.summary.total_stock, 6347.0);
    assert_eq!(snapshot.summary.critical, 2);
    assert_eq!(snapshot.summary.warning, 2);
    assert_eq!(snapshot.summary.ok, 5);

    let first = &snapshot.reorder_list[0];
    assert_eq!(first.location().as_str(), "Rural Clinic A");
    assert_eq!(first.item().as_str(), "Insulin Vials");
    assert_eq!(first.days_runway, 2.0);
    assert_eq!(first.suggested_reorder, 10);
    assert_eq!(first.status, StockStatus::Critical);

    let question = "Which location has the highest risk of insulin shortage?";
    let answer = dashboard.ask(question, &snapshot);
    assert_eq!(answer.source, AnswerSource::LocalFallback);
    assert!(answer.text.contains("Rural Clinic A"));
    assert!(answer.text.contains("Insulin Vials"));
}

#[test]
fn heatmap_covers_every_location_and_item() {
    let snapshot = offline_dashboard(SampleInventorySource).refresh().unwrap();
    assert_eq!(snapshot.heatmap.locations().len(), 3);
    assert_eq!(snapshot.heatmap.items().len(), 3);

    let runway = snapshot.heatmap.cell(
        &Location::new("Central Store").unwrap(),
        &ItemName::new("Paracetamol (500mg)").unwrap(),
    );
    assert_eq!(runway, Some(50.0));
}

#[test]
fn remote_answer_receives_the_critical_context() {
    let dashboard = Dashboard::new(
        SampleInventorySource,
        Box::new(DirectUsage),
        AnswerResolver::new(EchoClient),
    );
    let snapshot = dashboard.refresh().unwrap();
    let answer = dashboard.ask("What should I reorder?", &snapshot);
    assert_eq!(answer.source, AnswerSource::Remote);
    assert_eq!(answer.text, "saw 2 critical records");
}

#[test]
fn empty_fetch_blocks_the_refresh() {
    let err = offline_dashboard(EmptySource).refresh().unwrap_err();
    assert!(matches!(err, DomainError::DataUnavailable(_)));
}

#[test]
fn zero_usage_in_the_store_is_reported_not_rendered() {
    let rows = vec![
        StockRow::new("Central Store", "Insulin Vials", 120.0, 7.0).with_usage(5.0),
        StockRow::new("Ward 9", "Saline", 40.0, 2.0).with_usage(0.0),
    ];
    let err = DashboardSnapshot::build(InventorySnapshot::new(Utc::now(), rows), &DirectUsage)
        .unwrap_err();
    assert_eq!(err, DomainError::invalid_usage("Ward 9", "Saline"));
}

#[test]
fn heuristic_strategy_is_reproducible_across_refreshes() {
    let dashboard = Dashboard::new(
        SampleInventorySource,
        Box::new(StockMagnitudeUsage::new(42)),
        AnswerResolver::new(OfflineCompletionClient),
    );
    let a = dashboard.refresh().unwrap();
    let b = dashboard.refresh().unwrap();
    assert_eq!(a.enriched, b.enriched);
}

#[test]
fn csv_source_to_export_round_trip() {
    let dir = std::env::temp_dir().join(format!("pharmaguard-it-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("inventory.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "LOCATION,ITEM_NAME,CURRENT_STOCK,LEAD_TIME_DAYS").unwrap();
    writeln!(file, "Rural Clinic A,Insulin Vials,6,7").unwrap();
    writeln!(file, "Central Store,Paracetamol (500mg),5000,2").unwrap();
    drop(file);

    let dashboard = Dashboard::new(
        CsvInventorySource::new(&path),
        Box::new(LookupUsage::formulary(5.0)),
        AnswerResolver::new(OfflineCompletionClient),
    );
    let snapshot = dashboard.refresh().unwrap();
    assert_eq!(snapshot.critical.len(), 1);

    let mut out = Vec::new();
    write_reorder_csv(&mut out, &snapshot.critical).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Rural Clinic A,Insulin Vials,6,2.00,31"));

    std::fs::remove_dir_all(&dir).unwrap();
}
