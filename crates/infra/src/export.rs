//! Purchase-order export of the critical subset.

use std::io::Write;
use std::path::Path;

use pharmaguard_core::{DomainError, DomainResult};
use pharmaguard_inventory::EnrichedRecord;

pub const EXPORT_HEADER: [&str; 5] = [
    "Location",
    "Item",
    "Current_Stock",
    "Days_Runway",
    "Suggested_Reorder",
];

/// Write `records` as CSV, one row per record in the given order.
pub fn write_reorder_csv<W: Write>(writer: W, records: &[EnrichedRecord]) -> DomainResult<()> {
    let mut out = ::csv::Writer::from_writer(writer);
    out.write_record(EXPORT_HEADER).map_err(export_error)?;

    for r in records {
        out.write_record([
            r.location().to_string(),
            r.item().to_string(),
            r.record.current_stock.to_string(),
            format!("{:.2}", r.days_runway),
            r.suggested_reorder.to_string(),
        ])
        .map_err(export_error)?;
    }

    out.flush()
        .map_err(|e| DomainError::export(format!("CSV flush failed: {e}")))
}

pub fn write_reorder_csv_file(path: &Path, records: &[EnrichedRecord]) -> DomainResult<()> {
    let file = std::fs::File::create(path).map_err(|e| {
        DomainError::export(format!("failed to create '{}': {e}", path.display()))
    })?;
    write_reorder_csv(file, records)
}

fn export_error(e: ::csv::Error) -> DomainError {
    DomainError::export(format!("CSV write failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharmaguard_inventory::{InventoryRecord, RiskEngine, critical_subset};

    #[test]
    fn exports_critical_rows_with_header() {
        let records = vec![
            InventoryRecord::new("Central Store", "Insulin Vials", 120.0, 7.0, 5.0).unwrap(),
            InventoryRecord::new("Rural Clinic A", "Insulin Vials", 2.0, 7.0, 1.0).unwrap(),
            InventoryRecord::new("Rural Clinic A", "Amoxicillin", 20.0, 5.0, 5.0).unwrap(),
        ];
        let enriched = RiskEngine::new().enrich(&records).unwrap();

        let mut buf = Vec::new();
        write_reorder_csv(&mut buf, &critical_subset(&enriched)).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "Location,Item,Current_Stock,Days_Runway,Suggested_Reorder\n\
Rural Clinic A,Insulin Vials,2,2.00,10\n\
Rural Clinic A,Amoxicillin,20,4.00,37\n"
        );
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "reader went away"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_is_an_export_error() {
        let err = write_reorder_csv(BrokenPipe, &[]).unwrap_err();
        match err {
            DomainError::Export(msg) => assert!(msg.contains("reader went away")),
            other => panic!("expected Export, got {other:?}"),
        }
    }

    #[test]
    fn unwritable_path_is_an_export_error() {
        let path = Path::new("/nonexistent/pharmaguard/reorders.csv");
        let err = write_reorder_csv_file(path, &[]).unwrap_err();
        match err {
            DomainError::Export(msg) => assert!(msg.contains("reorders.csv")),
            other => panic!("expected Export, got {other:?}"),
        }
    }

    #[test]
    fn empty_subset_writes_only_the_header() {
        let mut buf = Vec::new();
        write_reorder_csv(&mut buf, &[]).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Location,Item,Current_Stock,Days_Runway,Suggested_Reorder\n"
        );
    }
}
