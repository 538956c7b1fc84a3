use std::io::Read;
use std::path::PathBuf;

use chrono::Utc;
use tracing::info;

use pharmaguard_core::{DomainError, DomainResult};
use pharmaguard_inventory::{InventorySnapshot, StockRow};

use super::InventorySource;

/// Parse the store table contract from CSV.
///
/// Expected header: `LOCATION,ITEM_NAME,CURRENT_STOCK,LEAD_TIME_DAYS` with an
/// optional `DAILY_USAGE_AVG`. Whitespace around fields is ignored.
pub fn read_rows<R: Read>(reader: R) -> DomainResult<Vec<StockRow>> {
    let mut csv_reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(::csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let row: StockRow = result.map_err(|e| {
            DomainError::data_unavailable(format!("CSV parse error at line {}: {e}", line_num + 2))
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// Reads the inventory table from a CSV file on every fetch.
#[derive(Debug, Clone)]
pub struct CsvInventorySource {
    path: PathBuf,
}

impl CsvInventorySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl InventorySource for CsvInventorySource {
    fn fetch(&self) -> DomainResult<InventorySnapshot> {
        let file = std::fs::File::open(&self.path).map_err(|e| {
            DomainError::data_unavailable(format!("failed to open '{}': {e}", self.path.display()))
        })?;
        let rows = read_rows(file)?;
        if rows.is_empty() {
            return Err(DomainError::data_unavailable(format!(
                "'{}' contains no inventory rows",
                self.path.display()
            )));
        }

        info!(path = %self.path.display(), rows = rows.len(), "inventory fetched");
        Ok(InventorySnapshot::new(Utc::now(), rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
LOCATION,ITEM_NAME,CURRENT_STOCK,LEAD_TIME_DAYS,DAILY_USAGE_AVG
Central Store, Insulin Vials ,120,7,5
Rural Clinic A,Insulin Vials,2,7,
";

    #[test]
    fn reads_rows_with_optional_usage() {
        let rows = read_rows(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].item, "Insulin Vials");
        assert_eq!(rows[0].daily_usage_avg, Some(5.0));
        assert_eq!(rows[1].current_stock, 2.0);
        assert_eq!(rows[1].daily_usage_avg, None);
    }

    #[test]
    fn usage_column_may_be_absent() {
        let csv = "LOCATION,ITEM_NAME,CURRENT_STOCK,LEAD_TIME_DAYS\nWard,Gauze,40,3\n";
        let rows = read_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].daily_usage_avg, None);
    }

    #[test]
    fn bad_number_reports_the_line() {
        let csv = "LOCATION,ITEM_NAME,CURRENT_STOCK,LEAD_TIME_DAYS\nWard,Gauze,lots,3\n";
        match read_rows(csv.as_bytes()) {
            Err(DomainError::DataUnavailable(msg)) => assert!(msg.contains("line 2")),
            other => panic!("expected DataUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn header_only_file_is_data_unavailable() {
        let path = std::env::temp_dir().join(format!(
            "pharmaguard-header-only-{}.csv",
            std::process::id()
        ));
        std::fs::write(&path, "LOCATION,ITEM_NAME,CURRENT_STOCK,LEAD_TIME_DAYS\n").unwrap();

        let result = CsvInventorySource::new(&path).fetch();
        std::fs::remove_file(&path).unwrap();
        match result {
            Err(DomainError::DataUnavailable(msg)) => assert!(msg.contains("no inventory rows")),
            other => panic!("expected DataUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_data_unavailable() {
        let source = CsvInventorySource::new("/nonexistent/inventory.csv");
        assert!(matches!(source.fetch(), Err(DomainError::DataUnavailable(_))));
    }
}
