use chrono::Utc;

use pharmaguard_core::DomainResult;
use pharmaguard_inventory::{InventorySnapshot, StockRow};

use super::InventorySource;

/// Built-in demo table: three locations stocking the same three medicines.
#[derive(Debug, Default, Copy, Clone)]
pub struct SampleInventorySource;

impl SampleInventorySource {
    pub fn rows() -> Vec<StockRow> {
        const DATA: [(&str, &str, f64, f64, f64); 9] = [
            ("Central Store", "Paracetamol (500mg)", 5000.0, 100.0, 2.0),
            ("Central Store", "Insulin Vials", 120.0, 5.0, 7.0),
            ("Central Store", "Amoxicillin", 800.0, 20.0, 5.0),
            ("Rural Clinic A", "Paracetamol (500mg)", 50.0, 15.0, 3.0),
            ("Rural Clinic A", "Insulin Vials", 2.0, 1.0, 7.0),
            ("Rural Clinic A", "Amoxicillin", 20.0, 5.0, 5.0),
            ("Emergency Ward", "Paracetamol (500mg)", 200.0, 40.0, 1.0),
            ("Emergency Ward", "Insulin Vials", 5.0, 3.0, 1.0),
            ("Emergency Ward", "Amoxicillin", 150.0, 10.0, 2.0),
        ];

        DATA.iter()
            .map(|&(location, item, stock, usage, lead)| {
                StockRow::new(location, item, stock, lead).with_usage(usage)
            })
            .collect()
    }
}

impl InventorySource for SampleInventorySource {
    fn fetch(&self) -> DomainResult<InventorySnapshot> {
        Ok(InventorySnapshot::new(Utc::now(), Self::rows()))
    }
}
