//! Infrastructure layer: data sources, export, external model clients.

pub mod export;
pub mod http;
pub mod source;

pub use export::{EXPORT_HEADER, write_reorder_csv, write_reorder_csv_file};
pub use http::{HttpCompletionClient, HttpCompletionConfig, extract_completion};
pub use source::{
    CachedSource, CsvInventorySource, InventorySource, SampleInventorySource, read_rows,
};
