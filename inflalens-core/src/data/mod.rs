//! Data loading: CSV/Parquet ingestion, tolerant schema, immutable tables.

pub mod dataset;
pub mod ingest;
pub mod sample;
pub mod schema;
pub mod table;

pub use dataset::Dataset;
pub use ingest::{load_table, write_csv, write_parquet, DataError, RawTable, TableFormat};
pub use sample::{generate_sample, SampleOptions};
pub use table::{MetricRow, MetricTable, TrendRow, TrendTable};
