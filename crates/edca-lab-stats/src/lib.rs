pub mod aggregate;
pub mod context;
pub mod decompose;
pub mod error;
pub mod hol;
pub mod ingest;
pub mod pipeline;
pub mod report;

pub use aggregate::{CategoryAggregate, CategorySummary, aggregate};
pub use context::RunContext;
pub use decompose::{DecomposedRecord, SeriesSummary, decompose};
pub use error::StatsError;
pub use hol::{HolEntry, reconstruct};
pub use ingest::{NodeLinkSeries, SeriesKey, TraceSeries, ingest};
pub use pipeline::{RunSummary, analyze};
pub use report::ReportLine;
