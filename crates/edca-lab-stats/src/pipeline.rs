use crate::aggregate::{CategorySummary, aggregate};
use crate::context::RunContext;
use crate::decompose::{SeriesSummary, decompose};
use crate::error::StatsError;
use crate::ingest::ingest;
use edca_lab_abstract::{TraceFile, TrafficPlan};
use serde::Serialize;
use tracing::info;

/// Everything one aggregation pass produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub context: RunContext,
    pub trace_records: usize,
    pub retained_records: usize,
    pub categories: CategorySummary,
    pub series: Vec<SeriesSummary>,
}

/// Run ingestion, HOL reconstruction, decomposition and aggregation over a
/// finalized trace.
pub fn analyze(
    trace: &TraceFile,
    plan: &TrafficPlan,
    ctx: &RunContext,
) -> Result<RunSummary, StatsError> {
    let assignment = plan.assignment();
    let series = ingest(&trace.records, &assignment, ctx.empty_series)?;
    info!(
        "ingested {} records into {} series",
        trace.records.len(),
        series.len()
    );

    let mut decomposed = Vec::with_capacity(trace.records.len());
    let mut summaries = Vec::with_capacity(series.len());
    for s in series.iter() {
        let records = decompose(s);
        summaries.push(SeriesSummary::from_records(s.key, &records));
        decomposed.extend(records);
    }

    let categories = aggregate(&decomposed, &assignment, ctx);
    info!(
        "aggregated {} retained records: total success probability {:.4}, throughput {:.4} Mbps",
        decomposed.len(),
        categories.total.success_probability,
        categories.total.throughput_mbps
    );

    Ok(RunSummary {
        context: *ctx,
        trace_records: trace.records.len(),
        retained_records: decomposed.len(),
        categories,
        series: summaries,
    })
}
