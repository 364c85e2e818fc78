use crate::context::RunContext;
use crate::decompose::DecomposedRecord;
use edca_lab_abstract::{AccessCategory, StationClassAssignment};
use serde::Serialize;
use tracing::debug;

/// Raw sums of one category before any ratio is taken.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Accumulator {
    success: u64,
    attempts: u64,
    queuing_ms: f64,
    access_ms: f64,
}

impl Accumulator {
    fn track(&mut self, record: &DecomposedRecord) {
        self.success += 1;
        self.attempts += 1 + u64::from(record.failures);
        self.queuing_ms += record.queuing_ms;
        self.access_ms += record.access_ms;
    }

    fn merge(&mut self, other: &Accumulator) {
        self.success += other.success;
        self.attempts += other.attempts;
        self.queuing_ms += other.queuing_ms;
        self.access_ms += other.access_ms;
    }

    fn finish(&self, category: Option<AccessCategory>, ctx: &RunContext) -> CategoryAggregate {
        let success = self.success as f64;
        let mean_queuing_ms = ratio(self.queuing_ms, success);
        let mean_access_ms = ratio(self.access_ms, success);
        CategoryAggregate {
            category,
            success_count: self.success,
            attempt_count: self.attempts,
            success_probability: ratio(success, self.attempts as f64),
            throughput_mbps: ratio(success * ctx.payload_bits as f64, ctx.window_s) / 1e6,
            mean_queuing_ms,
            mean_access_ms,
            mean_end_to_end_ms: mean_queuing_ms + mean_access_ms,
        }
    }
}

/// `num / den`, or 0.0 when the denominator is not positive.
fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 { num / den } else { 0.0 }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryAggregate {
    /// `None` for the all-category total
    pub category: Option<AccessCategory>,
    pub success_count: u64,
    /// Successes plus the failed attempts that preceded them
    pub attempt_count: u64,
    pub success_probability: f64,
    pub throughput_mbps: f64,
    pub mean_queuing_ms: f64,
    pub mean_access_ms: f64,
    pub mean_end_to_end_ms: f64,
}

/// The four per-category aggregates, in report order, plus their total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategorySummary {
    pub per_category: [CategoryAggregate; 4],
    pub total: CategoryAggregate,
}

impl CategorySummary {
    pub fn get(&self, category: AccessCategory) -> &CategoryAggregate {
        &self.per_category[category.slot()]
    }
}

/// Reduce decomposed records into per-category statistics.
///
/// Records of stations missing from `assignment` do not count towards any
/// category. The total is computed from the summed raw counts, so its
/// success probability is weighted by attempts and its delays by successes.
pub fn aggregate(
    records: &[DecomposedRecord],
    assignment: &StationClassAssignment,
    ctx: &RunContext,
) -> CategorySummary {
    let mut acc = [Accumulator::default(); 4];
    let mut unassigned = 0usize;
    for record in records {
        match assignment.category_of(record.key.station) {
            Some(ac) => acc[ac.slot()].track(record),
            None => unassigned += 1,
        }
    }
    if unassigned > 0 {
        debug!("ignored {} records from unassigned stations", unassigned);
    }

    let mut total = Accumulator::default();
    for a in &acc {
        total.merge(a);
    }

    CategorySummary {
        per_category: AccessCategory::REPORT_ORDER.map(|ac| acc[ac.slot()].finish(Some(ac), ctx)),
        total: total.finish(None, ctx),
    }
}
