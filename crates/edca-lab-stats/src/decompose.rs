use crate::hol::reconstruct;
use crate::ingest::{NodeLinkSeries, SeriesKey};
use serde::Serialize;

/// Latency of one retained packet split at its HOL time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecomposedRecord {
    pub key: SeriesKey,
    pub hol_ms: f64,
    /// enqueue → HOL
    pub queuing_ms: f64,
    /// HOL → completion
    pub access_ms: f64,
    /// Always `queuing_ms + access_ms`
    pub end_to_end_ms: f64,
    pub failures: u32,
}

/// Decompose every packet of `series` but the first.
pub fn decompose(series: &NodeLinkSeries) -> Vec<DecomposedRecord> {
    reconstruct(series)
        .map(|entry| {
            let queuing_ms = entry.hol_ms - entry.record.enqueue_ms;
            let access_ms = entry.record.completion_ms - entry.hol_ms;
            DecomposedRecord {
                key: series.key,
                hol_ms: entry.hol_ms,
                queuing_ms,
                access_ms,
                end_to_end_ms: queuing_ms + access_ms,
                failures: entry.record.failures,
            }
        })
        .collect()
}

/// Per (station, link) delay summary over the retained packets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub key: SeriesKey,
    pub retained: u64,
    pub mean_queuing_ms: f64,
    pub mean_access_ms: f64,
    pub max_access_ms: f64,
}

impl SeriesSummary {
    pub fn from_records(key: SeriesKey, records: &[DecomposedRecord]) -> Self {
        let retained = records.len() as u64;
        let queuing: f64 = records.iter().map(|r| r.queuing_ms).sum();
        let access: f64 = records.iter().map(|r| r.access_ms).sum();
        let max_access_ms = records.iter().map(|r| r.access_ms).fold(0.0, f64::max);
        let mean = |total: f64| if retained > 0 { total / retained as f64 } else { 0.0 };
        Self {
            key,
            retained,
            mean_queuing_ms: mean(queuing),
            mean_access_ms: mean(access),
            max_access_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edca_lab_abstract::PacketRecord;

    fn series(points: &[(f64, f64, u32)]) -> NodeLinkSeries {
        NodeLinkSeries::new(
            SeriesKey { station: 3, link: 0 },
            points
                .iter()
                .map(|&(e, c, f)| PacketRecord::new(e, c, f))
                .collect(),
        )
    }

    #[test]
    fn worked_example() {
        let out = decompose(&series(&[(0.0, 10.0, 0), (5.0, 20.0, 1), (40.0, 60.0, 2)]));
        assert_eq!(out.len(), 2);

        assert_eq!(out[0].hol_ms, 10.0);
        assert_eq!(out[0].queuing_ms, 5.0);
        assert_eq!(out[0].access_ms, 10.0);
        assert_eq!(out[0].end_to_end_ms, 15.0);
        assert_eq!(out[0].failures, 1);

        assert_eq!(out[1].hol_ms, 40.0);
        assert_eq!(out[1].queuing_ms, 0.0);
        assert_eq!(out[1].access_ms, 20.0);
        assert_eq!(out[1].end_to_end_ms, 20.0);
        assert_eq!(out[1].failures, 2);
    }

    #[test]
    fn end_to_end_is_sum_of_parts() {
        let s = series(&[
            (0.013, 0.71, 0),
            (0.2, 1.337, 0),
            (1.1, 2.004, 3),
            (5.55, 5.9, 0),
            (5.6, 7.123_456, 1),
        ]);
        for r in decompose(&s) {
            assert_eq!(r.end_to_end_ms, r.queuing_ms + r.access_ms);
            assert!(r.queuing_ms >= 0.0);
            assert!(r.access_ms >= 0.0);
        }
    }

    #[test]
    fn drops_exactly_the_first_record() {
        for n in 0usize..6 {
            let points: Vec<_> = (0..n).map(|i| (i as f64, i as f64 + 0.5, 0)).collect();
            let s = series(&points);
            assert_eq!(decompose(&s).len(), n.saturating_sub(1));
        }
    }

    #[test]
    fn summary_divides_by_retained_count() {
        let s = series(&[(0.0, 10.0, 0), (5.0, 20.0, 0), (40.0, 60.0, 0)]);
        let summary = SeriesSummary::from_records(s.key, &decompose(&s));
        assert_eq!(summary.retained, 2);
        assert_eq!(summary.mean_queuing_ms, 2.5);
        assert_eq!(summary.mean_access_ms, 15.0);
        assert_eq!(summary.max_access_ms, 20.0);

        let empty = SeriesSummary::from_records(s.key, &[]);
        assert_eq!(empty.mean_queuing_ms, 0.0);
        assert_eq!(empty.mean_access_ms, 0.0);
    }
}
