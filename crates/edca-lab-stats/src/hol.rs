//! Head-of-line time reconstruction.
//!
//! A packet reaches the head of its queue once it has been enqueued and its
//! predecessor on the same series has completed:
//! `hol[i] = max(enqueue[i], completion[i - 1])`.
//!
//! The first packet of a series has no observable predecessor (the window
//! may open mid-queue), so only indices `i >= 1` are produced.

use crate::ingest::NodeLinkSeries;
use edca_lab_abstract::PacketRecord;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HolEntry {
    pub record: PacketRecord,
    pub hol_ms: f64,
}

/// HOL times of every packet of `series` except the first.
pub fn reconstruct(series: &NodeLinkSeries) -> impl Iterator<Item = HolEntry> + '_ {
    series.records.windows(2).map(|pair| {
        let (prev, record) = (pair[0], pair[1]);
        HolEntry {
            record,
            hol_ms: record.enqueue_ms.max(prev.completion_ms),
        }
    })
}

/// The HOL value of index 0, which is just its enqueue time. Not a real
/// measurement; exposed for diagnostics only.
pub fn boundary_hol(series: &NodeLinkSeries) -> Option<f64> {
    series.records.first().map(|r| r.enqueue_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::SeriesKey;

    fn series(points: &[(f64, f64)]) -> NodeLinkSeries {
        NodeLinkSeries::new(
            SeriesKey { station: 1, link: 0 },
            points
                .iter()
                .map(|&(e, c)| PacketRecord::new(e, c, 0))
                .collect(),
        )
    }

    #[test]
    fn worked_example() {
        let s = series(&[(0.0, 10.0), (5.0, 20.0), (40.0, 60.0)]);
        let hol: Vec<_> = reconstruct(&s).map(|e| e.hol_ms).collect();
        assert_eq!(hol, vec![10.0, 40.0]);
        assert_eq!(boundary_hol(&s), Some(0.0));
    }

    #[test]
    fn hol_is_bounded_by_enqueue_and_previous_completion() {
        let s = series(&[
            (0.0, 3.0),
            (1.0, 4.5),
            (7.0, 8.0),
            (7.5, 12.0),
            (7.6, 12.0),
            (30.0, 31.0),
        ]);
        for (i, entry) in reconstruct(&s).enumerate() {
            let prev = s.records[i];
            assert!(entry.hol_ms >= entry.record.enqueue_ms);
            assert!(entry.hol_ms >= prev.completion_ms);
            assert!(entry.hol_ms == entry.record.enqueue_ms || entry.hol_ms == prev.completion_ms);
        }
    }

    #[test]
    fn short_series_yield_nothing() {
        assert_eq!(reconstruct(&series(&[])).count(), 0);
        assert_eq!(reconstruct(&series(&[(1.0, 2.0)])).count(), 0);
        assert_eq!(boundary_hol(&series(&[])), None);
    }
}
