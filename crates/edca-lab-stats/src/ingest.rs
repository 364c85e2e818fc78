use crate::error::StatsError;
use crate::hol::boundary_hol;
use edca_lab_abstract::{
    EmptySeriesPolicy, LinkId, PacketRecord, RawRecord, StationClassAssignment, StationId,
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SeriesKey {
    pub station: StationId,
    pub link: LinkId,
}

/// Delivered packets of one (station, link) pair, in delivery order.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeLinkSeries {
    pub key: SeriesKey,
    pub records: Vec<PacketRecord>,
}

impl NodeLinkSeries {
    pub fn new(key: SeriesKey, records: Vec<PacketRecord>) -> Self {
        Self { key, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Every series of a trace, keyed and iterated in (station, link) order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceSeries {
    series: BTreeMap<SeriesKey, NodeLinkSeries>,
}

impl TraceSeries {
    pub fn get(&self, key: SeriesKey) -> Option<&NodeLinkSeries> {
        self.series.get(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeLinkSeries> {
        self.series.values()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn has_station(&self, station: StationId) -> bool {
        self.series.keys().any(|k| k.station == station)
    }
}

/// Organize raw trace entries into per-(station, link) series.
///
/// Each station in `expected` that has no series at all is either logged or
/// rejected depending on `policy`.
pub fn ingest(
    records: &[RawRecord],
    expected: &StationClassAssignment,
    policy: EmptySeriesPolicy,
) -> Result<TraceSeries, StatsError> {
    let mut series: BTreeMap<SeriesKey, NodeLinkSeries> = BTreeMap::new();
    for raw in records {
        let key = SeriesKey {
            station: raw.station,
            link: raw.link,
        };
        series
            .entry(key)
            .or_insert_with(|| NodeLinkSeries::new(key, Vec::new()))
            .records
            .push(raw.packet());
    }

    // Stable: packets completing at the same instant keep their queue order.
    for s in series.values_mut() {
        s.records
            .sort_by(|a, b| a.completion_ms.total_cmp(&b.completion_ms));
        debug!(
            "series station={} link={}: {} packets, boundary hol {:?} (discarded)",
            s.key.station,
            s.key.link,
            s.len(),
            boundary_hol(s)
        );
    }

    let trace = TraceSeries { series };
    for (station, ac) in expected.iter() {
        if trace.has_station(station) {
            continue;
        }
        match policy {
            EmptySeriesPolicy::Warn => {
                warn!(
                    "station {} ({}) has no completed packets; its statistics stay at zero",
                    station, ac
                );
            }
            EmptySeriesPolicy::Reject => return Err(StatsError::EmptySeries { station }),
        }
    }
    Ok(trace)
}
