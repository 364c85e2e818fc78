use crate::category::AccessCategory;
use crate::config::{ConfigError, RunConfig};
use crate::packet::StationId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// How packets arrive at a station's queue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ArrivalProcess {
    /// One packet every `interval_ns`
    Deterministic { interval_ns: f64 },
    /// One packet per slot with probability `probability`
    Bernoulli { probability: f64 },
}

impl ArrivalProcess {
    /// Resolve an arrival tag from the run configuration. Returns `None` for
    /// tags this workspace does not know about.
    pub fn from_tag(tag: &str, lambda: f64, slot_time_us: f64) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "deterministic" => {
                let slot_ns = slot_time_us * 1000.0;
                let interval_ns = if lambda > 0.0 { slot_ns / lambda } else { f64::INFINITY };
                Some(ArrivalProcess::Deterministic { interval_ns })
            }
            "bernoulli" => Some(ArrivalProcess::Bernoulli {
                probability: lambda,
            }),
            _ => None,
        }
    }
}

/// Per-station uplink traffic configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrafficConfig {
    pub station: StationId,
    pub category: AccessCategory,
    pub arrival: ArrivalProcess,
}

/// Station → access category lookup, fixed for the duration of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationClassAssignment {
    stations: BTreeMap<StationId, AccessCategory>,
}

impl StationClassAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category_of(&self, station: StationId) -> Option<AccessCategory> {
        self.stations.get(&station).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StationId, AccessCategory)> + '_ {
        self.stations.iter().map(|(s, ac)| (*s, *ac))
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl FromIterator<(StationId, AccessCategory)> for StationClassAssignment {
    fn from_iter<T: IntoIterator<Item = (StationId, AccessCategory)>>(iter: T) -> Self {
        Self {
            stations: iter.into_iter().collect(),
        }
    }
}

/// Traffic configuration of every station in the BSS.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrafficPlan {
    pub stations: Vec<TrafficConfig>,
    /// Stations whose arrival tag could not be resolved
    pub skipped: Vec<StationId>,
}

impl TrafficPlan {
    /// Lay out stations `1..=station_count` as BK, then BE, VI and VO, and
    /// attach each one's arrival process.
    ///
    /// Stations with an unsupported traffic tag are logged and left out of
    /// the plan; only configuration inconsistencies fail.
    pub fn build(config: &RunConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let layout = [
            AccessCategory::Background,
            AccessCategory::BestEffort,
            AccessCategory::Video,
            AccessCategory::Voice,
        ];

        let mut plan = TrafficPlan::default();
        let mut station: StationId = 1;
        for ac in layout {
            let edca = config.edca(ac);
            debug!(
                "{}: {} stations, cw [{}, {}]",
                ac,
                config.stations_in(ac),
                edca.cw_min_slots(),
                edca.cw_max_slots()
            );
            for _ in 0..config.stations_in(ac) {
                let tag = config
                    .station_traffic
                    .get(&station)
                    .unwrap_or(&config.traffic);
                match Self::resolve(station, tag, config) {
                    Ok(arrival) => {
                        debug!("station {} -> {} ({:?})", station, ac, arrival);
                        plan.stations.push(TrafficConfig {
                            station,
                            category: ac,
                            arrival,
                        });
                    }
                    Err(err) => {
                        warn!("{}; skipping station traffic", err);
                        plan.skipped.push(station);
                    }
                }
                station += 1;
            }
        }
        Ok(plan)
    }

    fn resolve(
        station: StationId,
        tag: &str,
        config: &RunConfig,
    ) -> Result<ArrivalProcess, ConfigError> {
        ArrivalProcess::from_tag(tag, config.per_station_lambda, config.slot_time_us).ok_or_else(
            || ConfigError::UnsupportedTrafficType {
                station,
                tag: tag.to_string(),
            },
        )
    }

    pub fn assignment(&self) -> StationClassAssignment {
        self.stations
            .iter()
            .map(|t| (t.station, t.category))
            .collect()
    }
}
