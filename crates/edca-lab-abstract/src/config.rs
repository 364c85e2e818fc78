use crate::category::AccessCategory;
use crate::packet::StationId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(
        "station count {station_count} does not match per-category counts \
         (BE {be} + BK {bk} + VI {vi} + VO {vo})"
    )]
    StationCountMismatch {
        station_count: usize,
        be: usize,
        bk: usize,
        vi: usize,
        vo: usize,
    },
    #[error("traffic type {tag:?} for station {station} not supported")]
    UnsupportedTrafficType { station: StationId, tag: String },
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// What to do with a station that is expected to carry traffic but has no
/// completed packets inside the observation window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptySeriesPolicy {
    /// Log a warning and report zeroed statistics for it.
    #[default]
    Warn,
    /// Reject the whole run.
    Reject,
}

/// Contention window parameters of one access category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EdcaParams {
    /// Initial contention window, in slots (a power of two)
    pub cw_min: u64,
    /// Number of doublings before the window stops growing
    pub cw_stage: u8,
}

impl EdcaParams {
    pub const fn new(cw_min: u64, cw_stage: u8) -> Self {
        Self { cw_min, cw_stage }
    }

    /// CWmin as programmed into the MAC (`cw_min - 1`).
    pub fn cw_min_slots(&self) -> u64 {
        self.cw_min.saturating_sub(1)
    }

    /// CWmax as programmed into the MAC (`cw_min * 2^stage - 1`).
    pub fn cw_max_slots(&self) -> u64 {
        self.cw_min
            .saturating_mul(1u64 << self.cw_stage.min(63))
            .saturating_sub(1)
    }
}

/// Fully resolved run parameters. Built from `Default` and narrowed by a
/// `RunConfigOverride`.
#[derive(Debug, Clone, Serialize)]
pub struct RunConfig {
    pub seed: u64,
    /// Length of the observation window, in seconds
    pub duration_s: f64,
    pub payload_bytes: u32,
    pub mcs: u8,
    pub channel_width_mhz: u16,
    pub station_count: usize,
    pub be_stations: usize,
    pub bk_stations: usize,
    pub vi_stations: usize,
    pub vo_stations: usize,
    /// Per-station arrival probability per slot
    pub per_station_lambda: f64,
    pub slot_time_us: f64,
    /// Arrival process tag applied to every station without an override
    pub traffic: String,
    pub station_traffic: BTreeMap<StationId, String>,
    pub be: EdcaParams,
    pub bk: EdcaParams,
    pub vi: EdcaParams,
    pub vo: EdcaParams,
    pub empty_series: EmptySeriesPolicy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 6,
            duration_s: 20.0,
            payload_bytes: 1500,
            mcs: 6,
            channel_width_mhz: 20,
            station_count: 5,
            be_stations: 2,
            bk_stations: 1,
            vi_stations: 1,
            vo_stations: 1,
            per_station_lambda: 0.00001,
            slot_time_us: 9.0,
            traffic: "bernoulli".to_string(),
            station_traffic: BTreeMap::new(),
            be: EdcaParams::new(16, 6),
            bk: EdcaParams::new(16, 6),
            vi: EdcaParams::new(8, 4),
            vo: EdcaParams::new(4, 2),
            empty_series: EmptySeriesPolicy::Warn,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sum = self.be_stations + self.bk_stations + self.vi_stations + self.vo_stations;
        if self.station_count != sum {
            return Err(ConfigError::StationCountMismatch {
                station_count: self.station_count,
                be: self.be_stations,
                bk: self.bk_stations,
                vi: self.vi_stations,
                vo: self.vo_stations,
            });
        }
        for ac in AccessCategory::REPORT_ORDER {
            if self.edca(ac).cw_min == 0 {
                return Err(ConfigError::InvalidParameter {
                    name: "cw_min",
                    reason: format!("{ac} contention window must be at least 1"),
                });
            }
        }
        if !self.per_station_lambda.is_finite() || self.per_station_lambda < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "per_station_lambda",
                reason: format!("{} is not a valid rate", self.per_station_lambda),
            });
        }
        Ok(())
    }

    pub fn edca(&self, ac: AccessCategory) -> EdcaParams {
        match ac {
            AccessCategory::BestEffort => self.be,
            AccessCategory::Background => self.bk,
            AccessCategory::Video => self.vi,
            AccessCategory::Voice => self.vo,
        }
    }

    pub fn stations_in(&self, ac: AccessCategory) -> usize {
        match ac {
            AccessCategory::BestEffort => self.be_stations,
            AccessCategory::Background => self.bk_stations,
            AccessCategory::Video => self.vi_stations,
            AccessCategory::Voice => self.vo_stations,
        }
    }

    pub fn payload_bits(&self) -> u64 {
        u64::from(self.payload_bytes) * 8
    }
}
