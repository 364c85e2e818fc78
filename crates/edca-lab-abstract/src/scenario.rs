use crate::config::{EdcaParams, EmptySeriesPolicy, RunConfig};
use crate::packet::StationId;
use serde::Deserialize;

/// A run description loaded from TOML. Only the fields present in the file
/// replace the defaults.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RunScenario {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub run: RunConfigOverride,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct RunConfigOverride {
    pub seed: Option<u64>,
    pub duration_s: Option<f64>,
    pub payload_bytes: Option<u32>,
    pub mcs: Option<u8>,
    pub channel_width_mhz: Option<u16>,
    pub station_count: Option<usize>,
    pub be_stations: Option<usize>,
    pub bk_stations: Option<usize>,
    pub vi_stations: Option<usize>,
    pub vo_stations: Option<usize>,
    pub per_station_lambda: Option<f64>,
    pub slot_time_us: Option<f64>,
    pub traffic: Option<String>,
    #[serde(default)]
    pub station_traffic: Vec<StationTraffic>,
    pub be: Option<EdcaOverride>,
    pub bk: Option<EdcaOverride>,
    pub vi: Option<EdcaOverride>,
    pub vo: Option<EdcaOverride>,
    pub empty_series: Option<EmptySeriesPolicy>,
}

/// Arrival process tag for a single station.
#[derive(Deserialize, Debug, Clone)]
pub struct StationTraffic {
    pub station: StationId,
    pub traffic: String,
}

#[derive(Deserialize, Debug, Clone, Copy, Default)]
pub struct EdcaOverride {
    pub cw_min: Option<u64>,
    pub cw_stage: Option<u8>,
}

impl EdcaOverride {
    fn apply_to(&self, params: &mut EdcaParams) {
        if let Some(v) = self.cw_min {
            params.cw_min = v;
        }
        if let Some(v) = self.cw_stage {
            params.cw_stage = v;
        }
    }
}

impl RunConfigOverride {
    pub fn apply_to(&self, config: &mut RunConfig) {
        if let Some(v) = self.seed {
            config.seed = v;
        }
        if let Some(v) = self.duration_s {
            config.duration_s = v;
        }
        if let Some(v) = self.payload_bytes {
            config.payload_bytes = v;
        }
        if let Some(v) = self.mcs {
            config.mcs = v;
        }
        if let Some(v) = self.channel_width_mhz {
            config.channel_width_mhz = v;
        }
        if let Some(v) = self.station_count {
            config.station_count = v;
        }
        if let Some(v) = self.be_stations {
            config.be_stations = v;
        }
        if let Some(v) = self.bk_stations {
            config.bk_stations = v;
        }
        if let Some(v) = self.vi_stations {
            config.vi_stations = v;
        }
        if let Some(v) = self.vo_stations {
            config.vo_stations = v;
        }
        if let Some(v) = self.per_station_lambda {
            config.per_station_lambda = v;
        }
        if let Some(v) = self.slot_time_us {
            config.slot_time_us = v;
        }
        if let Some(v) = &self.traffic {
            config.traffic = v.clone();
        }
        for entry in &self.station_traffic {
            config
                .station_traffic
                .insert(entry.station, entry.traffic.clone());
        }
        if let Some(o) = &self.be {
            o.apply_to(&mut config.be);
        }
        if let Some(o) = &self.bk {
            o.apply_to(&mut config.bk);
        }
        if let Some(o) = &self.vi {
            o.apply_to(&mut config.vi);
        }
        if let Some(o) = &self.vo {
            o.apply_to(&mut config.vo);
        }
        if let Some(v) = self.empty_series {
            config.empty_series = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"
name = "vary-acs"
description = "eight stations, two per category"

[run]
seed = 1
payload_bytes = 1500
station_count = 8
be_stations = 2
bk_stations = 2
vi_stations = 2
vo_stations = 2
per_station_lambda = 0.001
empty_series = "reject"

[run.vo]
cw_min = 8

[[run.station_traffic]]
station = 3
traffic = "deterministic"
"#;

    #[test]
    fn overlays_only_present_fields() {
        let scenario: RunScenario = toml::from_str(SCENARIO).unwrap();
        assert_eq!(scenario.name.as_deref(), Some("vary-acs"));

        let mut config = RunConfig::default();
        scenario.run.apply_to(&mut config);

        assert_eq!(config.seed, 1);
        assert_eq!(config.station_count, 8);
        assert_eq!(config.bk_stations, 2);
        assert_eq!(config.per_station_lambda, 0.001);
        assert_eq!(config.empty_series, EmptySeriesPolicy::Reject);
        assert_eq!(config.vo, EdcaParams::new(8, 2));
        assert_eq!(config.be, EdcaParams::new(16, 6));
        assert_eq!(config.duration_s, 20.0);
        assert_eq!(
            config.station_traffic.get(&3).map(String::as_str),
            Some("deterministic")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_file_keeps_defaults() {
        let scenario: RunScenario = toml::from_str("").unwrap();
        let mut config = RunConfig::default();
        scenario.run.apply_to(&mut config);
        assert_eq!(config.seed, RunConfig::default().seed);
        assert_eq!(config.traffic, "bernoulli");
    }
}
