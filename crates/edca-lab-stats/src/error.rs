use edca_lab_abstract::StationId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("station {station} produced no completed packets in the observation window")]
    EmptySeries { station: StationId },
}
