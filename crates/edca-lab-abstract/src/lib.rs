pub mod category;
pub mod config;
pub mod packet;
pub mod scenario;
pub mod traffic;

pub use category::AccessCategory;
pub use config::{ConfigError, EdcaParams, EmptySeriesPolicy, RunConfig};
pub use packet::{LinkId, PacketRecord, RawRecord, StationId, TraceFile};
pub use scenario::{RunConfigOverride, RunScenario};
pub use traffic::{ArrivalProcess, StationClassAssignment, TrafficConfig, TrafficPlan};
