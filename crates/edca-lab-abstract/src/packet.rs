use serde::{Deserialize, Serialize};

pub type StationId = u32;
pub type LinkId = u8;

/// One successfully delivered packet on a (station, link) pair.
///
/// Timestamps are in milliseconds of simulation time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PacketRecord {
    /// Instant the packet entered the station's transmit queue
    pub enqueue_ms: f64,
    /// Instant the packet was successfully delivered
    pub completion_ms: f64,
    /// Failed channel-access attempts before the eventual success
    pub failures: u32,
}

impl PacketRecord {
    pub fn new(enqueue_ms: f64, completion_ms: f64, failures: u32) -> Self {
        Self {
            enqueue_ms,
            completion_ms,
            failures,
        }
    }
}

/// A trace entry as handed over by the simulation engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub station: StationId,
    #[serde(default)]
    pub link: LinkId,
    pub enqueue_ms: f64,
    #[serde(alias = "dequeue_ms")]
    pub completion_ms: f64,
    #[serde(default)]
    pub failures: u32,
}

impl RawRecord {
    pub fn packet(&self) -> PacketRecord {
        PacketRecord::new(self.enqueue_ms, self.completion_ms, self.failures)
    }
}

/// The finalized trace of one observation window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceFile {
    pub records: Vec<RawRecord>,
}
