use serde::{Deserialize, Serialize};
use std::fmt;

/// EDCA access category of a station's traffic.
///
/// Discriminants follow the ns-3 `AcIndex` numbering, which is also what the
/// report echoes in its configuration columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AccessCategory {
    #[serde(rename = "BE")]
    BestEffort = 0,
    #[serde(rename = "BK")]
    Background = 1,
    #[serde(rename = "VI")]
    Video = 2,
    #[serde(rename = "VO")]
    Voice = 3,
}

impl AccessCategory {
    /// Column order used by every per-category block of the report.
    pub const REPORT_ORDER: [AccessCategory; 4] = [
        AccessCategory::BestEffort,
        AccessCategory::Background,
        AccessCategory::Video,
        AccessCategory::Voice,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Position of this category inside [`Self::REPORT_ORDER`].
    pub fn slot(self) -> usize {
        match self {
            AccessCategory::BestEffort => 0,
            AccessCategory::Background => 1,
            AccessCategory::Video => 2,
            AccessCategory::Voice => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AccessCategory::BestEffort => "BE",
            AccessCategory::Background => "BK",
            AccessCategory::Video => "VI",
            AccessCategory::Voice => "VO",
        }
    }
}

impl fmt::Display for AccessCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::AccessCategory;

    #[test]
    fn report_order_matches_slots() {
        for (i, ac) in AccessCategory::REPORT_ORDER.iter().enumerate() {
            assert_eq!(ac.slot(), i);
        }
    }

    #[test]
    fn indexes_follow_ns3_numbering() {
        assert_eq!(AccessCategory::BestEffort.index(), 0);
        assert_eq!(AccessCategory::Background.index(), 1);
        assert_eq!(AccessCategory::Video.index(), 2);
        assert_eq!(AccessCategory::Voice.index(), 3);
    }
}
