//! Focus/pomodoro statistics models

use serde::{Deserialize, Serialize};

/// Focus minutes recorded for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusHeatmapEntry {
    /// Date key in `yyyymmdd` form
    pub day: String,
    /// Focused minutes
    pub duration: i64,
}

impl FocusHeatmapEntry {
    pub fn from_v2(wire: FocusHeatmapWire) -> Self {
        FocusHeatmapEntry {
            day: wire.day,
            duration: wire.duration.unwrap_or(0),
        }
    }
}

/// Focus minutes aggregated per tag over a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusTagStat {
    pub tag: String,
    pub duration: i64,
}

// ============================================================================
// Wire shapes
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusHeatmapWire {
    pub day: String,
    #[serde(default)]
    pub duration: Option<i64>,
}

/// Distribution payload from the statistics endpoint; only the per-tag slice
/// is consumed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusDistWire {
    #[serde(default)]
    pub tag_durations: Option<std::collections::BTreeMap<String, i64>>,
}

impl FocusDistWire {
    pub fn into_tag_stats(self) -> Vec<FocusTagStat> {
        self.tag_durations
            .unwrap_or_default()
            .into_iter()
            .map(|(tag, duration)| FocusTagStat { tag, duration })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn heatmap_conversion() {
        let wire: FocusHeatmapWire =
            serde_json::from_value(json!({"day": "20260115", "duration": 95})).unwrap();
        let entry = FocusHeatmapEntry::from_v2(wire);
        assert_eq!(entry.duration, 95);
    }

    #[test]
    fn dist_to_sorted_tag_stats() {
        let wire: FocusDistWire = serde_json::from_value(json!({
            "tagDurations": {"work": 300, "reading": 45}
        }))
        .unwrap();
        let stats = wire.into_tag_stats();
        assert_eq!(stats.len(), 2);
        // BTreeMap gives deterministic name order
        assert_eq!(stats[0].tag, "reading");
        assert_eq!(stats[1].duration, 300);
    }
}
