use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::summary::RetentionLadder;

/// The six video-completion checkpoints reported by the ad platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VideoMilestone {
    ThreeSeconds,
    Quarter,
    Half,
    ThreeQuarters,
    NinetyFive,
    Complete,
}

impl VideoMilestone {
    /// All milestones in viewing order.
    pub const ALL: [VideoMilestone; 6] = [
        VideoMilestone::ThreeSeconds,
        VideoMilestone::Quarter,
        VideoMilestone::Half,
        VideoMilestone::ThreeQuarters,
        VideoMilestone::NinetyFive,
        VideoMilestone::Complete,
    ];

    /// Short column label, e.g. `"3s"` or `"75%"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            VideoMilestone::ThreeSeconds => "3s",
            VideoMilestone::Quarter => "25%",
            VideoMilestone::Half => "50%",
            VideoMilestone::ThreeQuarters => "75%",
            VideoMilestone::NinetyFive => "95%",
            VideoMilestone::Complete => "100%",
        }
    }
}

impl std::fmt::Display for VideoMilestone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Play counts at each [`VideoMilestone`].
///
/// Counts are `f64` because exports deliver them as spreadsheet numbers and
/// the aggregation sums them alongside spend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionCounts {
    pub three_seconds: f64,
    pub quarter: f64,
    pub half: f64,
    pub three_quarters: f64,
    pub ninety_five: f64,
    pub complete: f64,
}

impl CompletionCounts {
    #[must_use]
    pub fn get(&self, milestone: VideoMilestone) -> f64 {
        match milestone {
            VideoMilestone::ThreeSeconds => self.three_seconds,
            VideoMilestone::Quarter => self.quarter,
            VideoMilestone::Half => self.half,
            VideoMilestone::ThreeQuarters => self.three_quarters,
            VideoMilestone::NinetyFive => self.ninety_five,
            VideoMilestone::Complete => self.complete,
        }
    }

    /// Element-wise sum.
    #[must_use]
    pub fn merged(&self, other: &CompletionCounts) -> CompletionCounts {
        CompletionCounts {
            three_seconds: self.three_seconds + other.three_seconds,
            quarter: self.quarter + other.quarter,
            half: self.half + other.half,
            three_quarters: self.three_quarters + other.three_quarters,
            ninety_five: self.ninety_five + other.ninety_five,
            complete: self.complete + other.complete,
        }
    }
}

/// One day of delivery for one creative, after cleaning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceRow {
    /// Creative display name as it appears in the export; the grouping key.
    pub ad_name: String,
    pub report_start: NaiveDate,
    pub report_end: NaiveDate,
    pub spend: f64,
    pub impressions: f64,
    pub reach: f64,
    pub link_clicks: f64,
    pub purchases: f64,
    /// Platform-reported daily rates. `None` when the export left the cell
    /// blank (typically days without clicks).
    pub ctr: Option<f64>,
    pub cpc: Option<f64>,
    pub cpm: Option<f64>,
    pub frequency: Option<f64>,
    pub completions: CompletionCounts,
    /// `spend > 0`.
    pub is_active: bool,
    /// Completion counts over impressions, in percent.
    pub completion_rates: RetentionLadder,
}
