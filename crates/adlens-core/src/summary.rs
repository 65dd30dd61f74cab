use chrono::NaiveDate;
use serde::Serialize;

use crate::creative::CreativeAttributes;
use crate::performance::{CompletionCounts, VideoMilestone};
use crate::ratio::Ratio;

/// Percentage of impressions reaching each [`VideoMilestone`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RetentionLadder {
    pub three_seconds: Ratio,
    pub quarter: Ratio,
    pub half: Ratio,
    pub three_quarters: Ratio,
    pub ninety_five: Ratio,
    pub complete: Ratio,
}

impl RetentionLadder {
    /// `count / impressions * 100` for every milestone. Zero impressions
    /// leave the whole ladder undefined.
    #[must_use]
    pub fn from_counts(counts: &CompletionCounts, impressions: f64) -> Self {
        let rate = |m| Ratio::percent(counts.get(m), impressions);
        RetentionLadder {
            three_seconds: rate(VideoMilestone::ThreeSeconds),
            quarter: rate(VideoMilestone::Quarter),
            half: rate(VideoMilestone::Half),
            three_quarters: rate(VideoMilestone::ThreeQuarters),
            ninety_five: rate(VideoMilestone::NinetyFive),
            complete: rate(VideoMilestone::Complete),
        }
    }

    /// Share of viewers lost on the way to each milestone, in
    /// [`VideoMilestone::ALL`] order, as a percentage of those who reached
    /// the previous one. The first entry is measured from 100%.
    ///
    /// A step whose previous milestone was reached by nobody, or whose
    /// rates are undefined, is undefined.
    #[must_use]
    pub fn dropoff(&self) -> [Ratio; 6] {
        let mut previous = Ratio::Defined(100.0);
        VideoMilestone::ALL.map(|milestone| {
            let current = self.get(milestone);
            let lost = match (previous, current) {
                (Ratio::Defined(prev), Ratio::Defined(cur)) => Ratio::percent(prev - cur, prev),
                _ => Ratio::Undefined,
            };
            previous = current;
            lost
        })
    }

    #[must_use]
    pub fn get(&self, milestone: VideoMilestone) -> Ratio {
        match milestone {
            VideoMilestone::ThreeSeconds => self.three_seconds,
            VideoMilestone::Quarter => self.quarter,
            VideoMilestone::Half => self.half,
            VideoMilestone::ThreeQuarters => self.three_quarters,
            VideoMilestone::NinetyFive => self.ninety_five,
            VideoMilestone::Complete => self.complete,
        }
    }
}

/// One creative's aggregated performance over its active days, joined with
/// its analysis attributes when a mapping exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreativeSummary {
    pub ad_name: String,
    /// Short name from the mapping, else `ad_name`.
    pub display_name: String,
    /// Distinct report dates with spend.
    pub active_days: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub total_spend: f64,
    pub total_impressions: f64,
    pub total_reach: f64,
    pub total_link_clicks: f64,
    pub total_purchases: f64,
    pub total_completions: CompletionCounts,
    /// Arithmetic means of the platform's daily rates, skipping blanks.
    /// These are deliberately not recomputed from totals.
    pub avg_ctr: Option<f64>,
    pub avg_cpc: Option<f64>,
    pub avg_cpm: Option<f64>,
    pub avg_frequency: Option<f64>,
    /// Ratios over the totals.
    pub overall_ctr: Ratio,
    pub overall_cpc: Ratio,
    pub overall_cpm: Ratio,
    pub cpa: Ratio,
    pub avg_daily_spend: Ratio,
    pub retention: RetentionLadder,
    /// `None` when the creative has no mapped analysis.
    pub attributes: Option<CreativeAttributes>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_from_counts_uses_impressions_as_base() {
        let counts = CompletionCounts {
            three_seconds: 300.0,
            quarter: 120.0,
            half: 80.0,
            three_quarters: 50.0,
            ninety_five: 30.0,
            complete: 25.0,
        };
        let ladder = RetentionLadder::from_counts(&counts, 1000.0);
        assert_eq!(ladder.get(VideoMilestone::ThreeSeconds), Ratio::Defined(30.0));
        assert_eq!(ladder.get(VideoMilestone::Complete), Ratio::Defined(2.5));
    }

    #[test]
    fn dropoff_is_relative_to_previous_milestone() {
        let counts = CompletionCounts {
            three_seconds: 500.0,
            quarter: 250.0,
            half: 125.0,
            three_quarters: 125.0,
            ninety_five: 0.0,
            complete: 0.0,
        };
        let ladder = RetentionLadder::from_counts(&counts, 1000.0);
        assert_eq!(
            ladder.dropoff(),
            [
                Ratio::Defined(50.0),
                Ratio::Defined(50.0),
                Ratio::Defined(50.0),
                Ratio::Defined(0.0),
                Ratio::Defined(100.0),
                Ratio::Undefined,
            ]
        );
    }

    #[test]
    fn dropoff_without_impressions_is_undefined() {
        let ladder = RetentionLadder::from_counts(&CompletionCounts::default(), 0.0);
        assert!(ladder.dropoff().iter().all(|r| *r == Ratio::Undefined));
    }

    #[test]
    fn ladder_without_impressions_is_undefined() {
        let counts = CompletionCounts::default();
        let ladder = RetentionLadder::from_counts(&counts, 0.0);
        assert!(VideoMilestone::ALL
            .iter()
            .all(|m| ladder.get(*m) == Ratio::Undefined));
    }
}
