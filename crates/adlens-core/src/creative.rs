//! Creative analysis records resolved to canonical form.

use serde::{Deserialize, Serialize};

use crate::ratio::Ratio;

/// Videos at or above this many seconds are long-form.
pub const LONG_FORM_THRESHOLD_SECS: f64 = 30.0;

/// Narrative role of a timeline segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentBucket {
    Hook,
    Body,
    Cta,
}

impl SegmentBucket {
    /// Classifies a free-form segment tag by case-sensitive substring.
    ///
    /// `hook` is checked before `cta`; anything matching neither is body.
    /// Tags containing both substrings do not occur in analysis output and
    /// resolve to `Hook`.
    #[must_use]
    pub fn classify(segment_type: &str) -> Self {
        if segment_type.contains("hook") {
            SegmentBucket::Hook
        } else if segment_type.contains("cta") {
            SegmentBucket::Cta
        } else {
            SegmentBucket::Body
        }
    }
}

impl std::fmt::Display for SegmentBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SegmentBucket::Hook => write!(f, "hook"),
            SegmentBucket::Body => write!(f, "body"),
            SegmentBucket::Cta => write!(f, "cta"),
        }
    }
}

/// One labeled interval of a creative's timeline, in whole seconds.
///
/// `end_sec >= start_sec` is expected but not enforced. A malformed range
/// is represented as `0..0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSegment {
    pub start_sec: i64,
    pub end_sec: i64,
    pub segment_type: String,
}

impl TimelineSegment {
    #[must_use]
    pub fn duration_sec(&self) -> i64 {
        self.end_sec - self.start_sec
    }

    #[must_use]
    pub fn bucket(&self) -> SegmentBucket {
        SegmentBucket::classify(&self.segment_type)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationCategory {
    #[serde(rename = "long-form")]
    LongForm,
    #[serde(rename = "short-form")]
    ShortForm,
}

impl DurationCategory {
    #[must_use]
    pub fn from_seconds(duration_sec: f64) -> Self {
        if duration_sec >= LONG_FORM_THRESHOLD_SECS {
            DurationCategory::LongForm
        } else {
            DurationCategory::ShortForm
        }
    }
}

impl std::fmt::Display for DurationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DurationCategory::LongForm => write!(f, "long-form"),
            DurationCategory::ShortForm => write!(f, "short-form"),
        }
    }
}

/// A structured creative analysis with every field defaulted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreativeAttributes {
    /// `video_id` from the analysis, or the source file name when absent.
    pub video_id: String,
    pub creative_type: String,
    pub duration_sec: f64,
    pub duration_category: DurationCategory,
    pub hook_strength_score: f64,
    pub primary_angle: String,
    pub sentiment: String,
    pub segment_count: usize,
    pub hook_duration_sec: i64,
    pub body_duration_sec: i64,
    pub cta_duration_sec: i64,
    pub target_audience: String,
    /// File the analysis was read from.
    pub source_file: String,
    /// The structured object exactly as parsed.
    pub raw: serde_json::Value,
    /// Prose surrounding the structured object in its source document.
    pub qualitative_text: String,
}

impl CreativeAttributes {
    /// Hook seconds as a percentage of total duration.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hook_ratio(&self) -> Ratio {
        Ratio::percent(self.hook_duration_sec as f64, self.duration_sec)
    }

    /// Timeline segments per second of video.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn segment_density(&self) -> Ratio {
        Ratio::of(self.segment_count as f64, self.duration_sec)
    }
}
