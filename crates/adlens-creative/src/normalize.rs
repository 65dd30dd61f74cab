//! Resolution of a structured analysis object into [`CreativeAttributes`].
//!
//! Analysis objects are loosely typed: any field may be missing or carry an
//! unexpected JSON type. Every field is defaulted here, once, so nothing
//! downstream has to handle a partially populated record.

use serde_json::{Map, Value};

use adlens_core::{CreativeAttributes, DurationCategory, SegmentBucket, TimelineSegment};

use crate::time::parse_time_range;

const DEFAULT_TIME_RANGE: &str = "00:00-00:00";
const DEFAULT_CREATIVE_TYPE: &str = "unknown";

/// The creative identity of an analysis object.
///
/// Strings are trimmed and must be non-empty; numeric ids are accepted in
/// their JSON text form. Anything else has no identity.
#[must_use]
pub fn video_id_of(payload: &Value) -> Option<String> {
    match payload.get("video_id")? {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads `timeline_analysis` into ordered segments.
///
/// Entries that are not objects still count as segments, with a zero range
/// and an empty tag.
#[must_use]
pub fn timeline_segments(payload: &Value) -> Vec<TimelineSegment> {
    let Some(entries) = payload.get("timeline_analysis").and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .map(|entry| {
            let range = entry
                .get("time_range")
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_TIME_RANGE);
            let (start_sec, end_sec) = parse_time_range(range);
            TimelineSegment {
                start_sec,
                end_sec,
                segment_type: entry
                    .get("segment_type")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            }
        })
        .collect()
}

/// Builds a creative record from an analysis object and its timeline.
///
/// Defaults: `video_id` → `source_file`, `creative_type` → `"unknown"`,
/// angle/sentiment/audience → `""`, hook strength → `0`, total duration →
/// the sum of segment durations.
#[must_use]
pub fn normalize_creative(
    payload: Value,
    segments: &[TimelineSegment],
    qualitative_text: String,
    source_file: &str,
) -> CreativeAttributes {
    let mut hook_duration_sec = 0_i64;
    let mut body_duration_sec = 0_i64;
    let mut cta_duration_sec = 0_i64;
    for segment in segments {
        let bucket_total = match segment.bucket() {
            SegmentBucket::Hook => &mut hook_duration_sec,
            SegmentBucket::Body => &mut body_duration_sec,
            SegmentBucket::Cta => &mut cta_duration_sec,
        };
        *bucket_total += segment.duration_sec();
    }

    let empty = Map::new();
    let summary = payload
        .get("analysis_summary")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    #[allow(clippy::cast_precision_loss)]
    let segment_total = (hook_duration_sec + body_duration_sec + cta_duration_sec) as f64;
    let duration_sec = number_field(summary, "total_duration_sec").unwrap_or(segment_total);

    CreativeAttributes {
        video_id: video_id_of(&payload).unwrap_or_else(|| source_file.to_string()),
        creative_type: text_field(summary, "creative_type")
            .unwrap_or(DEFAULT_CREATIVE_TYPE)
            .to_string(),
        duration_sec,
        duration_category: DurationCategory::from_seconds(duration_sec),
        hook_strength_score: number_field(summary, "hook_strength_score").unwrap_or(0.0),
        primary_angle: text_field(summary, "primary_angle")
            .unwrap_or_default()
            .to_string(),
        sentiment: text_field(summary, "overall_sentiment")
            .unwrap_or_default()
            .to_string(),
        segment_count: segments.len(),
        hook_duration_sec,
        body_duration_sec,
        cta_duration_sec,
        target_audience: text_field(summary, "target_audience")
            .unwrap_or_default()
            .to_string(),
        source_file: source_file.to_string(),
        raw: payload,
        qualitative_text,
    }
}

/// [`timeline_segments`] followed by [`normalize_creative`].
#[must_use]
pub fn normalize_payload(
    payload: Value,
    qualitative_text: String,
    source_file: &str,
) -> CreativeAttributes {
    let segments = timeline_segments(&payload);
    normalize_creative(payload, &segments, qualitative_text, source_file)
}

fn text_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}

/// Numbers, or strings holding a number (`"48"`).
fn number_field(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    let value = match obj.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value.filter(|v| v.is_finite())
}
