use chrono::NaiveDate;
use serde::Serialize;

use adlens_core::{CompletionCounts, PerformanceRow, RetentionLadder};

use crate::record::RawPerformanceRecord;

/// Turns a decoded record into a [`PerformanceRow`].
///
/// Completion rates divide by the row's own impressions; a day with no
/// impressions gets an undefined ladder rather than zeros.
#[must_use]
pub fn clean_record(raw: RawPerformanceRecord) -> PerformanceRow {
    let completions = CompletionCounts {
        three_seconds: raw.video_3s_plays,
        quarter: raw.video_p25_plays,
        half: raw.video_p50_plays,
        three_quarters: raw.video_p75_plays,
        ninety_five: raw.video_p95_plays,
        complete: raw.video_p100_plays,
    };
    let completion_rates = RetentionLadder::from_counts(&completions, raw.impressions);

    PerformanceRow {
        ad_name: raw.ad_name,
        report_start: raw.report_start,
        report_end: raw.report_end,
        is_active: raw.spend > 0.0,
        spend: raw.spend,
        impressions: raw.impressions,
        reach: raw.reach,
        link_clicks: raw.link_clicks,
        purchases: raw.purchases,
        ctr: raw.ctr,
        cpc: raw.cpc,
        cpm: raw.cpm,
        frequency: raw.frequency,
        completions,
        completion_rates,
    }
}

/// Cleans every record, preserving order and inactive days.
#[must_use]
pub fn clean_records(records: Vec<RawPerformanceRecord>) -> Vec<PerformanceRow> {
    let rows: Vec<PerformanceRow> = records.into_iter().map(clean_record).collect();
    let active = rows.iter().filter(|r| r.is_active).count();
    tracing::debug!(
        rows = rows.len(),
        active,
        inactive = rows.len() - active,
        "cleaned performance rows"
    );
    rows
}

/// What a performance export contains, for a confirmation step before
/// analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetOverview {
    pub row_count: usize,
    /// Distinct ad names in first-seen order.
    pub ad_names: Vec<String>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

#[must_use]
pub fn dataset_overview(rows: &[PerformanceRow]) -> DatasetOverview {
    let mut ad_names: Vec<String> = Vec::new();
    for row in rows {
        if !ad_names.iter().any(|n| n == &row.ad_name) {
            ad_names.push(row.ad_name.clone());
        }
    }

    DatasetOverview {
        row_count: rows.len(),
        ad_names,
        first_date: rows.iter().map(|r| r.report_start).min(),
        last_date: rows.iter().map(|r| r.report_start).max(),
    }
}
