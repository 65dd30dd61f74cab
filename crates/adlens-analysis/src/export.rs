//! Flat CSV exports of the cleaned rows, creative records, and summary.
//!
//! Every export has a fixed column set. Undefined ratios and absent values
//! are written as empty cells.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

use adlens_core::{CreativeAttributes, CreativeSummary, DurationCategory, PerformanceRow, Ratio};

use crate::error::ExportError;

pub const DAILY_ROWS_FILE: &str = "daily_performance.csv";
pub const ATTRIBUTES_FILE: &str = "creative_attributes.csv";
pub const SUMMARY_FILE: &str = "creative_summary.csv";

/// A flat export row with a fixed column set. `HEADERS` is written even
/// when there are no rows and must match the serialized field order.
trait ExportRecord: Serialize {
    const HEADERS: &'static [&'static str];
}

#[derive(Debug, Serialize)]
struct DailyRecord<'a> {
    ad_name: &'a str,
    report_start: NaiveDate,
    report_end: NaiveDate,
    spend: f64,
    impressions: f64,
    reach: f64,
    link_clicks: f64,
    purchases: f64,
    ctr: Option<f64>,
    cpc: Option<f64>,
    cpm: Option<f64>,
    frequency: Option<f64>,
    video_3s_plays: f64,
    video_p25_plays: f64,
    video_p50_plays: f64,
    video_p75_plays: f64,
    video_p95_plays: f64,
    video_p100_plays: f64,
    is_active: bool,
    rate_3s: Ratio,
    rate_p25: Ratio,
    rate_p50: Ratio,
    rate_p75: Ratio,
    rate_p95: Ratio,
    rate_p100: Ratio,
}

impl<'a> From<&'a PerformanceRow> for DailyRecord<'a> {
    fn from(row: &'a PerformanceRow) -> Self {
        let c = &row.completions;
        let r = &row.completion_rates;
        DailyRecord {
            ad_name: &row.ad_name,
            report_start: row.report_start,
            report_end: row.report_end,
            spend: row.spend,
            impressions: row.impressions,
            reach: row.reach,
            link_clicks: row.link_clicks,
            purchases: row.purchases,
            ctr: row.ctr,
            cpc: row.cpc,
            cpm: row.cpm,
            frequency: row.frequency,
            video_3s_plays: c.three_seconds,
            video_p25_plays: c.quarter,
            video_p50_plays: c.half,
            video_p75_plays: c.three_quarters,
            video_p95_plays: c.ninety_five,
            video_p100_plays: c.complete,
            is_active: row.is_active,
            rate_3s: r.three_seconds,
            rate_p25: r.quarter,
            rate_p50: r.half,
            rate_p75: r.three_quarters,
            rate_p95: r.ninety_five,
            rate_p100: r.complete,
        }
    }
}

impl ExportRecord for DailyRecord<'_> {
    const HEADERS: &'static [&'static str] = &[
        "ad_name",
        "report_start",
        "report_end",
        "spend",
        "impressions",
        "reach",
        "link_clicks",
        "purchases",
        "ctr",
        "cpc",
        "cpm",
        "frequency",
        "video_3s_plays",
        "video_p25_plays",
        "video_p50_plays",
        "video_p75_plays",
        "video_p95_plays",
        "video_p100_plays",
        "is_active",
        "rate_3s",
        "rate_p25",
        "rate_p50",
        "rate_p75",
        "rate_p95",
        "rate_p100",
    ];
}

#[derive(Debug, Serialize)]
struct AttributeRecord<'a> {
    video_id: &'a str,
    creative_type: &'a str,
    duration_sec: f64,
    duration_category: DurationCategory,
    hook_strength_score: f64,
    primary_angle: &'a str,
    sentiment: &'a str,
    segment_count: usize,
    hook_duration_sec: i64,
    body_duration_sec: i64,
    cta_duration_sec: i64,
    hook_ratio: Ratio,
    segment_density: Ratio,
    target_audience: &'a str,
    source_file: &'a str,
}

impl<'a> From<&'a CreativeAttributes> for AttributeRecord<'a> {
    fn from(c: &'a CreativeAttributes) -> Self {
        AttributeRecord {
            video_id: &c.video_id,
            creative_type: &c.creative_type,
            duration_sec: c.duration_sec,
            duration_category: c.duration_category,
            hook_strength_score: c.hook_strength_score,
            primary_angle: &c.primary_angle,
            sentiment: &c.sentiment,
            segment_count: c.segment_count,
            hook_duration_sec: c.hook_duration_sec,
            body_duration_sec: c.body_duration_sec,
            cta_duration_sec: c.cta_duration_sec,
            hook_ratio: c.hook_ratio(),
            segment_density: c.segment_density(),
            target_audience: &c.target_audience,
            source_file: &c.source_file,
        }
    }
}

impl ExportRecord for AttributeRecord<'_> {
    const HEADERS: &'static [&'static str] = &[
        "video_id",
        "creative_type",
        "duration_sec",
        "duration_category",
        "hook_strength_score",
        "primary_angle",
        "sentiment",
        "segment_count",
        "hook_duration_sec",
        "body_duration_sec",
        "cta_duration_sec",
        "hook_ratio",
        "segment_density",
        "target_audience",
        "source_file",
    ];
}

/// Summary columns followed by the joined attribute columns, which stay
/// present (and empty) for creatives without a mapping.
#[derive(Debug, Serialize)]
struct SummaryRecord<'a> {
    ad_name: &'a str,
    display_name: &'a str,
    active_days: usize,
    first_date: NaiveDate,
    last_date: NaiveDate,
    total_spend: f64,
    total_impressions: f64,
    total_reach: f64,
    total_link_clicks: f64,
    total_purchases: f64,
    avg_ctr: Option<f64>,
    avg_cpc: Option<f64>,
    avg_cpm: Option<f64>,
    avg_frequency: Option<f64>,
    overall_ctr: Ratio,
    overall_cpc: Ratio,
    overall_cpm: Ratio,
    cpa: Ratio,
    avg_daily_spend: Ratio,
    retention_3s: Ratio,
    retention_p25: Ratio,
    retention_p50: Ratio,
    retention_p75: Ratio,
    retention_p95: Ratio,
    retention_p100: Ratio,
    dropoff_3s: Ratio,
    dropoff_p25: Ratio,
    dropoff_p50: Ratio,
    dropoff_p75: Ratio,
    dropoff_p95: Ratio,
    dropoff_p100: Ratio,
    video_id: Option<&'a str>,
    creative_type: Option<&'a str>,
    duration_sec: Option<f64>,
    duration_category: Option<DurationCategory>,
    hook_strength_score: Option<f64>,
    primary_angle: Option<&'a str>,
    sentiment: Option<&'a str>,
    segment_count: Option<usize>,
    hook_duration_sec: Option<i64>,
    body_duration_sec: Option<i64>,
    cta_duration_sec: Option<i64>,
    target_audience: Option<&'a str>,
}

impl<'a> From<&'a CreativeSummary> for SummaryRecord<'a> {
    fn from(s: &'a CreativeSummary) -> Self {
        let a = s.attributes.as_ref();
        let dropoff = s.retention.dropoff();
        SummaryRecord {
            ad_name: &s.ad_name,
            display_name: &s.display_name,
            active_days: s.active_days,
            first_date: s.first_date,
            last_date: s.last_date,
            total_spend: s.total_spend,
            total_impressions: s.total_impressions,
            total_reach: s.total_reach,
            total_link_clicks: s.total_link_clicks,
            total_purchases: s.total_purchases,
            avg_ctr: s.avg_ctr,
            avg_cpc: s.avg_cpc,
            avg_cpm: s.avg_cpm,
            avg_frequency: s.avg_frequency,
            overall_ctr: s.overall_ctr,
            overall_cpc: s.overall_cpc,
            overall_cpm: s.overall_cpm,
            cpa: s.cpa,
            avg_daily_spend: s.avg_daily_spend,
            retention_3s: s.retention.three_seconds,
            retention_p25: s.retention.quarter,
            retention_p50: s.retention.half,
            retention_p75: s.retention.three_quarters,
            retention_p95: s.retention.ninety_five,
            retention_p100: s.retention.complete,
            dropoff_3s: dropoff[0],
            dropoff_p25: dropoff[1],
            dropoff_p50: dropoff[2],
            dropoff_p75: dropoff[3],
            dropoff_p95: dropoff[4],
            dropoff_p100: dropoff[5],
            video_id: a.map(|a| a.video_id.as_str()),
            creative_type: a.map(|a| a.creative_type.as_str()),
            duration_sec: a.map(|a| a.duration_sec),
            duration_category: a.map(|a| a.duration_category),
            hook_strength_score: a.map(|a| a.hook_strength_score),
            primary_angle: a.map(|a| a.primary_angle.as_str()),
            sentiment: a.map(|a| a.sentiment.as_str()),
            segment_count: a.map(|a| a.segment_count),
            hook_duration_sec: a.map(|a| a.hook_duration_sec),
            body_duration_sec: a.map(|a| a.body_duration_sec),
            cta_duration_sec: a.map(|a| a.cta_duration_sec),
            target_audience: a.map(|a| a.target_audience.as_str()),
        }
    }
}

impl ExportRecord for SummaryRecord<'_> {
    const HEADERS: &'static [&'static str] = &[
        "ad_name",
        "display_name",
        "active_days",
        "first_date",
        "last_date",
        "total_spend",
        "total_impressions",
        "total_reach",
        "total_link_clicks",
        "total_purchases",
        "avg_ctr",
        "avg_cpc",
        "avg_cpm",
        "avg_frequency",
        "overall_ctr",
        "overall_cpc",
        "overall_cpm",
        "cpa",
        "avg_daily_spend",
        "retention_3s",
        "retention_p25",
        "retention_p50",
        "retention_p75",
        "retention_p95",
        "retention_p100",
        "dropoff_3s",
        "dropoff_p25",
        "dropoff_p50",
        "dropoff_p75",
        "dropoff_p95",
        "dropoff_p100",
        "video_id",
        "creative_type",
        "duration_sec",
        "duration_category",
        "hook_strength_score",
        "primary_angle",
        "sentiment",
        "segment_count",
        "hook_duration_sec",
        "body_duration_sec",
        "cta_duration_sec",
        "target_audience",
    ];
}

fn write_records<W, T, I>(writer: W, records: I) -> Result<(), ExportError>
where
    W: Write,
    T: ExportRecord,
    I: IntoIterator<Item = T>,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(T::HEADERS)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write the active daily rows, with their completion rates.
///
/// # Errors
///
/// Returns [`ExportError::Csv`] if a record cannot be written.
pub fn write_daily_rows_csv<W: Write>(writer: W, rows: &[PerformanceRow]) -> Result<(), ExportError> {
    write_records(
        writer,
        rows.iter().filter(|r| r.is_active).map(DailyRecord::from),
    )
}

/// Write one row per parsed creative.
///
/// # Errors
///
/// Returns [`ExportError::Csv`] if a record cannot be written.
pub fn write_attributes_csv<W: Write>(
    writer: W,
    creatives: &[CreativeAttributes],
) -> Result<(), ExportError> {
    write_records(writer, creatives.iter().map(AttributeRecord::from))
}

/// Write the creative summary table.
///
/// # Errors
///
/// Returns [`ExportError::Csv`] if a record cannot be written.
pub fn write_summary_csv<W: Write>(
    writer: W,
    summaries: &[CreativeSummary],
) -> Result<(), ExportError> {
    write_records(writer, summaries.iter().map(SummaryRecord::from))
}

/// Write all three exports into `dir`, creating it if needed, and return
/// the written paths.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the directory or a file cannot be
/// created, or [`ExportError::Csv`] if a record cannot be written.
pub fn write_reports(
    dir: &Path,
    rows: &[PerformanceRow],
    creatives: &[CreativeAttributes],
    summaries: &[CreativeSummary],
) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    let daily = dir.join(DAILY_ROWS_FILE);
    write_daily_rows_csv(create_file(&daily)?, rows)?;
    let attributes = dir.join(ATTRIBUTES_FILE);
    write_attributes_csv(create_file(&attributes)?, creatives)?;
    let summary = dir.join(SUMMARY_FILE);
    write_summary_csv(create_file(&summary)?, summaries)?;

    tracing::info!(
        dir = %dir.display(),
        rows = rows.len(),
        creatives = creatives.len(),
        summaries = summaries.len(),
        "wrote exports"
    );
    Ok(vec![daily, attributes, summary])
}

fn create_file(path: &Path) -> Result<std::fs::File, ExportError> {
    std::fs::File::create(path).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use adlens_core::{CompletionCounts, RetentionLadder};
    use serde_json::json;

    use super::*;

    fn day(spend: f64) -> PerformanceRow {
        let date = NaiveDate::from_ymd_opt(2026, 1, 23).unwrap();
        let completions = CompletionCounts {
            three_seconds: 300.0,
            ..CompletionCounts::default()
        };
        PerformanceRow {
            ad_name: "Ad A".to_string(),
            report_start: date,
            report_end: date,
            spend,
            impressions: if spend > 0.0 { 1000.0 } else { 0.0 },
            reach: 0.0,
            link_clicks: 0.0,
            purchases: 0.0,
            ctr: None,
            cpc: Some(12.5),
            cpm: None,
            frequency: None,
            completions,
            is_active: spend > 0.0,
            completion_rates: RetentionLadder::from_counts(
                &completions,
                if spend > 0.0 { 1000.0 } else { 0.0 },
            ),
        }
    }

    fn creative() -> CreativeAttributes {
        CreativeAttributes {
            video_id: "v1".to_string(),
            creative_type: "ugc".to_string(),
            duration_sec: 20.0,
            duration_category: DurationCategory::ShortForm,
            hook_strength_score: 8.0,
            primary_angle: "price".to_string(),
            sentiment: "positive".to_string(),
            segment_count: 4,
            hook_duration_sec: 5,
            body_duration_sec: 12,
            cta_duration_sec: 3,
            target_audience: "parents".to_string(),
            source_file: "a.md".to_string(),
            raw: json!({"video_id": "v1"}),
            qualitative_text: String::new(),
        }
    }

    fn to_string(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn daily_export_skips_inactive_rows() {
        let mut out = Vec::new();
        write_daily_rows_csv(&mut out, &[day(100.0), day(0.0)]).unwrap();
        let text = to_string(out);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ad_name,report_start,report_end,spend,"));
        assert!(lines[0].ends_with(",is_active,rate_3s,rate_p25,rate_p50,rate_p75,rate_p95,rate_p100"));
        assert!(lines[1].starts_with("Ad A,2026-01-23,2026-01-23,100.0,1000.0,"));
        assert!(lines[1].ends_with(",true,30.0,0.0,0.0,0.0,0.0,0.0"));
    }

    #[test]
    fn blank_rates_become_empty_cells() {
        let mut out = Vec::new();
        write_daily_rows_csv(&mut out, &[day(100.0)]).unwrap();
        let text = to_string(out);
        assert!(text.contains(",0.0,0.0,,12.5,,,300.0,"));
    }

    #[test]
    fn attribute_export_includes_structure_ratios() {
        let mut out = Vec::new();
        write_attributes_csv(&mut out, &[creative()]).unwrap();
        let text = to_string(out);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "video_id,creative_type,duration_sec,duration_category,hook_strength_score,primary_angle,sentiment,segment_count,hook_duration_sec,body_duration_sec,cta_duration_sec,hook_ratio,segment_density,target_audience,source_file"
        );
        assert_eq!(
            lines[1],
            "v1,ugc,20.0,short-form,8.0,price,positive,4,5,12,3,25.0,0.2,parents,a.md"
        );
    }

    #[test]
    fn undefined_structure_ratios_are_empty() {
        let mut zero = creative();
        zero.duration_sec = 0.0;
        let mut out = Vec::new();
        write_attributes_csv(&mut out, &[zero]).unwrap();
        assert!(to_string(out).contains(",5,12,3,,,parents,"));
    }

    fn field_counts(text: &str) -> (usize, Vec<usize>) {
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let headers = reader.headers().unwrap().len();
        let rows = reader.records().map(|r| r.unwrap().len()).collect();
        (headers, rows)
    }

    #[test]
    fn empty_exports_keep_their_header_line() {
        let mut daily = Vec::new();
        write_daily_rows_csv(&mut daily, &[day(0.0)]).unwrap();
        let mut attributes = Vec::new();
        write_attributes_csv(&mut attributes, &[]).unwrap();
        let mut summary = Vec::new();
        write_summary_csv(&mut summary, &[]).unwrap();

        assert_eq!(to_string(daily), format!("{}\n", DailyRecord::HEADERS.join(",")));
        assert_eq!(
            to_string(attributes),
            format!("{}\n", AttributeRecord::HEADERS.join(","))
        );
        let summary = to_string(summary);
        assert!(summary.starts_with("ad_name,display_name,active_days,first_date,"));
        assert!(summary.ends_with(",cta_duration_sec,target_audience\n"));
        assert_eq!(summary.lines().count(), 1);
    }

    #[test]
    fn header_width_matches_every_record() {
        let summaries = crate::summarize(&[day(100.0)], &crate::AttributeJoin::new());
        let mut summary = Vec::new();
        write_summary_csv(&mut summary, &summaries).unwrap();
        let (headers, rows) = field_counts(&to_string(summary));
        assert_eq!(headers, SummaryRecord::HEADERS.len());
        assert_eq!(rows, vec![headers]);

        let mut daily = Vec::new();
        write_daily_rows_csv(&mut daily, &[day(100.0)]).unwrap();
        let (headers, rows) = field_counts(&to_string(daily));
        assert_eq!(headers, DailyRecord::HEADERS.len());
        assert_eq!(rows, vec![headers]);

        let mut attributes = Vec::new();
        write_attributes_csv(&mut attributes, &[creative()]).unwrap();
        let (headers, rows) = field_counts(&to_string(attributes));
        assert_eq!(headers, AttributeRecord::HEADERS.len());
        assert_eq!(rows, vec![headers]);
    }

    #[test]
    fn summary_export_includes_dropoff_steps() {
        let summaries = crate::summarize(&[day(100.0)], &crate::AttributeJoin::new());
        let mut out = Vec::new();
        write_summary_csv(&mut out, &summaries).unwrap();
        let text = to_string(out);
        assert!(text.contains(",30.0,0.0,0.0,0.0,0.0,0.0,70.0,100.0,,,,,"));
    }
}
