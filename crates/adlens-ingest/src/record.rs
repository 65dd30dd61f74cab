//! Raw export records and the lenient cell coercions used to decode them.

use chrono::{NaiveDate, NaiveDateTime};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// One export row exactly as decoded, before cleaning.
///
/// Field names are the canonical column names; aliases accept the headers
/// of the ad platform's Japanese-locale export unchanged.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawPerformanceRecord {
    #[serde(alias = "広告の名前")]
    pub ad_name: String,
    #[serde(alias = "レポート開始日", deserialize_with = "de_report_date")]
    pub report_start: NaiveDate,
    #[serde(alias = "レポート終了日", deserialize_with = "de_report_date")]
    pub report_end: NaiveDate,
    #[serde(alias = "消化金額 (JPY)", default, deserialize_with = "de_count")]
    pub spend: f64,
    #[serde(alias = "インプレッション", default, deserialize_with = "de_count")]
    pub impressions: f64,
    #[serde(alias = "リーチ", default, deserialize_with = "de_count")]
    pub reach: f64,
    #[serde(alias = "リンクのクリック", default, deserialize_with = "de_count")]
    pub link_clicks: f64,
    #[serde(alias = "購入", default, deserialize_with = "de_count")]
    pub purchases: f64,
    #[serde(
        alias = "CTR(リンククリックスルー率)",
        default,
        deserialize_with = "de_optional_number"
    )]
    pub ctr: Option<f64>,
    #[serde(
        alias = "CPC(リンククリックの単価) (JPY)",
        default,
        deserialize_with = "de_optional_number"
    )]
    pub cpc: Option<f64>,
    #[serde(
        alias = "CPM(インプレッション単価) (JPY)",
        default,
        deserialize_with = "de_optional_number"
    )]
    pub cpm: Option<f64>,
    #[serde(alias = "フリークエンシー", default, deserialize_with = "de_optional_number")]
    pub frequency: Option<f64>,
    #[serde(alias = "動画の3秒再生数", default, deserialize_with = "de_count")]
    pub video_3s_plays: f64,
    #[serde(alias = "動画の25%再生数", default, deserialize_with = "de_count")]
    pub video_p25_plays: f64,
    #[serde(alias = "動画の50%再生数", default, deserialize_with = "de_count")]
    pub video_p50_plays: f64,
    #[serde(alias = "動画の75%再生数", default, deserialize_with = "de_count")]
    pub video_p75_plays: f64,
    #[serde(alias = "動画の95%再生数", default, deserialize_with = "de_count")]
    pub video_p95_plays: f64,
    #[serde(alias = "動画の100%再生数", default, deserialize_with = "de_count")]
    pub video_p100_plays: f64,
}

/// A spreadsheet cell: numeric when the decoder could infer it, else text.
#[derive(Deserialize)]
#[serde(untagged)]
enum Cell {
    Number(f64),
    Text(String),
}

/// Parses a textual number, tolerating thousands separators and a trailing
/// percent sign. Blank cells and a lone `-` are absent values.
pub(crate) fn parse_number_text(raw: &str) -> Result<Option<f64>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return Ok(None);
    }
    let cleaned: String = trimmed
        .trim_end_matches('%')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned
        .trim()
        .parse::<f64>()
        .map(|v| Some(v).filter(|v| v.is_finite()))
        .map_err(|_| format!("invalid number '{raw}'"))
}

/// Parses a report date in any of the layouts the exports have used.
pub(crate) fn parse_report_date(raw: &str) -> Option<NaiveDate> {
    const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
    const DATETIME_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
    ];

    let trimmed = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
}

fn de_optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Cell>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Cell::Number(n)) => Ok(Some(n).filter(|v| v.is_finite())),
        Some(Cell::Text(s)) => parse_number_text(&s).map_err(D::Error::custom),
    }
}

/// Counts and spend: a blank cell contributes nothing to a sum.
fn de_count<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    de_optional_number(deserializer).map(|v| v.unwrap_or(0.0))
}

fn de_report_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_report_date(&raw).ok_or_else(|| D::Error::custom(format!("invalid report date '{raw}'")))
}
