//! Grouping of active performance rows into one summary per creative.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use adlens_core::{CompletionCounts, CreativeSummary, PerformanceRow, Ratio, RetentionLadder};

use crate::join::AttributeJoin;

/// Running arithmetic mean that ignores absent values.
#[derive(Debug, Default, Clone, Copy)]
struct Mean {
    sum: f64,
    count: u32,
}

impl Mean {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value.filter(|v| v.is_finite()) {
            self.sum += v;
            self.count += 1;
        }
    }

    fn value(self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / f64::from(self.count))
    }
}

#[derive(Debug, Default)]
struct GroupTotals {
    dates: BTreeSet<NaiveDate>,
    spend: f64,
    impressions: f64,
    reach: f64,
    link_clicks: f64,
    purchases: f64,
    completions: CompletionCounts,
    ctr: Mean,
    cpc: Mean,
    cpm: Mean,
    frequency: Mean,
}

impl GroupTotals {
    fn accumulate(rows: &[&PerformanceRow]) -> Self {
        let mut totals = GroupTotals::default();
        for row in rows {
            totals.dates.insert(row.report_start);
            totals.spend += row.spend;
            totals.impressions += row.impressions;
            totals.reach += row.reach;
            totals.link_clicks += row.link_clicks;
            totals.purchases += row.purchases;
            totals.completions = totals.completions.merged(&row.completions);
            totals.ctr.push(row.ctr);
            totals.cpc.push(row.cpc);
            totals.cpm.push(row.cpm);
            totals.frequency.push(row.frequency);
        }
        totals
    }
}

/// Build one [`CreativeSummary`] per creative with at least one active day.
///
/// Inactive rows (`spend == 0`) are excluded. Output is ordered by ad name,
/// and within a group rows are summed in date order, so the result does not
/// depend on input row order. Attributes are left-joined from `join`:
/// creatives without a mapping keep `attributes: None`, and mapped creatives
/// with no active performance produce no row.
#[must_use]
pub fn summarize(rows: &[PerformanceRow], join: &AttributeJoin) -> Vec<CreativeSummary> {
    let mut groups: BTreeMap<&str, Vec<&PerformanceRow>> = BTreeMap::new();
    for row in rows.iter().filter(|r| r.is_active) {
        groups.entry(row.ad_name.as_str()).or_default().push(row);
    }

    let summaries: Vec<CreativeSummary> = groups
        .into_iter()
        .filter_map(|(ad_name, mut group)| {
            group.sort_by(|a, b| {
                a.report_start
                    .cmp(&b.report_start)
                    .then(a.report_end.cmp(&b.report_end))
                    .then(a.spend.total_cmp(&b.spend))
                    .then(a.impressions.total_cmp(&b.impressions))
            });
            summarize_group(ad_name, &group, join)
        })
        .collect();

    tracing::info!(
        rows = rows.len(),
        creatives = summaries.len(),
        joined = summaries.iter().filter(|s| s.attributes.is_some()).count(),
        "summary built"
    );
    summaries
}

fn summarize_group(
    ad_name: &str,
    group: &[&PerformanceRow],
    join: &AttributeJoin,
) -> Option<CreativeSummary> {
    let totals = GroupTotals::accumulate(group);
    let first_date = *totals.dates.first()?;
    let last_date = *totals.dates.last()?;
    let active_days = totals.dates.len();

    #[allow(clippy::cast_precision_loss)]
    let avg_daily_spend = Ratio::of(totals.spend, active_days as f64);

    Some(CreativeSummary {
        ad_name: ad_name.to_string(),
        display_name: join.display_name_for(ad_name).to_string(),
        active_days,
        first_date,
        last_date,
        total_spend: totals.spend,
        total_impressions: totals.impressions,
        total_reach: totals.reach,
        total_link_clicks: totals.link_clicks,
        total_purchases: totals.purchases,
        avg_ctr: totals.ctr.value(),
        avg_cpc: totals.cpc.value(),
        avg_cpm: totals.cpm.value(),
        avg_frequency: totals.frequency.value(),
        overall_ctr: Ratio::percent(totals.link_clicks, totals.impressions),
        overall_cpc: Ratio::of(totals.spend, totals.link_clicks),
        overall_cpm: Ratio::of(totals.spend * 1000.0, totals.impressions),
        cpa: Ratio::of(totals.spend, totals.purchases),
        avg_daily_spend,
        retention: RetentionLadder::from_counts(&totals.completions, totals.impressions),
        total_completions: totals.completions,
        attributes: join.attributes_for(ad_name).cloned(),
    })
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
