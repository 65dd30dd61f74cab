//! Markdown text blocks handed to the external narrative-generation step.

use std::fmt::Write as _;

use adlens_core::{CreativeAttributes, CreativeSummary, Ratio, VideoMilestone};

const UNDEFINED: &str = "N/A";
const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Render the KPI digest: an overview table followed by the retention
/// ladder, one row per summary in the order given. Undefined ratios print
/// as `N/A`.
#[must_use]
pub fn render_kpi_digest(summaries: &[CreativeSummary], currency_symbol: &str) -> String {
    let mut out = String::new();

    out.push_str("## KPI summary by creative\n\n");
    out.push_str(
        "| Creative | Active days | Spend | Impressions | CTR | CPC | CPA | 3s retention | 100% retention |\n",
    );
    out.push_str("|---|---|---|---|---|---|---|---|---|\n");
    for s in summaries {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} | {} | {} | {} |",
            escape_cell(&s.display_name),
            s.active_days,
            currency(Ratio::from_value(s.total_spend), currency_symbol),
            group_thousands(s.total_impressions),
            percent(s.overall_ctr, 2),
            currency(s.overall_cpc, currency_symbol),
            currency(s.cpa, currency_symbol),
            percent(s.retention.three_seconds, 1),
            percent(s.retention.complete, 1),
        );
    }

    out.push_str("\n## Retention\n\n");
    out.push_str("| Creative |");
    for milestone in VideoMilestone::ALL {
        let _ = write!(out, " {milestone} |");
    }
    out.push('\n');
    out.push('|');
    out.push_str(&"---|".repeat(VideoMilestone::ALL.len() + 1));
    for s in summaries {
        out.push('\n');
        let _ = write!(out, "| {} |", escape_cell(&s.display_name));
        for milestone in VideoMilestone::ALL {
            let _ = write!(out, " {} |", percent(s.retention.get(milestone), 1));
        }
    }

    out
}

/// Render each creative's structured analysis as pretty JSON, followed by
/// its qualitative notes when there are any.
#[must_use]
pub fn render_creative_context(creatives: &[CreativeAttributes]) -> String {
    creatives
        .iter()
        .map(|c| {
            let mut part =
                serde_json::to_string_pretty(&c.raw).unwrap_or_else(|_| c.raw.to_string());
            let qualitative = c.qualitative_text.trim();
            if !qualitative.is_empty() {
                let _ = write!(part, "\n\n### Qualitative analysis\n{qualitative}");
            }
            part
        })
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}

fn percent(ratio: Ratio, decimals: usize) -> String {
    match ratio {
        Ratio::Defined(v) => format!("{v:.decimals$}%"),
        Ratio::Undefined => UNDEFINED.to_string(),
    }
}

fn currency(ratio: Ratio, symbol: &str) -> String {
    match ratio {
        Ratio::Defined(v) => format!("{symbol}{}", group_thousands(v)),
        Ratio::Undefined => UNDEFINED.to_string(),
    }
}

/// Rounds to a whole number and inserts `,` every three digits.
fn group_thousands(value: f64) -> String {
    let rounded = format!("{value:.0}");
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
