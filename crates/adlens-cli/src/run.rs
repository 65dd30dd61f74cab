//! Command handlers. Each one loads its inputs from disk, runs the pure
//! pipeline, and prints or writes the result.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;

use adlens_analysis::{
    render_creative_context, render_kpi_digest, resolve_mapping, summarize, write_reports,
    AttributeJoin,
};
use adlens_core::{AppConfig, CreativeAttributes, CreativeSummary, PerformanceRow};

use crate::PipelineArgs;

/// Everything one pipeline run produces.
struct PipelineOutput {
    rows: Vec<PerformanceRow>,
    creatives: Vec<CreativeAttributes>,
    summaries: Vec<CreativeSummary>,
}

/// Format an optional date for display, returning `"—"` when `None`.
fn fmt_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(
        || "\u{2014}".to_string(),
        |d| d.format("%Y-%m-%d").to_string(),
    )
}

fn load_rows(path: &Path) -> anyhow::Result<Vec<PerformanceRow>> {
    adlens_ingest::load_performance(path)
        .with_context(|| format!("failed to load performance export {}", path.display()))
}

fn load_creatives(paths: &[PathBuf]) -> anyhow::Result<Vec<CreativeAttributes>> {
    adlens_creative::load_analysis_files(paths).context("failed to load creative analyses")
}

/// The mapping file to use: the explicit one, else the configured path when
/// that file exists.
pub(crate) fn mapping_path(config: &AppConfig, explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => config
            .mapping_path
            .is_file()
            .then(|| config.mapping_path.clone()),
    }
}

fn run_pipeline(config: &AppConfig, inputs: &PipelineArgs) -> anyhow::Result<PipelineOutput> {
    let rows = load_rows(&inputs.performance)?;
    let creatives = load_creatives(&inputs.analysis)?;

    let join = match mapping_path(config, inputs.mapping.as_deref()) {
        Some(path) => {
            let mapping = adlens_core::load_mapping(&path)
                .with_context(|| format!("failed to load mapping {}", path.display()))?;
            resolve_mapping(&mapping, &creatives)
        }
        None => {
            tracing::debug!("no mapping file; summary will carry no creative attributes");
            AttributeJoin::new()
        }
    };

    let summaries = summarize(&rows, &join);
    Ok(PipelineOutput {
        rows,
        creatives,
        summaries,
    })
}

/// Print a dataset overview for a performance export.
///
/// # Errors
///
/// Returns an error if the export cannot be loaded.
pub(crate) fn run_overview(path: &Path) -> anyhow::Result<()> {
    let rows = load_rows(path)?;
    let overview = adlens_ingest::dataset_overview(&rows);

    println!("Rows: {}", overview.row_count);
    println!(
        "Period: {} to {}",
        fmt_date(overview.first_date),
        fmt_date(overview.last_date)
    );
    println!("Creatives: {}", overview.ad_names.len());
    for name in &overview.ad_names {
        println!("  {name}");
    }
    Ok(())
}

/// List the creative records parsed from analysis files.
///
/// # Errors
///
/// Returns an error if a file cannot be read or a standalone JSON analysis
/// is malformed.
pub(crate) fn run_creatives(paths: &[PathBuf]) -> anyhow::Result<()> {
    let creatives = load_creatives(paths)?;

    if creatives.is_empty() {
        println!("no creative analyses found in {} file(s)", paths.len());
        return Ok(());
    }

    println!(
        "{:<40}{:<24}{:<10}{:<12}{:<6}{:<10}SOURCE",
        "VIDEO_ID", "TYPE", "SECONDS", "CATEGORY", "HOOK", "SEGMENTS"
    );
    for c in &creatives {
        println!(
            "{:<40}{:<24}{:<10}{:<12}{:<6}{:<10}{}",
            c.video_id,
            c.creative_type,
            c.duration_sec,
            c.duration_category.to_string(),
            c.hook_strength_score,
            c.segment_count,
            c.source_file
        );
    }
    Ok(())
}

/// Run the pipeline and write the CSV exports into `out_dir`.
///
/// # Errors
///
/// Returns an error if an input cannot be loaded or an export cannot be
/// written.
pub(crate) fn run_summarize(
    config: &AppConfig,
    inputs: &PipelineArgs,
    out_dir: &Path,
) -> anyhow::Result<()> {
    let output = run_pipeline(config, inputs)?;
    let written = write_reports(out_dir, &output.rows, &output.creatives, &output.summaries)
        .with_context(|| format!("failed to write exports to {}", out_dir.display()))?;

    println!(
        "summarized {} creatives from {} rows",
        output.summaries.len(),
        output.rows.len()
    );
    for path in &written {
        println!("wrote {}", path.display());
    }
    Ok(())
}

/// Run the pipeline and print the KPI digest followed by the creative
/// context block.
///
/// # Errors
///
/// Returns an error if an input cannot be loaded.
pub(crate) fn run_digest(config: &AppConfig, inputs: &PipelineArgs) -> anyhow::Result<()> {
    let output = run_pipeline(config, inputs)?;

    println!(
        "{}",
        render_kpi_digest(&output.summaries, &config.currency_symbol)
    );
    if !output.creatives.is_empty() {
        println!();
        println!("{}", render_creative_context(&output.creatives));
    }
    Ok(())
}
