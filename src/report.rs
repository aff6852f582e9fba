//! Batch Report
//! Console walk-through of a loaded dataset: overview, cleaning, aggregates
//! and the three static charts.

use crate::charts::{StaticChartRenderer, JOURNAL_CHART_SIZE, WORD_CLOUD_SIZE, YEAR_CHART_SIZE};
use crate::config::ReportConfig;
use crate::data::{CleanRecord, JournalCount, LoadedData, Pipeline, YearCounts};
use crate::stats::{StatsCalculator, TitleWordFrequencies, WordCountStats};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const YEAR_CHART_FILE: &str = "publications_by_year.png";
const JOURNAL_CHART_FILE: &str = "top_journals.png";
const WORD_CLOUD_FILE: &str = "title_word_cloud.png";

/// Aggregates shared by the console tables and the JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub rows: usize,
    pub cleaned_rows: usize,
    pub years: YearCounts,
    pub journals: Vec<JournalCount>,
    pub word_counts: WordCountStats,
}

impl ReportSummary {
    pub fn build(data: &LoadedData, top_journals: usize) -> Self {
        Self {
            rows: data.overview.rows,
            cleaned_rows: data.records.len(),
            years: Pipeline::aggregate_by_year(&data.records),
            journals: Pipeline::aggregate_by_journal(&data.records, top_journals),
            word_counts: StatsCalculator::word_count_stats(&data.records),
        }
    }
}

/// Run the full report against stdout.
pub fn run(data: &LoadedData, config: &ReportConfig, json: bool) -> Result<()> {
    let summary = ReportSummary::build(data, config.top_journals);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if json {
        serde_json::to_writer_pretty(&mut out, &summary)?;
        writeln!(out)?;
        return Ok(());
    }

    write_overview(&mut out, data, config.preview_rows)?;
    write_cleaning(&mut out, data)?;
    write_analysis(&mut out, &summary, config.year_rows)?;
    write_word_counts(&mut out, &summary.word_counts)?;

    let charts = render_charts(&mut out, &summary, &data.records, config)?;
    if config.open_charts {
        for path in &charts {
            if let Err(e) = open::that(path) {
                warn!(path = %path.display(), error = %e, "could not open chart");
            }
        }
    }

    writeln!(out, "\nReport complete. Charts written to {}", config.output_dir.display())?;
    Ok(())
}

fn write_overview(out: &mut impl Write, data: &LoadedData, preview_rows: usize) -> Result<()> {
    writeln!(out, "Successfully loaded the trimmed dataset.")?;
    writeln!(out, "\n--- DataFrame Information ---")?;
    let (rows, cols) = data.overview.shape();
    writeln!(out, "Shape of the dataset: ({}, {})", rows, cols)?;

    writeln!(out, "\nData types and missing values:")?;
    let name_width = data
        .overview
        .columns
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(0)
        .max(6);
    writeln!(
        out,
        " {:<3} {:<name_width$}  {:<14}  Dtype",
        "#", "Column", "Non-Null Count"
    )?;
    for (i, column) in data.overview.columns.iter().enumerate() {
        writeln!(
            out,
            " {:<3} {:<name_width$}  {:<14}  {}",
            i,
            column.name,
            format!("{} non-null", column.non_null),
            column.dtype
        )?;
    }

    writeln!(out, "\nFirst {} rows:", preview_rows)?;
    writeln!(out, "{}", data.raw.head(Some(preview_rows)))?;
    Ok(())
}

fn write_cleaning(out: &mut impl Write, data: &LoadedData) -> Result<()> {
    writeln!(out, "\n--- Starting Data Cleaning and Preparation ---")?;
    writeln!(out, "Data cleaning and preparation complete. Ready for analysis.")?;
    let (rows, cols) = data.cleaned_shape();
    writeln!(out, "Cleaned DataFrame shape: ({}, {})", rows, cols)?;
    Ok(())
}

fn write_analysis(out: &mut impl Write, summary: &ReportSummary, year_rows: usize) -> Result<()> {
    writeln!(out, "\n--- Performing Data Analysis and Visualization ---")?;

    writeln!(out, "\nTop {} Years with the Most Publications:", year_rows)?;
    writeln!(out, "year")?;
    for (year, count) in summary.years.iter().take(year_rows) {
        writeln!(out, "{:<8}{:>8}", year, count)?;
    }

    writeln!(out, "\nTop {} Publishing Journals:", summary.journals.len())?;
    let width = summary
        .journals
        .iter()
        .map(|j| j.journal.chars().count())
        .max()
        .unwrap_or(0);
    for journal in &summary.journals {
        writeln!(out, "{:<width$}  {:>6}", journal.journal, journal.count)?;
    }
    Ok(())
}

fn write_word_counts(out: &mut impl Write, stats: &WordCountStats) -> Result<()> {
    writeln!(out, "\nAbstract word counts:")?;
    writeln!(out, "count   {}", stats.count)?;
    writeln!(out, "mean    {:.2}", stats.mean)?;
    writeln!(out, "std     {:.2}", stats.std)?;
    writeln!(out, "median  {:.1}", stats.median)?;
    writeln!(out, "5%      {:.1}", stats.p05)?;
    writeln!(out, "95%     {:.1}", stats.p95)?;
    writeln!(out, "max     {}", stats.max)?;
    writeln!(out, "empty   {}", stats.empty)?;
    Ok(())
}

/// Render and save the three charts, returning the written paths in order.
fn render_charts(
    out: &mut impl Write,
    summary: &ReportSummary,
    records: &[CleanRecord],
    config: &ReportConfig,
) -> Result<Vec<PathBuf>> {
    let dir = config.output_dir.as_path();
    let mut written = Vec::with_capacity(3);

    let (w, h) = YEAR_CHART_SIZE;
    let png = StaticChartRenderer::render_publications_by_year(&summary.years, w, h)?;
    written.push(save(dir, YEAR_CHART_FILE, &png)?);
    writeln!(out, "Visualization 1: Publications over time plot generated.")?;

    let (w, h) = JOURNAL_CHART_SIZE;
    let png = StaticChartRenderer::render_top_journals(&summary.journals, w, h)?;
    written.push(save(dir, JOURNAL_CHART_FILE, &png)?);
    writeln!(out, "Visualization 2: Top journals bar chart generated.")?;

    let frequencies = TitleWordFrequencies::from_titles(
        records.iter().map(|r| r.title.as_str()),
        config.word_cloud_words,
    );
    let (w, h) = WORD_CLOUD_SIZE;
    let png = StaticChartRenderer::render_word_cloud(&frequencies, w, h)?;
    written.push(save(dir, WORD_CLOUD_FILE, &png)?);
    writeln!(out, "Visualization 3: Word cloud of paper titles generated.")?;

    Ok(written)
}

fn save(dir: &Path, name: &str, png: &[u8]) -> Result<PathBuf> {
    let path = dir.join(name);
    StaticChartRenderer::save_png(png, &path)
        .with_context(|| format!("Failed to save {}", path.display()))?;
    info!(path = %path.display(), bytes = png.len(), "chart saved");
    Ok(path)
}
