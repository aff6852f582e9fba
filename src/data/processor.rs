//! Data Processor Module
//! Cleaning, date parsing and aggregation shared by the report and the explorer.

use crate::data::record::{CleanRecord, Dataset, RawRecord};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Imputed value for missing `journal` and `authors`.
pub const UNKNOWN: &str = "Unknown";

/// Publication count per year, ascending by year.
pub type YearCounts = BTreeMap<i32, usize>;

/// Publication count for one journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalCount {
    pub journal: String,
    pub count: usize,
}

impl JournalCount {
    pub fn new(journal: impl Into<String>, count: usize) -> Self {
        Self {
            journal: journal.into(),
            count,
        }
    }
}

const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%B %d %Y",
];

const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
];

/// Stateless cleaning and aggregation pipeline.
pub struct Pipeline;

impl Pipeline {
    /// Impute missing text fields, drop rows with an unparseable publish date,
    /// and derive `year` and `abstract_word_count`.
    pub fn clean(dataset: &Dataset) -> Vec<CleanRecord> {
        let cleaned: Vec<CleanRecord> = dataset
            .records
            .iter()
            .filter_map(Self::clean_record)
            .collect();

        let dropped = dataset.len() - cleaned.len();
        if dropped > 0 {
            debug!(
                dropped,
                kept = cleaned.len(),
                "dropped rows with unparseable publish_time"
            );
        }
        cleaned
    }

    fn clean_record(raw: &RawRecord) -> Option<CleanRecord> {
        let abstract_text = raw.abstract_text.clone().unwrap_or_default();
        let title = raw.title.clone().unwrap_or_default();
        let journal = raw.journal.clone().unwrap_or_else(|| UNKNOWN.to_string());
        let authors = raw.authors.clone().unwrap_or_else(|| UNKNOWN.to_string());

        let publish_time = raw.publish_time.as_deref().and_then(parse_publish_time)?;
        let abstract_word_count = word_count(&abstract_text);

        Some(CleanRecord {
            title,
            authors,
            abstract_text,
            journal,
            year: publish_time.year(),
            publish_time,
            abstract_word_count,
        })
    }

    /// Count records per year, ascending by year.
    pub fn aggregate_by_year(records: &[CleanRecord]) -> YearCounts {
        let mut counts = YearCounts::new();
        for record in records {
            *counts.entry(record.year).or_insert(0) += 1;
        }
        counts
    }

    /// The `top_n` journals by record count. Ties are broken by journal name.
    pub fn aggregate_by_journal(records: &[CleanRecord], top_n: usize) -> Vec<JournalCount> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in records {
            *counts.entry(record.journal.as_str()).or_insert(0) += 1;
        }

        let mut ranked: Vec<JournalCount> = counts
            .into_iter()
            .map(|(journal, count)| JournalCount::new(journal, count))
            .collect();
        ranked.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.journal.cmp(&b.journal))
        });
        ranked.truncate(top_n);
        ranked
    }

    /// Keep records with `min_year <= year <= max_year`.
    pub fn filter_by_year_range(
        records: &[CleanRecord],
        min_year: i32,
        max_year: i32,
    ) -> Vec<CleanRecord> {
        records
            .iter()
            .filter(|r| r.year >= min_year && r.year <= max_year)
            .cloned()
            .collect()
    }

    /// Smallest and largest year present, `None` when there are no records.
    pub fn year_bounds(records: &[CleanRecord]) -> Option<(i32, i32)> {
        let min = records.iter().map(|r| r.year).min()?;
        let max = records.iter().map(|r| r.year).max()?;
        Some((min, max))
    }
}

/// Number of whitespace-separated tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Parse a `publish_time` cell. Returns `None` for anything unrecognised.
pub fn parse_publish_time(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
    {
        return Some(date);
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    {
        return Some(dt.date());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }

    parse_partial_date(value)
}

/// `YYYY`, `YYYY-MM` and `YYYY/MM`, resolved to the first day of the period.
fn parse_partial_date(value: &str) -> Option<NaiveDate> {
    let mut parts = value.split(['-', '/']);
    let year_part = parts.next()?;
    let month_part = parts.next();
    if parts.next().is_some() || year_part.len() != 4 || !is_digits(year_part) {
        return None;
    }

    let year: i32 = year_part.parse().ok()?;
    let month: u32 = match month_part {
        None => 1,
        Some(m) if (1..=2).contains(&m.len()) && is_digits(m) => m.parse().ok()?,
        Some(_) => return None,
    };
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}
