//! Record Types
//! Raw and cleaned paper metadata rows.

use chrono::NaiveDate;
use serde::Serialize;

pub const TITLE_COL: &str = "title";
pub const AUTHORS_COL: &str = "authors";
pub const ABSTRACT_COL: &str = "abstract";
pub const JOURNAL_COL: &str = "journal";
pub const PUBLISH_TIME_COL: &str = "publish_time";

/// One paper's metadata as read from the CSV. `None` marks a missing cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub title: Option<String>,
    pub authors: Option<String>,
    pub abstract_text: Option<String>,
    pub journal: Option<String>,
    pub publish_time: Option<String>,
}

/// A record after imputation with a parsed publish date and derived fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanRecord {
    pub title: String,
    pub authors: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub journal: String,
    pub publish_time: NaiveDate,
    pub year: i32,
    pub abstract_word_count: usize,
}

/// Ordered collection of raw records from a single source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub records: Vec<RawRecord>,
}

impl Dataset {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<&CleanRecord> for RawRecord {
    fn from(record: &CleanRecord) -> Self {
        Self {
            title: Some(record.title.clone()),
            authors: Some(record.authors.clone()),
            abstract_text: Some(record.abstract_text.clone()),
            journal: Some(record.journal.clone()),
            publish_time: Some(record.publish_time.format("%Y-%m-%d").to_string()),
        }
    }
}

impl From<&[CleanRecord]> for Dataset {
    fn from(records: &[CleanRecord]) -> Self {
        Self::new(records.iter().map(RawRecord::from).collect())
    }
}
