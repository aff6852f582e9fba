//! CSV Data Loader Module
//! Handles metadata CSV loading and column extraction using Polars.

use crate::data::processor::Pipeline;
use crate::data::record::{
    CleanRecord, Dataset, RawRecord, ABSTRACT_COL, AUTHORS_COL, JOURNAL_COL, PUBLISH_TIME_COL,
    TITLE_COL,
};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Cell contents read as missing, on top of empty cells.
const NA_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("The file '{}' was not found.", .0.display())]
    SourceNotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("No data loaded")]
    NoData,
}

/// Dtype and null summary of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    pub dtype: String,
    pub non_null: usize,
}

/// Shape and per-column summary of a raw DataFrame.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetOverview {
    pub rows: usize,
    pub columns: Vec<ColumnSummary>,
}

impl DatasetOverview {
    pub fn from_dataframe(df: &DataFrame) -> Self {
        let columns = df
            .get_columns()
            .iter()
            .map(|col| ColumnSummary {
                name: col.name().to_string(),
                dtype: col.dtype().to_string(),
                non_null: col.len() - col.null_count(),
            })
            .collect();

        Self {
            rows: df.height(),
            columns,
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns.len())
    }
}

/// Handles CSV file loading with Polars.
pub struct DataLoader {
    df: Option<DataFrame>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            file_path: None,
        }
    }

    /// Load a CSV file using Polars. A missing file is reported before any read.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame, LoaderError> {
        if !file_path.is_file() {
            return Err(LoaderError::SourceNotFound(file_path.to_path_buf()));
        }
        self.file_path = Some(file_path.to_path_buf());

        // Every column is read as text; the pipeline does its own parsing.
        let null_values = NA_MARKERS.iter().map(|m| (*m).into()).collect();
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(0))
            .with_null_values(Some(NullValues::AllColumns(null_values)))
            .finish()?
            .collect()?;

        info!(path = %file_path.display(), rows = df.height(), cols = df.width(), "loaded csv");

        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Extract the pipeline columns of the loaded DataFrame as raw records.
    pub fn to_dataset(&self) -> Result<Dataset, LoaderError> {
        let df = self.df.as_ref().ok_or(LoaderError::NoData)?;
        dataset_from_dataframe(df)
    }

    /// Get a reference to the loaded DataFrame.
    pub fn get_dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    /// Get file path.
    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    /// Take ownership of the loaded DataFrame.
    pub fn into_dataframe(self) -> Option<DataFrame> {
        self.df
    }
}

/// A loaded CSV with its overview and cleaned records.
pub struct LoadedData {
    pub path: PathBuf,
    pub raw: DataFrame,
    pub overview: DatasetOverview,
    pub records: Vec<CleanRecord>,
}

impl LoadedData {
    /// Load `path` and run the cleaning pipeline over it.
    pub fn load(path: &Path) -> Result<Self, LoaderError> {
        let mut loader = DataLoader::new();
        loader.load_csv(path)?;
        let dataset = loader.to_dataset()?;
        let path = loader
            .get_file_path()
            .cloned()
            .unwrap_or_else(|| path.to_path_buf());
        let raw = loader.into_dataframe().ok_or(LoaderError::NoData)?;

        let records = Pipeline::clean(&dataset);
        info!(
            raw_rows = raw.height(),
            cleaned_rows = records.len(),
            "cleaned dataset"
        );

        Ok(Self {
            path,
            overview: DatasetOverview::from_dataframe(&raw),
            raw,
            records,
        })
    }

    /// Shape of the cleaned dataset, counting the two derived columns.
    pub fn cleaned_shape(&self) -> (usize, usize) {
        (self.records.len(), self.overview.columns.len() + 2)
    }
}

/// Convert a DataFrame into raw records. Absent columns are missing in every row.
pub fn dataset_from_dataframe(df: &DataFrame) -> Result<Dataset, LoaderError> {
    let titles = string_column(df, TITLE_COL)?;
    let authors = string_column(df, AUTHORS_COL)?;
    let abstracts = string_column(df, ABSTRACT_COL)?;
    let journals = string_column(df, JOURNAL_COL)?;
    let publish_times = string_column(df, PUBLISH_TIME_COL)?;

    let records = titles
        .into_iter()
        .zip(authors)
        .zip(abstracts)
        .zip(journals)
        .zip(publish_times)
        .map(
            |((((title, authors), abstract_text), journal), publish_time)| RawRecord {
                title,
                authors,
                abstract_text,
                journal,
                publish_time,
            },
        )
        .collect();

    Ok(Dataset::new(records))
}

fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, LoaderError> {
    let Ok(column) = df.column(name) else {
        debug!(column = name, "column absent, every value treated as missing");
        return Ok(vec![None; df.height()]);
    };

    let as_str = column.cast(&DataType::String)?;
    let values = as_str
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect();
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_missing_file_is_source_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trimmed_metadata.csv");

        let mut loader = DataLoader::new();
        let err = loader.load_csv(&path).unwrap_err();

        assert!(matches!(err, LoaderError::SourceNotFound(p) if p == path));
        assert!(loader.get_dataframe().is_none());
    }

    #[test]
    fn test_load_csv_reads_rows_and_columns() {
        let file = write_csv(
            "title,authors,abstract,journal,publish_time\n\
             A study,Smith J,Some words here,Lancet,2020-03-01\n\
             Another,Doe A,More words,BMJ,2021-07-15\n",
        );

        let mut loader = DataLoader::new();
        let df = loader.load_csv(file.path()).unwrap();

        assert_eq!(df.height(), 2);
        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            columns,
            vec!["title", "authors", "abstract", "journal", "publish_time"]
        );
        assert_eq!(loader.get_file_path().unwrap(), file.path());
        assert!(loader.get_dataframe().is_some());
    }

    #[test]
    fn test_empty_cells_and_na_markers_are_missing() {
        let file = write_csv(
            "title,authors,abstract,journal,publish_time\n\
             ,NA,n/a,,2020\n\
             Kept,None,text,Nature,not-a-date\n",
        );

        let mut loader = DataLoader::new();
        loader.load_csv(file.path()).unwrap();
        let dataset = loader.to_dataset().unwrap();

        assert_eq!(dataset.len(), 2);
        let first = &dataset.records[0];
        assert_eq!(first.title, None);
        assert_eq!(first.authors, None);
        assert_eq!(first.abstract_text, None);
        assert_eq!(first.journal, None);
        assert_eq!(first.publish_time.as_deref(), Some("2020"));

        let second = &dataset.records[1];
        assert_eq!(second.title.as_deref(), Some("Kept"));
        assert_eq!(second.authors, None);
        assert_eq!(second.journal.as_deref(), Some("Nature"));
        assert_eq!(second.publish_time.as_deref(), Some("not-a-date"));
    }

    #[test]
    fn test_absent_column_is_missing_everywhere() {
        let file = write_csv("title,publish_time,cord_uid\nOnly title,2020-01-01,x1\n");

        let mut loader = DataLoader::new();
        loader.load_csv(file.path()).unwrap();
        let dataset = loader.to_dataset().unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records[0].title.as_deref(), Some("Only title"));
        assert_eq!(dataset.records[0].journal, None);
        assert_eq!(dataset.records[0].authors, None);
        assert_eq!(dataset.records[0].abstract_text, None);
    }

    #[test]
    fn test_overview_counts_non_null_per_column() {
        let file = write_csv(
            "title,journal,year_hint\n\
             A,Lancet,1\n\
             B,,2\n\
             C,BMJ,\n",
        );

        let mut loader = DataLoader::new();
        let df = loader.load_csv(file.path()).unwrap();
        let overview = DatasetOverview::from_dataframe(df);

        assert_eq!(overview.shape(), (3, 3));
        let journal = overview.columns.iter().find(|c| c.name == "journal").unwrap();
        assert_eq!(journal.non_null, 2);
        let hint = overview.columns.iter().find(|c| c.name == "year_hint").unwrap();
        assert_eq!(hint.non_null, 2);
    }

    #[test]
    fn test_loaded_data_cleans_rows() {
        let file = write_csv(
            "cord_uid,title,authors,abstract,journal,publish_time\n\
             u1,Masks,Lee K,Masks reduce spread,,2020-06-01\n\
             u2,Bad date,Kim H,,BMJ,not-a-date\n\
             u3,,,,,2019\n",
        );

        let loaded = LoadedData::load(file.path()).unwrap();

        assert_eq!(loaded.overview.shape(), (3, 6));
        assert_eq!(loaded.cleaned_shape(), (2, 8));
        assert_eq!(loaded.records[0].journal, "Unknown");
        assert_eq!(loaded.records[0].abstract_word_count, 3);
        assert_eq!(loaded.records[1].title, "");
        assert_eq!(loaded.records[1].authors, "Unknown");
        assert_eq!(loaded.records[1].year, 2019);
    }

    #[test]
    fn test_loaded_data_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = LoadedData::load(&dir.path().join("trimmed_metadata.csv"));
        assert!(matches!(result, Err(LoaderError::SourceNotFound(_))));
    }

    #[test]
    fn test_na_markers_count_as_null_in_overview() {
        let file = write_csv(
            "title,journal,publish_time\n\
             A,NA,2020-01-01\n\
             B,N/A,2020-02-01\n",
        );

        let loaded = LoadedData::load(file.path()).unwrap();

        let journal = loaded
            .overview
            .columns
            .iter()
            .find(|c| c.name == "journal")
            .unwrap();
        assert_eq!(journal.non_null, 0);
        let journals: Vec<&str> = loaded.records.iter().map(|r| r.journal.as_str()).collect();
        assert_eq!(journals, vec!["Unknown", "Unknown"]);
    }

    #[test]
    fn test_late_full_date_after_year_only_rows_is_kept() {
        let mut contents = String::from("title,publish_time\n");
        for i in 0..10_000 {
            contents.push_str(&format!("paper {},2020\n", i));
        }
        contents.push_str("late paper,2021-05-01\n");
        let file = write_csv(&contents);

        let loaded = LoadedData::load(file.path()).unwrap();

        assert_eq!(loaded.overview.rows, 10_001);
        assert_eq!(loaded.records.len(), 10_001);
        let last = loaded.records.last().unwrap();
        assert_eq!(last.title, "late paper");
        assert_eq!(last.year, 2021);
    }

    #[test]
    fn test_to_dataset_without_load_fails() {
        let loader = DataLoader::new();
        assert!(matches!(loader.to_dataset(), Err(LoaderError::NoData)));
    }
}
