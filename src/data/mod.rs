//! Data module - CSV loading, cleaning and aggregation

mod loader;
mod processor;
mod record;

pub use loader::{
    dataset_from_dataframe, ColumnSummary, DataLoader, DatasetOverview, LoadedData, LoaderError,
};
pub use processor::{parse_publish_time, word_count, JournalCount, Pipeline, YearCounts, UNKNOWN};
pub use record::{CleanRecord, Dataset, RawRecord};
