//! Statistics module - word count summaries and title word frequencies

mod calculator;
mod text;

pub use calculator::{StatsCalculator, WordCountStats};
pub use text::{TitleWordFrequencies, DEFAULT_MAX_WORDS};
