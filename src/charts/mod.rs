//! Charts module - interactive plots and static PNG rendering

mod palette;
mod plotter;
mod renderer;
mod wordcloud;

pub use plotter::ChartPlotter;
pub use renderer::{
    RenderError, StaticChartRenderer, JOURNAL_CHART_SIZE, WORD_CLOUD_SIZE, YEAR_CHART_SIZE,
};
pub use wordcloud::{PlacedWord, WordCloudLayout};
