//! Static Chart Renderer
//! Renders the batch report charts to in-memory PNG images with plotters.
//!
//! Charts:
//! 1. "Number of Publications Over Time": line with point markers
//! 2. "Top N Publishing Journals": horizontal bars, viridis palette
//! 3. "Word Cloud of Paper Titles": spiral word layout on white

use crate::charts::palette::{self, LINE_RGB};
use crate::charts::wordcloud::WordCloudLayout;
use crate::data::{JournalCount, YearCounts};
use crate::stats::TitleWordFrequencies;
use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

const FONT: &str = "sans-serif";
const JOURNAL_LABEL_CHARS: usize = 40;

pub const YEAR_CHART_SIZE: (u32, u32) = (1000, 600);
pub const JOURNAL_CHART_SIZE: (u32, u32) = (1200, 800);
pub const WORD_CLOUD_SIZE: (u32, u32) = (800, 400);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to draw chart: {0}")]
    Draw(String),
    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Failed to write chart: {0}")]
    Io(#[from] std::io::Error),
    #[error("Pixel buffer does not match the image size")]
    Buffer,
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Draw(e.to_string())
    }
}

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Line chart of yearly publication counts.
    pub fn render_publications_by_year(
        counts: &YearCounts,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        Self::render_to_png(width, height, |root| Self::draw_year_line(root, counts))
    }

    /// Horizontal bar chart of the top journals, most published at the top.
    pub fn render_top_journals(
        journals: &[JournalCount],
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        let title = format!("Top {} Publishing Journals", journals.len());
        Self::render_to_png(width, height, |root| {
            Self::draw_journal_bars(root, &title, journals)
        })
    }

    /// Word cloud of the most frequent title words.
    pub fn render_word_cloud(
        frequencies: &TitleWordFrequencies,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        Self::render_to_png(width, height, |root| Self::draw_word_cloud(root, frequencies))
    }

    /// Write PNG bytes, creating the parent directory when needed.
    pub fn save_png(bytes: &[u8], path: &Path) -> Result<(), RenderError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Encode a packed RGB buffer as PNG.
    pub fn encode_png(buffer: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        let img = RgbImage::from_raw(width, height, buffer).ok_or(RenderError::Buffer)?;
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    fn render_to_png<F>(width: u32, height: u32, draw: F) -> Result<Vec<u8>, RenderError>
    where
        F: FnOnce(&Area<'_>) -> Result<(), RenderError>,
    {
        let mut buffer = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE)?;
            draw(&root)?;
            root.present()?;
        }
        Self::encode_png(buffer, width, height)
    }

    fn draw_year_line(root: &Area<'_>, counts: &YearCounts) -> Result<(), RenderError> {
        let title = "Number of Publications Over Time";
        let (Some(&first), Some(&last)) = (counts.keys().next(), counts.keys().next_back()) else {
            return Self::draw_empty(root, title);
        };
        let y_max = counts.values().copied().max().unwrap_or(0) as f64;
        let x_labels = ((last - first + 3) as usize).min(12);

        let mut chart = ChartBuilder::on(root)
            .caption(title, (FONT, 28))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d((first - 1)..(last + 1), 0f64..(y_max * 1.1).max(1.0))?;

        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc("Number of Papers")
            .x_labels(x_labels)
            .x_label_formatter(&|year: &i32| year.to_string())
            .y_label_formatter(&|v: &f64| format!("{:.0}", v))
            .draw()?;

        let color = RGBColor(LINE_RGB.0, LINE_RGB.1, LINE_RGB.2);
        chart.draw_series(LineSeries::new(
            counts.iter().map(|(&year, &count)| (year, count as f64)),
            color.stroke_width(2),
        ))?;
        chart.draw_series(
            counts
                .iter()
                .map(|(&year, &count)| Circle::new((year, count as f64), 4, color.filled())),
        )?;

        Ok(())
    }

    fn draw_journal_bars(
        root: &Area<'_>,
        title: &str,
        journals: &[JournalCount],
    ) -> Result<(), RenderError> {
        let n = journals.len();
        if n == 0 {
            return Self::draw_empty(root, title);
        }
        let x_max = journals.iter().map(|j| j.count).max().unwrap_or(0) as f64;
        // Slot 0 is the bottom row, so the top journal goes in the last slot.
        let labels: Vec<String> = journals
            .iter()
            .rev()
            .map(|j| shorten(&j.journal, JOURNAL_LABEL_CHARS))
            .collect();

        let mut chart = ChartBuilder::on(root)
            .caption(title, (FONT, 28))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(300)
            .build_cartesian_2d(0f64..(x_max * 1.1).max(1.0), (0..n).into_segmented())?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc("Number of Papers")
            .y_desc("Journal")
            .y_labels(n)
            .x_label_formatter(&|v: &f64| format!("{:.0}", v))
            .y_label_formatter(&|v: &SegmentValue<usize>| match v {
                SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .draw()?;

        chart.draw_series(journals.iter().enumerate().map(|(rank, journal)| {
            let slot = n - 1 - rank;
            let (r, g, b) = palette::viridis(rank, n);
            let mut bar = Rectangle::new(
                [
                    (0.0, SegmentValue::Exact(slot)),
                    (journal.count as f64, SegmentValue::Exact(slot + 1)),
                ],
                RGBColor(r, g, b).filled(),
            );
            bar.set_margin(6, 6, 0, 0);
            bar
        }))?;

        Ok(())
    }

    fn draw_word_cloud(
        root: &Area<'_>,
        frequencies: &TitleWordFrequencies,
    ) -> Result<(), RenderError> {
        let title = "Word Cloud of Paper Titles";
        if frequencies.is_empty() {
            return Self::draw_empty(root, title);
        }

        let area = root.titled(title, (FONT, 24))?;
        let (width, height) = area.dim_in_pixel();
        let layout = WordCloudLayout::compute(frequencies, width, height, |text, size| {
            (FONT, size)
                .into_font()
                .box_size(text)
                .unwrap_or_else(|_| estimate_box(text, size))
        });

        let placed = layout.words.len();
        for word in &layout.words {
            let (r, g, b) = palette::viridis(word.rank, placed);
            let style = (FONT, word.font_size).into_font().color(&RGBColor(r, g, b));
            area.draw(&Text::new(word.text.as_str(), (word.x, word.y), style))?;
        }

        Ok(())
    }

    fn draw_empty(root: &Area<'_>, title: &str) -> Result<(), RenderError> {
        let area = root.titled(title, (FONT, 28))?;
        let (width, height) = area.dim_in_pixel();
        let style = TextStyle::from((FONT, 20).into_font())
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        area.draw(&Text::new(
            "No data",
            (width as i32 / 2, height as i32 / 2),
            style,
        ))?;
        Ok(())
    }
}

fn estimate_box(text: &str, size: f64) -> (u32, u32) {
    let width = text.chars().count() as f64 * size * 0.6;
    (width.ceil() as u32, size.ceil() as u32)
}

/// Cut `text` to `max_chars`, marking the cut with an ellipsis.
fn shorten(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    short.push('…');
    short
}
