//! Chart Viewer Widget
//! Central scrollable panel with the filtered charts and the sample table.

use crate::charts::ChartPlotter;
use crate::data::{CleanRecord, JournalCount, Pipeline, YearCounts};
use crate::gui::control_panel::YearRange;
use egui::{RichText, ScrollArea};

const SECTION_SPACING: f32 = 18.0;

/// One row of the sample table.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewRow {
    pub title: String,
    pub authors: String,
    pub journal: String,
    pub year: i32,
}

impl From<&CleanRecord> for PreviewRow {
    fn from(record: &CleanRecord) -> Self {
        Self {
            title: record.title.clone(),
            authors: record.authors.clone(),
            journal: record.journal.clone(),
            year: record.year,
        }
    }
}

/// Charts and sample rows for the current year selection.
pub struct ChartViewer {
    pub range: Option<YearRange>,
    pub filtered_count: usize,
    pub year_counts: YearCounts,
    pub top_journals: Vec<JournalCount>,
    pub preview: Vec<PreviewRow>,
    top_n: usize,
    preview_rows: usize,
}

impl ChartViewer {
    pub fn new(top_n: usize, preview_rows: usize) -> Self {
        Self {
            range: None,
            filtered_count: 0,
            year_counts: YearCounts::new(),
            top_journals: Vec::new(),
            preview: Vec::new(),
            top_n,
            preview_rows,
        }
    }

    /// Re-filter `records` to `range` and recompute every aggregate.
    pub fn update(&mut self, records: &[CleanRecord], range: YearRange) {
        let filtered = Pipeline::filter_by_year_range(records, range.from, range.to);

        self.range = Some(range);
        self.filtered_count = filtered.len();
        self.year_counts = Pipeline::aggregate_by_year(&filtered);
        self.top_journals = Pipeline::aggregate_by_journal(&filtered, self.top_n);
        self.preview = filtered
            .iter()
            .take(self.preview_rows)
            .map(PreviewRow::from)
            .collect();
    }

    pub fn clear(&mut self) {
        self.range = None;
        self.filtered_count = 0;
        self.year_counts.clear();
        self.top_journals.clear();
        self.preview.clear();
    }

    /// Draw the page body
    pub fn show(&self, ui: &mut egui::Ui) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(RichText::new("CORD-19 Data Explorer").size(26.0).strong());
                ui.label(
                    "A simple exploration of COVID-19 research papers using a trimmed subset \
                     of the CORD-19 dataset.",
                );
                ui.add_space(SECTION_SPACING);

                let Some(range) = self.range else {
                    ui.label("No data loaded.");
                    return;
                };

                // ===== Publications Over Time =====
                ui.heading("Publications Over Time");
                ui.horizontal(|ui| {
                    ui.label("Showing data for the years");
                    ui.label(RichText::new(range.from.to_string()).strong());
                    ui.label("to");
                    ui.label(RichText::new(format!("{}.", range.to)).strong());
                    ui.label(format!("({} papers)", self.filtered_count));
                });
                ui.label(RichText::new("Number of Publications by Year").size(14.0).strong());
                ChartPlotter::draw_year_chart(ui, &self.year_counts);
                ui.add_space(SECTION_SPACING);

                // ===== Top Journals =====
                ui.heading(format!("Top {} Publishing Journals", self.top_n));
                ui.label(
                    RichText::new(format!(
                        "Top {} Publishing Journals ({}-{})",
                        self.top_n, range.from, range.to
                    ))
                    .size(14.0)
                    .strong(),
                );
                ChartPlotter::draw_journal_chart(ui, &self.top_journals);
                ui.add_space(SECTION_SPACING);

                // ===== Sample Data =====
                ui.heading("Sample Data");
                ui.label("A small sample of the filtered dataset:");
                ui.add_space(5.0);
                self.draw_preview_table(ui);
            });
    }

    fn draw_preview_table(&self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("sample_data")
                    .striped(true)
                    .min_col_width(50.0)
                    .max_col_width(360.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for header in ["title", "authors", "journal", "year"] {
                            ui.label(RichText::new(header).strong().size(12.0));
                        }
                        ui.end_row();

                        for row in &self.preview {
                            ui.add(egui::Label::new(row.title.as_str()).truncate());
                            ui.add(egui::Label::new(row.authors.as_str()).truncate());
                            ui.add(egui::Label::new(row.journal.as_str()).truncate());
                            ui.label(row.year.to_string());
                            ui.end_row();
                        }
                    });
            });
    }
}
