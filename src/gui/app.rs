//! CORD-19 Explorer Main Application
//! Main window with the filter sidebar and the chart viewer.

use crate::config::ViewerConfig;
use crate::data::{CleanRecord, LoadedData, Pipeline};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::path::Path;
use tracing::{info, warn};

/// Main application window.
pub struct ExplorerApp {
    settings: ViewerConfig,
    records: Vec<CleanRecord>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl ExplorerApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        data: LoadedData,
        settings: ViewerConfig,
    ) -> Self {
        let mut app = Self::with_settings(settings);
        app.install(data);
        app
    }

    fn with_settings(settings: ViewerConfig) -> Self {
        Self {
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(settings.top_journals, settings.preview_rows),
            records: Vec::new(),
            settings,
        }
    }

    /// Replace the current dataset and reset the year filter.
    fn install(&mut self, data: LoadedData) {
        let bounds = Pipeline::year_bounds(&data.records);
        self.control_panel.csv_path = Some(data.path.clone());
        self.control_panel
            .set_bounds(bounds, self.settings.default_year_range);
        self.control_panel.set_status(&format!(
            "Loaded {} rows, {} with a valid publish date",
            data.overview.rows,
            data.records.len()
        ));
        self.records = data.records;
        self.refresh();
    }

    /// Recompute the filtered charts for the current range.
    fn refresh(&mut self) {
        if self.control_panel.bounds.is_none() {
            self.chart_viewer.clear();
            return;
        }
        self.chart_viewer
            .update(&self.records, self.control_panel.range);
    }

    /// Load another CSV. On failure the current data stays in place.
    fn reload(&mut self, path: &Path) {
        match LoadedData::load(path) {
            Ok(data) => {
                info!(path = %path.display(), "reloaded dataset");
                self.install(data);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "reload failed");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    fn handle_open_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.reload(&path);
        }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Filter Options
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::OpenCsv => self.handle_open_csv(),
                        ControlPanelAction::RangeChanged => self.refresh(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Charts and sample data
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_install_applies_default_range() {
        let file = write_csv(
            "title,authors,abstract,journal,publish_time\n\
             a,x,,Lancet,2018-01-01\n\
             b,x,,BMJ,2020-05-05\n\
             c,x,,BMJ,2021-02-02\n\
             d,x,,Lancet,2022-09-09\n",
        );
        let mut app = ExplorerApp::with_settings(ViewerConfig::default());

        app.install(LoadedData::load(file.path()).unwrap());

        assert_eq!(app.control_panel.bounds, Some((2018, 2022)));
        assert_eq!(app.chart_viewer.filtered_count, 2);
        assert_eq!(app.chart_viewer.top_journals[0].journal, "BMJ");
        assert_eq!(app.chart_viewer.top_journals[0].count, 2);
    }

    #[test]
    fn test_failed_reload_keeps_data() {
        let file = write_csv(
            "title,authors,abstract,journal,publish_time\n\
             a,x,,Lancet,2020-01-01\n",
        );
        let mut app = ExplorerApp::with_settings(ViewerConfig::default());
        app.install(LoadedData::load(file.path()).unwrap());

        let dir = tempfile::tempdir().unwrap();
        app.reload(&dir.path().join("missing.csv"));

        assert_eq!(app.records.len(), 1);
        assert!(app.control_panel.status.starts_with("Error"));
    }

    #[test]
    fn test_no_dated_rows_clears_viewer() {
        let file = write_csv(
            "title,authors,abstract,journal,publish_time\n\
             a,x,,Lancet,unknown\n",
        );
        let mut app = ExplorerApp::with_settings(ViewerConfig::default());

        app.install(LoadedData::load(file.path()).unwrap());

        assert_eq!(app.control_panel.bounds, None);
        assert!(app.chart_viewer.range.is_none());
    }
}
