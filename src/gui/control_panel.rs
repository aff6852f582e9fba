//! Control Panel Widget
//! Left side panel with the data source and the year range filter.

use egui::{Color32, RichText};
use std::path::PathBuf;

/// Inclusive year selection, kept inside the data bounds with `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub from: i32,
    pub to: i32,
}

impl YearRange {
    /// The requested range clamped into `bounds`; falls back to the full
    /// bounds when nothing of the request lies inside them.
    pub fn clamped(requested: (i32, i32), bounds: (i32, i32)) -> Self {
        let (lo, hi) = bounds;
        let (from, to) = (requested.0.min(requested.1), requested.0.max(requested.1));
        if to < lo || from > hi {
            return Self { from: lo, to: hi };
        }
        Self {
            from: from.clamp(lo, hi),
            to: to.clamp(lo, hi),
        }
    }
}

/// Left side control panel with file selection and the year filter.
pub struct ControlPanel {
    pub csv_path: Option<PathBuf>,
    pub bounds: Option<(i32, i32)>,
    pub range: YearRange,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            csv_path: None,
            bounds: None,
            range: YearRange { from: 0, to: 0 },
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the slider bounds after a (re)load.
    pub fn set_bounds(&mut self, bounds: Option<(i32, i32)>, default_range: (i32, i32)) {
        self.bounds = bounds;
        if let Some(bounds) = bounds {
            self.range = YearRange::clamped(default_range, bounds);
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.add_space(5.0);
        ui.label(RichText::new("Filter Options").size(18.0).strong());
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Year Range Section =====
        ui.label(RichText::new("Select Year Range").size(14.0).strong());
        ui.add_space(5.0);

        match self.bounds {
            Some((lo, hi)) => {
                let before = self.range;
                ui.add(egui::Slider::new(&mut self.range.from, lo..=hi).text("From"));
                ui.add(egui::Slider::new(&mut self.range.to, lo..=hi).text("To"));

                // Dragging one end past the other carries the other end along.
                if self.range.from != before.from && self.range.from > self.range.to {
                    self.range.to = self.range.from;
                }
                if self.range.to != before.to && self.range.to < self.range.from {
                    self.range.from = self.range.to;
                }
                if self.range != before {
                    action = ControlPanelAction::RangeChanged;
                }

                ui.add_space(5.0);
                ui.label(
                    RichText::new(format!("Data covers {} to {}", lo, hi))
                        .size(11.0)
                        .color(Color32::GRAY),
                );
            }
            None => {
                ui.label(RichText::new("No dated papers loaded").color(Color32::GRAY));
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let path_text = self
                    .csv_path
                    .as_ref()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "No file loaded".to_string());
                ui.label(RichText::new(&path_text).size(12.0));

                if ui.button("Open CSV…").clicked() {
                    action = ControlPanelAction::OpenCsv;
                }
            });

        ui.add_space(10.0);

        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    OpenCsv,
    RangeChanged,
}
