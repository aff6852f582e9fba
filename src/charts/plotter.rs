//! Chart Plotter Module
//! Interactive explorer charts using egui_plot.

use crate::charts::palette::{self, LINE_RGB};
use crate::data::{JournalCount, YearCounts};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoints, Points};

/// Above this many years the default x grid is used instead of one mark per year.
const MAX_YEAR_MARKS: i32 = 15;

pub fn line_color() -> Color32 {
    Color32::from_rgb(LINE_RGB.0, LINE_RGB.1, LINE_RGB.2)
}

pub fn bar_color(rank: usize, count: usize) -> Color32 {
    let (r, g, b) = palette::viridis(rank, count);
    Color32::from_rgb(r, g, b)
}

/// Draws the explorer charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Line chart of publications per year with point markers.
    pub fn draw_year_chart(ui: &mut egui::Ui, counts: &YearCounts) {
        if counts.is_empty() {
            Self::draw_no_data(ui);
            return;
        }

        let first = counts.keys().next().copied().unwrap_or_default();
        let last = counts.keys().next_back().copied().unwrap_or_default();

        let mut plot = Plot::new("publications_by_year")
            .height(280.0)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label("Year")
            .y_axis_label("Number of Papers")
            .include_y(0.0)
            .include_x(first as f64 - 0.5)
            .include_x(last as f64 + 0.5)
            .x_axis_formatter(|mark, _range| Self::integer_label(mark.value));

        if last - first <= MAX_YEAR_MARKS {
            plot = plot.x_grid_spacer(move |_input| {
                (first..=last)
                    .map(|year| GridMark {
                        value: year as f64,
                        step_size: 1.0,
                    })
                    .collect()
            });
        }

        let points: Vec<[f64; 2]> = counts
            .iter()
            .map(|(&year, &count)| [year as f64, count as f64])
            .collect();

        plot.show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from_iter(points.iter().copied()))
                    .color(line_color())
                    .width(2.0)
                    .name("Papers"),
            );
            plot_ui.points(
                Points::new(PlotPoints::from_iter(points.iter().copied()))
                    .radius(4.0)
                    .color(line_color()),
            );
        });
    }

    /// Horizontal bar chart of journals, highest count at the top.
    pub fn draw_journal_chart(ui: &mut egui::Ui, journals: &[JournalCount]) {
        if journals.is_empty() {
            Self::draw_no_data(ui);
            return;
        }

        let n = journals.len();
        // Bar position 0 is the bottom row.
        let labels: Vec<String> = journals.iter().rev().map(|j| j.journal.clone()).collect();

        let bars: Vec<Bar> = journals
            .iter()
            .enumerate()
            .map(|(rank, journal)| {
                Bar::new((n - 1 - rank) as f64, journal.count as f64)
                    .name(&journal.journal)
                    .fill(bar_color(rank, n))
                    .width(0.7)
            })
            .collect();

        Plot::new("top_journals")
            .height((n as f32 * 32.0).max(160.0))
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label("Number of Papers")
            .y_axis_label("Journal")
            .include_x(0.0)
            .y_grid_spacer(move |_input| {
                (0..n)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .y_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx < 0.0 || (mark.value - idx).abs() > 1e-6 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal().name("Papers"));
            });
    }

    fn integer_label(value: f64) -> String {
        if (value - value.round()).abs() < 1e-6 {
            format!("{:.0}", value)
        } else {
            String::new()
        }
    }

    fn draw_no_data(ui: &mut egui::Ui) {
        ui.label(
            RichText::new("No papers in the selected range")
                .size(13.0)
                .color(Color32::GRAY),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_label() {
        assert_eq!(ChartPlotter::integer_label(2020.0), "2020");
        assert_eq!(ChartPlotter::integer_label(2020.5), "");
    }

    #[test]
    fn test_bar_colors_follow_rank() {
        assert_ne!(bar_color(0, 10), bar_color(9, 10));
        assert_eq!(bar_color(0, 3), bar_color(0, 7));
    }
}
