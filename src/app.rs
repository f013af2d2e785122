use eframe::egui;

use crate::charts::Chart;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// One chart window.
pub struct ChartApp {
    pub chart: Chart,
    /// Zero-based position of this chart in the display sequence.
    pub position: usize,
    pub total: usize,
}

impl ChartApp {
    pub fn new(chart: Chart, position: usize, total: usize) -> Self {
        Self {
            chart,
            position,
            total,
        }
    }
}

impl eframe::App for ChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title ----
        egui::TopBottomPanel::top("chart_header").show(ctx, |ui| {
            panels::top_bar(ui, &self.chart, self.position, self.total);
        });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::chart_plot(ui, &self.chart);
        });
    }
}
