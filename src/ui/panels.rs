use eframe::egui::{self, RichText, Ui};

use crate::charts::{Chart, ChartKind};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Title row of a chart window, plus the colour key for scatter charts.
pub fn top_bar(ui: &mut Ui, chart: &Chart, position: usize, total: usize) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(&chart.title);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            ui.label(
                RichText::new(format!(
                    "Chart {} of {total}  ·  close the window to continue",
                    position + 1
                ))
                .weak(),
            );
        });
    });

    if let ChartKind::Scatter(scatter) = &chart.kind {
        ui.horizontal(|ui: &mut Ui| {
            ui.strong(&scatter.legend_title);
            for series in &scatter.series {
                ui.label(RichText::new(format!("● {}", series.label)).color(series.color));
            }
        });
    }
}
