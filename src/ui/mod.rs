use anyhow::{Result, anyhow};
use eframe::egui;

use crate::app::ChartApp;
use crate::charts::Chart;
use crate::config::ViewerConfig;

pub mod panels;
pub mod plot;

/// Open a native window for `chart` and block until the user closes it.
pub fn show_chart(
    chart: &Chart,
    position: usize,
    total: usize,
    config: &ViewerConfig,
) -> Result<()> {
    let options = config.native_options(&chart.title);
    let light_theme = config.light_theme;
    let app = ChartApp::new(chart.clone(), position, total);

    log::info!("Showing chart {} of {total}: {}", position + 1, chart.title);

    eframe::run_native(
        &chart.title,
        options,
        Box::new(move |cc| {
            if light_theme {
                cc.egui_ctx.set_theme(egui::Theme::Light);
            }
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow!("chart window '{}' failed: {e}", chart.title))
}
