use eframe::egui;

/// Rows printed by the report's preview section.
pub const HEAD_ROWS: usize = 5;

/// Bins of the petal length histogram.
pub const HISTOGRAM_BINS: usize = 20;

/// Filter used when `RUST_LOG` is unset. Logs go to stderr.
pub const DEFAULT_LOG_FILTER: &str = "warn";

// ---------------------------------------------------------------------------
// Chart window settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Initial inner size in logical pixels.
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Light background with grid lines, like a white-grid plot theme.
    pub light_theme: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_size: [800.0, 500.0],
            min_window_size: [400.0, 300.0],
            light_theme: true,
        }
    }
}

impl ViewerConfig {
    pub fn native_options(&self, title: &str) -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(title)
                .with_inner_size(self.window_size)
                .with_min_inner_size(self.min_window_size),
            ..Default::default()
        }
    }
}
