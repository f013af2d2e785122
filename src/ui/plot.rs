use std::ops::RangeInclusive;

use eframe::egui::{Stroke, Ui};
use egui_plot::{
    Bar, BarChart, GridMark, Legend, Line, MarkerShape, Plot, PlotPoints, Points,
    uniform_grid_spacer,
};

use crate::charts::{CategoryBars, CategoryLine, Chart, ChartKind, Histogram, Scatter};

// ---------------------------------------------------------------------------
// Chart plot (central panel)
// ---------------------------------------------------------------------------

/// Render `chart` in the central panel.
pub fn chart_plot(ui: &mut Ui, chart: &Chart) {
    let mut plot = Plot::new(("chart", chart.title.as_str()))
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .show_grid(chart.show_grid)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    match &chart.kind {
        ChartKind::Line(line) => {
            plot = with_category_axis(plot, line.categories.clone());
        }
        ChartKind::Bar(bars) => {
            plot = with_category_axis(plot, bars.labels()).include_y(0.0);
        }
        ChartKind::Histogram(_) => {
            plot = plot.include_y(0.0);
        }
        ChartKind::Scatter(_) => {
            plot = plot.legend(Legend::default());
        }
    }

    plot.show(ui, |plot_ui| match &chart.kind {
        ChartKind::Line(line) => {
            let (line_item, markers) = line_items(line);
            plot_ui.line(line_item);
            plot_ui.points(markers);
        }
        ChartKind::Bar(bars) => plot_ui.bar_chart(category_bar_chart(bars)),
        ChartKind::Histogram(hist) => plot_ui.bar_chart(histogram_chart(hist)),
        ChartKind::Scatter(scatter) => {
            for points in scatter_points(scatter) {
                plot_ui.points(points);
            }
        }
    });
}

/// Label integer x positions with category names and hide every other tick.
fn with_category_axis(plot: Plot, labels: Vec<String>) -> Plot {
    plot.x_grid_spacer(uniform_grid_spacer(|_| [1.0, 1.0, 1.0]))
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
}

// -- Item builders --

fn line_items(line: &CategoryLine) -> (Line<'_>, Points<'_>) {
    let coords: Vec<[f64; 2]> = line
        .values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, &v)| [i as f64, v])
        .collect();

    let line_item = Line::new(PlotPoints::from(coords.clone()))
        .color(line.color)
        .width(2.0);
    let markers = Points::new(PlotPoints::from(coords))
        .color(line.color)
        .shape(MarkerShape::Circle)
        .filled(true)
        .radius(5.0);
    (line_item, markers)
}

fn category_bar_chart(bars: &CategoryBars) -> BarChart {
    let items = bars
        .bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            Bar::new(i as f64, bar.value)
                .name(&bar.label)
                .width(0.8)
                .fill(bar.color)
                .stroke(Stroke::new(1.0, bar.color))
        })
        .collect();
    BarChart::new(items)
}

fn histogram_chart(hist: &Histogram) -> BarChart {
    let width = hist.bin_width();
    let items = hist
        .bins()
        .map(|(centre, count)| {
            Bar::new(centre, count as f64)
                .width(width)
                .fill(hist.fill)
                .stroke(Stroke::new(1.0, hist.edge))
        })
        .collect();
    BarChart::new(items)
}

fn scatter_points(scatter: &Scatter) -> Vec<Points<'_>> {
    scatter
        .series
        .iter()
        .map(|series| {
            Points::new(PlotPoints::from(series.points.clone()))
                .name(&series.label)
                .color(series.color)
                .shape(MarkerShape::Circle)
                .filled(true)
                .radius(3.0)
        })
        .collect()
}
