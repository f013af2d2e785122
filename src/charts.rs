//! Chart construction.
//!
//! Everything a chart window draws is computed here from the cleaned table
//! and the grouped summary, so the rendering code in `ui::plot` only maps
//! these values onto egui_plot items.

use eframe::egui::Color32;

use crate::color::{self, ColorMap};
use crate::config::HISTOGRAM_BINS;
use crate::data::model::{Feature, ObservationTable, Species};
use crate::data::stats::GroupedSummary;

// ---------------------------------------------------------------------------
// Chart model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub show_grid: bool,
    pub kind: ChartKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    Line(CategoryLine),
    Bar(CategoryBars),
    Histogram(Histogram),
    Scatter(Scatter),
}

/// One value per category, joined by a line with a marker at each point.
/// Category `i` is drawn at `x = i`.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryLine {
    pub categories: Vec<String>,
    pub values: Vec<f64>,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBar {
    pub label: String,
    pub value: f64,
    pub color: Color32,
}

/// One bar per category. Bar `i` is centred on `x = i`.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBars {
    pub bars: Vec<CategoryBar>,
}

impl CategoryBars {
    pub fn labels(&self) -> Vec<String> {
        self.bars.iter().map(|b| b.label.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub label: String,
    pub color: Color32,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scatter {
    pub legend_title: String,
    pub series: Vec<ScatterSeries>,
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Fixed-width bins over `[min, max]`; the last bin is closed on the right.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `counts.len() + 1` ascending edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    pub fill: Color32,
    pub edge: Color32,
}

impl Histogram {
    /// Bin the finite values of `values` into `bins` equal-width bins.
    ///
    /// A single distinct value spans `[v - 0.5, v + 0.5]` and no values span
    /// `[0, 1]`, so the bin count never depends on the data.
    pub fn new(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();

        let (lo, hi) = match (
            finite.iter().copied().reduce(f64::min),
            finite.iter().copied().reduce(f64::max),
        ) {
            (Some(lo), Some(hi)) if lo < hi => (lo, hi),
            (Some(v), Some(_)) => (v - 0.5, v + 0.5),
            _ => (0.0, 1.0),
        };
        let width = (hi - lo) / bins as f64;

        let mut edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
        edges[bins] = hi;

        let mut counts = vec![0; bins];
        for v in finite {
            let mut idx = (((v - lo) / width) as usize).min(bins - 1);
            // The division can round across an edge; the stored edges decide.
            if v < edges[idx] {
                idx -= 1;
            } else if idx + 1 < bins && v >= edges[idx + 1] {
                idx += 1;
            }
            counts[idx] += 1;
        }

        Histogram {
            edges,
            counts,
            fill: color::SKY_BLUE,
            edge: color::EDGE,
        }
    }

    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    /// `(centre, count)` for every bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(edge, &count)| ((edge[0] + edge[1]) / 2.0, count))
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// The four charts, in display order.
pub fn build_charts(table: &ObservationTable, summary: &GroupedSummary) -> Vec<Chart> {
    vec![
        mean_line(summary, Feature::PetalLength),
        mean_bars(summary, Feature::SepalWidth),
        histogram(table, Feature::PetalLength, HISTOGRAM_BINS),
        scatter(table, Feature::SepalLength, Feature::PetalLength),
    ]
}

/// Line through the per-species means of `feature`.
pub fn mean_line(summary: &GroupedSummary, feature: Feature) -> Chart {
    let (categories, values) = summary
        .column(feature)
        .into_iter()
        .map(|(sp, mean)| (sp.to_string(), mean))
        .unzip();

    Chart {
        title: format!("Average {} by Species", feature.title()),
        x_label: "Species".to_string(),
        y_label: feature.axis_label().to_string(),
        show_grid: true,
        kind: ChartKind::Line(CategoryLine {
            categories,
            values,
            color: color::LINE,
        }),
    }
}

/// Bar per species showing the mean of `feature`.
pub fn mean_bars(summary: &GroupedSummary, feature: Feature) -> Chart {
    let column = summary.column(feature);
    let palette = color::viridis_palette(column.len());
    let bars = column
        .into_iter()
        .zip(palette)
        .map(|((sp, mean), color)| CategoryBar {
            label: sp.to_string(),
            value: mean,
            color,
        })
        .collect();

    Chart {
        title: format!("Average {} by Species", feature.title()),
        x_label: "Species".to_string(),
        y_label: feature.axis_label().to_string(),
        show_grid: true,
        kind: ChartKind::Bar(CategoryBars { bars }),
    }
}

/// Distribution of `feature` over all rows.
pub fn histogram(table: &ObservationTable, feature: Feature, bins: usize) -> Chart {
    Chart {
        title: format!("Distribution of {}", feature.title()),
        x_label: feature.axis_label().to_string(),
        y_label: "Frequency".to_string(),
        show_grid: true,
        kind: ChartKind::Histogram(Histogram::new(&table.present_values(feature), bins)),
    }
}

/// `x` against `y` for every row, one series per species.
pub fn scatter(table: &ObservationTable, x: Feature, y: Feature) -> Chart {
    let present: Vec<Species> = Species::ALL
        .into_iter()
        .filter(|sp| table.rows.iter().any(|row| row.species == Some(*sp)))
        .collect();
    let color_map = ColorMap::new(&present);

    let series = present
        .iter()
        .map(|&sp| {
            let points = table
                .rows
                .iter()
                .filter(|row| row.species == Some(sp))
                .filter_map(|row| Some([row.value(x)?, row.value(y)?]))
                .collect();
            ScatterSeries {
                label: sp.to_string(),
                color: color_map.color_for(sp),
                points,
            }
        })
        .collect();

    Chart {
        title: format!("{} vs {}", x.title(), y.title()),
        x_label: x.axis_label().to_string(),
        y_label: y.axis_label().to_string(),
        show_grid: true,
        kind: ChartKind::Scatter(Scatter {
            legend_title: "Species".to_string(),
            series,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::drop_incomplete;
    use crate::data::loader::{DatasetSource, load};

    fn iris() -> (ObservationTable, GroupedSummary) {
        let table = drop_incomplete(load(&DatasetSource::bundled()).unwrap());
        let summary = GroupedSummary::from_table(&table);
        (table, summary)
    }

    #[test]
    fn four_charts_in_fixed_order() {
        let (table, summary) = iris();
        let charts = build_charts(&table, &summary);
        let titles: Vec<&str> = charts.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "Average Petal Length by Species",
                "Average Sepal Width by Species",
                "Distribution of Petal Length",
                "Sepal Length vs Petal Length",
            ]
        );
        assert!(matches!(charts[0].kind, ChartKind::Line(_)));
        assert!(matches!(charts[1].kind, ChartKind::Bar(_)));
        assert!(matches!(charts[2].kind, ChartKind::Histogram(_)));
        assert!(matches!(charts[3].kind, ChartKind::Scatter(_)));
    }

    #[test]
    fn line_follows_summary_order() {
        let (_, summary) = iris();
        let ChartKind::Line(line) = mean_line(&summary, Feature::PetalLength).kind else {
            panic!("expected a line chart");
        };
        assert_eq!(line.categories, ["setosa", "versicolor", "virginica"]);
        assert!((line.values[0] - 1.462).abs() < 1e-9);
        assert!(line.values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn bars_carry_sepal_width_means() {
        let (_, summary) = iris();
        let ChartKind::Bar(bars) = mean_bars(&summary, Feature::SepalWidth).kind else {
            panic!("expected a bar chart");
        };
        assert_eq!(bars.labels(), ["setosa", "versicolor", "virginica"]);
        assert!((bars.bars[0].value - 3.428).abs() < 1e-9);
        assert!((bars.bars[1].value - 2.77).abs() < 1e-9);
        assert_ne!(bars.bars[0].color, bars.bars[2].color);
    }

    #[test]
    fn histogram_always_has_twenty_bins() {
        let distributions: [Vec<f64>; 5] = [
            vec![],
            vec![3.0],
            vec![2.0; 40],
            vec![1.0, 100.0],
            (0..1000).map(|i| (i as f64).sqrt()).collect(),
        ];
        for values in &distributions {
            let hist = Histogram::new(values, 20);
            assert_eq!(hist.counts.len(), 20);
            assert_eq!(hist.edges.len(), 21);
            assert_eq!(hist.counts.iter().sum::<usize>(), values.len());
        }
    }

    #[test]
    fn petal_length_histogram_spans_data_range() {
        let (table, _) = iris();
        let ChartKind::Histogram(hist) = histogram(&table, Feature::PetalLength, 20).kind else {
            panic!("expected a histogram");
        };
        assert_eq!(hist.counts.len(), 20);
        assert_eq!(hist.edges[0], 1.0);
        assert_eq!(hist.edges[20], 6.9);
        assert!((hist.bin_width() - 0.295).abs() < 1e-9);
        assert_eq!(hist.counts.iter().sum::<usize>(), 150);
        assert_eq!(hist.counts[0], 4);
        assert_eq!(hist.counts[19], 3);
        assert_eq!(hist.bins().count(), 20);
    }

    #[test]
    fn values_on_edges_land_in_the_bin_the_edges_describe() {
        for n in 1..200 {
            let values: Vec<f64> = (0..n).map(|i| i as f64 * 0.1).collect();
            let hist = Histogram::new(&values, 20);
            let last = hist.counts.len() - 1;

            let mut expected = vec![0; hist.counts.len()];
            for &v in &values {
                let bin = hist
                    .edges
                    .windows(2)
                    .position(|e| e[0] <= v && v < e[1])
                    .unwrap_or(last);
                expected[bin] += 1;
            }
            assert_eq!(hist.counts, expected, "n = {n}");
        }
    }

    #[test]
    fn every_chart_draws_a_grid() {
        let (table, summary) = iris();
        assert!(build_charts(&table, &summary).iter().all(|c| c.show_grid));
    }

    #[test]
    fn constant_values_fill_one_bin() {
        let hist = Histogram::new(&[2.0; 5], 20);
        assert_eq!(hist.edges[0], 1.5);
        assert_eq!(hist.edges[20], 2.5);
        assert_eq!(hist.counts[10], 5);
    }

    #[test]
    fn scatter_has_one_series_per_species() {
        let (table, _) = iris();
        let chart = scatter(&table, Feature::SepalLength, Feature::PetalLength);
        let ChartKind::Scatter(plot) = chart.kind else {
            panic!("expected a scatter chart");
        };
        assert_eq!(plot.legend_title, "Species");
        assert_eq!(plot.series.len(), 3);
        assert!(plot.series.iter().all(|s| s.points.len() == 50));
        assert_eq!(plot.series[0].points[0], [5.1, 1.4]);
        assert_ne!(plot.series[0].color, plot.series[1].color);
        assert_eq!(chart.x_label, "Sepal Length (cm)");
    }
}
