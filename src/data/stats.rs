use std::collections::BTreeMap;

use super::model::{Feature, LABEL_COLUMN, ObservationTable, Species};

// ---------------------------------------------------------------------------
// Column info – dtype and null counts
// ---------------------------------------------------------------------------

/// Type and completeness of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: &'static str,
    pub dtype: &'static str,
    pub non_null: usize,
    pub missing: usize,
}

pub const NUMERIC_DTYPE: &str = "float64";
pub const LABEL_DTYPE: &str = "category";

/// One entry per column: the four features, then the label.
pub fn column_info(table: &ObservationTable) -> Vec<ColumnInfo> {
    let total = table.len();
    let mut info: Vec<ColumnInfo> = Feature::ALL
        .iter()
        .map(|&feature| {
            let non_null = table.column(feature).flatten().count();
            ColumnInfo {
                name: feature.column_name(),
                dtype: NUMERIC_DTYPE,
                non_null,
                missing: total - non_null,
            }
        })
        .collect();

    let labelled = table.labelled_count();
    info.push(ColumnInfo {
        name: LABEL_COLUMN,
        dtype: LABEL_DTYPE,
        non_null: labelled,
        missing: total - labelled,
    });
    info
}

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

/// count / mean / std / min / quartiles / max of one numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnSummary {
    /// Statistic names, in the order [`ColumnSummary::values`] returns them.
    pub const LABELS: [&'static str; 8] =
        ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

    pub fn from_values(values: &[f64]) -> Self {
        let count = values.len();
        if count == 0 {
            return ColumnSummary {
                count,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                q25: f64::NAN,
                median: f64::NAN,
                q75: f64::NAN,
                max: f64::NAN,
            };
        }

        let mean = values.iter().sum::<f64>() / count as f64;
        // Sample standard deviation (n - 1).
        let std = if count < 2 {
            f64::NAN
        } else {
            let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        };

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        ColumnSummary {
            count,
            mean,
            std,
            min: sorted[0],
            q25: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q75: quantile(&sorted, 0.75),
            max: sorted[count - 1],
        }
    }

    pub fn values(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.median,
            self.q75,
            self.max,
        ]
    }
}

/// Linear interpolation between the closest ranks. `sorted` must be non-empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Summaries for every numeric column, in column order.
pub fn describe(table: &ObservationTable) -> Vec<(Feature, ColumnSummary)> {
    Feature::ALL
        .iter()
        .map(|&feature| (feature, ColumnSummary::from_values(&table.present_values(feature))))
        .collect()
}

// ---------------------------------------------------------------------------
// Grouped summary – per-species means
// ---------------------------------------------------------------------------

/// Mean of every numeric column per species.
///
/// Always holds all three species in category order; a species without
/// values gets NaN means.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedSummary {
    means: BTreeMap<Species, [f64; 4]>,
}

impl GroupedSummary {
    pub fn from_table(table: &ObservationTable) -> Self {
        let mut sums: BTreeMap<Species, [(f64, usize); 4]> = Species::ALL
            .iter()
            .map(|&sp| (sp, [(0.0, 0); 4]))
            .collect();

        for row in &table.rows {
            let Some(species) = row.species else {
                continue;
            };
            let acc = sums.entry(species).or_default();
            for (slot, value) in acc.iter_mut().zip(row.features) {
                if let Some(v) = value {
                    slot.0 += v;
                    slot.1 += 1;
                }
            }
        }

        let means = sums
            .into_iter()
            .map(|(sp, acc)| {
                let means = acc.map(|(sum, n)| if n == 0 { f64::NAN } else { sum / n as f64 });
                (sp, means)
            })
            .collect();

        GroupedSummary { means }
    }

    /// Number of groups (rows of the summary).
    pub fn group_count(&self) -> usize {
        self.means.len()
    }

    /// Groups in category order.
    pub fn iter(&self) -> impl Iterator<Item = (Species, &[f64; 4])> + '_ {
        self.means.iter().map(|(sp, means)| (*sp, means))
    }

    #[cfg(test)]
    pub fn mean(&self, species: Species, feature: Feature) -> Option<f64> {
        self.means.get(&species).map(|m| m[feature.index()])
    }

    /// One column of the summary as `(species, mean)` pairs.
    pub fn column(&self, feature: Feature) -> Vec<(Species, f64)> {
        self.iter().map(|(sp, m)| (sp, m[feature.index()])).collect()
    }

    /// The species whose mean is strictly below every other species' mean.
    pub fn strictly_smallest(&self, feature: Feature) -> Option<Species> {
        let column = self.column(feature);
        column.iter().find_map(|&(sp, mean)| {
            let below_all = column
                .iter()
                .filter(|(other, _)| *other != sp)
                .all(|&(_, other_mean)| mean < other_mean);
            below_all.then_some(sp)
        })
    }
}
