use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Species – the categorical label column
// ---------------------------------------------------------------------------

/// One of the three Iris species.
///
/// The derived `Ord` follows the category order of the source dataset, so
/// `BTreeMap<Species, _>` iterates setosa, versicolor, virginica.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Species {
    Setosa,
    Versicolor,
    Virginica,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Setosa, Species::Versicolor, Species::Virginica];

    pub fn name(self) -> &'static str {
        match self {
            Species::Setosa => "setosa",
            Species::Versicolor => "versicolor",
            Species::Virginica => "virginica",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown species '{0}'")]
pub struct UnknownSpecies(pub String);

impl FromStr for Species {
    type Err = UnknownSpecies;

    /// Accepts the bare name (`setosa`) and the `Iris-` prefixed form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = trimmed.strip_prefix("Iris-").unwrap_or(trimmed);
        Species::ALL
            .into_iter()
            .find(|sp| sp.name().eq_ignore_ascii_case(bare))
            .ok_or_else(|| UnknownSpecies(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Feature – the four numeric columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feature {
    SepalLength,
    SepalWidth,
    PetalLength,
    PetalWidth,
}

impl Feature {
    pub const ALL: [Feature; 4] = [
        Feature::SepalLength,
        Feature::SepalWidth,
        Feature::PetalLength,
        Feature::PetalWidth,
    ];

    /// Position of the column inside [`Observation::features`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name as printed in the report.
    pub fn column_name(self) -> &'static str {
        match self {
            Feature::SepalLength => "sepal length (cm)",
            Feature::SepalWidth => "sepal width (cm)",
            Feature::PetalLength => "petal length (cm)",
            Feature::PetalWidth => "petal width (cm)",
        }
    }

    /// Title-cased name without the unit, for chart titles.
    pub fn title(self) -> &'static str {
        match self {
            Feature::SepalLength => "Sepal Length",
            Feature::SepalWidth => "Sepal Width",
            Feature::PetalLength => "Petal Length",
            Feature::PetalWidth => "Petal Width",
        }
    }

    /// Title-cased label used on chart axes.
    pub fn axis_label(self) -> &'static str {
        match self {
            Feature::SepalLength => "Sepal Length (cm)",
            Feature::SepalWidth => "Sepal Width (cm)",
            Feature::PetalLength => "Petal Length (cm)",
            Feature::PetalWidth => "Petal Width (cm)",
        }
    }
}

/// Name of the label column.
pub const LABEL_COLUMN: &str = "species";

// ---------------------------------------------------------------------------
// Observation – one row of the table
// ---------------------------------------------------------------------------

/// A single measured flower. `None` marks a missing value.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub features: [Option<f64>; 4],
    pub species: Option<Species>,
}

impl Observation {
    #[cfg(test)]
    pub fn new(features: [f64; 4], species: Species) -> Self {
        Observation {
            features: features.map(Some),
            species: Some(species),
        }
    }

    pub fn value(&self, feature: Feature) -> Option<f64> {
        self.features[feature.index()]
    }

    /// True when no cell of the row is missing.
    pub fn is_complete(&self) -> bool {
        self.species.is_some() && self.features.iter().all(Option::is_some)
    }
}

// ---------------------------------------------------------------------------
// ObservationTable – the complete loaded dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationTable {
    pub rows: Vec<Observation>,
}

impl ObservationTable {
    pub fn new(rows: Vec<Observation>) -> Self {
        ObservationTable { rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first `n` rows (fewer if the table is shorter).
    pub fn head(&self, n: usize) -> &[Observation] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Every cell of a numeric column, missing ones included.
    pub fn column(&self, feature: Feature) -> impl Iterator<Item = Option<f64>> + '_ {
        self.rows.iter().map(move |row| row.value(feature))
    }

    /// The non-missing values of a numeric column, in row order.
    pub fn present_values(&self, feature: Feature) -> Vec<f64> {
        self.column(feature).flatten().collect()
    }

    /// Number of rows with a label.
    pub fn labelled_count(&self) -> usize {
        self.rows.iter().filter(|row| row.species.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn species_parses_bare_and_prefixed_names() {
        assert_eq!("setosa".parse::<Species>(), Ok(Species::Setosa));
        assert_eq!("Iris-virginica".parse::<Species>(), Ok(Species::Virginica));
        assert_eq!(" Versicolor ".parse::<Species>(), Ok(Species::Versicolor));
        assert!("rose".parse::<Species>().is_err());
    }

    #[test]
    fn species_order_follows_source_categories() {
        let mut shuffled = vec![Species::Virginica, Species::Setosa, Species::Versicolor];
        shuffled.sort();
        assert_eq!(shuffled, Species::ALL.to_vec());
    }

    #[test]
    fn incomplete_rows_are_detected() {
        let mut row = Observation::new([5.1, 3.5, 1.4, 0.2], Species::Setosa);
        assert!(row.is_complete());
        row.features[2] = None;
        assert!(!row.is_complete());

        let unlabelled = Observation {
            features: [Some(1.0); 4],
            species: None,
        };
        assert!(!unlabelled.is_complete());
    }

    #[test]
    fn head_is_clamped_to_table_length() {
        let table = ObservationTable::new(vec![
            Observation::new([1.0, 2.0, 3.0, 4.0], Species::Setosa),
            Observation::new([5.0, 6.0, 7.0, 8.0], Species::Virginica),
        ]);
        assert_eq!(table.head(5).len(), 2);
        assert_eq!(table.head(1)[0].value(Feature::PetalWidth), Some(4.0));
        assert_eq!(table.present_values(Feature::SepalWidth), vec![2.0, 6.0]);
    }
}
