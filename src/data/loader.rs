use anyhow::{Context, Result, bail};
use serde::Deserialize;

use super::model::{Observation, ObservationTable, Species};

/// The Iris measurements, compiled into the binary.
const IRIS_CSV: &str = include_str!("../../data/iris.csv");

/// Number of numeric columns every data row carries.
const FEATURE_COUNT: usize = 4;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("dataset source '{name}' is not available")]
    SourceMissing { name: String },
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// A named dataset whose contents may or may not be present.
#[derive(Debug, Clone, Copy)]
pub struct DatasetSource {
    pub name: &'static str,
    contents: Option<&'static str>,
}

impl DatasetSource {
    pub const fn new(name: &'static str, contents: Option<&'static str>) -> Self {
        DatasetSource { name, contents }
    }

    /// The Iris dataset shipped with the binary.
    pub const fn bundled() -> Self {
        DatasetSource::new("iris.csv", Some(IRIS_CSV))
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the observation table from `source`.
pub fn load(source: &DatasetSource) -> Result<ObservationTable, LoadError> {
    let text = source.contents.ok_or_else(|| LoadError::SourceMissing {
        name: source.name.to_string(),
    })?;
    let table = parse_table(text).with_context(|| format!("loading {}", source.name))?;
    log::info!("Loaded {} rows from {}", table.len(), source.name);
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV parser
// ---------------------------------------------------------------------------

/// Layout (the one scientific toolkits ship Iris in):
///
/// ```text
/// 150,4,setosa,versicolor,virginica
/// 5.1,3.5,1.4,0.2,0
/// ...
/// ```
///
/// The first line carries the sample count, the feature count and the target
/// names. Every other line holds the measurements followed by an integer code
/// into the target names. Empty fields are missing values.
pub fn parse_table(text: &str) -> Result<ObservationTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let mut records = reader.records();

    let header = records
        .next()
        .context("dataset is empty")?
        .context("reading dataset header")?;
    let (n_samples, targets) = parse_header(&header)?;

    let mut rows = Vec::with_capacity(n_samples);

    for (row_no, result) in records.enumerate() {
        let record = result.with_context(|| format!("data row {row_no}"))?;

        if record.len() != FEATURE_COUNT + 1 {
            bail!(
                "data row {row_no}: expected {} fields, found {}",
                FEATURE_COUNT + 1,
                record.len()
            );
        }

        let RawRow(sl, sw, pl, pw, code) = record
            .deserialize(None)
            .with_context(|| format!("data row {row_no}: malformed values"))?;

        let species = match code {
            Some(code) => Some(*targets.get(code).with_context(|| {
                format!(
                    "data row {row_no}: target code {code} out of range (0..{})",
                    targets.len()
                )
            })?),
            None => None,
        };

        rows.push(Observation {
            features: [sl, sw, pl, pw],
            species,
        });
    }

    if rows.len() != n_samples {
        bail!(
            "header announces {n_samples} samples but {} data rows were found",
            rows.len()
        );
    }

    Ok(ObservationTable::new(rows))
}

#[derive(Debug, Deserialize)]
struct RawRow(
    Option<f64>,
    Option<f64>,
    Option<f64>,
    Option<f64>,
    Option<usize>,
);

fn parse_header(header: &csv::StringRecord) -> Result<(usize, Vec<Species>)> {
    let n_samples: usize = header
        .get(0)
        .unwrap_or("")
        .parse()
        .context("header: invalid sample count")?;
    let n_features: usize = header
        .get(1)
        .unwrap_or("")
        .parse()
        .context("header: invalid feature count")?;

    if n_features != FEATURE_COUNT {
        bail!("header: expected {FEATURE_COUNT} features, found {n_features}");
    }

    let targets = header
        .iter()
        .skip(2)
        .map(|name| name.parse::<Species>().context("header: target names"))
        .collect::<Result<Vec<_>>>()?;

    if targets.is_empty() {
        bail!("header: no target names");
    }

    Ok((n_samples, targets))
}
