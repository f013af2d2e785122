use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Result;
use arrow::array::{ArrayRef, Float64Array, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::config::HEAD_ROWS;
use crate::data::loader::LoadError;
use crate::data::model::{Feature, LABEL_COLUMN, ObservationTable};
use crate::data::stats::{self, ColumnInfo, ColumnSummary, GroupedSummary};

// ---------------------------------------------------------------------------
// Status lines
// ---------------------------------------------------------------------------

pub fn write_loaded<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "✅ Dataset loaded successfully!\n")
}

pub fn write_load_failure<W: Write>(out: &mut W, err: &LoadError) -> io::Result<()> {
    match err {
        LoadError::SourceMissing { name } => writeln!(out, "❌ File not found: {name}"),
        LoadError::Failed(e) => writeln!(out, "❌ An error occurred: {e:#}"),
    }
}

// ---------------------------------------------------------------------------
// Full report
// ---------------------------------------------------------------------------

/// Print the preview, column info, missing counts, descriptive statistics,
/// grouped means and the derived observation, in that order.
pub fn write_report<W: Write>(
    out: &mut W,
    table: &ObservationTable,
    summary: &GroupedSummary,
) -> Result<()> {
    writeln!(out, "🔍 First {HEAD_ROWS} rows of the dataset:")?;
    writeln!(out, "{}", pretty_format_batches(&[head_batch(table, HEAD_ROWS)?])?)?;

    let info = stats::column_info(table);
    writeln!(out, "\n📊 Data Types and Missing Values:")?;
    write_info(out, table, &info)?;

    writeln!(out, "\nMissing values:")?;
    writeln!(out, "{}", pretty_format_batches(&[missing_batch(&info)?])?)?;

    writeln!(out, "\n📈 Basic Statistics:")?;
    writeln!(out, "{}", pretty_format_batches(&[describe_batch(&stats::describe(table))?])?)?;

    writeln!(out, "\n📊 Mean values grouped by species:")?;
    writeln!(out, "{}", pretty_format_batches(&[grouped_batch(summary)?])?)?;

    writeln!(out, "\n🔎 Observation:")?;
    writeln!(out, "{}", observation(summary))?;
    Ok(())
}

fn write_info<W: Write>(out: &mut W, table: &ObservationTable, info: &[ColumnInfo]) -> Result<()> {
    match table.len() {
        0 => writeln!(out, "RangeIndex: 0 entries")?,
        n => writeln!(out, "RangeIndex: {n} entries, 0 to {}", n - 1)?,
    }
    writeln!(out, "Data columns (total {} columns):", info.len())?;
    writeln!(out, "{}", pretty_format_batches(&[info_batch(info)?])?)?;

    let numeric = info.iter().filter(|c| c.dtype == stats::NUMERIC_DTYPE).count();
    let labels = info.len() - numeric;
    writeln!(
        out,
        "dtypes: {}({labels}), {}({numeric})",
        stats::LABEL_DTYPE,
        stats::NUMERIC_DTYPE
    )?;
    Ok(())
}

/// The sentence printed under "Observation", derived from the group means.
pub fn observation(summary: &GroupedSummary) -> String {
    let smallest_length = summary.strictly_smallest(Feature::PetalLength);
    let smallest_width = summary.strictly_smallest(Feature::PetalWidth);
    match (smallest_length, smallest_width) {
        (Some(a), Some(b)) if a == b => {
            let others: Vec<String> = summary
                .iter()
                .map(|(sp, _)| sp)
                .filter(|&sp| sp != a)
                .map(|sp| format!("'{sp}'"))
                .collect();
            format!(
                "From the grouped data, we can see that '{a}' generally has lower petal \
                 lengths and widths compared to {}.",
                others.join(" and ")
            )
        }
        _ => "From the grouped data, no single species has uniformly smaller petals.".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Arrow batches
// ---------------------------------------------------------------------------

fn round6(v: f64) -> f64 {
    (v * 1e6).round() / 1e6
}

fn feature_fields() -> Vec<Field> {
    Feature::ALL
        .iter()
        .map(|f| Field::new(f.column_name(), DataType::Float64, true))
        .collect()
}

fn head_batch(table: &ObservationTable, n: usize) -> Result<RecordBatch> {
    let rows = table.head(n);

    let mut fields = vec![Field::new("#", DataType::UInt64, false)];
    fields.extend(feature_fields());
    fields.push(Field::new(LABEL_COLUMN, DataType::Utf8, true));

    let mut columns: Vec<ArrayRef> =
        vec![Arc::new(UInt64Array::from_iter_values(0..rows.len() as u64))];
    for feature in Feature::ALL {
        let values: Vec<Option<f64>> = rows.iter().map(|r| r.value(feature)).collect();
        columns.push(Arc::new(Float64Array::from(values)));
    }
    let species: Vec<Option<&str>> = rows.iter().map(|r| r.species.map(|s| s.name())).collect();
    columns.push(Arc::new(StringArray::from(species)));

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

fn info_batch(info: &[ColumnInfo]) -> Result<RecordBatch> {
    let schema = Schema::new(vec![
        Field::new("#", DataType::UInt64, false),
        Field::new("Column", DataType::Utf8, false),
        Field::new("Non-Null Count", DataType::UInt64, false),
        Field::new("Dtype", DataType::Utf8, false),
    ]);
    let columns: Vec<ArrayRef> = vec![
        Arc::new(UInt64Array::from_iter_values(0..info.len() as u64)),
        Arc::new(StringArray::from_iter_values(info.iter().map(|c| c.name))),
        Arc::new(UInt64Array::from_iter_values(info.iter().map(|c| c.non_null as u64))),
        Arc::new(StringArray::from_iter_values(info.iter().map(|c| c.dtype))),
    ];
    Ok(RecordBatch::try_new(Arc::new(schema), columns)?)
}

fn missing_batch(info: &[ColumnInfo]) -> Result<RecordBatch> {
    let schema = Schema::new(vec![
        Field::new("Column", DataType::Utf8, false),
        Field::new("Missing", DataType::UInt64, false),
    ]);
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(info.iter().map(|c| c.name))),
        Arc::new(UInt64Array::from_iter_values(info.iter().map(|c| c.missing as u64))),
    ];
    Ok(RecordBatch::try_new(Arc::new(schema), columns)?)
}

fn describe_batch(described: &[(Feature, ColumnSummary)]) -> Result<RecordBatch> {
    let mut fields = vec![Field::new("", DataType::Utf8, false)];
    fields.extend(
        described
            .iter()
            .map(|(f, _)| Field::new(f.column_name(), DataType::Float64, true)),
    );

    let mut columns: Vec<ArrayRef> =
        vec![Arc::new(StringArray::from_iter_values(ColumnSummary::LABELS))];
    for (_, summary) in described {
        let values = summary.values().map(round6);
        columns.push(Arc::new(Float64Array::from(values.to_vec())));
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

fn grouped_batch(summary: &GroupedSummary) -> Result<RecordBatch> {
    let mut fields = vec![Field::new(LABEL_COLUMN, DataType::Utf8, false)];
    fields.extend(feature_fields());

    let mut columns: Vec<ArrayRef> = vec![Arc::new(StringArray::from_iter_values(
        summary.iter().map(|(sp, _)| sp.name()),
    ))];
    for feature in Feature::ALL {
        let means: Vec<f64> = summary.column(feature).into_iter().map(|(_, m)| round6(m)).collect();
        columns.push(Arc::new(Float64Array::from(means)));
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}
