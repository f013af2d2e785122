mod app;
mod charts;
mod color;
mod config;
mod data;
mod report;
mod ui;

use std::io::{self, Write};

use anyhow::Result;

use config::{DEFAULT_LOG_FILTER, ViewerConfig};
use data::filter::drop_incomplete;
use data::loader::{self, DatasetSource};
use data::model::ObservationTable;
use data::stats::GroupedSummary;

/// The cleaned table and its grouped means, handed from the report to the charts.
struct Analysis {
    table: ObservationTable,
    summary: GroupedSummary,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();

    let analysis = {
        let mut stdout = io::stdout().lock();
        let analysis = analyse(&DatasetSource::bundled(), &mut stdout)?;
        stdout.flush()?;
        analysis
    };

    match analysis {
        Some(analysis) => visualize(&analysis, &ViewerConfig::default()),
        None => Ok(()),
    }
}

/// Load, clean and report. Returns `None` when the dataset could not be loaded;
/// the failure has already been printed.
fn analyse<W: Write>(source: &DatasetSource, out: &mut W) -> Result<Option<Analysis>> {
    let table = match loader::load(source) {
        Ok(table) => {
            report::write_loaded(out)?;
            table
        }
        Err(err) => {
            report::write_load_failure(out, &err)?;
            log::warn!("Skipping analysis: {err:#}");
            return Ok(None);
        }
    };

    let table = drop_incomplete(table);
    let summary = GroupedSummary::from_table(&table);
    log::debug!("{} rows across {} species groups", table.len(), summary.group_count());
    report::write_report(out, &table, &summary)?;

    Ok(Some(Analysis { table, summary }))
}

/// Show the four charts one after another.
fn visualize(analysis: &Analysis, config: &ViewerConfig) -> Result<()> {
    if analysis.table.is_empty() {
        log::warn!("No complete rows left, skipping charts");
        return Ok(());
    }
    let charts = charts::build_charts(&analysis.table, &analysis.summary);
    let total = charts.len();
    for (position, chart) in charts.iter().enumerate() {
        ui::show_chart(chart, position, total, config)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_dataset_runs_through_the_report() {
        let mut out = Vec::new();
        let analysis = analyse(&DatasetSource::bundled(), &mut out).unwrap().unwrap();
        assert_eq!(analysis.table.len(), 150);
        assert_eq!(analysis.summary.group_count(), 3);

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("✅ Dataset loaded successfully!"));
        assert!(text.contains("🔎 Observation:"));
    }

    #[test]
    fn missing_source_stops_before_the_report() {
        let mut out = Vec::new();
        let analysis = analyse(&DatasetSource::new("iris.csv", None), &mut out).unwrap();
        assert!(analysis.is_none());

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.trim_end(), "❌ File not found: iris.csv");
    }

    #[test]
    fn malformed_source_is_reported_as_a_generic_failure() {
        let source = DatasetSource::new("broken.csv", Some("1,4,rose\n5.1,3.5,1.4,0.2,0\n"));
        let mut out = Vec::new();
        let analysis = analyse(&source, &mut out).unwrap();
        assert!(analysis.is_none());

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("❌ An error occurred: loading broken.csv"), "{text}");
        assert!(!text.contains("📈 Basic Statistics:"));
    }

    #[test]
    fn empty_table_skips_the_charts() {
        let analysis = Analysis {
            table: ObservationTable::default(),
            summary: GroupedSummary::from_table(&ObservationTable::default()),
        };
        assert!(visualize(&analysis, &ViewerConfig::default()).is_ok());
    }
}
