use super::model::ObservationTable;

// ---------------------------------------------------------------------------
// Row filter: drop incomplete observations
// ---------------------------------------------------------------------------

/// Remove every row with a missing measurement or label.
///
/// Row order is preserved and the columns are untouched, so applying the
/// filter to an already complete table returns it unchanged.
pub fn drop_incomplete(mut table: ObservationTable) -> ObservationTable {
    let before = table.len();
    table.rows.retain(|row| row.is_complete());
    let dropped = before - table.len();
    if dropped > 0 {
        log::info!("Dropped {dropped} incomplete rows, {} remain", table.len());
    } else {
        log::debug!("No incomplete rows among {before}");
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{DatasetSource, load};
    use crate::data::model::{Observation, Species};

    fn sample() -> ObservationTable {
        ObservationTable::new(vec![
            Observation::new([5.1, 3.5, 1.4, 0.2], Species::Setosa),
            Observation::new([7.0, 3.2, 4.7, 1.4], Species::Versicolor),
            Observation::new([6.3, 3.3, 6.0, 2.5], Species::Virginica),
        ])
    }

    #[test]
    fn bundled_dataset_loses_no_rows() {
        let table = load(&DatasetSource::bundled()).unwrap();
        let loaded = table.len();
        let cleaned = drop_incomplete(table);
        assert_eq!(loaded, 150);
        assert_eq!(cleaned.len(), 150);
    }

    #[test]
    fn one_missing_value_removes_exactly_that_row() {
        let mut table = sample();
        table.rows[1].features[3] = None;

        let cleaned = drop_incomplete(table.clone());
        assert_eq!(cleaned.len(), table.len() - 1);
        assert!(!cleaned.rows.contains(&table.rows[1]));
        assert_eq!(cleaned.rows[0], table.rows[0]);
        assert_eq!(cleaned.rows[1], table.rows[2]);
    }

    #[test]
    fn missing_label_removes_the_row() {
        let mut table = sample();
        table.rows[0].species = None;
        assert_eq!(drop_incomplete(table).len(), 2);
    }

    #[test]
    fn cleaning_is_idempotent() {
        let mut table = sample();
        table.rows[0].features[0] = None;
        table.rows[2].species = None;

        let once = drop_incomplete(table);
        let twice = drop_incomplete(once.clone());
        assert_eq!(once, twice);
        assert_eq!(drop_incomplete(sample()), sample());
    }
}
