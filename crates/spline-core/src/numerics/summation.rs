use crate::domain::{Knot, SplineError, SplineRecord, SplineResult};

/// Bin-by-bin sum of splines that share a knot grid.
///
/// Energies are taken from the first record. Returns `None` for an empty
/// selection so callers can skip writing a table.
pub fn sum_knots(records: &[&SplineRecord]) -> SplineResult<Option<Vec<Knot>>> {
    let Some((first, rest)) = records.split_first() else {
        return Ok(None);
    };

    let mut total = first.knots.clone();
    for record in rest {
        if record.knots.len() != total.len() {
            return Err(SplineError::computation(
                "RUN.KNOT_COUNT",
                format!(
                    "cannot sum spline '{}' ({} knots) onto a {}-knot grid started by '{}'",
                    record.description.algorithm,
                    record.knots.len(),
                    total.len(),
                    first.description.algorithm
                ),
            ));
        }

        for (accumulated, knot) in total.iter_mut().zip(&record.knots) {
            accumulated.cross_section += knot.cross_section;
        }
    }

    Ok(Some(total))
}

#[cfg(test)]
mod tests {
    use super::sum_knots;
    use crate::domain::{Knot, NeutrinoFlavor, SplineDescription, SplineRecord};

    fn record(algorithm: &str, values: &[f64]) -> SplineRecord {
        SplineRecord {
            description: SplineDescription::new(algorithm, NeutrinoFlavor::MuonNeutrino),
            knots: values
                .iter()
                .enumerate()
                .map(|(index, value)| Knot::new(index as f64 + 1.0, *value))
                .collect(),
        }
    }

    #[test]
    fn empty_selection_sums_to_nothing() {
        assert_eq!(sum_knots(&[]).expect("empty is fine"), None);
    }

    #[test]
    fn single_record_is_returned_unchanged() {
        let qel = record("QELCCPXSec", &[1.0, 2.0]);
        assert_eq!(sum_knots(&[&qel]).unwrap(), Some(qel.knots.clone()));
    }

    #[test]
    fn records_add_index_by_index() {
        let qel = record("QELCCPXSec", &[1.0, 2.0, 3.0]);
        let res = record("ReinSehgalRESPXSec", &[0.5, 0.5, 0.5]);
        let dis = record("DISPXSec", &[0.0, 1.0, 10.0]);

        let total = sum_knots(&[&qel, &res, &dis]).unwrap().expect("non-empty");
        assert_eq!(
            total,
            vec![Knot::new(1.0, 1.5), Knot::new(2.0, 3.5), Knot::new(3.0, 13.5)]
        );
    }

    #[test]
    fn mismatched_grids_are_rejected() {
        let qel = record("QELCCPXSec", &[1.0, 2.0, 3.0]);
        let short = record("DISPXSec", &[1.0]);
        let error = sum_knots(&[&qel, &short]).expect_err("grids differ");
        assert_eq!(error.placeholder(), "RUN.KNOT_COUNT");
        assert_eq!(error.exit_code(), 4);
    }
}
