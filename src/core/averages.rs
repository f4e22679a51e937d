// src/core/averages.rs — Per-action normalized utility averages

use std::collections::{BTreeSet, HashMap};

use super::assignment::Assignment;
use super::sample::WeightedSample;
use crate::infra::errors::WozEvalError;

/// Normalized utility average per distinct action assignment.
pub type ActionAverages = HashMap<Assignment, f64>;

/// Accumulates utility totals per distinct action, then normalizes
/// every total by `#distinct actions / #samples`.
///
/// The action of a sample is its assignment projected onto
/// `action_variables`; a sample missing one of those variables is an
/// inconsistency in the population and fails the whole pass. An empty
/// population yields an empty table.
pub fn action_averages(
    samples: &[WeightedSample],
    action_variables: &BTreeSet<String>,
) -> Result<ActionAverages, WozEvalError> {
    let mut sums: ActionAverages = HashMap::new();
    for sample in samples {
        let action = sample.assignment.try_project(action_variables)?;
        *sums.entry(action).or_insert(0.0) += sample.utility;
    }
    if !sums.is_empty() {
        let scale = sums.len() as f64 / samples.len() as f64;
        for total in sums.values_mut() {
            *total *= scale;
        }
    }
    Ok(sums)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action_vars() -> BTreeSet<String> {
        ["a_m"].iter().map(|s| s.to_string()).collect()
    }

    fn sample(action: &str, utility: f64) -> WeightedSample {
        WeightedSample::new(
            Assignment::pair("a_m", action).with("noise", 1i64),
            1.0,
            utility,
        )
    }

    #[test]
    fn test_averages_scale_by_action_count_over_population() {
        // Two actions over four samples: totals are halved.
        let samples = vec![
            sample("confirm", 6.0),
            sample("confirm", 4.0),
            sample("reject", 2.0),
            sample("reject", 3.0),
        ];
        let averages = action_averages(&samples, &action_vars()).unwrap();
        assert_eq!(averages.len(), 2);
        assert_eq!(averages[&Assignment::pair("a_m", "confirm")], 5.0);
        assert_eq!(averages[&Assignment::pair("a_m", "reject")], 2.5);
    }

    #[test]
    fn test_averages_single_action() {
        let samples = vec![sample("confirm", 6.0), sample("confirm", 4.0)];
        let averages = action_averages(&samples, &action_vars()).unwrap();
        assert_eq!(averages.len(), 1);
        // 10.0 * (1 action / 2 samples)
        assert_eq!(averages[&Assignment::pair("a_m", "confirm")], 5.0);
    }

    #[test]
    fn test_averages_trim_ignores_non_action_variables() {
        let a = WeightedSample::new(
            Assignment::pair("a_m", "ask").with("slot", "time"),
            1.0,
            1.0,
        );
        let b = WeightedSample::new(
            Assignment::pair("a_m", "ask").with("slot", "date"),
            1.0,
            3.0,
        );
        let averages = action_averages(&[a, b], &action_vars()).unwrap();
        assert_eq!(averages.len(), 1);
        assert_eq!(averages[&Assignment::pair("a_m", "ask")], 2.0);
    }

    #[test]
    fn test_averages_empty_population_yields_empty_table() {
        let averages = action_averages(&[], &action_vars()).unwrap();
        assert!(averages.is_empty());
    }

    #[test]
    fn test_averages_missing_action_variable_errors() {
        let broken = WeightedSample::new(Assignment::pair("other", 1i64), 1.0, 1.0);
        let err = action_averages(&[broken], &action_vars()).unwrap_err();
        assert!(matches!(err, WozEvalError::InconsistentAssignment(ref v) if v == "a_m"));
    }

    #[test]
    fn test_averages_negative_utilities() {
        let samples = vec![sample("confirm", -4.0), sample("reject", -8.0)];
        let averages = action_averages(&samples, &action_vars()).unwrap();
        assert_eq!(averages[&Assignment::pair("a_m", "confirm")], -4.0);
        assert_eq!(averages[&Assignment::pair("a_m", "reject")], -8.0);
    }
}
