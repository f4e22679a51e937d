// src/core/empirical.rs — Empirical distribution over drawn assignments

use std::collections::HashMap;

use super::assignment::{Assignment, Value};

/// Frequency table over the assignments produced by a resampling pass.
///
/// Each draw records one projected assignment; frequencies are counts
/// over the total number of draws.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmpiricalDistribution {
    counts: HashMap<Assignment, usize>,
    total: usize,
}

impl EmpiricalDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, assignment: Assignment) {
        *self.counts.entry(assignment).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn total_draws(&self) -> usize {
        self.total
    }

    /// Number of distinct assignments observed.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn count(&self, assignment: &Assignment) -> usize {
        self.counts.get(assignment).copied().unwrap_or(0)
    }

    pub fn frequency(&self, assignment: &Assignment) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(assignment) as f64 / self.total as f64
    }

    pub fn support(&self) -> impl Iterator<Item = &Assignment> {
        self.counts.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Assignment, usize)> {
        self.counts.iter().map(|(a, c)| (a, *c))
    }

    /// Assignment with the highest frequency, together with that
    /// frequency. Ties break arbitrarily.
    pub fn most_frequent(&self) -> Option<(&Assignment, f64)> {
        self.counts
            .iter()
            .max_by_key(|(_, c)| **c)
            .map(|(a, c)| (a, *c as f64 / self.total as f64))
    }

    /// Marginal frequencies of one variable. Assignments not binding
    /// the variable contribute no mass.
    pub fn marginal(&self, variable: &str) -> HashMap<Value, f64> {
        let mut marginal = HashMap::new();
        if self.total == 0 {
            return marginal;
        }
        for (assignment, count) in &self.counts {
            if let Some(value) = assignment.get(variable) {
                *marginal.entry(value.clone()).or_insert(0.0) +=
                    *count as f64 / self.total as f64;
            }
        }
        marginal
    }

    /// Mean of a variable over the draws where it carries a numeric
    /// value. `None` when it never does.
    pub fn expected_value(&self, variable: &str) -> Option<f64> {
        let mut weighted_sum = 0.0;
        let mut mass = 0usize;
        for (assignment, count) in &self.counts {
            if let Some(value) = assignment.get(variable).and_then(Value::as_f64) {
                weighted_sum += value * *count as f64;
                mass += count;
            }
        }
        if mass == 0 {
            None
        } else {
            Some(weighted_sum / mass as f64)
        }
    }
}
