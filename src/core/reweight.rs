// src/core/reweight.rs — Importance reweighting policies

use super::assignment::Assignment;
use super::averages::{action_averages, ActionAverages};
use super::sample::WeightedSample;
use crate::infra::errors::WozEvalError;

/// How raw sample weights are turned into resampling weights.
#[derive(Debug, Clone, PartialEq)]
pub enum ReweightPolicy {
    /// Condition the weights on the action the wizard actually chose,
    /// so samples agreeing with the wizard keep their utility-scaled
    /// mass and disagreeing samples are corrected toward the gold
    /// action's average.
    GoldConditioned { gold_action: Assignment },
    /// Weight each sample by its floored utility alone, ignoring the
    /// original importance weight.
    UtilityOnly,
}

/// Computes resampling weights for a population under one of the two
/// policies. All utilities are shifted by `floor` (the lowest utility
/// considered meaningful) so the masses stay positive.
#[derive(Debug, Clone)]
pub struct Reweighter {
    policy: ReweightPolicy,
    floor: f64,
}

impl Reweighter {
    /// A gold action selects the gold-conditioned policy; without one
    /// the reweighter falls back to utility-only.
    pub fn new(gold_action: Option<Assignment>, floor: f64) -> Self {
        let policy = match gold_action {
            Some(gold_action) => ReweightPolicy::GoldConditioned { gold_action },
            None => ReweightPolicy::UtilityOnly,
        };
        Self { policy, floor }
    }

    pub fn policy(&self) -> &ReweightPolicy {
        &self.policy
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Resampling weight for every sample, index-aligned with the
    /// input. This is the validated entry point: any non-finite or
    /// negative weight, or a weight sum of zero, fails the pass with
    /// [`WozEvalError::DegenerateWeight`].
    pub fn reweight(&self, samples: &[WeightedSample]) -> Result<Vec<f64>, WozEvalError> {
        if samples.is_empty() {
            return Err(WozEvalError::EmptyPopulation);
        }
        let weights = match &self.policy {
            ReweightPolicy::GoldConditioned { gold_action } => {
                let averages = action_averages(samples, &gold_action.variables())?;
                tracing::debug!(?averages, "per-action normalized utility averages");
                gold_conditioned_weights(samples, &averages, gold_action, self.floor)?
            }
            ReweightPolicy::UtilityOnly => utility_only_weights(samples, self.floor)?,
        };
        validate_weights(&weights)?;
        Ok(weights)
    }
}

/// Weight of each sample as its share of the total utility mass above
/// the floor: `(u - floor) / sum(u - floor)`.
pub fn utility_only_weights(
    samples: &[WeightedSample],
    floor: f64,
) -> Result<Vec<f64>, WozEvalError> {
    let total: f64 = samples.iter().map(|s| s.utility - floor).sum();
    check_denominator(total, "total utility mass above the floor")?;
    Ok(samples.iter().map(|s| (s.utility - floor) / total).collect())
}

/// Gold-conditioned correction of the original importance weights.
///
/// A sample whose assignment contains the gold action is scaled by its
/// own floored utility over the total floored average mass. A sample
/// choosing another action is scaled by the gold action's average over
/// a denominator built from its own floored utility plus the floored
/// averages of every action except its own. The correction ratio is
/// applied exactly once per sample, after the denominator is complete.
pub fn gold_conditioned_weights(
    samples: &[WeightedSample],
    averages: &ActionAverages,
    gold_action: &Assignment,
    floor: f64,
) -> Result<Vec<f64>, WozEvalError> {
    let gold_average = *averages.get(gold_action).ok_or_else(|| {
        WozEvalError::DegenerateWeight(format!(
            "gold action {gold_action} was never observed in the population"
        ))
    })?;
    let matched_denominator: f64 = averages.values().map(|avg| avg - floor).sum();
    check_denominator(matched_denominator, "matched-action denominator")?;

    let action_variables = gold_action.variables();
    let mut weights = Vec::with_capacity(samples.len());
    for sample in samples {
        let weight = if sample.assignment.contains(gold_action) {
            sample.weight * (sample.utility - floor) / matched_denominator
        } else {
            let own_action = sample.assignment.project(&action_variables);
            let mut denominator = sample.utility - floor;
            for (action, avg) in averages {
                if *action != own_action {
                    denominator += avg - floor;
                }
            }
            check_denominator(denominator, "mismatched-action denominator")?;
            sample.weight * gold_average / denominator
        };
        weights.push(weight);
    }
    Ok(weights)
}

fn check_denominator(value: f64, what: &str) -> Result<(), WozEvalError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(WozEvalError::DegenerateWeight(format!(
            "{what} is {value}, expected a finite positive number"
        )));
    }
    Ok(())
}

fn validate_weights(weights: &[f64]) -> Result<(), WozEvalError> {
    let mut total = 0.0;
    for &w in weights {
        if !w.is_finite() || w < 0.0 {
            return Err(WozEvalError::DegenerateWeight(format!(
                "computed weight {w} is not a finite non-negative number"
            )));
        }
        total += w;
    }
    if total <= 0.0 {
        return Err(WozEvalError::DegenerateWeight(format!(
            "total resampling mass is {total}, nothing to draw from"
        )));
    }
    Ok(())
}
