// src/core/orchestrator.rs — Resampling pass controller

use std::collections::BTreeSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::assignment::Assignment;
use super::empirical::EmpiricalDistribution;
use super::intervals::{IntervalSampler, WeightedIntervals};
use super::reweight::Reweighter;
use super::sample::SamplePool;
use crate::infra::config::ResamplingConfig;
use crate::infra::errors::WozEvalError;

/// The decision query under evaluation: the variables whose joint
/// distribution the resampling pass estimates.
#[derive(Debug, Clone, PartialEq)]
pub struct UtilityQuery {
    variables: BTreeSet<String>,
}

impl UtilityQuery {
    pub fn new<I, S>(variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            variables: variables.into_iter().map(Into::into).collect(),
        }
    }

    pub fn variables(&self) -> &BTreeSet<String> {
        &self.variables
    }
}

/// Outcome of the most recent compile pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CompileStatus {
    NotCompiled,
    Compiled {
        at: DateTime<Utc>,
        draws: usize,
    },
    Failed {
        reason: String,
        /// Whether results from an earlier successful pass are still
        /// being served.
        stale_retained: bool,
    },
}

/// Drives one resampling pass: snapshot the pool, reweight, draw with
/// replacement, and accumulate the projected draws into an empirical
/// distribution.
///
/// A failed pass is logged and recorded in [`CompileStatus::Failed`];
/// results from the last successful pass stay available until a later
/// pass replaces them.
pub struct ResamplingOrchestrator {
    query: UtilityQuery,
    reweighter: Reweighter,
    pool: SamplePool,
    sampler: Box<dyn IntervalSampler + Send>,
    distribution: Option<EmpiricalDistribution>,
    status: CompileStatus,
    /// Population size the sample producer is asked to deliver.
    sample_count_hint: usize,
    /// Wall-clock budget the sample producer is asked to honor.
    time_budget: Duration,
}

impl ResamplingOrchestrator {
    /// A gold action selects gold-conditioned reweighting; without one
    /// the pass weights by utility alone. The hints describe the
    /// population the producer is expected to fill `pool` with; the
    /// pass itself consumes whatever the pool holds at snapshot time.
    pub fn new(
        query: UtilityQuery,
        gold_action: Option<Assignment>,
        pool: SamplePool,
        config: &ResamplingConfig,
    ) -> Self {
        let sampler: Box<dyn IntervalSampler + Send> = match config.seed {
            Some(seed) => Box::new(WeightedIntervals::with_seed(seed)),
            None => Box::new(WeightedIntervals::new()),
        };
        Self {
            query,
            reweighter: Reweighter::new(gold_action, config.utility_floor),
            pool,
            sampler,
            distribution: None,
            status: CompileStatus::NotCompiled,
            sample_count_hint: config.sample_count_hint,
            time_budget: Duration::from_millis(config.time_budget_ms),
        }
    }

    /// Replace the interval sampler. Primarily useful in tests to make
    /// draws deterministic.
    pub fn with_sampler(mut self, sampler: impl IntervalSampler + Send + 'static) -> Self {
        self.sampler = Box::new(sampler);
        self
    }

    pub fn query(&self) -> &UtilityQuery {
        &self.query
    }

    pub fn sample_count_hint(&self) -> usize {
        self.sample_count_hint
    }

    pub fn time_budget(&self) -> Duration {
        self.time_budget
    }

    /// Runs a full resampling pass over the current pool contents.
    ///
    /// Takes `&mut self`: a pass cannot re-enter while one is running.
    /// On failure the error is logged, the status records the reason,
    /// and any previously compiled distribution is kept as-is.
    pub fn compile_results(&mut self) {
        match self.resample() {
            Ok(distribution) => {
                let draws = distribution.total_draws();
                self.distribution = Some(distribution);
                self.status = CompileStatus::Compiled {
                    at: Utc::now(),
                    draws,
                };
                tracing::debug!(draws, "resampling pass compiled");
            }
            Err(e) => {
                let stale_retained = self.distribution.is_some();
                tracing::warn!(error = %e, stale_retained, "resampling pass failed");
                self.status = CompileStatus::Failed {
                    reason: e.to_string(),
                    stale_retained,
                };
            }
        }
    }

    /// Distribution compiled by the most recent successful pass.
    pub fn results(&self) -> Option<&EmpiricalDistribution> {
        self.distribution.as_ref()
    }

    pub fn status(&self) -> &CompileStatus {
        &self.status
    }

    fn resample(&mut self) -> Result<EmpiricalDistribution, WozEvalError> {
        // One snapshot serves both the averaging and reweighting
        // passes, so samples appended mid-pass cannot skew the result.
        let snapshot = self.pool.snapshot();
        if snapshot.is_empty() {
            return Err(WozEvalError::EmptyPopulation);
        }
        let weights = self.reweighter.reweight(&snapshot)?;
        let indices = self.sampler.draw_indices(&weights, snapshot.len())?;

        let mut distribution = EmpiricalDistribution::new();
        for index in indices {
            let projected = snapshot[index].assignment.try_project(self.query.variables())?;
            distribution.record(projected);
        }
        Ok(distribution)
    }
}
