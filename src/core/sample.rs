// src/core/sample.rs — Weighted, utility-annotated samples and the shared pool

use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::assignment::Assignment;

/// One particle drawn by the sampling thread: a full variable
/// assignment, its importance weight, and the utility the assignment
/// earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedSample {
    pub assignment: Assignment,
    pub weight: f64,
    pub utility: f64,
}

impl WeightedSample {
    pub fn new(assignment: Assignment, weight: f64, utility: f64) -> Self {
        Self {
            assignment,
            weight,
            utility,
        }
    }
}

/// Shared accumulation buffer for samples.
///
/// The sampling thread appends while the orchestrator reads. Readers
/// take a point-in-time copy via [`snapshot`](SamplePool::snapshot) so
/// a whole resampling pass works against one consistent population.
#[derive(Debug, Clone, Default)]
pub struct SamplePool {
    inner: Arc<RwLock<Vec<WeightedSample>>>,
}

impl SamplePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Vec::with_capacity(capacity))),
        }
    }

    pub fn push(&self, sample: WeightedSample) {
        self.write().push(sample);
    }

    pub fn extend(&self, samples: impl IntoIterator<Item = WeightedSample>) {
        self.write().extend(samples);
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Point-in-time copy of the population. Appends racing with the
    /// snapshot land in a later pass.
    pub fn snapshot(&self) -> Vec<WeightedSample> {
        self.read().clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<WeightedSample>> {
        // A poisoned lock still guards valid sample data; recover it
        // rather than propagating the panic to readers.
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<WeightedSample>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}
