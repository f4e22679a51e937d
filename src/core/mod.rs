// src/core/mod.rs — Core resampling engine

pub mod assignment;
pub mod averages;
pub mod empirical;
pub mod intervals;
pub mod orchestrator;
pub mod reweight;
pub mod sample;
