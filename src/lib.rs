// src/lib.rs — Library root for wozeval

pub mod core;
pub mod infra;
