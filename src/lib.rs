//! Benchmark harness pitting forked worker processes against worker threads
//! on the same deterministic CPU-bound workload.

pub mod executor;
pub mod report;
pub mod timing;
pub mod workload;
