use std::thread::{Builder, JoinHandle};

use anyhow::{anyhow, Context, Result};
use log::debug;

use crate::executor::{RunRecord, Strategy, WorkUnit, WorkerResult};
use crate::timing::Stopwatch;
use crate::workload;

/// Spawns `num_workers` threads, each computing the workload over `magnitude`.
/// A worker's result travels back through its join handle, so the parent can
/// only read it after that worker has terminated; join-before-read is the
/// entire synchronization story. Handles are joined in creation order and the
/// elapsed span covers first spawn to last join.
pub fn run(num_workers: usize, magnitude: u64) -> Result<RunRecord> {
    let watch = Stopwatch::start();

    let mut workers = Vec::with_capacity(num_workers);
    for index in 0..num_workers {
        workers.push(spawn_worker(index, WorkUnit { magnitude })?);
    }

    let mut total: u64 = 0;
    for (index, handle) in workers.into_iter().enumerate() {
        let result = join_worker(index, handle)?;
        total = total.wrapping_add(result.value);
    }

    Ok(RunRecord {
        strategy: Strategy::Thread,
        total,
        elapsed_seconds: watch.elapsed_seconds(),
    })
}

fn spawn_worker(index: usize, unit: WorkUnit) -> Result<JoinHandle<WorkerResult>> {
    Builder::new()
        .name(format!("worker-{index}"))
        .spawn(move || WorkerResult {
            value: workload::compute(unit.magnitude),
        })
        .with_context(|| format!("failed to spawn worker thread {index}"))
}

/// A panicked worker is fatal: its missing contribution cannot be told apart
/// from a legitimate zero.
fn join_worker(index: usize, handle: JoinHandle<WorkerResult>) -> Result<WorkerResult> {
    let result = handle
        .join()
        .map_err(|_| anyhow!("worker thread {index} panicked"))?;
    debug!("joined worker thread {index}");
    Ok(result)
}
