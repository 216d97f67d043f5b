use std::io::{self, PipeReader, PipeWriter, Read, Write};
use std::process;

use anyhow::{bail, Context, Result};
use log::debug;
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{fork, ForkResult, Pid};

use crate::executor::{RunRecord, Strategy, WorkUnit, WorkerResult};
use crate::timing::Stopwatch;
use crate::workload;

/// One forked worker plus both ends of its result pipe. The parent holds the
/// write end open until the drain loop so each pipe sees exactly one writer
/// close before the read.
struct ChildWorker {
    pid: Pid,
    result_rx: PipeReader,
    result_tx: PipeWriter,
}

/// Forks `num_workers` children, each computing the workload over `magnitude`
/// and sending its result back over a dedicated pipe. Results are drained and
/// children reaped in creation order; the elapsed span covers first fork to
/// last reap.
pub fn run(num_workers: usize, magnitude: u64) -> Result<RunRecord> {
    let watch = Stopwatch::start();

    let mut workers = Vec::with_capacity(num_workers);
    for _ in 0..num_workers {
        workers.push(spawn_worker(WorkUnit { magnitude })?);
    }

    let mut total: u64 = 0;
    for worker in workers {
        let result = worker.collect()?;
        total = total.wrapping_add(result.value);
    }

    Ok(RunRecord {
        strategy: Strategy::Process,
        total,
        elapsed_seconds: watch.elapsed_seconds(),
    })
}

fn spawn_worker(unit: WorkUnit) -> Result<ChildWorker> {
    let (result_rx, result_tx) = io::pipe().context("failed to create result pipe")?;

    match unsafe { fork() }.context("failed to fork worker process")? {
        ForkResult::Child => {
            // The child never returns into the spawn loop: it computes, sends
            // one result, and exits. Exit code 1 signals a failed send, which
            // the parent sees as a truncated read.
            drop(result_rx);
            let result = WorkerResult {
                value: workload::compute(unit.magnitude),
            };
            let code = match send_result(result_tx, result) {
                Ok(()) => 0,
                Err(_) => 1,
            };
            process::exit(code);
        }
        ForkResult::Parent { child } => {
            debug!("forked worker process {child}");
            Ok(ChildWorker {
                pid: child,
                result_rx,
                result_tx,
            })
        }
    }
}

fn send_result(mut tx: PipeWriter, result: WorkerResult) -> io::Result<()> {
    tx.write_all(&result.encode())
}

impl ChildWorker {
    /// Reads the single result off the pipe, then blocks until the child is
    /// reaped. A child that exits without delivering a result, exits
    /// non-zero, or dies to a signal aborts the run: its missing contribution
    /// cannot be told apart from a legitimate zero.
    fn collect(self) -> Result<WorkerResult> {
        let ChildWorker {
            pid,
            mut result_rx,
            result_tx,
        } = self;

        // Close our copy of the write end so the read can see EOF if the
        // child died before writing.
        drop(result_tx);

        let mut buf = [0u8; WorkerResult::WIRE_SIZE];
        result_rx
            .read_exact(&mut buf)
            .with_context(|| format!("worker process {pid} exited without delivering a result"))?;
        let result = WorkerResult::decode(buf);
        drop(result_rx);

        match waitpid(pid, None).with_context(|| format!("failed to reap worker process {pid}"))? {
            WaitStatus::Exited(_, 0) => {
                debug!("reaped worker process {pid}");
                Ok(result)
            }
            status => bail!("worker process {pid} did not exit cleanly: {status:?}"),
        }
    }
}
