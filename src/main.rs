use anyhow::Result;
use clap::Parser;
use log::warn;

use forkbench::executor::{process, thread};
use forkbench::report;

#[derive(Parser, Debug)]
#[command(name = "forkbench")]
#[command(
    about = "Benchmark forked processes against worker threads on the same CPU-bound workload",
    long_about = None
)]
struct Args {
    /// Number of workers per strategy
    #[arg(value_name = "NUM_WORKERS", value_parser = clap::value_parser!(u64).range(1..))]
    num_workers: u64,

    /// Workload magnitude handed to every worker
    #[arg(value_name = "WORKLOAD")]
    workload: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let num_workers = args.num_workers as usize;

    let cores = num_cpus::get();
    if num_workers > cores {
        warn!(
            "{num_workers} workers oversubscribe {cores} logical cores; \
             both timings will include scheduling contention"
        );
    }

    println!(
        "Workers: {} | Workload per worker: {}\n",
        num_workers, args.workload
    );

    println!("=== Multi-Process Execution ===");
    let process_record = process::run(num_workers, args.workload)?;
    report::print_run(&process_record);

    println!("=== Multi-Thread Execution ===");
    let thread_record = thread::run(num_workers, args.workload)?;
    report::print_run(&thread_record);

    report::print_comparison(&process_record, &thread_record);

    Ok(())
}
