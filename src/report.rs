//! Fixed-format report printing and winner selection.

use crate::executor::{RunRecord, Strategy};

/// Prints one strategy's summary lines, trailing blank line included.
pub fn print_run(record: &RunRecord) {
    println!("Total ({}): {}", record.strategy, record.total);
    println!(
        "Execution Time ({}): {:.6} sec\n",
        record.strategy, record.elapsed_seconds
    );
}

/// Prints the comparison section: both elapsed times restated, then the
/// verdict line.
pub fn print_comparison(process: &RunRecord, thread: &RunRecord) {
    println!("=== Performance Comparison ===");
    println!("Process Time: {:.6} sec", process.elapsed_seconds);
    println!("Thread Time : {:.6} sec", thread.elapsed_seconds);

    match faster_strategy(process.elapsed_seconds, thread.elapsed_seconds) {
        Strategy::Thread => println!("Threads were faster."),
        Strategy::Process => println!("Processes were faster."),
    }
}

/// Picks the strategy with the smaller elapsed time. An exact tie goes to
/// threads.
pub fn faster_strategy(process_seconds: f64, thread_seconds: f64) -> Strategy {
    if thread_seconds <= process_seconds {
        Strategy::Thread
    } else {
        Strategy::Process
    }
}
