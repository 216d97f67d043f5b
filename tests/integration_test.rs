use std::process::Command;

fn run_forkbench(args: &[&str]) -> std::process::Output {
    Command::new("cargo")
        .args(["run", "--quiet", "--"])
        .args(args)
        .output()
        .expect("Failed to execute forkbench")
}

#[test]
fn test_full_benchmark_run() {
    let output = run_forkbench(&["3", "100"]);

    if !output.status.success() {
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("forkbench failed");
    }

    let stdout = String::from_utf8_lossy(&output.stdout);

    // All four sections, in order
    let header = stdout
        .find("Workers: 3 | Workload per worker: 100")
        .expect("missing header line");
    let process_section = stdout
        .find("=== Multi-Process Execution ===")
        .expect("missing process section");
    let thread_section = stdout
        .find("=== Multi-Thread Execution ===")
        .expect("missing thread section");
    let comparison = stdout
        .find("=== Performance Comparison ===")
        .expect("missing comparison section");

    assert!(header < process_section);
    assert!(process_section < thread_section);
    assert!(thread_section < comparison);

    // Both strategies report 3 * workload(100) = 3 * 295
    assert!(stdout.contains("Total (Process): 885"));
    assert!(stdout.contains("Total (Thread): 885"));
    assert!(stdout.contains("Process Time: "));
    assert!(stdout.contains("Thread Time : "));

    // Verdict is the last non-empty line
    let verdict = stdout.lines().rev().find(|l| !l.is_empty()).unwrap();
    assert!(
        verdict == "Threads were faster." || verdict == "Processes were faster.",
        "unexpected verdict line: {verdict}"
    );
}

#[test]
fn test_missing_arguments_print_usage() {
    let output = run_forkbench(&[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage:"), "no usage text in: {stderr}");
}

#[test]
fn test_zero_workers_rejected() {
    let output = run_forkbench(&["0", "100"]);

    assert!(!output.status.success());
}

#[test]
fn test_non_numeric_workload_rejected() {
    let output = run_forkbench(&["2", "lots"]);

    assert!(!output.status.success());
}
