use anyhow::Context;
use hashed_transfer_core::core::benchmark::BenchmarkRunner;
use hashed_transfer_core::infrastructure::CoreConfig;
use hashed_transfer_core::shared::constants::DEFAULT_BENCH_INPUT;
use hashed_transfer_core::{HashAlgorithmId, HashInput};
use std::env;

/// Usage: hash_bench [input] [algorithm...]
fn main() -> anyhow::Result<()> {
    hashed_transfer_core::init().map_err(|e| anyhow::anyhow!("{}", e))?;
    let config = CoreConfig::from_env()?;

    let mut args = env::args().skip(1);
    let input = args.next().unwrap_or_else(|| DEFAULT_BENCH_INPUT.to_string());
    let mut algorithms = args
        .map(|a| a.parse::<HashAlgorithmId>())
        .collect::<Result<Vec<_>, _>>()
        .context("Unknown algorithm argument")?;
    if algorithms.is_empty() {
        algorithms = vec![HashAlgorithmId::Sha512Truncated32, HashAlgorithmId::Blake3Full];
    }

    let run = BenchmarkRunner::new().run(&config.benchmark, &algorithms, &HashInput::from(input.as_str()))?;

    println!(
        "Benchmark {} ({} bytes, {} trials, {} warm-up)\n",
        run.run_id, run.input_len, run.trial_count, run.warmup_count
    );
    println!(
        "  {:<14} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "Algorithm", "avg ms", "median ms", "min ms", "max ms", "std dev"
    );
    for summary in &run.summaries {
        println!(
            "  {:<14} {:>12.5} {:>12.5} {:>12.5} {:>12.5} {:>12.5}",
            summary.algorithm.label(),
            summary.average_millis,
            summary.median_millis,
            summary.min_millis,
            summary.max_millis,
            summary.std_dev_millis
        );
    }
    println!();
    for summary in &run.summaries {
        println!("  {:<14} {}", summary.algorithm.label(), summary.digest_hex);
    }
    Ok(())
}
