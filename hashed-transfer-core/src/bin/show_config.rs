use hashed_transfer_core::infrastructure::CoreConfig;

fn main() -> anyhow::Result<()> {
    let config = CoreConfig::from_env()?;

    println!("Hashed Transfer Core Configuration:\n");
    println!("  RPC URL: {}", config.rpc_url);
    println!("  Contract Address: {}", config.contract_address.as_deref().unwrap_or("(not set)"));
    println!("  Sender: {}", config.sender.as_deref().unwrap_or("(not set)"));
    println!("  Default Algorithm: {}", config.default_algorithm);
    println!("  Amount Decimals: {}", config.amount_decimals);
    println!("  Record Directory: {}", config.record_dir.display());
    println!("  Confirm Receipts: {}", config.confirm_receipts);
    println!("  Benchmark Trials: {}", config.benchmark.trial_count);
    println!("  Benchmark Warm-up: {}", config.benchmark.warmup_count);
    println!("  Benchmark History: {}", config.benchmark.history_capacity);
    Ok(())
}
