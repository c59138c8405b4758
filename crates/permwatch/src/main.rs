//! permwatch: permission change history for a monitoring dashboard
//!
//! This binary walks a git repository, tracks how a permissions file changed
//! over time, and writes the reported changes as JSON for the dashboard.

use clap::Parser;
use permwatch::analyze::analyze_repo;
use permwatch::config::Config;
use permwatch::output::write_history;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr, stdout carries the run summary
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    config.validate()?;

    println!("Analyzing repository at: {}", config.repo_path.display());
    let history = analyze_repo(&config.repo_path, &config.history_options())?;
    let output_file = write_history(&config.output_dir, &history)?;

    println!(
        "Analysis complete. Found {} relevant commits.",
        history.len()
    );
    println!("Output saved to: {}", output_file.display());
    Ok(())
}
