use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use te_monitor_cli::{analyzer, api_client::TeClient, report};
use te_monitor_common::Config;

#[derive(Parser)]
#[command(name = "te-monitor")]
#[command(about = "ThousandEyes HTTP server test automation")]
struct Cli {
    /// Load configuration from a TOML file instead of the environment
    #[arg(long)]
    config: Option<PathBuf>,

    /// Test name (overrides TEST_NAME)
    #[arg(long)]
    test_name: Option<String>,

    /// Target URL to monitor (overrides TARGET)
    #[arg(long)]
    target: Option<String>,

    /// Test interval in seconds (overrides TEST_INTERVAL)
    #[arg(long)]
    interval: Option<u64>,

    /// Directory the report file is written into
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Seconds to wait before fetching results, useful right after
    /// creating a test
    #[arg(long, default_value_t = 0)]
    wait: u64,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<(Config, u64)> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::from_env(),
        };

        if let Some(test_name) = self.test_name {
            config.test_name = test_name;
        }
        if let Some(target) = self.target {
            config.target = target;
        }
        if let Some(interval) = self.interval {
            config.interval_secs = interval;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = Some(output_dir);
        }

        config.validate()?;
        Ok((config, self.wait))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let (config, wait_secs) = Cli::parse().into_config()?;

    info!("Starting ThousandEyes test automation");
    let client = TeClient::new(&config)?;

    let Some(agent) = client.resolve_first_agent().await else {
        anyhow::bail!("No valid agent available. Exiting.");
    };
    info!("Discovered agent ID: {}", agent.agent_id);

    let test_id = match client.find_test_by_name(&config.test_name).await {
        Some(test_id) => {
            info!("Reusing existing test '{}' (ID: {})", config.test_name, test_id);
            test_id
        }
        None => client
            .create_test(
                &config.test_name,
                &config.target,
                agent.agent_id,
                config.interval_secs,
            )
            .await
            .ok_or_else(|| {
                anyhow::anyhow!("Could not locate or create test '{}'", config.test_name)
            })?,
    };

    if wait_secs > 0 {
        info!("Waiting {wait_secs}s before fetching results");
        tokio::time::sleep(Duration::from_secs(wait_secs)).await;
    }

    match client.fetch_results(test_id).await {
        Some(results) => {
            analyzer::analyze(&config, &results);

            let dir = config
                .output_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from("."));
            report::save_report(&dir, &config.test_name, &results).with_context(|| {
                format!("Failed to write report for test '{}'", config.test_name)
            })?;
        }
        None => warn!("No results available for test ID {test_id}"),
    }

    Ok(())
}
