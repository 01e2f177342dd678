use std::time::Duration;

use anyhow::Result;
use backend_client::{BackendClient, InventoryBackend};
use clap::{Parser, Subcommand};
use shared::domain::{Asset, ScheduledScan};

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, env = "BACKEND_URL", default_value = "http://127.0.0.1:8000")]
    backend_url: String,
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the asset inventory.
    Assets,
    /// Print the scheduled scans.
    ScheduledScans,
    /// Fetch both lists the way the index page does and report what would render.
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("warn").init();
    let cli = Cli::parse();
    let client = BackendClient::new(cli.backend_url, Duration::from_secs(cli.timeout_secs))?;

    match cli.command {
        Command::Assets => {
            for asset in client.list_assets().await? {
                println!("{}", asset_line(&asset));
            }
        }
        Command::ScheduledScans => {
            for scan in client.list_scheduled_scans().await? {
                println!("{}", scan_line(&scan));
            }
        }
        Command::Check => {
            let assets = client.list_assets().await?;
            println!("assets: {} ({})", assets.len(), client.base_url());
            match client.list_scheduled_scans().await {
                Ok(scans) => println!("scheduled scans: {}", scans.len()),
                Err(e) => println!("scheduled scans: unavailable, index renders without them ({e})"),
            }
        }
    }

    Ok(())
}

fn asset_line(asset: &Asset) -> String {
    format!(
        "{}\t{}\t{}\trisk={:.1}\tcritical={}\thigh={}",
        asset.id,
        asset.hostname,
        asset.ipv4s.join(","),
        asset.risk_score,
        asset.critical,
        asset.high
    )
}

fn scan_line(scan: &ScheduledScan) -> String {
    let state = if scan.enabled { "enabled" } else { "disabled" };
    format!(
        "{}\t{}\t{}\t{} targets\t{}\t{}",
        scan.id,
        scan.name,
        scan.schedule.describe(),
        scan.expanded_target_count,
        state,
        scan.status
    )
}
