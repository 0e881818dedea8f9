//! Create a BTC analysis spreadsheet through the Maton gateway.
//!
//! Usage:
//!     export MATON_API_KEY="your_key_here"
//!     create-btc-dashboard

use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use maton_gateway::{create_btc_dashboard, logging, Config, DashboardStep, GatewayClient};

#[derive(Debug, Parser)]
#[command(
    name = "create-btc-dashboard",
    version,
    about = "Create a Google Sheets BTC dashboard via Maton"
)]
struct Args {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _args = Args::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config.logging);

    let client = match GatewayClient::new(&config.gateway) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Creating BTC Analysis Dashboard...");
    let result = create_btc_dashboard(&client, Local::now().naive_local(), |step| match step {
        DashboardStep::Created(sheet) => {
            println!("✓ Created spreadsheet: {}", sheet.spreadsheet_url)
        }
        DashboardStep::HeadersAdded => println!("✓ Added headers"),
        DashboardStep::SampleDataAdded => println!("✓ Added sample data"),
    })
    .await;

    match result {
        Ok(sheet) => {
            println!();
            println!("🎉 Dashboard ready: {}", sheet.spreadsheet_url);
            println!("Spreadsheet ID: {}", sheet.spreadsheet_id);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            ExitCode::FAILURE
        }
    }
}
