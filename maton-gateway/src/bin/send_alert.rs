//! Post a Slack message through the Maton gateway.
//!
//! Usage:
//!     export MATON_API_KEY="your_key_here"
//!     send-alert "C0123456789" "BTC Alert: Whale detected!"

use std::process::ExitCode;

use clap::Parser;
use maton_gateway::{logging, post_message, Config, GatewayClient};

#[derive(Debug, Parser)]
#[command(name = "send-alert", version, about = "Send a Slack message via Maton")]
struct Args {
    /// Slack channel ID, e.g. C0123456789
    channel_id: String,
    /// Message text
    message: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Usage errors exit here (status 2), before the key is even looked at.
    let args = Args::parse();

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

    match post_message(&client, &args.channel_id, &args.message).await {
        Ok(posted) => {
            println!("✓ Message sent to Slack!");
            println!("Channel: {}", posted.channel);
            println!("Timestamp: {}", posted.ts);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            ExitCode::FAILURE
        }
    }
}
