use std::env;
use std::time::Duration;

use clap::Parser;
use ethers::types::Address;
use mudded_client::state::AppState;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

mod controller;

use controller::Controller;

/// The banner is only reprinted when a tick or command changed something.
fn view_changed(last_rendered: Option<&AppState>, current: &AppState) -> bool {
    last_rendered != Some(current)
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long)]
    rpc_url: Option<String>,

    #[arg(long)]
    contract_address: String,
}

fn get_private_key() -> String {
    env::var("MINTER_PRIVATE_KEY").expect("MINTER_PRIVATE_KEY not found in environment")
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let rpc_url = cli.rpc_url.unwrap_or("http://localhost:8545".to_owned());
    let contract_address: Address = cli.contract_address.parse()?;

    let mut controller = Controller::new(rpc_url, contract_address, get_private_key);
    controller.handle_command("connect").await;

    // One scheduler tick drives every refresh; it dies with this loop.
    let mut tick = tokio::time::interval(Duration::from_secs(5));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let mut last_rendered: Option<AppState> = None;
    loop {
        if view_changed(last_rendered.as_ref(), &controller.state) {
            controller.render();
            last_rendered = Some(controller.state.clone());
        }
        tokio::select! {
            _ = tick.tick() => controller.refresh().await,
            line = lines.next_line() => match line? {
                Some(line) if line.trim() == "quit" => break,
                Some(line) => controller.handle_command(line.trim()).await,
                None => break,
            },
        }
    }

    Ok(())
}
