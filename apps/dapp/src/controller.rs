use mudded_client::ops::MintClient;
use mudded_client::provider::{ClientError, SUPPORTED_CHAIN_ID};
use mudded_client::state::{AppState, Update};
use mudded_client::view::{render, Affordance, MAX_SUPPLY};
use tracing::warn;

use ethers::types::Address;

/// Maps the started-query outcome to the fail-soft flag value and whether the
/// owner check should follow. The owner flag is advisory, so it is only
/// recomputed after a successful not-started read; a failed read defaults the
/// flag to false and leaves the cached owner flag alone.
fn started_cycle(outcome: eyre::Result<bool>) -> (bool, bool) {
    match outcome {
        Ok(started) => (started, !started),
        Err(err) => {
            warn!(%err, "presale started check failed");
            (false, false)
        }
    }
}

/// Drives the view state. All network calls are awaited inline; state changes
/// happen only between awaits, through the reducer.
pub struct Controller {
    rpc_url: String,
    contract_address: Address,
    get_private_key: fn() -> String,
    client: Option<MintClient>,
    pub state: AppState,
}

impl Controller {
    pub fn new(rpc_url: String, contract_address: Address, get_private_key: fn() -> String) -> Self {
        Self {
            rpc_url,
            contract_address,
            get_private_key,
            client: None,
            state: AppState::default(),
        }
    }

    pub fn render(&self) {
        println!();
        println!("Welcome to Mudded NFT");
        println!("{}/{} have been minted", self.state.minted_count, MAX_SUPPLY);
        println!("{}", render(&self.state));
    }

    pub async fn handle_command(&mut self, command: &str) {
        match command {
            "connect" => self.connect().await,
            "mint" => self.mint().await,
            "start" => self.start_presale().await,
            "" => {}
            other => println!("Unknown command '{other}' (connect | mint | start | quit)"),
        }
    }

    async fn connect(&mut self) {
        if self.client.is_some() {
            return;
        }
        match MintClient::connect(&self.rpc_url, self.get_private_key, self.contract_address).await
        {
            Ok(client) => {
                self.client = Some(client);
                self.state.apply(Update::Connected);
                self.refresh().await;
            }
            Err(ClientError::ChainMismatch { actual }) => {
                println!(
                    "Please change to the supported network (chain id {SUPPORTED_CHAIN_ID}); \
                     your wallet is on chain {actual}"
                );
            }
            Err(err) => warn!(%err, "wallet connection failed"),
        }
    }

    /// One scheduler tick: refreshes every derived field in a fixed order so
    /// a cycle never observes a mix of old and new values.
    pub async fn refresh(&mut self) {
        let Some(client) = &self.client else {
            return;
        };

        let (started, run_owner_check) = started_cycle(client.presale_started().await);
        if run_owner_check {
            match client.is_owner().await {
                Ok(is_owner) => self.state.apply(Update::Owner(is_owner)),
                Err(err) => warn!(%err, "owner check failed"),
            }
        }
        self.state.apply(Update::PresaleStarted(started));

        // The ended check self-cancels once ended has been observed true.
        if started && !self.state.presale_ended {
            match client.presale_ended().await {
                Ok(ended) => self.state.apply(Update::PresaleEnded(ended)),
                Err(err) => warn!(%err, "presale ended check failed"),
            }
        }

        match client.minted_count().await {
            Ok(count) => self.state.apply(Update::MintedCount(count)),
            Err(err) => warn!(%err, "minted count refresh failed"),
        }
    }

    async fn mint(&mut self) {
        let Some(client) = &self.client else {
            println!("Connect your wallet first");
            return;
        };
        let result = match render(&self.state) {
            Affordance::PresaleMint => {
                self.state.apply(Update::Loading(true));
                self.render();
                client.presale_mint().await
            }
            Affordance::PublicMint => {
                self.state.apply(Update::Loading(true));
                self.render();
                client.public_mint().await
            }
            _ => {
                println!("Minting is not available right now");
                return;
            }
        };
        self.state.apply(Update::Loading(false));
        match result {
            Ok(()) => println!("Successfully minted!"),
            Err(err) => warn!(%err, "mint failed"),
        }
    }

    async fn start_presale(&mut self) {
        let Some(client) = &self.client else {
            println!("Connect your wallet first");
            return;
        };
        if render(&self.state) != Affordance::StartPresale {
            println!("Starting the presale is not available right now");
            return;
        }
        self.state.apply(Update::Loading(true));
        self.render();
        let result = client.start_presale().await;
        self.state.apply(Update::Loading(false));
        match result {
            // Re-derive the started flag from the ledger rather than assuming.
            Ok(()) => self.refresh().await,
            Err(err) => warn!(%err, "start presale failed"),
        }
    }
}
