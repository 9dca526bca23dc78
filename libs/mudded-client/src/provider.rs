use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use ethers::{
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider, ProviderError},
    signers::{LocalWallet, Signer, WalletError},
    types::Address,
};

/// The one chain this client will talk to (Rinkeby).
pub const SUPPORTED_CHAIN_ID: u64 = 4;

#[derive(Debug)]
pub enum ClientError {
    ChainMismatch { actual: u64 },
    Endpoint(url::ParseError),
    Provider(ProviderError),
    Wallet(WalletError),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChainMismatch { actual } => write!(
                f,
                "connected to chain {actual}, but only chain {SUPPORTED_CHAIN_ID} is supported"
            ),
            Self::Endpoint(err) => write!(f, "invalid RPC endpoint: {err}"),
            Self::Provider(err) => write!(f, "provider error: {err}"),
            Self::Wallet(err) => write!(f, "wallet error: {err}"),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ChainMismatch { .. } => None,
            Self::Endpoint(err) => Some(err),
            Self::Provider(err) => Some(err),
            Self::Wallet(err) => Some(err),
        }
    }
}

pub fn ensure_supported_chain(chain_id: u64) -> Result<(), ClientError> {
    if chain_id != SUPPORTED_CHAIN_ID {
        return Err(ClientError::ChainMismatch { actual: chain_id });
    }
    Ok(())
}

/// Wallet connection to a single RPC endpoint. Resolves the chain id once at
/// connect time; read and write handles are derived from it on demand.
pub struct ChainClient {
    provider: Provider<Http>,
    wallet: LocalWallet,
    chain_id: u64,
}

impl ChainClient {
    pub async fn connect(
        rpc_url: &str,
        get_private_key: impl Fn() -> String,
    ) -> Result<Self, ClientError> {
        let provider = Provider::<Http>::try_from(rpc_url).map_err(ClientError::Endpoint)?;
        let chain_id = provider
            .get_chainid()
            .await
            .map_err(ClientError::Provider)?
            .as_u64();
        let wallet = LocalWallet::from_str(&get_private_key())
            .map_err(ClientError::Wallet)?
            .with_chain_id(chain_id);
        Ok(Self {
            provider,
            wallet,
            chain_id,
        })
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn address(&self) -> Address {
        self.wallet.address()
    }

    /// Read-only handle.
    pub fn provider(&self) -> Arc<Provider<Http>> {
        Arc::new(self.provider.clone())
    }

    /// Transaction-signing handle.
    pub fn signer(&self) -> Arc<SignerMiddleware<Provider<Http>, LocalWallet>> {
        Arc::new(SignerMiddleware::new(
            self.provider.clone(),
            self.wallet.clone(),
        ))
    }
}
