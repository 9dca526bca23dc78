use std::time::{SystemTime, UNIX_EPOCH};

use ethers::{
    middleware::SignerMiddleware,
    providers::{Http, Provider},
    signers::LocalWallet,
    types::{Address, U256},
    utils::parse_ether,
};
use eyre::Context;

use crate::contracts::MuddedNft;
use crate::provider::{ensure_supported_chain, ChainClient, ClientError};

/// Price of one NFT, attached to both mint calls.
pub const MINT_PRICE_ETH: &str = "0.01";

pub fn presale_has_ended(end_timestamp: U256, now_secs: u64) -> bool {
    end_timestamp < U256::from(now_secs)
}

pub fn is_contract_owner(signer: Address, owner: Address) -> bool {
    signer == owner
}

fn now_secs() -> eyre::Result<u64> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("System clock is before the Unix epoch")?
        .as_secs())
}

/// Client bound to the deployed Mudded NFT contract. Construction is gated on
/// the supported chain; no contract handle exists for any other chain.
pub struct MintClient {
    contract_address: Address,
    chain: ChainClient,
}

impl MintClient {
    pub async fn connect(
        rpc_url: &str,
        get_private_key: impl Fn() -> String,
        contract_address: Address,
    ) -> Result<Self, ClientError> {
        let chain = ChainClient::connect(rpc_url, get_private_key).await?;
        ensure_supported_chain(chain.chain_id())?;
        Ok(Self {
            contract_address,
            chain,
        })
    }

    pub fn address(&self) -> Address {
        self.chain.address()
    }

    fn read_handle(&self) -> MuddedNft<Provider<Http>> {
        MuddedNft::new(self.contract_address, self.chain.provider())
    }

    fn write_handle(&self) -> MuddedNft<SignerMiddleware<Provider<Http>, LocalWallet>> {
        MuddedNft::new(self.contract_address, self.chain.signer())
    }

    pub async fn presale_started(&self) -> eyre::Result<bool> {
        self.read_handle()
            .presale_started()
            .call()
            .await
            .context("Failed to query presaleStarted")
    }

    pub async fn presale_ended(&self) -> eyre::Result<bool> {
        let end_timestamp = self
            .read_handle()
            .presale_ended()
            .call()
            .await
            .context("Failed to query presaleEnded")?;
        Ok(presale_has_ended(end_timestamp, now_secs()?))
    }

    /// Minted count as a decimal string; a uint256 does not fit in a float or
    /// a u64 without loss, so it is never narrowed.
    pub async fn minted_count(&self) -> eyre::Result<String> {
        let token_ids = self
            .read_handle()
            .token_ids()
            .call()
            .await
            .context("Failed to query tokenIds")?;
        Ok(token_ids.to_string())
    }

    pub async fn is_owner(&self) -> eyre::Result<bool> {
        let owner = self
            .read_handle()
            .owner()
            .call()
            .await
            .context("Failed to query owner")?;
        Ok(is_contract_owner(self.address(), owner))
    }

    pub async fn presale_mint(&self) -> eyre::Result<()> {
        let value = parse_ether(MINT_PRICE_ETH)?;
        self.write_handle()
            .presale_mint()
            .value(value)
            .send()
            .await
            .context("Failed to send presaleMint")?
            .await
            .context("Failed to confirm presaleMint")?;
        Ok(())
    }

    pub async fn public_mint(&self) -> eyre::Result<()> {
        let value = parse_ether(MINT_PRICE_ETH)?;
        self.write_handle()
            .mint()
            .value(value)
            .send()
            .await
            .context("Failed to send mint")?
            .await
            .context("Failed to confirm mint")?;
        Ok(())
    }

    pub async fn start_presale(&self) -> eyre::Result<()> {
        self.write_handle()
            .start_presale()
            .send()
            .await
            .context("Failed to send startPresale")?
            .await
            .context("Failed to confirm startPresale")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presale_end_is_strictly_before_now() {
        assert!(presale_has_ended(U256::from(99u64), 100));
        assert!(!presale_has_ended(U256::from(100u64), 100));
        assert!(!presale_has_ended(U256::from(101u64), 100));
    }

    #[test]
    fn far_future_end_timestamp_has_not_ended() {
        let beyond_u64 = U256::from(u64::MAX) + U256::one();
        assert!(!presale_has_ended(beyond_u64, u64::MAX));
    }

    #[test]
    fn owner_match_ignores_hex_case() {
        let mixed: Address = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"
            .parse()
            .unwrap();
        let lower: Address = "0xd8da6bf26964af9d7eed9e03e53415d37aa96045"
            .parse()
            .unwrap();
        assert!(is_contract_owner(mixed, lower));
    }

    #[test]
    fn owner_mismatch_is_rejected() {
        let a = Address::repeat_byte(0x11);
        let b = Address::repeat_byte(0x22);
        assert!(!is_contract_owner(a, b));
    }

    #[test]
    fn minted_count_string_keeps_full_precision() {
        // 2^53 + 1 is the first integer a 64-bit float cannot represent.
        let count = U256::from(9_007_199_254_740_993u64);
        assert_eq!(count.to_string(), "9007199254740993");
        assert_eq!(U256::exp10(30).to_string(), format!("1{}", "0".repeat(30)));
    }

    #[test]
    fn mint_price_parses() {
        assert_eq!(parse_ether(MINT_PRICE_ETH).unwrap(), U256::exp10(16));
    }
}
