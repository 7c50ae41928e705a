//! Blockchain data provider abstraction and the Alchemy implementation
//!
//! JSON-RPC calls go through alloy; the NFT metadata endpoint is plain REST
//! and goes through reqwest. Block and transfer payloads are requested with
//! `raw_request` and decoded into our own wire types so any EVM chain Alchemy
//! serves (including L2s with non-standard transaction types) decodes.

use std::fmt;
use std::str::FromStr;

use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy_primitives::U256;
use reqwest::Client;

use super::error::ProviderError;
use super::types::{
    AssetTransfersParams, AssetTransfersResponse, RpcBlock, RpcNftMetadata,
};
use crate::domain::{NftMetadata, TransferQuery, TransferRecord, TxRecord};

/// Remote operations the dashboard needs.
///
/// Constructed once at startup and shared by the runtime worker.
#[async_trait::async_trait]
pub trait BlockchainProvider: Send + Sync + 'static {
    /// Latest block height (`eth_blockNumber`)
    async fn block_number(&self) -> Result<u64, ProviderError>;

    /// Transactions of block `number`, `None` when the block does not exist
    async fn block_with_transactions(
        &self,
        number: u64,
    ) -> Result<Option<Vec<TxRecord>>, ProviderError>;

    /// Native balance in wei. The address is passed through unvalidated.
    async fn balance(&self, address: &str) -> Result<U256, ProviderError>;

    async fn asset_transfers(
        &self,
        query: &TransferQuery,
    ) -> Result<Vec<TransferRecord>, ProviderError>;

    async fn nft_metadata(
        &self,
        contract: &str,
        token_id: &str,
    ) -> Result<NftMetadata, ProviderError>;

    /// Endpoint display name (never includes the API key)
    fn endpoint_name(&self) -> String;
}

/// Networks served by Alchemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Network {
    #[default]
    EthMainnet,
    EthSepolia,
    EthHolesky,
    PolygonMainnet,
    ArbMainnet,
    OptMainnet,
    BaseMainnet,
}

impl Network {
    pub const ALL: [Network; 7] = [
        Network::EthMainnet,
        Network::EthSepolia,
        Network::EthHolesky,
        Network::PolygonMainnet,
        Network::ArbMainnet,
        Network::OptMainnet,
        Network::BaseMainnet,
    ];

    /// Subdomain slug, e.g. `eth-mainnet`
    pub fn slug(&self) -> &'static str {
        match self {
            Network::EthMainnet => "eth-mainnet",
            Network::EthSepolia => "eth-sepolia",
            Network::EthHolesky => "eth-holesky",
            Network::PolygonMainnet => "polygon-mainnet",
            Network::ArbMainnet => "arb-mainnet",
            Network::OptMainnet => "opt-mainnet",
            Network::BaseMainnet => "base-mainnet",
        }
    }

    pub fn base_url(&self) -> String {
        format!("https://{}.g.alchemy.com", self.slug())
    }

    /// Block explorer used for transaction links
    pub fn explorer_url(&self) -> &'static str {
        match self {
            Network::EthMainnet => "https://etherscan.io",
            Network::EthSepolia => "https://sepolia.etherscan.io",
            Network::EthHolesky => "https://holesky.etherscan.io",
            Network::PolygonMainnet => "https://polygonscan.com",
            Network::ArbMainnet => "https://arbiscan.io",
            Network::OptMainnet => "https://optimistic.etherscan.io",
            Network::BaseMainnet => "https://basescan.org",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Network::ALL
            .into_iter()
            .find(|network| network.slug() == wanted)
            .ok_or_else(|| format!("unknown network: {s}"))
    }
}

/// Resolved URLs for one API key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlchemyEndpoints {
    pub rpc_url: String,
    pub nft_url: String,
    display: String,
}

impl AlchemyEndpoints {
    /// `base` is the scheme and host, e.g. `https://eth-mainnet.g.alchemy.com`
    pub fn new(base: &str, api_key: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            rpc_url: format!("{base}/v2/{api_key}"),
            nft_url: format!("{base}/nft/v2/{api_key}"),
            display: base.to_string(),
        }
    }

    pub fn for_network(network: Network, api_key: &str) -> Self {
        Self::new(&network.base_url(), api_key)
    }

    pub fn display(&self) -> &str {
        &self.display
    }
}

/// [`BlockchainProvider`] backed by Alchemy
pub struct AlchemyProvider {
    rpc: DynProvider,
    http: Client,
    endpoints: AlchemyEndpoints,
}

impl AlchemyProvider {
    pub fn new(endpoints: AlchemyEndpoints) -> Result<Self, ProviderError> {
        let rpc_url = endpoints
            .rpc_url
            .parse()
            .map_err(|_| ProviderError::Endpoint(endpoints.display().to_string()))?;
        let rpc = ProviderBuilder::new().connect_http(rpc_url).erased();
        Ok(Self {
            rpc,
            http: Client::new(),
            endpoints,
        })
    }
}

fn rpc_error(e: impl fmt::Display) -> ProviderError {
    ProviderError::Rpc(e.to_string())
}

#[async_trait::async_trait]
impl BlockchainProvider for AlchemyProvider {
    async fn block_number(&self) -> Result<u64, ProviderError> {
        self.rpc.get_block_number().await.map_err(rpc_error)
    }

    async fn block_with_transactions(
        &self,
        number: u64,
    ) -> Result<Option<Vec<TxRecord>>, ProviderError> {
        let block_num_hex = format!("0x{:x}", number);
        let json: serde_json::Value = self
            .rpc
            .raw_request("eth_getBlockByNumber".into(), (&block_num_hex, true))
            .await
            .map_err(rpc_error)?;

        if json.is_null() {
            return Ok(None);
        }

        let block: RpcBlock = serde_json::from_value(json)?;
        Ok(Some(block.transactions.into_iter().map(Into::into).collect()))
    }

    async fn balance(&self, address: &str) -> Result<U256, ProviderError> {
        self.rpc
            .raw_request("eth_getBalance".into(), (address, "latest"))
            .await
            .map_err(rpc_error)
    }

    async fn asset_transfers(
        &self,
        query: &TransferQuery,
    ) -> Result<Vec<TransferRecord>, ProviderError> {
        let params = AssetTransfersParams::from(query);
        let response: AssetTransfersResponse = self
            .rpc
            .raw_request("alchemy_getAssetTransfers".into(), (params,))
            .await
            .map_err(rpc_error)?;
        if response.page_key.is_some() {
            tracing::debug!(address = %query.to_address, "more transfers available, not paging");
        }

        let mut transfers: Vec<TransferRecord> =
            response.transfers.into_iter().map(Into::into).collect();
        transfers.truncate(query.max_count as usize);
        Ok(transfers)
    }

    async fn nft_metadata(
        &self,
        contract: &str,
        token_id: &str,
    ) -> Result<NftMetadata, ProviderError> {
        let url = format!("{}/getNFTMetadata", self.endpoints.nft_url);
        let response = self
            .http
            .get(&url)
            .query(&[("contractAddress", contract), ("tokenId", token_id)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let metadata: RpcNftMetadata = response.json().await?;
        Ok(metadata.into())
    }

    fn endpoint_name(&self) -> String {
        self.endpoints.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_round_trip() {
        for network in Network::ALL {
            assert_eq!(network.slug().parse::<Network>(), Ok(network));
        }
        assert_eq!(" ETH-Sepolia ".parse::<Network>(), Ok(Network::EthSepolia));
        assert!("mainnet".parse::<Network>().is_err());
    }

    #[test]
    fn test_endpoints() {
        let endpoints = AlchemyEndpoints::for_network(Network::EthMainnet, "key");
        assert_eq!(endpoints.rpc_url, "https://eth-mainnet.g.alchemy.com/v2/key");
        assert_eq!(
            endpoints.nft_url,
            "https://eth-mainnet.g.alchemy.com/nft/v2/key"
        );
        assert!(!endpoints.display().contains("key"));
    }

    #[test]
    fn test_endpoints_trim_trailing_slash() {
        let endpoints = AlchemyEndpoints::new("http://127.0.0.1:8545/", "k");
        assert_eq!(endpoints.rpc_url, "http://127.0.0.1:8545/v2/k");
    }
}
