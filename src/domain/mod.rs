//! Domain types shared by the provider, the runtime bridge and the screens
//!
//! All of them are transient: they live in a screen's view state until the
//! next fetch replaces them.

use alloy_primitives::U256;

/// One transaction of a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxRecord {
    pub hash: String,
    pub from: String,
    /// `None` for contract creation
    pub to: Option<String>,
    pub value: U256,
    pub gas_limit: U256,
    pub gas_price: Option<U256>,
}

impl TxRecord {
    pub fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }
}

/// One incoming transfer reported by the asset-transfers API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRecord {
    pub hash: String,
    pub from: String,
    pub to: Option<String>,
    /// Amount in units of `asset` (ether for native transfers)
    pub value: Option<String>,
    pub asset: Option<String>,
    pub category: Option<String>,
    pub block_num: Option<String>,
    pub block_timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NftMedia {
    pub gateway: Option<String>,
    pub raw: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NftMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub media: Vec<NftMedia>,
}

impl NftMetadata {
    /// Gateway URL of the first media entry, if any
    pub fn image_url(&self) -> Option<&str> {
        self.media
            .first()
            .and_then(|media| media.gateway.as_deref().or(media.raw.as_deref()))
            .filter(|url| !url.is_empty())
    }
}

/// Which transfers `alchemy_getAssetTransfers` should return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferCategory {
    External,
    Internal,
    Erc20,
    Erc721,
    Erc1155,
}

impl TransferCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferCategory::External => "external",
            TransferCategory::Internal => "internal",
            TransferCategory::Erc20 => "erc20",
            TransferCategory::Erc721 => "erc721",
            TransferCategory::Erc1155 => "erc1155",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Query for incoming transfers of an address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferQuery {
    pub to_address: String,
    pub from_block: u64,
    pub categories: Vec<TransferCategory>,
    pub max_count: u64,
    pub order: SortOrder,
    pub with_metadata: bool,
}

/// Most recent transfers shown on the account screen
pub const RECENT_TRANSFER_LIMIT: u64 = 10;

pub const DEFAULT_EXPLORER_URL: &str = "https://etherscan.io";

/// Block explorer page of a transaction, e.g. `https://etherscan.io/tx/0x..`
pub fn tx_url(explorer_url: &str, hash: &str) -> String {
    format!("{}/tx/{}", explorer_url.trim_end_matches('/'), hash)
}

impl TransferQuery {
    /// The ten most recent external and internal transfers into `address`
    pub fn recent_incoming(address: impl Into<String>) -> Self {
        Self {
            to_address: address.into(),
            from_block: 0,
            categories: vec![TransferCategory::External, TransferCategory::Internal],
            max_count: RECENT_TRANSFER_LIMIT,
            order: SortOrder::Descending,
            with_metadata: true,
        }
    }
}
