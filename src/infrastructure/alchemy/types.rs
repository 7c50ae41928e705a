//! Wire types of the Alchemy API and their conversion into domain types

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::domain::{
    NftMedia, NftMetadata, SortOrder, TransferQuery, TransferRecord, TxRecord,
};

/// `eth_getBlockByNumber(_, true)` result; only the fields we render
#[derive(Debug, Deserialize)]
pub struct RpcBlock {
    #[serde(default)]
    pub transactions: Vec<RpcTransaction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransaction {
    pub hash: String,
    pub from: String,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub value: U256,
    #[serde(default)]
    pub gas: U256,
    #[serde(default)]
    pub gas_price: Option<U256>,
}

impl From<RpcTransaction> for TxRecord {
    fn from(tx: RpcTransaction) -> Self {
        Self {
            hash: tx.hash,
            from: tx.from,
            to: tx.to,
            value: tx.value,
            gas_limit: tx.gas,
            gas_price: tx.gas_price,
        }
    }
}

/// Single parameter object of `alchemy_getAssetTransfers`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTransfersParams {
    pub from_block: String,
    pub to_address: String,
    pub category: Vec<&'static str>,
    pub max_count: String,
    pub order: &'static str,
    pub with_metadata: bool,
}

impl From<&TransferQuery> for AssetTransfersParams {
    fn from(query: &TransferQuery) -> Self {
        Self {
            from_block: format!("0x{:x}", query.from_block),
            to_address: query.to_address.clone(),
            category: query.categories.iter().map(|c| c.as_str()).collect(),
            max_count: format!("0x{:x}", query.max_count),
            order: match query.order {
                SortOrder::Ascending => "asc",
                SortOrder::Descending => "desc",
            },
            with_metadata: query.with_metadata,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTransfersResponse {
    #[serde(default)]
    pub transfers: Vec<RpcTransfer>,
    #[serde(default)]
    pub page_key: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransfer {
    pub hash: String,
    pub from: String,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub asset: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub block_num: Option<String>,
    #[serde(default)]
    pub metadata: Option<RpcTransferMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransferMetadata {
    #[serde(default)]
    pub block_timestamp: Option<String>,
}

impl From<RpcTransfer> for TransferRecord {
    fn from(transfer: RpcTransfer) -> Self {
        Self {
            hash: transfer.hash,
            from: transfer.from,
            to: transfer.to,
            // f64 Display never switches to exponent notation
            value: transfer.value.map(|v| v.to_string()),
            asset: transfer.asset,
            category: transfer.category,
            block_num: transfer.block_num,
            block_timestamp: transfer.metadata.and_then(|m| m.block_timestamp),
        }
    }
}

/// `getNFTMetadata` response (v2 NFT API)
#[derive(Debug, Default, Deserialize)]
pub struct RpcNftMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub media: Vec<RpcNftMedia>,
}

#[derive(Debug, Deserialize)]
pub struct RpcNftMedia {
    #[serde(default)]
    pub gateway: Option<String>,
    #[serde(default)]
    pub raw: Option<String>,
}

impl From<RpcNftMetadata> for NftMetadata {
    fn from(nft: RpcNftMetadata) -> Self {
        Self {
            title: nft.title.filter(|t| !t.trim().is_empty()),
            description: nft.description.filter(|d| !d.trim().is_empty()),
            media: nft
                .media
                .into_iter()
                .map(|m| NftMedia {
                    gateway: m.gateway,
                    raw: m.raw,
                })
                .collect(),
        }
    }
}
