//! Alchemy provider: JSON-RPC through alloy, NFT REST API through reqwest

mod error;
mod provider;
pub(crate) mod types;

pub use error::ProviderError;
pub use provider::{AlchemyEndpoints, AlchemyProvider, BlockchainProvider, Network};
