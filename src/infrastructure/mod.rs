//! Infrastructure layer - External service integrations
//!
//! This layer contains:
//! - The Alchemy provider (alloy JSON-RPC + NFT REST API)
//! - Tokio runtime bridge for async operations

pub mod alchemy;
pub mod runtime;

pub use alchemy::{AlchemyEndpoints, AlchemyProvider, BlockchainProvider, Network, ProviderError};
pub use runtime::{execute, RuntimeBridge, RuntimeCommand, RuntimeEvent};
