//! Screens
//!
//! Each screen implements the Module trait and owns its own view state:
//! - explorer: latest block, its transactions, pagination, detail popup
//! - accounts: balance and recent incoming transfers of an address
//! - nft: NFT metadata lookup
//! - latest_block: block number widget in the header

pub mod accounts;
pub mod explorer;
pub mod input;
pub mod latest_block;
pub mod nft;

pub use accounts::AccountsScreen;
pub use explorer::ExplorerScreen;
pub use latest_block::LatestBlockWidget;
pub use nft::NftScreen;
