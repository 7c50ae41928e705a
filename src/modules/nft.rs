//! NFT lookup by contract address and token id

use crossterm::event::{KeyCode, KeyEvent};

use crate::core::{Action, Fetch, FetchState, Module, RequestId};
use crate::domain::NftMetadata;
use crate::infrastructure::RuntimeCommand;
use crate::modules::input::TextInput;

pub const NFT_ERROR_MESSAGE: &str =
    "Error fetching NFT data. Please check the contract address and token ID.";
pub const NO_NAME: &str = "No Name";
pub const NO_IMAGE: &str = "No image available for this NFT.";
pub const NO_DESCRIPTION: &str = "No description available.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NftField {
    #[default]
    Contract,
    TokenId,
}

/// Display strings for a loaded NFT, with fallbacks applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NftCard {
    pub title: String,
    pub image: String,
    pub has_image: bool,
    pub description: String,
}

impl From<&NftMetadata> for NftCard {
    fn from(metadata: &NftMetadata) -> Self {
        let image = metadata.image_url();
        Self {
            title: metadata.title.clone().unwrap_or_else(|| NO_NAME.to_string()),
            image: image.unwrap_or(NO_IMAGE).to_string(),
            has_image: image.is_some(),
            description: metadata
                .description
                .clone()
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        }
    }
}

pub struct NftScreen {
    contract: TextInput,
    token_id: TextInput,
    focus: NftField,
    metadata: Fetch<NftMetadata>,
}

impl Default for NftScreen {
    fn default() -> Self {
        Self {
            contract: TextInput::new("Enter Contract Address"),
            token_id: TextInput::new("Enter Token ID"),
            focus: NftField::Contract,
            metadata: Fetch::new(),
        }
    }
}

impl NftScreen {
    pub fn contract(&self) -> &TextInput {
        &self.contract
    }

    pub fn token_id(&self) -> &TextInput {
        &self.token_id
    }

    pub fn focus(&self) -> NftField {
        self.focus
    }

    pub fn metadata(&self) -> &FetchState<NftMetadata> {
        self.metadata.state()
    }

    pub fn card(&self) -> Option<NftCard> {
        self.metadata.loaded().map(NftCard::from)
    }

    pub fn is_loading(&self) -> bool {
        self.metadata.is_loading()
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            NftField::Contract => NftField::TokenId,
            NftField::TokenId => NftField::Contract,
        };
    }

    /// Fetch metadata for the typed pair. Ignored while a lookup is running.
    pub fn submit(&mut self) -> Action {
        if self.metadata.is_loading() {
            return Action::None;
        }
        let contract = self.contract.value().trim().to_string();
        let token_id = self.token_id.value().trim().to_string();
        let id = self.metadata.start();
        tracing::info!(request = %id, %contract, %token_id, "looking up NFT");
        Action::Dispatch(RuntimeCommand::LoadNft {
            id,
            contract,
            token_id,
        })
    }

    pub fn apply_metadata(&mut self, id: RequestId, result: Result<NftMetadata, String>) -> Action {
        self.metadata.finish(id, result);
        Action::None
    }

    fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            NftField::Contract => &mut self.contract,
            NftField::TokenId => &mut self.token_id,
        }
    }
}

impl Module for NftScreen {
    fn has_input(&self) -> bool {
        true
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('k') => {
                self.toggle_focus();
                Action::None
            }
            KeyCode::Enter => self.submit(),
            _ => Action::None,
        }
    }

    fn handle_input(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::BackTab => {
                self.toggle_focus();
                Action::None
            }
            _ => {
                self.focused_input().handle_key(key);
                Action::None
            }
        }
    }
}
