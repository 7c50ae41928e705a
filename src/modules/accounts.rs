//! Account lookup: native balance and the most recent incoming transfers

use alloy_primitives::U256;
use crossterm::event::{KeyCode, KeyEvent};

use crate::core::units::{normalize_ether, short_hex};
use crate::core::{Action, FetchState, Module, NotifyLevel, RequestId, RequestSeq};
use crate::domain::{tx_url, TransferRecord, DEFAULT_EXPLORER_URL};
use crate::infrastructure::RuntimeCommand;
use crate::modules::input::TextInput;

pub const INVALID_ADDRESS_MESSAGE: &str = "Invalid address or error fetching data.";

const SHORT_LEN: usize = 10;

/// One transfer as rendered in the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRow {
    pub hash: String,
    pub link: String,
    pub from: String,
    pub to: String,
    pub value: String,
}

impl TransferRow {
    pub fn new(transfer: &TransferRecord, explorer_url: &str) -> Self {
        let value = transfer
            .value
            .as_deref()
            .map(|v| normalize_ether(v).unwrap_or_else(|| v.to_string()))
            .unwrap_or_else(|| "0".to_string());
        Self {
            hash: short_hex(&transfer.hash, SHORT_LEN),
            link: tx_url(explorer_url, &transfer.hash),
            from: short_hex(&transfer.from, SHORT_LEN),
            to: transfer
                .to
                .as_deref()
                .map(|to| short_hex(to, SHORT_LEN))
                .unwrap_or_else(|| "Contract Execution".to_string()),
            value: format!("{value} ETH"),
        }
    }
}

pub struct AccountsScreen {
    address: TextInput,
    /// Address of the last submitted lookup
    queried: Option<String>,
    seq: RequestSeq,
    balance: FetchState<U256>,
    transfers: FetchState<Vec<TransferRecord>>,
    cursor: usize,
    explorer_url: String,
}

impl Default for AccountsScreen {
    fn default() -> Self {
        Self::new(DEFAULT_EXPLORER_URL)
    }
}

impl AccountsScreen {
    pub fn new(explorer_url: impl Into<String>) -> Self {
        Self {
            address: TextInput::new("Enter Ethereum address..."),
            queried: None,
            seq: RequestSeq::new(),
            balance: FetchState::Idle,
            transfers: FetchState::Idle,
            cursor: 0,
            explorer_url: explorer_url.into(),
        }
    }

    pub fn address(&self) -> &TextInput {
        &self.address
    }

    pub fn queried(&self) -> Option<&str> {
        self.queried.as_deref()
    }

    pub fn balance(&self) -> &FetchState<U256> {
        &self.balance
    }

    pub fn transfers(&self) -> &FetchState<Vec<TransferRecord>> {
        &self.transfers
    }

    /// True from submit until both calls of the lookup have resolved
    pub fn is_loading(&self) -> bool {
        self.balance.is_loading() || self.transfers.is_loading()
    }

    /// Transfers to render; empty unless the lookup fully succeeded
    pub fn rows(&self) -> Vec<TransferRow> {
        self.transfers
            .loaded()
            .map(|transfers| {
                transfers
                    .iter()
                    .map(|t| TransferRow::new(t, &self.explorer_url))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Look up the typed address. An empty address is a no-op.
    pub fn submit(&mut self) -> Action {
        let address = self.address.value().trim().to_string();
        if address.is_empty() {
            return Action::None;
        }

        let id = self.seq.issue();
        self.balance = FetchState::Loading;
        self.transfers = FetchState::Loading;
        self.cursor = 0;
        self.queried = Some(address.clone());
        tracing::info!(request = %id, %address, "looking up account");
        Action::Dispatch(RuntimeCommand::LoadAccount { id, address })
    }

    pub fn apply_balance(&mut self, id: RequestId, result: Result<U256, String>) -> Action {
        if !self.seq.is_current(id) {
            tracing::debug!(request = %id, "discarding stale balance");
            return Action::None;
        }
        match result {
            Ok(balance) => {
                self.balance = FetchState::Loaded(balance);
                Action::None
            }
            Err(reason) => {
                self.balance = FetchState::Errored(reason);
                // The transfers call is never made after a failed balance
                self.transfers = FetchState::Idle;
                Action::Notify(INVALID_ADDRESS_MESSAGE.into(), NotifyLevel::Error)
            }
        }
    }

    pub fn apply_transfers(
        &mut self,
        id: RequestId,
        result: Result<Vec<TransferRecord>, String>,
    ) -> Action {
        if !self.seq.is_current(id) {
            tracing::debug!(request = %id, "discarding stale transfers");
            return Action::None;
        }
        match result {
            Ok(transfers) => {
                self.transfers = FetchState::Loaded(transfers);
                Action::None
            }
            Err(reason) => {
                let action = Action::Notify(
                    format!("Error fetching transfers: {reason}"),
                    NotifyLevel::Warn,
                );
                self.transfers = FetchState::Errored(reason);
                action
            }
        }
    }

    fn selected_link(&self) -> Option<String> {
        self.transfers
            .loaded()
            .and_then(|transfers| transfers.get(self.cursor))
            .map(|t| tx_url(&self.explorer_url, &t.hash))
    }
}

impl Module for AccountsScreen {
    fn has_input(&self) -> bool {
        true
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        let len = self.transfers.loaded().map(Vec::len).unwrap_or(0);
        match key.code {
            KeyCode::Down | KeyCode::Char('j') if len > 0 => {
                self.cursor = (self.cursor + 1).min(len - 1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Char('o') | KeyCode::Char('y') => {
                return match self.selected_link() {
                    Some(link) => Action::Copy(link),
                    None => Action::Notify("No transfer selected".into(), NotifyLevel::Warn),
                };
            }
            KeyCode::Char('r') => return self.submit(),
            _ => {}
        }
        Action::None
    }

    fn handle_input(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Enter {
            return self.submit();
        }
        self.address.handle_key(key);
        Action::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    const ADDRESS: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn transfer(hash: &str, to: Option<&str>, value: Option<&str>) -> TransferRecord {
        TransferRecord {
            hash: hash.into(),
            from: "0x1234567890abcdef1234567890abcdef12345678".into(),
            to: to.map(Into::into),
            value: value.map(Into::into),
            asset: Some("ETH".into()),
            category: Some("external".into()),
            block_num: Some("0x10".into()),
            block_timestamp: None,
        }
    }

    fn submit(screen: &mut AccountsScreen, address: &str) -> RequestId {
        screen.address.set(address);
        match screen.handle_input(key(KeyCode::Enter)) {
            Action::Dispatch(RuntimeCommand::LoadAccount { id, address: sent }) => {
                assert_eq!(sent, address.trim());
                id
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn test_empty_address_is_noop() {
        let mut screen = AccountsScreen::default();
        screen.address.set("   ");
        assert!(matches!(screen.submit(), Action::None));
        assert_eq!(screen.balance(), &FetchState::Idle);
        assert!(!screen.is_loading());
    }

    #[test]
    fn test_successful_lookup() {
        let mut screen = AccountsScreen::default();
        let id = submit(&mut screen, ADDRESS);
        assert!(screen.is_loading());

        let wei = U256::from(1_500_000_000_000_000_000u64);
        screen.apply_balance(id, Ok(wei));
        assert!(screen.is_loading());

        screen.apply_transfers(
            id,
            Ok(vec![transfer("0xabcdef0123456789", Some(ADDRESS), Some("0.0500"))]),
        );
        assert!(!screen.is_loading());
        assert_eq!(screen.balance().loaded(), Some(&wei));

        let rows = screen.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].hash, "0xabcdef01...");
        assert_eq!(rows[0].link, "https://etherscan.io/tx/0xabcdef0123456789");
        assert_eq!(rows[0].from, "0x12345678...");
        assert_eq!(rows[0].to, "0xd8dA6BF2...");
        assert_eq!(rows[0].value, "0.05 ETH");
    }

    #[test]
    fn test_failed_lookup_shows_message_and_no_transfers() {
        let mut screen = AccountsScreen::default();
        let id = submit(&mut screen, "not-an-address");
        let action = screen.apply_balance(id, Err("invalid address".into()));

        match action {
            Action::Notify(text, NotifyLevel::Error) => assert_eq!(text, INVALID_ADDRESS_MESSAGE),
            other => panic!("unexpected action {other:?}"),
        }
        assert_eq!(screen.balance().error(), Some("invalid address"));
        assert!(screen.rows().is_empty());
        assert!(!screen.is_loading());
    }

    #[test]
    fn test_transfer_failure_keeps_balance() {
        let mut screen = AccountsScreen::default();
        let id = submit(&mut screen, ADDRESS);
        screen.apply_balance(id, Ok(U256::ZERO));
        screen.apply_transfers(id, Err("rate limited".into()));

        assert_eq!(screen.balance().loaded(), Some(&U256::ZERO));
        assert!(screen.rows().is_empty());
        assert!(!screen.is_loading());
    }

    #[test]
    fn test_missing_to_and_value() {
        let row = TransferRow::new(&transfer("0xfeed", None, None), DEFAULT_EXPLORER_URL);
        assert_eq!(row.to, "Contract Execution");
        assert_eq!(row.value, "0 ETH");
    }

    #[test]
    fn test_stale_lookup_is_discarded() {
        let mut screen = AccountsScreen::default();
        let first = submit(&mut screen, "0xaaa");
        let second = submit(&mut screen, "0xbbb");

        screen.apply_balance(second, Ok(U256::from(2u64)));
        screen.apply_balance(first, Err("late".into()));
        screen.apply_transfers(first, Ok(vec![transfer("0x1", None, None)]));

        assert_eq!(screen.queried(), Some("0xbbb"));
        assert_eq!(screen.balance().loaded(), Some(&U256::from(2u64)));
        assert!(screen.transfers().is_loading());
    }

    #[test]
    fn test_copy_selected_link() {
        let mut screen = AccountsScreen::default();
        let id = submit(&mut screen, ADDRESS);
        screen.apply_balance(id, Ok(U256::ZERO));
        screen.apply_transfers(
            id,
            Ok(vec![transfer("0x01", None, None), transfer("0x02", None, None)]),
        );

        screen.handle_key(key(KeyCode::Down));
        screen.handle_key(key(KeyCode::Down));
        match screen.handle_key(key(KeyCode::Char('o'))) {
            Action::Copy(link) => assert_eq!(link, "https://etherscan.io/tx/0x02"),
            other => panic!("unexpected action {other:?}"),
        }
    }
}
