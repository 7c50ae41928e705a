//! Block explorer: latest block, its transactions, pagination and detail popup

use crossterm::event::{KeyCode, KeyEvent};

use crate::core::units::{format_ether, format_gwei};
use crate::core::{Action, Fetch, FetchState, Module, NotifyLevel, Pagination, RequestId};
use crate::domain::{tx_url, TxRecord, DEFAULT_EXPLORER_URL};
use crate::infrastructure::RuntimeCommand;
use crate::modules::input::TextInput;

/// Best-effort integer parse: the leading run of digits after trimming.
///
/// `"123abc"` is block 123, `"abc"` and `""` are not a block number.
pub fn parse_block_number(input: &str) -> Option<u64> {
    let trimmed = input.trim_start();
    let digits = trimmed
        .strip_prefix('+')
        .unwrap_or(trimmed)
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .unwrap_or("");
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Label/value rows of the transaction detail popup
pub fn tx_details(tx: &TxRecord) -> Vec<(&'static str, String)> {
    vec![
        ("Hash", tx.hash.clone()),
        ("From", tx.from.clone()),
        (
            "To",
            tx.to.clone().unwrap_or_else(|| "Contract Creation".to_string()),
        ),
        ("Value", format!("{} ETH", format_ether(tx.value))),
        ("Gas Limit", tx.gas_limit.to_string()),
        (
            "Gas Price",
            tx.gas_price
                .map(|price| format!("{} Gwei", format_gwei(price)))
                .unwrap_or_else(|| "-".to_string()),
        ),
    ]
}

pub struct ExplorerScreen {
    block_number: Option<u64>,
    transactions: Fetch<Vec<TxRecord>>,
    search: TextInput,
    pagination: Pagination,
    /// Row within the visible page
    cursor: usize,
    /// Absolute index of the transaction shown in the detail popup
    selected: Option<usize>,
    explorer_url: String,
}

impl Default for ExplorerScreen {
    fn default() -> Self {
        Self::new(Pagination::default(), DEFAULT_EXPLORER_URL)
    }
}

impl ExplorerScreen {
    pub fn new(pagination: Pagination, explorer_url: impl Into<String>) -> Self {
        Self {
            block_number: None,
            transactions: Fetch::new(),
            search: TextInput::new("Enter block number..."),
            pagination,
            cursor: 0,
            selected: None,
            explorer_url: explorer_url.into(),
        }
    }

    pub fn block_number(&self) -> Option<u64> {
        self.block_number
    }

    pub fn transactions(&self) -> &FetchState<Vec<TxRecord>> {
        self.transactions.state()
    }

    /// The fetched list; empty while loading and after a failure
    pub fn records(&self) -> &[TxRecord] {
        self.transactions.loaded().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn visible(&self) -> &[TxRecord] {
        self.pagination.visible(self.records())
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages(self.records().len())
    }

    pub fn has_previous_page(&self) -> bool {
        self.pagination.has_previous()
    }

    pub fn has_next_page(&self) -> bool {
        self.pagination.has_next(self.records().len())
    }

    pub fn search(&self) -> &TextInput {
        &self.search
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Option<&TxRecord> {
        self.selected.and_then(|idx| self.records().get(idx))
    }

    fn issue_latest(&mut self) -> Action {
        self.selected = None;
        let id = self.transactions.start();
        Action::Dispatch(RuntimeCommand::LoadLatestBlock { id })
    }

    /// Re-query by the typed block number. Unparseable input is a no-op.
    pub fn submit_search(&mut self) -> Action {
        let Some(number) = parse_block_number(self.search.value()) else {
            tracing::debug!(input = %self.search.value(), "ignoring non-numeric block search");
            return Action::None;
        };
        self.block_number = Some(number);
        self.selected = None;
        let id = self.transactions.start();
        tracing::info!(request = %id, block = number, "searching block");
        Action::Dispatch(RuntimeCommand::LoadBlock { id, number })
    }

    pub fn apply_latest_block(&mut self, id: RequestId, result: Result<u64, String>) -> Action {
        if !self.transactions.is_current(id) {
            return Action::None;
        }
        match result {
            Ok(number) => {
                self.block_number = Some(number);
                Action::None
            }
            Err(reason) => {
                self.transactions.finish(id, Err(reason.clone()));
                Action::Notify(
                    format!("Error fetching latest block: {reason}"),
                    NotifyLevel::Error,
                )
            }
        }
    }

    pub fn apply_transactions(
        &mut self,
        id: RequestId,
        number: u64,
        result: Result<Vec<TxRecord>, String>,
    ) -> Action {
        let error = result.as_ref().err().cloned();
        if !self.transactions.finish(id, result) {
            return Action::None;
        }
        self.block_number = Some(number);
        self.pagination.reset();
        self.cursor = 0;
        self.selected = None;

        match error {
            Some(reason) => Action::Notify(
                format!("Error fetching transactions: {reason}"),
                NotifyLevel::Error,
            ),
            None => Action::None,
        }
    }

    pub fn next_page(&mut self) {
        self.pagination.next(self.records().len());
        self.cursor = 0;
    }

    pub fn previous_page(&mut self) {
        self.pagination.previous();
        self.cursor = 0;
    }

    pub fn cycle_page_size(&mut self) {
        self.pagination.cycle_page_size();
        self.cursor = 0;
    }

    pub fn move_cursor(&mut self, down: bool) {
        let len = self.visible().len();
        if len == 0 {
            self.cursor = 0;
        } else if down {
            self.cursor = (self.cursor + 1).min(len - 1);
        } else {
            self.cursor = self.cursor.saturating_sub(1);
        }
    }

    pub fn open_detail(&mut self) {
        if self.cursor < self.visible().len() {
            self.selected = Some(self.pagination.offset() + self.cursor);
        }
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    /// Transaction the copy commands act on: the popup's, else the cursor's
    fn focused(&self) -> Option<&TxRecord> {
        self.selected().or_else(|| self.visible().get(self.cursor))
    }

    fn copy_hash(&self) -> Action {
        match self.focused() {
            Some(tx) => Action::Copy(tx.hash.clone()),
            None => Action::Notify("No transaction selected".into(), NotifyLevel::Warn),
        }
    }

    fn copy_link(&self) -> Action {
        match self.focused() {
            Some(tx) => Action::Copy(tx_url(&self.explorer_url, &tx.hash)),
            None => Action::Notify("No transaction selected".into(), NotifyLevel::Warn),
        }
    }
}

impl Module for ExplorerScreen {
    fn mount(&mut self) -> Action {
        self.issue_latest()
    }

    fn has_input(&self) -> bool {
        true
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.selected.is_some() {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    self.close_detail();
                    Action::None
                }
                KeyCode::Char('y') => self.copy_hash(),
                KeyCode::Char('o') => self.copy_link(),
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(true),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(false),
            KeyCode::Right | KeyCode::Char('n') | KeyCode::Char('l') => self.next_page(),
            KeyCode::Left | KeyCode::Char('p') | KeyCode::Char('h') => self.previous_page(),
            KeyCode::Char('s') => self.cycle_page_size(),
            KeyCode::Enter => self.open_detail(),
            KeyCode::Char('y') => return self.copy_hash(),
            KeyCode::Char('o') => return self.copy_link(),
            KeyCode::Char('r') => return self.issue_latest(),
            _ => {}
        }
        Action::None
    }

    fn handle_input(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Enter {
            return self.submit_search();
        }
        self.search.handle_key(key);
        Action::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn tx(n: usize) -> TxRecord {
        TxRecord {
            hash: format!("0x{n:064x}"),
            from: "0x1111111111111111111111111111111111111111".into(),
            to: Some("0x2222222222222222222222222222222222222222".into()),
            value: U256::from(n as u64),
            gas_limit: U256::from(21_000u64),
            gas_price: Some(U256::from(1_000_000_000u64)),
        }
    }

    fn dispatched_id(action: Action) -> RequestId {
        match action {
            Action::Dispatch(RuntimeCommand::LoadLatestBlock { id })
            | Action::Dispatch(RuntimeCommand::LoadBlock { id, .. }) => id,
            other => panic!("expected a block command, got {other:?}"),
        }
    }

    fn loaded(count: usize) -> ExplorerScreen {
        let mut screen = ExplorerScreen::default();
        let id = dispatched_id(screen.mount());
        screen.apply_latest_block(id, Ok(100));
        screen.apply_transactions(id, 100, Ok((0..count).map(tx).collect()));
        screen
    }

    fn type_search(screen: &mut ExplorerScreen, text: &str) {
        for c in text.chars() {
            screen.handle_input(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_parse_block_number() {
        assert_eq!(parse_block_number("19000000"), Some(19_000_000));
        assert_eq!(parse_block_number("  42abc"), Some(42));
        assert_eq!(parse_block_number("+7"), Some(7));
        assert_eq!(parse_block_number("abc"), None);
        assert_eq!(parse_block_number(""), None);
        assert_eq!(parse_block_number("-5"), None);
    }

    #[test]
    fn test_mount_loads_latest_block() {
        let mut screen = ExplorerScreen::default();
        let id = dispatched_id(screen.mount());
        assert!(screen.transactions().is_loading());
        assert_eq!(screen.block_number(), None);

        screen.apply_latest_block(id, Ok(19_000_000));
        assert_eq!(screen.block_number(), Some(19_000_000));
        assert!(screen.transactions().is_loading());
    }

    #[test]
    fn test_empty_block_is_inert() {
        let mut screen = ExplorerScreen::default();
        let id = dispatched_id(screen.mount());
        screen.apply_latest_block(id, Ok(19_000_000));
        screen.apply_transactions(id, 19_000_000, Ok(Vec::new()));

        assert_eq!(screen.transactions(), &FetchState::Loaded(Vec::new()));
        assert!(screen.visible().is_empty());
        assert_eq!(screen.total_pages(), 0);
        assert!(!screen.has_previous_page());
        assert!(!screen.has_next_page());

        screen.handle_key(key(KeyCode::Right));
        assert_eq!(screen.pagination().page(), 1);
        screen.handle_key(key(KeyCode::Enter));
        assert!(screen.selected().is_none());
    }

    #[test]
    fn test_non_numeric_search_is_noop() {
        let mut screen = loaded(3);
        type_search(&mut screen, "abc");
        let action = screen.handle_input(key(KeyCode::Enter));
        assert!(matches!(action, Action::None));
        assert_eq!(screen.block_number(), Some(100));
        assert_eq!(screen.records().len(), 3);
    }

    #[test]
    fn test_search_issues_block_load() {
        let mut screen = loaded(3);
        type_search(&mut screen, "123");
        let action = screen.handle_input(key(KeyCode::Enter));
        match action {
            Action::Dispatch(RuntimeCommand::LoadBlock { number, .. }) => assert_eq!(number, 123),
            other => panic!("unexpected action {other:?}"),
        }
        assert_eq!(screen.block_number(), Some(123));
        assert!(screen.transactions().is_loading());
        assert!(screen.records().is_empty());
    }

    #[test]
    fn test_pagination_over_block() {
        let mut screen = loaded(25);
        assert_eq!(screen.total_pages(), 3);
        assert_eq!(screen.visible().len(), 10);

        screen.handle_key(key(KeyCode::Char('n')));
        screen.handle_key(key(KeyCode::Char('n')));
        assert_eq!(screen.visible().len(), 5);
        assert!(!screen.has_next_page());

        screen.handle_key(key(KeyCode::Char('s')));
        assert_eq!(screen.pagination().page_size(), 20);
        assert_eq!(screen.pagination().page(), 1);
    }

    #[test]
    fn test_new_block_resets_page() {
        let mut screen = loaded(25);
        screen.next_page();
        assert_eq!(screen.pagination().page(), 2);

        type_search(&mut screen, "5");
        let id = dispatched_id(screen.handle_input(key(KeyCode::Enter)));
        screen.apply_transactions(id, 5, Ok((0..25).map(tx).collect()));
        assert_eq!(screen.pagination().page(), 1);
    }

    #[test]
    fn test_detail_popup_uses_absolute_index() {
        let mut screen = loaded(25);
        screen.next_page();
        screen.move_cursor(true);
        screen.handle_key(key(KeyCode::Enter));
        assert_eq!(screen.selected(), Some(&tx(11)));

        let details = tx_details(&tx(11));
        assert_eq!(details[3], ("Value", "0.000000000000000011 ETH".to_string()));
        assert_eq!(details[4], ("Gas Limit", "21000".to_string()));
        assert_eq!(details[5], ("Gas Price", "1 Gwei".to_string()));

        screen.handle_key(key(KeyCode::Esc));
        assert!(screen.selected().is_none());
    }

    #[test]
    fn test_contract_creation_label() {
        let mut creation = tx(1);
        creation.to = None;
        assert_eq!(tx_details(&creation)[2].1, "Contract Creation");
    }

    #[test]
    fn test_failure_renders_empty_list() {
        let mut screen = ExplorerScreen::default();
        let id = dispatched_id(screen.mount());
        screen.apply_latest_block(id, Ok(1));
        let action = screen.apply_transactions(id, 1, Err("timeout".into()));
        assert!(matches!(action, Action::Notify(_, NotifyLevel::Error)));
        assert!(screen.records().is_empty());
        assert_eq!(screen.transactions().error(), Some("timeout"));
    }

    #[test]
    fn test_latest_block_failure_ends_loading() {
        let mut screen = ExplorerScreen::default();
        let id = dispatched_id(screen.mount());
        screen.apply_latest_block(id, Err("unauthorized".into()));
        assert!(!screen.transactions().is_loading());
        assert_eq!(screen.block_number(), None);
    }

    #[test]
    fn test_stale_block_is_discarded() {
        let mut screen = loaded(0);
        type_search(&mut screen, "1");
        let slow = dispatched_id(screen.handle_input(key(KeyCode::Enter)));
        screen.search.clear();
        type_search(&mut screen, "2");
        let fast = dispatched_id(screen.handle_input(key(KeyCode::Enter)));

        screen.apply_transactions(fast, 2, Ok(vec![tx(2)]));
        screen.apply_transactions(slow, 1, Ok(vec![tx(1), tx(1)]));
        assert_eq!(screen.block_number(), Some(2));
        assert_eq!(screen.records(), &[tx(2)]);
    }

    #[test]
    fn test_copy_link() {
        let mut screen = loaded(2);
        match screen.handle_key(key(KeyCode::Char('o'))) {
            Action::Copy(url) => assert_eq!(url, format!("https://etherscan.io/tx/{}", tx(0).hash)),
            other => panic!("unexpected action {other:?}"),
        }
    }
}
