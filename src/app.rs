//! Application state: the navigation shell around the screens

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::{Action, Module, NotifyLevel, Pagination, Route};
use crate::domain::DEFAULT_EXPLORER_URL;
use crate::infrastructure::{RuntimeCommand, RuntimeEvent};
use crate::modules::{AccountsScreen, ExplorerScreen, LatestBlockWidget, NftScreen};

const STATUS_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Keystrokes go to the active screen's input
    Editing,
}

pub type StatusLevel = NotifyLevel;

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub since: Instant,
}

/// Startup options resolved from CLI, environment and config file
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub page_size: usize,
    pub explorer_url: String,
    /// Endpoint shown in the header
    pub endpoint: String,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            page_size: crate::core::pagination::DEFAULT_PAGE_SIZE,
            explorer_url: DEFAULT_EXPLORER_URL.to_string(),
            endpoint: String::new(),
        }
    }
}

pub struct App {
    pub route: Route,
    pub input_mode: InputMode,
    pub explorer: ExplorerScreen,
    pub accounts: AccountsScreen,
    pub nft: NftScreen,
    pub latest_block: LatestBlockWidget,
    pub endpoint: String,
    pub status: Option<StatusMessage>,
    pub help_open: bool,
    pub should_quit: bool,
    pending_commands: Vec<RuntimeCommand>,
    pending_copy: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppOptions::default())
    }
}

impl App {
    pub fn new(options: AppOptions) -> Self {
        Self {
            route: Route::Home,
            input_mode: InputMode::Normal,
            explorer: ExplorerScreen::new(
                Pagination::new(options.page_size),
                options.explorer_url.clone(),
            ),
            accounts: AccountsScreen::new(options.explorer_url),
            nft: NftScreen::default(),
            latest_block: LatestBlockWidget::default(),
            endpoint: options.endpoint,
            status: None,
            help_open: false,
            should_quit: false,
            pending_commands: Vec::new(),
            pending_copy: None,
        }
    }

    /// Issue the on-mount requests of the header widget and every screen.
    ///
    /// Screens stay alive while hidden, so this runs once at startup.
    pub fn mount(&mut self) {
        let actions = [
            self.latest_block.mount(),
            self.explorer.mount(),
            self.accounts.mount(),
            self.nft.mount(),
        ];
        for action in actions {
            self.apply_action(action);
        }
    }

    fn active_module(&mut self) -> &mut dyn Module {
        match self.route {
            Route::Home => &mut self.explorer,
            Route::Accounts => &mut self.accounts,
            Route::Nft => &mut self.nft,
        }
    }

    fn active_has_input(&self) -> bool {
        match self.route {
            Route::Home => self.explorer.has_input(),
            Route::Accounts => self.accounts.has_input(),
            Route::Nft => self.nft.has_input(),
        }
    }

    pub fn navigate(&mut self, route: Route) {
        if self.route != route {
            tracing::debug!(from = self.route.path(), to = route.path(), "navigate");
        }
        self.route = route;
        self.input_mode = InputMode::Normal;
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, StatusLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    pub fn on_tick(&mut self) {
        if let Some(status) = self.status.as_ref() {
            if status.since.elapsed() > STATUS_TTL {
                self.status = None;
            }
        }
    }

    /// Commands queued for the runtime worker since the last call
    pub fn take_commands(&mut self) -> Vec<RuntimeCommand> {
        std::mem::take(&mut self.pending_commands)
    }

    pub fn take_copy_request(&mut self) -> Option<String> {
        self.pending_copy.take()
    }

    /// Apply an action returned by a screen
    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(route) => self.navigate(route),
            Action::Dispatch(cmd) => self.pending_commands.push(cmd),
            Action::Copy(text) => self.pending_copy = Some(text),
            Action::Notify(msg, level) => self.set_status(msg, level),
            Action::Quit => self.should_quit = true,
        }
    }

    /// Route a worker result to the screen that issued the request
    pub fn apply_event(&mut self, event: RuntimeEvent) {
        let action = match event {
            RuntimeEvent::LatestBlockNumber { id, result } => {
                self.explorer.apply_latest_block(id, result)
            }
            RuntimeEvent::BlockTransactions { id, number, result } => {
                self.explorer.apply_transactions(id, number, result)
            }
            RuntimeEvent::BlockNumber { id, result } => self.latest_block.apply(id, result),
            RuntimeEvent::Balance { id, result, .. } => self.accounts.apply_balance(id, result),
            RuntimeEvent::Transfers { id, result, .. } => {
                self.accounts.apply_transfers(id, result)
            }
            RuntimeEvent::NftMetadata { id, result } => self.nft.apply_metadata(id, result),
        };
        self.apply_action(action);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.help_open {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
                self.help_open = false;
            }
            return;
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode(key),
            InputMode::Editing => self.handle_editing_mode(key),
        }
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.help_open = true,
            KeyCode::Tab => self.navigate(self.route.next()),
            KeyCode::BackTab => self.navigate(self.route.previous()),
            KeyCode::Char(c) if Route::from_shortcut(c).is_some() => {
                if let Some(route) = Route::from_shortcut(c) {
                    self.navigate(route);
                }
            }
            KeyCode::Char('i') | KeyCode::Char('/') if self.active_has_input() => {
                self.input_mode = InputMode::Editing;
            }
            _ => {
                let action = self.active_module().handle_key(key);
                self.apply_action(action);
            }
        }
    }

    fn handle_editing_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                let action = self.active_module().handle_input(key);
                self.apply_action(action);
            }
            _ => {
                let action = self.active_module().handle_input(key);
                self.apply_action(action);
            }
        }
    }
}
