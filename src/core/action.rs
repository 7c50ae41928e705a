//! Actions that screens return to communicate with the app

use crate::core::Route;
use crate::infrastructure::runtime::RuntimeCommand;

/// Actions returned by screens to request side effects from the app
#[derive(Debug, Clone)]
pub enum Action {
    /// No action needed
    None,

    /// Switch to another route
    Navigate(Route),

    /// Send a request to the runtime worker
    Dispatch(RuntimeCommand),

    /// Copy text to the system clipboard
    Copy(String),

    /// Show notification in status bar
    Notify(String, NotifyLevel),

    /// Request quit
    Quit,
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warn,
    Error,
}
