//! ethscope: a terminal dashboard for Ethereum data served by Alchemy

pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod modules;
pub mod ui;
