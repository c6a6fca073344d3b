//! Internal modules for the memory game client.
//!
//! This library provides configuration, logging, the HTTP roster source,
//! command parsing and both frontends used by the mg_client binary.

pub mod api_client;
pub mod commands;
pub mod config;
pub mod logging;
pub mod plain;
pub mod tui_app;
