//! I/O helpers for wizard commands.

pub mod config;
pub mod init;
pub mod script_store;
