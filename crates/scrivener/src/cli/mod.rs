//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the scrivener binary.

mod commands;
mod generate;
mod history;
mod serve;

pub use commands::{Cli, Commands, GenerateArgs, ServeArgs};
pub use generate::handle_generate_command;
pub use history::{
    handle_bookmark_command, handle_delete_command, handle_history_command, handle_show_command,
};
pub use serve::handle_serve_command;

use scrivener_client::ClientConfig;
use scrivener_error::ScrivenerResult;

/// Resolve the server URL: `--server` flag first, then config files and env.
fn server_url(flag: Option<String>) -> ScrivenerResult<String> {
    match flag {
        Some(url) => Ok(url),
        None => Ok(ClientConfig::load()?.server_url().clone()),
    }
}
