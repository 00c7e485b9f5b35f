//! CLI module
//!
//! Command-line interface of the console.
//!
//! # Commands
//!
//! - `login` / `logout` / `whoami` - Session identity
//! - `products`, `link-parts`, `responses`, `requests` - Paginated list views
//! - `parts-structure`, `request`, `response` - Supply-chain records
//! - `cfp` - Show, register and export CFP values
//! - `materials` - Cached material-name lookup

mod commands;
mod runner;

pub use commands::{
    CfpAction, Cli, Commands, ListArgs, OutputFormat, PartsStructureAction, RequestAction,
    ResponseAction,
};
pub use runner::Runner;
