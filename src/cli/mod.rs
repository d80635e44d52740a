//! CLI module
//!
//! Command-line interface for fetching resources.
//!
//! # Commands
//!
//! - `collection` - Fetch every record of a collection
//! - `by-id` - Fetch one record by id
//! - `by-ids` - Fetch records for a list of ids
//! - `inspect-token` - Validate the access token and print its claims

mod commands;
mod runner;

pub use commands::{parse_filters, parse_sort, Cli, Commands, OutputFormat};
pub use runner::Runner;
