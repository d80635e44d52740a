//! CLI commands and argument parsing

use crate::error::{Error, Result};
use crate::types::{FilterValue, Filters, SortDirection, SortSpec};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Token-validated REST collection fetcher
#[derive(Parser, Debug)]
#[command(name = "tokenfetch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Engine configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API host, e.g. https://lms.example.com (overrides the config file)
    #[arg(long, global = true)]
    pub hostname: Option<String>,

    /// Access token
    #[arg(short, long, global = true, env = "TOKENFETCH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every record of a collection
    Collection {
        /// Object type, e.g. courses
        object_type: String,

        /// Filter as key=value; repeat a key to filter on a list of values
        #[arg(long = "filter", value_name = "KEY=VALUE")]
        filters: Vec<String>,

        /// Sort as key=ASC|DESC
        #[arg(long = "sort", value_name = "KEY=DIR")]
        sort: Vec<String>,

        /// Records per page
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Fetch one record by id
    ById {
        /// Object type, e.g. users
        object_type: String,

        /// Record id
        id: String,
    },

    /// Fetch records for a list of ids
    ByIds {
        /// Object type, e.g. users
        object_type: String,

        /// Record ids
        #[arg(required = true)]
        ids: Vec<String>,

        /// Ids per request
        #[arg(long)]
        batch_size: Option<usize>,
    },

    /// Validate the access token and print its claims
    InspectToken,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON
    Json,
    /// Indented JSON
    Pretty,
}

/// Parse `key=value` filters, grouping repeated keys into lists
pub fn parse_filters(raw: &[String]) -> Result<Filters> {
    let mut filters: Filters = Vec::new();

    for entry in raw {
        let (key, value) = split_pair("filter", entry)?;
        match filters.iter_mut().find(|(k, _)| k.as_str() == key) {
            Some((_, existing)) => {
                let mut values = match existing {
                    FilterValue::Scalar(v) => vec![std::mem::take(v)],
                    FilterValue::List(vs) => std::mem::take(vs),
                };
                values.push(value.to_string());
                *existing = FilterValue::List(values);
            }
            None => filters.push((key.to_string(), FilterValue::from(value))),
        }
    }

    Ok(filters)
}

/// Parse `key=ASC|DESC` sort entries
pub fn parse_sort(raw: &[String]) -> Result<SortSpec> {
    raw.iter()
        .map(|entry| {
            let (key, dir) = split_pair("sort", entry)?;
            let direction: SortDirection = dir
                .parse()
                .map_err(|e: String| Error::invalid_value("sort", e))?;
            Ok((key.to_string(), direction))
        })
        .collect()
}

fn split_pair<'a>(field: &str, entry: &'a str) -> Result<(&'a str, &'a str)> {
    match entry.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => Err(Error::invalid_value(
            field,
            format!("expected KEY=VALUE, got '{entry}'"),
        )),
    }
}
