//! CLI runner - executes commands

use crate::auth::TokenValidator;
use crate::cli::commands::{parse_filters, parse_sort, Cli, Commands, OutputFormat};
use crate::config::EngineConfig;
use crate::engine::FetchEngine;
use crate::error::{Error, Result};
use crate::http::ReqwestTransport;
use crate::types::{IdSelector, JsonValue};
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command and print its output
    pub async fn run(&self) -> Result<()> {
        let output = self.execute().await?;
        println!("{}", self.render(&output)?);
        Ok(())
    }

    /// Run the CLI command and return its output
    pub async fn execute(&self) -> Result<JsonValue> {
        let token = self.cli.token.clone().unwrap_or_default();

        match &self.cli.command {
            Commands::Collection {
                object_type,
                filters,
                sort,
                page_size,
            } => {
                let filters = parse_filters(filters)?;
                let sort = parse_sort(sort)?;
                let mut engine = self.engine()?;
                let records = engine
                    .fetch_collection(token.as_str(), object_type, &filters, &sort, *page_size)
                    .await?;
                Ok(JsonValue::Array(records))
            }
            Commands::ById { object_type, id } => {
                let mut engine = self.engine()?;
                let record = engine.fetch_by_id(token.as_str(), object_type, id).await?;
                Ok(record.unwrap_or(JsonValue::Null))
            }
            Commands::ByIds {
                object_type,
                ids,
                batch_size,
            } => {
                let mut engine = self.engine()?;
                let records = engine
                    .fetch_by_ids(token.as_str(), object_type, &IdSelector::List(ids.clone()), *batch_size)
                    .await?;
                Ok(JsonValue::Array(records))
            }
            Commands::InspectToken => {
                let claims = TokenValidator::new().validate(&token)?;
                Ok(JsonValue::Object(claims.into_map()))
            }
        }
    }

    /// Format output according to `--format`
    pub fn render(&self, output: &JsonValue) -> Result<String> {
        let rendered = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(output)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(output)?,
        };
        Ok(rendered)
    }

    /// Resolve the engine config from the config file and flags
    fn load_config(&self) -> Result<EngineConfig> {
        let config = match (&self.cli.config, &self.cli.hostname) {
            (Some(path), hostname) => {
                let mut config = EngineConfig::from_file(path)?;
                if let Some(hostname) = hostname {
                    config.hostname.clone_from(hostname);
                }
                config
            }
            (None, Some(hostname)) => EngineConfig::new(hostname),
            (None, None) => {
                return Err(Error::config(
                    "No API host configured (use --hostname or --config)",
                ))
            }
        };

        config.validate()?;
        debug!(api = %config.api_base_url(), "loaded engine config");
        Ok(config)
    }

    fn engine(&self) -> Result<FetchEngine<ReqwestTransport>> {
        FetchEngine::connect(&self.load_config()?)
    }
}
