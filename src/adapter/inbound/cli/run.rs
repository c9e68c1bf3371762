//! Entry point for a `ubci` invocation.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use super::command::Cli;
use super::diagnostic::CliError;
use super::output::{OutputConfig, Printer};
use super::paths;
use crate::application::{IndexCatalog, Query, QueryError, QueryFacade};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Resolve configuration, wire the catalog and answer the command line.
pub async fn execute(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli)?;
    config.logging.init()?;

    let cache_path = config.cache.path.clone().unwrap_or_else(paths::default_cache);
    debug!(path = %cache_path.display(), retention_days = config.cache.retention_days, "Configuration resolved");

    let printer = Printer::new(OutputConfig::new(cli.json, cli.quiet, cli.color));

    // Validate the query before any network or disk work.
    let query = match cli.subject.as_deref() {
        Some(_) if cli.is_status() => {
            if let Some(code) = &cli.code {
                return Err(QueryError::UnexpectedCode {
                    subject: "status".into(),
                    code: code.clone(),
                }
                .into());
            }
            None
        }
        Some(subject) => Some(Query::parse(subject, cli.code.as_deref())?),
        None => None,
    };

    let catalog = Arc::new(bootstrap::build_catalog(&config, cache_path.clone())?);
    if cli.refresh {
        catalog.refresh().await?;
    }

    match query {
        Some(query) => {
            let outcome = QueryFacade::new(catalog).run(&query).await?;
            printer.outcome(&outcome)
        }
        None => show_status(&catalog, &printer, cache_path).await,
    }
}

async fn show_status(
    catalog: &IndexCatalog,
    printer: &Printer,
    cache_path: PathBuf,
) -> Result<(), CliError> {
    let status = catalog.status().await;
    printer.status(&status, &cache_path)
}

/// Config file, then environment, then flags.
fn load_config(cli: &Cli) -> Result<Config, CliError> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(paths::default_config())?,
    };
    config.apply_env()?;

    if let Some(path) = &cli.cache_path {
        config.cache.path = Some(path.clone());
    }
    if let Some(days) = cli.retention_days {
        config.cache.retention_days = days;
    }
    if let Some(level) = cli.log_level.as_deref().or(cli.verbosity_level()) {
        config.logging.level = level.to_string();
    }
    if let Some(file) = &cli.log_file {
        config.logging.file = Some(file.clone());
    }

    config.validate()?;
    Ok(config)
}
