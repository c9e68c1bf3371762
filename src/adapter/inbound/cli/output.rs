//! CLI output formatting.
//!
//! Human output goes to stdout as short sections and tables; with `--json`
//! each result is printed as one JSON document instead. Nothing here logs;
//! diagnostics travel through `tracing` on stderr.

use std::fmt::Display;
use std::io::IsTerminal;
use std::path::Path;

use owo_colors::OwoColorize;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::command::ColorChoice;
use super::diagnostic::CliError;
use crate::application::query::{ConstituentRow, IndexRow, MembershipGroup};
use crate::application::{CatalogStatus, Freshness, QueryOutcome};
use crate::domain::{Category, IndexCode, Ticker};

/// Output settings derived from command-line flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress headings and notes.
    pub quiet: bool,
    /// Use ANSI colors.
    pub color: bool,
}

impl OutputConfig {
    /// Create a new output configuration, resolving `auto` color against stdout.
    #[must_use]
    pub fn new(json: bool, quiet: bool, color: ColorChoice) -> Self {
        let color = match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::io::stdout().is_terminal(),
        };
        Self {
            json,
            quiet,
            color: color && !json,
        }
    }
}

#[derive(Tabled)]
struct ConstituentLine {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Weight")]
    weight: String,
}

#[derive(Tabled)]
struct IndexLine {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
}

/// Renders query results.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    config: OutputConfig,
}

impl Printer {
    #[must_use]
    pub const fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Print a query result.
    pub fn outcome(&self, outcome: &QueryOutcome) -> Result<(), CliError> {
        if self.config.json {
            return self.json(outcome);
        }

        match outcome {
            QueryOutcome::Memberships { ticker, groups } => self.memberships(ticker, groups),
            QueryOutcome::Constituents {
                category,
                code,
                name,
                constituents,
            } => self.constituents(*category, code, name, constituents),
            QueryOutcome::Listing { category, indices } => self.listing(*category, indices),
        }
        Ok(())
    }

    /// Print catalog status.
    pub fn status(&self, status: &CatalogStatus, cache_path: &Path) -> Result<(), CliError> {
        if self.config.json {
            return self.json(&json!({
                "cache_path": cache_path,
                "status": status,
            }));
        }

        self.heading("Catalog status");
        self.field("cache", cache_path.display());
        match status.fetched_at {
            Some(date) => self.field("fetched", date),
            None => self.field("fetched", self.muted("never")),
        }
        self.field("freshness", self.freshness(status.freshness));
        self.field("indices", status.index_count);
        self.field("tickers", status.ticker_count);
        Ok(())
    }

    fn memberships(&self, ticker: &Ticker, groups: &[MembershipGroup]) {
        self.heading(&format!("Information for {ticker}"));
        if groups.is_empty() {
            self.note("No index information found");
            return;
        }
        for group in groups {
            println!();
            println!("{}", self.bold(group.category.label()));
            for index in &group.indices {
                println!("  {}  {}", self.highlight(&index.code), index.name);
            }
        }
    }

    fn constituents(
        &self,
        category: Category,
        code: &IndexCode,
        name: &str,
        constituents: &[ConstituentRow],
    ) {
        self.heading(&format!("Tickers in {category} {code} ({name})"));
        if constituents.is_empty() {
            self.note(&format!("No tickers found in {category} {code}"));
            return;
        }
        let rows = constituents.iter().map(|row| ConstituentLine {
            ticker: row.ticker.to_string(),
            weight: format_weight(row.weight),
        });
        let mut table = Table::new(rows);
        table.with(Style::sharp());
        println!("{table}");
    }

    fn listing(&self, category: Category, indices: &[IndexRow]) {
        self.heading(&format!("Available {} indices", category.as_str()));
        if indices.is_empty() {
            self.note(&format!("No {category} indices in the catalog"));
            return;
        }
        let rows = indices.iter().map(|row| IndexLine {
            code: row.code.to_string(),
            name: row.name.clone(),
        });
        let mut table = Table::new(rows);
        table.with(Style::sharp());
        println!("{table}");
    }

    fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), CliError> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    fn heading(&self, title: &str) {
        if self.config.quiet {
            return;
        }
        println!("{}", self.bold(title));
    }

    fn field(&self, label: &str, value: impl Display) {
        let label = format!("{label:<10}");
        println!("  {} {}", self.muted(label), value);
    }

    fn note(&self, message: &str) {
        if self.config.quiet {
            return;
        }
        println!("  {}", self.muted(message));
    }

    fn freshness(&self, freshness: Freshness) -> String {
        match freshness {
            Freshness::Current => self.paint("current", |s| s.green().to_string()),
            Freshness::Missing => self.paint("missing", |s| s.red().to_string()),
            Freshness::Stale { age_days } => {
                self.paint(&format!("stale ({age_days}d old)"), |s| s.yellow().to_string())
            }
        }
    }

    fn bold(&self, value: impl Display) -> String {
        self.paint(&value.to_string(), |s| s.bold().to_string())
    }

    fn muted(&self, value: impl Display) -> String {
        self.paint(&value.to_string(), |s| s.dimmed().to_string())
    }

    fn highlight(&self, value: impl Display) -> String {
        self.paint(&value.to_string(), |s| s.cyan().to_string())
    }

    fn paint(&self, value: &str, style: impl Fn(&str) -> String) -> String {
        if self.config.color {
            style(value)
        } else {
            value.to_string()
        }
    }
}

/// Weight with trailing zeros removed.
fn format_weight(weight: Decimal) -> String {
    weight.normalize().to_string()
}
