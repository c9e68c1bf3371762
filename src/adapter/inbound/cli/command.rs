//! Command-line interface definitions.
//!
//! `ubci` takes a single subject: a ticker, an index code, a category
//! keyword (optionally followed by a code) or `status`.

use std::path::PathBuf;

use clap::Parser;

const EXAMPLES: &str = "\
Examples:
  ubci KRW-BTC            Show every index containing KRW-BTC
  ubci UBMI               List the constituents of market index UBMI
  ubci SCTIDXA            List the constituents of sector SCTIDXA
  ubci market             List all market indices
  ubci market UBMI        List the constituents of market UBMI
  ubci strategy UBSI001   List the constituents of strategy UBSI001
  ubci theme THMIDX17     List the constituents of theme THMIDX17
  ubci sector             List all sector indices
  ubci status             Show cache date and freshness
  ubci --refresh          Re-fetch the catalog now";

/// Query the Upbit cryptocurrency index (UBCI) catalog.
#[derive(Parser, Debug)]
#[command(name = "ubci")]
#[command(version)]
#[command(after_help = EXAMPLES)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Ticker (KRW-BTC), index code (UBMI), category keyword
    /// (market, strategy, theme, sector) or `status`
    pub subject: Option<String>,

    /// Index code, when SUBJECT is a category keyword
    pub code: Option<String>,

    /// Configuration file [default: ~/.ubci/config.toml]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Cache file [default: ~/.ubci/ubci_index_cache.json]
    #[arg(long, value_name = "PATH")]
    pub cache_path: Option<PathBuf>,

    /// Days of cached snapshots to keep
    #[arg(long, value_name = "DAYS")]
    pub retention_days: Option<u32>,

    /// Fetch the catalog even if today's cache exists
    #[arg(long)]
    pub refresh: bool,

    /// JSON output for scripting
    #[arg(long)]
    pub json: bool,

    /// Log filter, e.g. debug or ubci=trace
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Color output mode
    #[arg(long, default_value = "auto", hide_possible_values = true)]
    pub color: ColorChoice,

    /// Decrease output verbosity
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl Cli {
    /// Whether the subject is the `status` keyword.
    #[must_use]
    pub fn is_status(&self) -> bool {
        self.subject
            .as_deref()
            .is_some_and(|subject| subject.trim().eq_ignore_ascii_case("status"))
    }

    /// Log level implied by `-v` flags, if any.
    #[must_use]
    pub const fn verbosity_level(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            1 => Some("info"),
            2 => Some("debug"),
            _ => Some("trace"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_category_and_code() {
        let cli = Cli::try_parse_from(["ubci", "market", "UBMI", "--json"]).unwrap();
        assert_eq!(cli.subject.as_deref(), Some("market"));
        assert_eq!(cli.code.as_deref(), Some("UBMI"));
        assert!(cli.json);
    }

    #[test]
    fn status_keyword_is_case_insensitive() {
        let cli = Cli::try_parse_from(["ubci", "Status"]).unwrap();
        assert!(cli.is_status());
    }

    #[test]
    fn verbosity_maps_to_levels() {
        let cli = Cli::try_parse_from(["ubci", "-vv", "UBMI"]).unwrap();
        assert_eq!(cli.verbosity_level(), Some("debug"));
    }
}
