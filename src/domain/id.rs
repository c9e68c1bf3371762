//! Identifier types for indices and tickers.
//!
//! Both identifiers are normalized on construction so lookups are
//! case-insensitive and tolerate exchange-qualified forms such as
//! `IDX.UPBIT.UBMI` or `CRIX.UPBIT.KRW-BTC`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Quote currencies accepted for ticker queries.
pub const KNOWN_QUOTES: [&str; 3] = ["KRW", "BTC", "USDT"];

/// Strip any dotted qualifier and uppercase the remainder.
fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let tail = trimmed.rsplit('.').next().unwrap_or(trimmed);
    tail.to_ascii_uppercase()
}

/// Index code identifier - newtype for type safety.
///
/// Stored without the `IDX.UPBIT.` qualifier, uppercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct IndexCode(String);

impl IndexCode {
    /// Create a new `IndexCode`, normalizing qualifier and case.
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(normalize(code.as_ref()))
    }

    /// Get the index code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the normalized code is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for IndexCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for IndexCode {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for IndexCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<IndexCode> for String {
    fn from(code: IndexCode) -> Self {
        code.0
    }
}

/// Ticker symbol in `QUOTE-BASE` form, e.g. `KRW-BTC`.
///
/// The inner String is private to ensure all construction goes through
/// normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Create a new `Ticker`, normalizing exchange qualifier and case.
    pub fn new(symbol: impl AsRef<str>) -> Self {
        Self(normalize(symbol.as_ref()))
    }

    /// Get the ticker as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Quote currency part (`KRW` in `KRW-BTC`), if the symbol has one.
    #[must_use]
    pub fn quote(&self) -> Option<&str> {
        self.0
            .split_once('-')
            .map(|(quote, _)| quote)
            .filter(|quote| !quote.is_empty())
    }

    /// Whether the ticker is quoted in one of the [`KNOWN_QUOTES`] and has a base asset.
    #[must_use]
    pub fn has_known_quote(&self) -> bool {
        match self.0.split_once('-') {
            Some((quote, base)) => !base.is_empty() && KNOWN_QUOTES.contains(&quote),
            None => false,
        }
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Ticker {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_code_strips_qualifier_and_uppercases() {
        assert_eq!(IndexCode::new("IDX.UPBIT.UBMI").as_str(), "UBMI");
        assert_eq!(IndexCode::new(" ubmi ").as_str(), "UBMI");
        assert_eq!(IndexCode::new("sctidxa02-01").as_str(), "SCTIDXA02-01");
    }

    #[test]
    fn ticker_normalizes_exchange_prefix() {
        assert_eq!(Ticker::new("CRIX.UPBIT.KRW-BTC").as_str(), "KRW-BTC");
        assert_eq!(Ticker::new("krw-btc").as_str(), "KRW-BTC");
        assert_eq!(Ticker::new("UPBIT.usdt-eth"), Ticker::new("USDT-ETH"));
    }

    #[test]
    fn ticker_quote_validation() {
        assert!(Ticker::new("KRW-BTC").has_known_quote());
        assert!(Ticker::new("btc-eth").has_known_quote());
        assert!(Ticker::new("USDT-XRP").has_known_quote());
        assert!(!Ticker::new("ETH-BTC").has_known_quote());
        assert!(!Ticker::new("KRW-").has_known_quote());
        assert!(!Ticker::new("UBMI").has_known_quote());
        assert_eq!(Ticker::new("KRW-BTC").quote(), Some("KRW"));
        assert_eq!(Ticker::new("UBMI").quote(), None);
    }

    #[test]
    fn identifiers_serialize_as_plain_strings() {
        let json = serde_json::to_string(&Ticker::new("KRW-BTC")).unwrap();
        assert_eq!(json, "\"KRW-BTC\"");

        let code: IndexCode = serde_json::from_str("\"IDX.UPBIT.UBMI\"").unwrap();
        assert_eq!(code.as_str(), "UBMI");
    }
}
