//! Index categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// The four families of indices published in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Market,
    Strategy,
    Theme,
    Sector,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 4] = [
        Category::Market,
        Category::Strategy,
        Category::Theme,
        Category::Sector,
    ];

    /// Lowercase keyword used on the command line and in the cache file.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Strategy => "strategy",
            Self::Theme => "theme",
            Self::Sector => "sector",
        }
    }

    /// Capitalized singular label for headings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Market => "Market",
            Self::Strategy => "Strategy",
            Self::Theme => "Theme",
            Self::Sector => "Sector",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "market" | "markets" => Ok(Self::Market),
            "strategy" | "strategies" => Ok(Self::Strategy),
            "theme" | "themes" => Ok(Self::Theme),
            "sector" | "sectors" => Ok(Self::Sector),
            _ => Err(DomainError::UnknownCategory(s.to_string())),
        }
    }
}
