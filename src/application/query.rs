//! Query facade: resolves a user subject into catalog lookups.
//!
//! A subject is a ticker (`KRW-BTC`), a bare index code (`UBMI`), or a
//! category keyword optionally followed by a code (`market UBMI`).

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use super::catalog::{IndexCatalog, IndexSummary};
use crate::domain::{Catalog, Category, IndexCode, Ticker};
use crate::error::CatalogError;

/// A parsed user query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// All memberships of one ticker.
    Ticker(Ticker),
    /// Constituents of one index. Without a category, every category is searched.
    Index {
        category: Option<Category>,
        code: IndexCode,
    },
    /// Every index of one category.
    List(Category),
}

impl Query {
    /// Interpret a subject and an optional index code.
    pub fn parse(subject: &str, code: Option<&str>) -> Result<Self, QueryError> {
        let subject = subject.trim();
        if subject.is_empty() {
            return Err(QueryError::Unrecognized(subject.to_string()));
        }

        if let Ok(category) = subject.parse::<Category>() {
            return Ok(match code {
                Some(code) => Self::Index {
                    category: Some(category),
                    code: IndexCode::new(code),
                },
                None => Self::List(category),
            });
        }

        if let Some(code) = code {
            return Err(QueryError::UnexpectedCode {
                subject: subject.to_string(),
                code: code.to_string(),
            });
        }

        let ticker = Ticker::new(subject);
        if ticker.has_known_quote() {
            return Ok(Self::Ticker(ticker));
        }

        Ok(Self::Index {
            category: None,
            code: IndexCode::new(subject),
        })
    }
}

/// Errors from resolving a query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("'{0}' is not a ticker, index code or category")]
    Unrecognized(String),

    #[error("'{subject}' is not a category, so index code '{code}' cannot follow it")]
    UnexpectedCode { subject: String, code: String },

    #[error("unknown {category} index: {code}")]
    UnknownIndex { category: Category, code: IndexCode },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// One constituent in query output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstituentRow {
    pub ticker: Ticker,
    pub weight: Decimal,
}

/// One index in query output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexRow {
    pub code: IndexCode,
    pub name: String,
}

impl From<IndexSummary> for IndexRow {
    fn from((code, name): IndexSummary) -> Self {
        Self { code, name }
    }
}

/// Memberships within one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MembershipGroup {
    pub category: Category,
    pub indices: Vec<IndexRow>,
}

/// Result of a resolved query, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryOutcome {
    Memberships {
        ticker: Ticker,
        groups: Vec<MembershipGroup>,
    },
    Constituents {
        category: Category,
        code: IndexCode,
        name: String,
        constituents: Vec<ConstituentRow>,
    },
    Listing {
        category: Category,
        indices: Vec<IndexRow>,
    },
}

/// Thin front over [`IndexCatalog`] used by the CLI.
#[derive(Clone)]
pub struct QueryFacade {
    catalog: Arc<IndexCatalog>,
}

impl QueryFacade {
    pub fn new(catalog: Arc<IndexCatalog>) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<IndexCatalog> {
        &self.catalog
    }

    /// Resolve and answer a query.
    pub async fn run(&self, query: &Query) -> Result<QueryOutcome, QueryError> {
        match query {
            Query::Ticker(ticker) => {
                let groups = self
                    .catalog
                    .memberships(ticker.as_str())
                    .await?
                    .into_iter()
                    .map(|(category, indices)| MembershipGroup {
                        category,
                        indices: indices.into_iter().map(IndexRow::from).collect(),
                    })
                    .collect();
                Ok(QueryOutcome::Memberships {
                    ticker: ticker.clone(),
                    groups,
                })
            }
            Query::Index { category, code } => {
                let entry = self.catalog.read().await?;
                let category = match category {
                    Some(category) => *category,
                    None => entry
                        .catalog
                        .categories_of(code)
                        .first()
                        .copied()
                        .ok_or_else(|| QueryError::Unrecognized(code.to_string()))?,
                };
                constituents(&entry.catalog, category, code)
            }
            Query::List(category) => {
                let indices = self
                    .catalog
                    .all_indices(*category)
                    .await?
                    .into_iter()
                    .map(IndexRow::from)
                    .collect();
                Ok(QueryOutcome::Listing {
                    category: *category,
                    indices,
                })
            }
        }
    }
}

fn constituents(
    catalog: &Catalog,
    category: Category,
    code: &IndexCode,
) -> Result<QueryOutcome, QueryError> {
    let index = catalog
        .index(category, code)
        .ok_or_else(|| QueryError::UnknownIndex {
            category,
            code: code.clone(),
        })?;

    let constituents = catalog
        .constituents(category, code)
        .iter()
        .map(|member| ConstituentRow {
            ticker: member.ticker().clone(),
            weight: member.weight(),
        })
        .collect();

    Ok(QueryOutcome::Constituents {
        category,
        code: code.clone(),
        name: index.name().to_string(),
        constituents,
    })
}
