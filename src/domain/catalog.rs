//! Catalog snapshot: indices, their constituents, and the reverse ticker map.
//!
//! - [`IndexRecord`] - A coded, named index within one category
//! - [`ConstituentRecord`] - A weighted ticker belonging to one index
//! - [`IndexBasket`] - An index together with its ordered constituents
//! - [`Catalog`] - An immutable snapshot with lookup maps built once
//!
//! A `Catalog` is only ever built whole. Its lookup maps are derived from
//! the basket list on construction and on deserialization, so every code
//! referenced by the ticker map exists in the index list.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::error::DomainError;
use super::id::{IndexCode, Ticker};

/// A single index in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRecord {
    code: IndexCode,
    name: String,
    category: Category,
}

impl IndexRecord {
    /// Create a new index record.
    pub fn new(category: Category, code: impl Into<IndexCode>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            category,
        }
    }

    #[must_use]
    pub const fn code(&self) -> &IndexCode {
        &self.code
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }
}

/// A weighted ticker within an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstituentRecord {
    ticker: Ticker,
    weight: Decimal,
}

impl ConstituentRecord {
    /// Create a new constituent.
    pub fn new(ticker: impl Into<Ticker>, weight: Decimal) -> Self {
        Self {
            ticker: ticker.into(),
            weight,
        }
    }

    #[must_use]
    pub const fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    #[must_use]
    pub const fn weight(&self) -> Decimal {
        self.weight
    }
}

/// An index with its constituents in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexBasket {
    #[serde(flatten)]
    index: IndexRecord,
    constituents: Vec<ConstituentRecord>,
}

impl IndexBasket {
    /// Create a basket from an index and its constituents.
    #[must_use]
    pub fn new(index: IndexRecord, constituents: Vec<ConstituentRecord>) -> Self {
        Self {
            index,
            constituents,
        }
    }

    #[must_use]
    pub const fn index(&self) -> &IndexRecord {
        &self.index
    }

    #[must_use]
    pub fn constituents(&self) -> &[ConstituentRecord] {
        &self.constituents
    }
}

/// An immutable catalog snapshot.
///
/// Baskets keep the order in which the source delivered them. Lookups by
/// `(category, code)` and by ticker go through maps built in [`Catalog::new`].
/// Only the basket list is serialized.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<IndexBasket>", into = "Vec<IndexBasket>")]
pub struct Catalog {
    baskets: Vec<IndexBasket>,
    positions: HashMap<(Category, IndexCode), usize>,
    memberships: HashMap<Ticker, Vec<usize>>,
}

impl Catalog {
    /// Build a catalog from baskets, rejecting duplicate or empty index codes.
    pub fn new(baskets: Vec<IndexBasket>) -> Result<Self, DomainError> {
        let mut positions = HashMap::with_capacity(baskets.len());
        let mut memberships: HashMap<Ticker, Vec<usize>> = HashMap::new();

        for (pos, basket) in baskets.iter().enumerate() {
            let index = basket.index();
            if index.code().is_empty() {
                return Err(DomainError::EmptyIndexCode(index.category()));
            }

            let key = (index.category(), index.code().clone());
            if positions.insert(key, pos).is_some() {
                return Err(DomainError::DuplicateIndex {
                    category: index.category(),
                    code: index.code().clone(),
                });
            }

            for constituent in basket.constituents() {
                let entry = memberships.entry(constituent.ticker().clone()).or_default();
                // A ticker listed twice in one basket is one membership.
                if entry.last() != Some(&pos) {
                    entry.push(pos);
                }
            }
        }

        Ok(Self {
            baskets,
            positions,
            memberships,
        })
    }

    /// All baskets in source order.
    #[must_use]
    pub fn baskets(&self) -> &[IndexBasket] {
        &self.baskets
    }

    /// Number of indices across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.baskets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.baskets.is_empty()
    }

    /// Number of distinct tickers referenced by any index.
    #[must_use]
    pub fn ticker_count(&self) -> usize {
        self.memberships.len()
    }

    /// Indices of one category in source order.
    pub fn indices(&self, category: Category) -> impl Iterator<Item = &IndexRecord> + '_ {
        self.baskets
            .iter()
            .map(IndexBasket::index)
            .filter(move |index| index.category() == category)
    }

    /// Look up one index.
    #[must_use]
    pub fn index(&self, category: Category, code: &IndexCode) -> Option<&IndexRecord> {
        self.basket(category, code).map(IndexBasket::index)
    }

    /// Constituents of one index; empty when the index is unknown.
    #[must_use]
    pub fn constituents(&self, category: Category, code: &IndexCode) -> &[ConstituentRecord] {
        self.basket(category, code)
            .map(IndexBasket::constituents)
            .unwrap_or_default()
    }

    /// Indices of one category that list `ticker`, in source order.
    pub fn memberships(
        &self,
        ticker: &Ticker,
        category: Category,
    ) -> impl Iterator<Item = &IndexRecord> + '_ {
        self.memberships
            .get(ticker)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(move |&pos| self.baskets[pos].index())
            .filter(move |index| index.category() == category)
    }

    /// Categories that contain an index with this code.
    #[must_use]
    pub fn categories_of(&self, code: &IndexCode) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|&category| self.positions.contains_key(&(category, code.clone())))
            .collect()
    }

    fn basket(&self, category: Category, code: &IndexCode) -> Option<&IndexBasket> {
        self.positions
            .get(&(category, code.clone()))
            .map(|&pos| &self.baskets[pos])
    }
}

impl PartialEq for Catalog {
    fn eq(&self, other: &Self) -> bool {
        // Lookup maps are derived from the baskets.
        self.baskets == other.baskets
    }
}

impl Eq for Catalog {}

impl TryFrom<Vec<IndexBasket>> for Catalog {
    type Error = DomainError;

    fn try_from(baskets: Vec<IndexBasket>) -> Result<Self, Self::Error> {
        Self::new(baskets)
    }
}

impl From<Catalog> for Vec<IndexBasket> {
    fn from(catalog: Catalog) -> Self {
        catalog.baskets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn basket(category: Category, code: &str, members: &[(&str, Decimal)]) -> IndexBasket {
        IndexBasket::new(
            IndexRecord::new(category, code, format!("{code} name")),
            members
                .iter()
                .map(|(ticker, weight)| ConstituentRecord::new(*ticker, *weight))
                .collect(),
        )
    }

    fn sample() -> Catalog {
        Catalog::new(vec![
            basket(
                Category::Market,
                "UBMI",
                &[("KRW-BTC", dec!(0.42)), ("KRW-ETH", dec!(0.21))],
            ),
            basket(Category::Market, "UTTI", &[("KRW-ETH", dec!(0.3))]),
            basket(Category::Theme, "THMIDX17", &[("KRW-BTC", dec!(1))]),
            basket(Category::Sector, "UBMI", &[("KRW-XRP", dec!(0.5))]),
        ])
        .unwrap()
    }

    #[test]
    fn constituents_keep_source_order() {
        let catalog = sample();
        let members: Vec<_> = catalog
            .constituents(Category::Market, &IndexCode::new("UBMI"))
            .iter()
            .map(|c| (c.ticker().as_str(), c.weight()))
            .collect();
        assert_eq!(members, vec![("KRW-BTC", dec!(0.42)), ("KRW-ETH", dec!(0.21))]);
    }

    #[test]
    fn unknown_index_has_no_constituents() {
        let catalog = sample();
        assert!(catalog
            .constituents(Category::Strategy, &IndexCode::new("UBMI"))
            .is_empty());
    }

    #[test]
    fn memberships_are_filtered_by_category() {
        let catalog = sample();
        let eth = Ticker::new("KRW-ETH");
        let markets: Vec<_> = catalog
            .memberships(&eth, Category::Market)
            .map(|i| i.code().as_str())
            .collect();
        assert_eq!(markets, vec!["UBMI", "UTTI"]);
        assert_eq!(catalog.memberships(&eth, Category::Theme).count(), 0);
    }

    #[test]
    fn same_code_in_two_categories_is_allowed() {
        let catalog = sample();
        assert_eq!(
            catalog.categories_of(&IndexCode::new("ubmi")),
            vec![Category::Market, Category::Sector]
        );
    }

    #[test]
    fn duplicate_code_within_category_is_rejected() {
        let result = Catalog::new(vec![
            basket(Category::Theme, "THMIDX17", &[]),
            basket(Category::Theme, "thmidx17", &[]),
        ]);
        assert!(matches!(
            result,
            Err(DomainError::DuplicateIndex {
                category: Category::Theme,
                ..
            })
        ));
    }

    #[test]
    fn repeated_ticker_in_one_basket_is_one_membership() {
        let catalog = Catalog::new(vec![basket(
            Category::Market,
            "UBMI",
            &[("KRW-BTC", dec!(0.4)), ("KRW-BTC", dec!(0.1))],
        )])
        .unwrap();
        let btc = Ticker::new("KRW-BTC");
        assert_eq!(catalog.memberships(&btc, Category::Market).count(), 1);
    }

    #[test]
    fn deserialization_rebuilds_lookup_maps() {
        let catalog = sample();
        let json = serde_json::to_string(&catalog).unwrap();
        let parsed: Catalog = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, catalog);
        assert_eq!(parsed.ticker_count(), 3);
        assert_eq!(
            parsed
                .memberships(&Ticker::new("krw-btc"), Category::Theme)
                .count(),
            1
        );
    }

    #[test]
    fn deserialization_rejects_duplicates() {
        let json = r#"[
            {"code":"UBMI","name":"a","category":"market","constituents":[]},
            {"code":"UBMI","name":"b","category":"market","constituents":[]}
        ]"#;
        assert!(serde_json::from_str::<Catalog>(json).is_err());
    }
}
