//! Builders for catalog snapshots.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{Catalog, Category, ConstituentRecord, IndexBasket, IndexRecord};

/// Name given to the `UBMI` market index in fixtures.
pub const UBMI_NAME: &str = "UBMI";

/// Build a basket from `(ticker, weight)` pairs.
pub fn basket(category: Category, code: &str, name: &str, members: &[(&str, Decimal)]) -> IndexBasket {
    IndexBasket::new(
        IndexRecord::new(category, code, name),
        members
            .iter()
            .map(|&(ticker, weight)| ConstituentRecord::new(ticker, weight))
            .collect(),
    )
}

/// Build a catalog, panicking on integrity errors.
pub fn catalog(baskets: Vec<IndexBasket>) -> Catalog {
    Catalog::new(baskets).expect("fixture catalog is valid")
}

/// One market index `UBMI` holding `KRW-BTC` at weight `0.42`.
pub fn single_market() -> Catalog {
    catalog(vec![basket(
        Category::Market,
        "UBMI",
        UBMI_NAME,
        &[("KRW-BTC", dec!(0.42))],
    )])
}

/// A small catalog spanning all four categories.
pub fn sample() -> Catalog {
    catalog(vec![
        basket(
            Category::Market,
            "UBMI",
            UBMI_NAME,
            &[
                ("KRW-BTC", dec!(0.42)),
                ("KRW-ETH", dec!(0.18)),
                ("KRW-XRP", dec!(0.07)),
            ],
        ),
        basket(
            Category::Market,
            "UTTI",
            "UBMI 10",
            &[("KRW-ETH", dec!(0.31)), ("KRW-BTC", dec!(0.55))],
        ),
        basket(
            Category::Strategy,
            "UBSI004",
            "BTC-ETH Duo",
            &[("KRW-BTC", dec!(0.5)), ("KRW-ETH", dec!(0.5))],
        ),
        basket(
            Category::Theme,
            "THMIDX17",
            "BTC Group",
            &[("KRW-BTC", dec!(0.9)), ("KRW-BCH", dec!(0.1))],
        ),
        basket(
            Category::Sector,
            "SCTIDXB01",
            "Monolithic Blockchain",
            &[("KRW-ETH", dec!(0.6)), ("KRW-SOL", dec!(0.4))],
        ),
    ])
}
