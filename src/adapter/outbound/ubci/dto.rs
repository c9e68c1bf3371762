//! Basket endpoint payloads.

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{ConstituentRecord, IndexBasket, IndexRecord, Ticker};

/// Response of `GET <base_url>?code=IDX.UPBIT.<code>`.
#[derive(Debug, Clone, Deserialize)]
pub struct BasketResponse {
    /// Constituents in source order. Absent for empty baskets.
    #[serde(default)]
    pub markets: Vec<BasketMember>,
}

/// One constituent as delivered, e.g. `{"code": "CRIX.UPBIT.KRW-BTC", "weight": 0.42}`.
#[derive(Debug, Clone, Deserialize)]
pub struct BasketMember {
    pub code: String,
    #[serde(default)]
    pub weight: Option<Decimal>,
}

impl BasketResponse {
    /// Convert into a domain basket for the given index.
    #[must_use]
    pub fn into_basket(self, index: IndexRecord) -> IndexBasket {
        let constituents = self
            .markets
            .into_iter()
            .filter_map(|member| {
                let ticker = Ticker::new(&member.code);
                if ticker.as_str().is_empty() {
                    debug!(code = %member.code, index = %index.code(), "Skipping member without ticker");
                    return None;
                }
                Some(ConstituentRecord::new(ticker, member.weight.unwrap_or_default()))
            })
            .collect();
        IndexBasket::new(index, constituents)
    }
}
