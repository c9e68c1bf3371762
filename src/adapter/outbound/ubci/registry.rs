//! Index codes requested from the API, with their display names.
//!
//! The basket endpoint has no listing call, so the catalog covers exactly
//! these codes. Order here is the order indices appear in listings.

use crate::domain::Category;

/// Qualifier the API expects in front of index codes.
pub const INDEX_CODE_PREFIX: &str = "IDX.UPBIT.";

pub const MARKETS: &[(&str, &str)] = &[
    ("UBMI", "UBMI"),
    ("UBAI", "UBAI"),
    ("UTTI", "UBMI 10"),
    ("UBAI_ST", "UBAI BTC quote"),
    ("UBMI_ST", "UBMI BTC quote"),
    ("UTHI", "UBMI 30"),
];

pub const STRATEGIES: &[(&str, &str)] = &[
    ("UBSI001", "Momentum Top 5"),
    ("UBSI002", "Low Volatility Top 5"),
    ("UBSI003", "Contrarian Top 5"),
    ("UBSI004", "BTC-ETH Duo"),
    ("UBSI005", "Global Price Gap Low 5"),
];

pub const THEMES: &[(&str, &str)] = &[
    ("THMIDX17", "BTC Group"),
    ("THMIDX18", "ETH Group"),
    ("THMIDX24", "Upbit Staking"),
];

pub const SECTORS: &[(&str, &str)] = &[
    ("SCTIDXA", "Infrastructure"),
    ("SCTIDXA01", "Payment Infrastructure"),
    ("SCTIDXA02", "Network Infrastructure"),
    ("SCTIDXA02-01", "Interoperability/Bridges"),
    ("SCTIDXA02-02", "Enterprise Blockchain"),
    ("SCTIDXA03", "DApp Infrastructure"),
    ("SCTIDXA03-01", "Oracle"),
    ("SCTIDXA04", "User Infrastructure"),
    ("SCTIDXA04-01", "DID"),
    ("SCTIDXA04-02", "Medical"),
    ("SCTIDXA04-03", "Wallet/Messaging"),
    ("SCTIDXA05", "DePIN"),
    ("SCTIDXA05-01", "AI"),
    ("SCTIDXA05-02", "Data Infrastructure"),
    ("SCTIDXA05-03", "Storage"),
    ("SCTIDXB", "Smart Contract Platforms"),
    ("SCTIDXB01", "Monolithic Blockchain"),
    ("SCTIDXB02", "Modular Blockchain"),
    ("SCTIDXC", "DeFi"),
    ("SCTIDXC01", "Stablecoin Group"),
    ("SCTIDXC01-01", "Stablecoins"),
    ("SCTIDXC02", "Exchange"),
    ("SCTIDXC02-01", "DEX/Aggregator"),
    ("SCTIDXC03", "Deposit"),
    ("SCTIDXC03-01", "Lending"),
    ("SCTIDXD", "Culture/Entertainment"),
    ("SCTIDXD01", "Virtual World"),
    ("SCTIDXD01-01", "Metaverse"),
    ("SCTIDXD01-02", "NFT/Gaming"),
    ("SCTIDXD02", "Content"),
    ("SCTIDXD02-02", "Advertising"),
    ("SCTIDXD02-03", "Education/Other Content"),
    ("SCTIDXD03", "Community"),
    ("SCTIDXD03-01", "Social/DAO"),
    ("SCTIDXD04", "Fan Tokens"),
    ("SCTIDXE", "Meme"),
];

/// Known `(code, name)` pairs of one category.
#[must_use]
pub const fn known_indices(category: Category) -> &'static [(&'static str, &'static str)] {
    match category {
        Category::Market => MARKETS,
        Category::Strategy => STRATEGIES,
        Category::Theme => THEMES,
        Category::Sector => SECTORS,
    }
}

/// Every known index as `(category, code, name)`, category by category.
pub fn all_known() -> impl Iterator<Item = (Category, &'static str, &'static str)> {
    Category::ALL.into_iter().flat_map(|category| {
        known_indices(category)
            .iter()
            .map(move |&(code, name)| (category, code, name))
    })
}

/// Code in the qualified form the API expects.
#[must_use]
pub fn api_code(code: &str) -> String {
    format!("{INDEX_CODE_PREFIX}{code}")
}
