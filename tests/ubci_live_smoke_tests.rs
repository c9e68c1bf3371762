use std::env;
use std::time::Duration;

use tokio::time::timeout;
use ubci::adapter::outbound::ubci::{ApiConfig, UbciClient};
use ubci::domain::Category;
use ubci::port::CatalogFetcher;

fn smoke_enabled() -> bool {
    matches!(env::var("UBCI_SMOKE").ok().as_deref(), Some("1"))
}

#[tokio::test]
#[ignore = "requires UBCI_SMOKE=1 and network access"]
async fn smoke_ubci_single_basket() {
    if !smoke_enabled() {
        eprintln!("Skipping smoke test (set UBCI_SMOKE=1 to enable)");
        return;
    }

    let client = UbciClient::from_config(&ApiConfig::default()).expect("client");
    let basket = timeout(
        Duration::from_secs(20),
        client.get_basket(Category::Market, "UBMI", "UBMI"),
    )
    .await
    .expect("Timed out querying UBMI basket")
    .expect("Failed to fetch UBMI basket");

    assert!(
        basket
            .constituents()
            .iter()
            .any(|member| member.ticker().as_str() == "KRW-BTC"),
        "Expected KRW-BTC in UBMI"
    );
}

#[tokio::test]
#[ignore = "requires UBCI_SMOKE=1 and network access"]
async fn smoke_ubci_full_catalog() {
    if !smoke_enabled() {
        eprintln!("Skipping smoke test (set UBCI_SMOKE=1 to enable)");
        return;
    }

    let client = UbciClient::from_config(&ApiConfig::default()).expect("client");
    let catalog = timeout(Duration::from_secs(120), client.fetch_all())
        .await
        .expect("Timed out fetching catalog")
        .expect("Failed to fetch catalog");

    assert_eq!(catalog.indices(Category::Market).count(), 6);
    assert!(catalog.ticker_count() > 0);
}
