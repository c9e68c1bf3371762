//! UBCI REST client.
//!
//! Fetches every known index basket and assembles them into one catalog.
//! Requests run concurrently but results keep registry order.
//!
//! A basket the API rejects (4xx) or answers with an unreadable payload is
//! kept as an empty basket. Transport failures, exhausted 5xx retries, or
//! every basket failing fail the whole fetch.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::{stream, StreamExt};
use reqwest::Client as HttpClient;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

use super::dto::BasketResponse;
use super::registry;
use super::settings::ApiConfig;
use crate::domain::{Catalog, Category, IndexBasket, IndexRecord};
use crate::error::{ConfigError, FetchError};
use crate::port::CatalogFetcher;

/// HTTP client for the UBCI basket API.
pub struct UbciClient {
    http: HttpClient,
    base_url: Url,
    retry_max_attempts: u32,
    retry_backoff_ms: u64,
    concurrency: usize,
}

impl UbciClient {
    /// Build a client from configuration.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ConfigError> {
        let base_url = Url::parse(&config.base_url).map_err(|err| ConfigError::InvalidValue {
            field: "api.base_url",
            reason: err.to_string(),
        })?;

        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Ok(Self {
            http,
            base_url,
            retry_max_attempts: config.retry_max_attempts,
            retry_backoff_ms: config.retry_backoff_ms,
            concurrency: config.concurrency.max(1),
        })
    }

    /// Request URL for one index code.
    fn basket_url(&self, code: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("code", &registry::api_code(code));
        url
    }

    async fn get_with_retry<T>(&self, url: &Url) -> Result<T, FetchError>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut attempt = 0;
        let max_attempts = self.retry_max_attempts.max(1);

        loop {
            attempt += 1;
            let response = match self.http.get(url.clone()).send().await {
                Ok(response) => response,
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(err.into());
                    }
                    self.backoff(attempt, max_attempts, err.to_string()).await;
                    continue;
                }
            };

            let status = response.status();
            if !status.is_success() {
                let err = FetchError::Status {
                    status: status.as_u16(),
                    url: url.to_string(),
                };
                if attempt >= max_attempts || !status.is_server_error() {
                    return Err(err);
                }
                self.backoff(attempt, max_attempts, err.to_string()).await;
                continue;
            }

            match response.json::<T>().await {
                Ok(parsed) => return Ok(parsed),
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(if err.is_decode() {
                            FetchError::Payload(err.to_string())
                        } else {
                            err.into()
                        });
                    }
                    self.backoff(attempt, max_attempts, err.to_string()).await;
                }
            }
        }
    }

    fn should_retry(err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect()
    }

    async fn backoff(&self, attempt: u32, max_attempts: u32, error: String) {
        warn!(
            attempt,
            max_attempts,
            error = %error,
            "HTTP request failed, retrying"
        );
        if self.retry_backoff_ms > 0 {
            sleep(Duration::from_millis(self.retry_backoff_ms)).await;
        }
    }

    /// Fetch one index basket.
    pub async fn get_basket(
        &self,
        category: Category,
        code: &str,
        name: &str,
    ) -> Result<IndexBasket, FetchError> {
        let url = self.basket_url(code);
        debug!(url = %url, %category, "Fetching index basket");

        let response: BasketResponse = self.get_with_retry(&url).await?;
        let basket = response.into_basket(IndexRecord::new(category, code, name));
        debug!(code, members = basket.constituents().len(), "Fetched index basket");
        Ok(basket)
    }
}

#[async_trait]
impl CatalogFetcher for UbciClient {
    async fn fetch_all(&self) -> Result<Catalog, FetchError> {
        info!(
            url = %self.base_url,
            indices = registry::all_known().count(),
            "Fetching index catalog"
        );

        let requests: Vec<_> = registry::all_known()
            .map(move |(category, code, name)| async move {
                let result = self.get_basket(category, code, name).await;
                (IndexRecord::new(category, code, name), result)
            })
            .collect();

        let results: Vec<BasketResult> = stream::iter(requests)
            .buffered(self.concurrency)
            .collect()
            .await;

        assemble(results)
    }

    fn source_name(&self) -> &'static str {
        "UBCI"
    }
}

type BasketResult = (IndexRecord, Result<IndexBasket, FetchError>);

/// Whether a failure concerns one basket only rather than the source.
fn is_basket_level(err: &FetchError) -> bool {
    match err {
        FetchError::Status { status, .. } => (400..500).contains(status),
        FetchError::Payload(_) => true,
        FetchError::Http(_) | FetchError::Timeout(_) => false,
    }
}

/// Build the catalog from per-basket results in registry order.
fn assemble(results: Vec<BasketResult>) -> Result<Catalog, FetchError> {
    let total = results.len();
    let mut baskets = Vec::with_capacity(total);
    let mut last_failure = None;
    let mut failed = 0;

    for (index, result) in results {
        match result {
            Ok(basket) => baskets.push(basket),
            Err(err) if is_basket_level(&err) => {
                warn!(
                    code = %index.code(),
                    category = %index.category(),
                    error = %err,
                    "Index basket unavailable, keeping it empty"
                );
                failed += 1;
                last_failure = Some(err);
                baskets.push(IndexBasket::new(index, Vec::new()));
            }
            Err(err) => return Err(err),
        }
    }

    if total > 0 && failed == total {
        if let Some(err) = last_failure {
            return Err(err);
        }
    }

    Ok(Catalog::new(baskets)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const BASKET_BODY: &str = r#"{"markets":[{"code":"CRIX.UPBIT.KRW-BTC","weight":0.5}]}"#;

    /// Serve one canned response per connection. Requests whose line
    /// contains `missing` get a 404.
    async fn serve(missing: Option<&'static str>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 4096];
                    let mut read = 0;
                    while !buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut buf[read..]).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => read += n,
                        }
                    }
                    let request = String::from_utf8_lossy(&buf[..read]);
                    let line = request.lines().next().unwrap_or_default();
                    let (status, body) = match missing {
                        Some(code) if line.contains(code) => ("404 Not Found", ""),
                        _ => ("200 OK", BASKET_BODY),
                    };
                    let response = format!(
                        "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });
        format!("http://{addr}/baskets")
    }

    fn client(base_url: String) -> UbciClient {
        UbciClient::from_config(&ApiConfig {
            base_url,
            retry_max_attempts: 1,
            retry_backoff_ms: 0,
            ..ApiConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn basket_url_carries_qualified_code() {
        let client = UbciClient::from_config(&ApiConfig::default()).unwrap();
        let url = client.basket_url("SCTIDXA02-01");
        assert_eq!(
            url.as_str(),
            "https://ubci-api.ubcindex.com/v1/crix/index/baskets?code=IDX.UPBIT.SCTIDXA02-01"
        );
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        let config = ApiConfig {
            base_url: "not a url".into(),
            ..ApiConfig::default()
        };
        assert!(matches!(
            UbciClient::from_config(&config),
            Err(ConfigError::InvalidValue { field: "api.base_url", .. })
        ));
    }

    #[tokio::test]
    async fn fetch_all_collects_every_known_basket() {
        let client = client(serve(None).await);

        let catalog = client.fetch_all().await.unwrap();

        assert_eq!(catalog.len(), registry::all_known().count());
        let members = catalog.constituents(Category::Market, &"UBMI".into());
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].ticker().as_str(), "KRW-BTC");
        assert_eq!(members[0].weight(), dec!(0.5));
    }

    #[tokio::test]
    async fn rejected_basket_is_kept_empty() {
        let client = client(serve(Some("SCTIDXB01")).await);

        let catalog = client.fetch_all().await.unwrap();

        assert_eq!(catalog.len(), registry::all_known().count());
        assert!(catalog
            .constituents(Category::Sector, &"SCTIDXB01".into())
            .is_empty());
        assert_eq!(catalog.constituents(Category::Market, &"UBMI".into()).len(), 1);
    }

    #[tokio::test]
    async fn every_basket_rejected_fails_the_fetch() {
        let client = client(serve(Some("IDX.UPBIT.")).await);

        let err = client.fetch_all().await.unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn refused_connection_is_http_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = client(format!("http://{addr}/baskets"));

        let err = client.fetch_all().await.unwrap_err();

        assert!(matches!(err, FetchError::Http(_)));
    }

    #[test]
    fn basket_level_failures_are_isolated() {
        let record = |code: &str| IndexRecord::new(Category::Sector, code, code);
        let results = vec![
            (
                record("SCTIDXA01"),
                Ok(IndexBasket::new(record("SCTIDXA01"), Vec::new())),
            ),
            (
                record("SCTIDXA02"),
                Err(FetchError::Payload("expected value".into())),
            ),
        ];
        assert_eq!(assemble(results).unwrap().len(), 2);

        let results = vec![
            (
                record("SCTIDXA01"),
                Ok(IndexBasket::new(record("SCTIDXA01"), Vec::new())),
            ),
            (
                record("SCTIDXA02"),
                Err(FetchError::Timeout(Duration::from_secs(1))),
            ),
        ];
        assert!(matches!(assemble(results), Err(FetchError::Timeout(_))));
    }
}
