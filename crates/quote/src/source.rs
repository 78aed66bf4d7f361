//! Outbound price fetch.
//!
//! `PriceSource` is the seam between the tool layer and the network: the
//! production implementation is `CoinGeckoClient`, tests substitute stubs.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::error::FetchError;

/// Default simple-price endpoint, querying all ten vs-currencies in one call.
pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin&vs_currencies=usd,eur,gbp,jpy,aud,cad,chf,cny,krw,rub";

/// Default client-side timeout for the whole request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Something that can produce a raw simple-price response body.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Perform one fetch and return the full response body.
    ///
    /// One attempt only; a failure is terminal for the invocation.
    async fn fetch(&self) -> Result<Bytes, FetchError>;
}

/// CoinGecko-backed price source.
///
/// Holds one immutable `reqwest::Client` built with the fixed timeout, so
/// concurrent invocations share the connection pool.
pub struct CoinGeckoClient {
    client: reqwest::Client,
    url: String,
}

impl CoinGeckoClient {
    /// Client against the default endpoint with the default timeout.
    pub fn new() -> reqwest::Result<Self> {
        Self::with_config(DEFAULT_API_URL, DEFAULT_TIMEOUT)
    }

    /// Client against a custom endpoint/timeout (tests, alternate mirrors).
    pub fn with_config(url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// The endpoint this client queries.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PriceSource for CoinGeckoClient {
    async fn fetch(&self) -> Result<Bytes, FetchError> {
        debug!(url = %self.url, "fetching bitcoin price");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        // The status code is deliberately not inspected: an error body is
        // left to fail JSON-shape decoding downstream.
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        debug!(bytes = body.len(), "price response received");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_url_queries_all_ten_currencies() {
        for code in crate::CurrencyCode::ALL {
            assert!(DEFAULT_API_URL.contains(code.as_str()));
        }
        assert!(DEFAULT_API_URL.contains("ids=bitcoin"));
    }

    #[test]
    fn client_builds_with_defaults() {
        let client = CoinGeckoClient::new().unwrap();
        assert_eq!(client.url(), DEFAULT_API_URL);
    }

    #[tokio::test]
    async fn connection_failure_is_a_request_error() {
        // Reserved TEST-NET-1 address, nothing listens there; the short
        // timeout keeps the test fast.
        let client =
            CoinGeckoClient::with_config("http://192.0.2.1/price", Duration::from_millis(200))
                .unwrap();
        let err = client.fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Request(_)));
    }
}
