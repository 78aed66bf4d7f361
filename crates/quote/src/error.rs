//! Error types for the quote pipeline.

/// Errors from the outbound price fetch.
///
/// Variants carry the rendered cause rather than the underlying
/// `reqwest::Error` so callers (and test stubs) can construct them.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("error making request to CoinGecko API: {0}")]
    Request(String),

    /// The response arrived but the body could not be read in full.
    #[error("error reading response body: {0}")]
    Body(String),
}

/// Errors from decoding a price payload.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Malformed JSON or a body that does not match the expected shape.
    #[error("error parsing JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// A currency outside the supported set. Carries the offending input.
    #[error("unsupported currency: {0}")]
    UnsupportedCurrency(String),
}

/// Umbrella error for the fetch-then-decode path.
#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
