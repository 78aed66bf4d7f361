//! Bitcoin price quotes for coinwatch.
//!
//! This crate owns the whole price pipeline below the tool layer:
//!
//! - **currency**: the closed set of supported vs-currencies
//! - **quote**: decoding the CoinGecko simple-price payload
//! - **source**: the outbound HTTP fetch (`PriceSource` + `CoinGeckoClient`)
//! - **error**: `FetchError` / `DecodeError` and the `QuoteError` umbrella
//!
//! Nothing here knows about MCP; the tool layer turns these results into
//! text payloads.

pub mod currency;
pub mod error;
pub mod quote;
pub mod source;

pub use currency::CurrencyCode;
pub use error::{DecodeError, FetchError, QuoteError};
pub use quote::{decode, PriceQuote};
pub use source::{CoinGeckoClient, PriceSource};
