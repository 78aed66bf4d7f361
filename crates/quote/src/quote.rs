//! Decoding of the CoinGecko simple-price payload.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::currency::CurrencyCode;
use crate::error::DecodeError;

/// Wire shape of `GET /api/v3/simple/price?ids=bitcoin&vs_currencies=...`.
#[derive(Debug, Clone, Deserialize)]
struct SimplePriceResponse {
    bitcoin: BitcoinPrices,
}

/// Per-currency prices for the `bitcoin` id. All ten fields are required;
/// a missing field is a shape mismatch and fails the decode.
#[derive(Debug, Clone, Deserialize)]
struct BitcoinPrices {
    usd: f64,
    eur: f64,
    gbp: f64,
    jpy: f64,
    aud: f64,
    cad: f64,
    chf: f64,
    cny: f64,
    krw: f64,
    rub: f64,
}

/// One Bitcoin quote: all ten per-currency prices plus the moment the
/// payload was decoded (the API body carries no timestamp of its own).
#[derive(Debug, Clone)]
pub struct PriceQuote {
    prices: BitcoinPrices,
    fetched_at: DateTime<Utc>,
}

impl PriceQuote {
    /// Decode a raw response body into a quote.
    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let response: SimplePriceResponse = serde_json::from_slice(body)?;
        Ok(Self {
            prices: response.bitcoin,
            fetched_at: Utc::now(),
        })
    }

    /// Raw price for the given currency, no rounding.
    pub fn price(&self, currency: CurrencyCode) -> f64 {
        match currency {
            CurrencyCode::Usd => self.prices.usd,
            CurrencyCode::Eur => self.prices.eur,
            CurrencyCode::Gbp => self.prices.gbp,
            CurrencyCode::Jpy => self.prices.jpy,
            CurrencyCode::Aud => self.prices.aud,
            CurrencyCode::Cad => self.prices.cad,
            CurrencyCode::Chf => self.prices.chf,
            CurrencyCode::Cny => self.prices.cny,
            CurrencyCode::Krw => self.prices.krw,
            CurrencyCode::Rub => self.prices.rub,
        }
    }

    /// When the payload was decoded.
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }
}

/// Decode a response body and select one currency, matched
/// case-insensitively against the supported set.
///
/// The body is parsed before the currency is resolved, so a malformed
/// payload is reported ahead of an unsupported currency.
pub fn decode(body: &[u8], currency: &str) -> Result<f64, DecodeError> {
    let quote = PriceQuote::decode(body)?;
    let code: CurrencyCode = currency.parse()?;
    Ok(quote.price(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{"bitcoin":{
        "usd":65000.5,"eur":60000.1,"gbp":51000.25,"jpy":10200000.0,
        "aud":98000.75,"cad":88000.0,"chf":57000.9,"cny":470000.0,
        "krw":89000000.0,"rub":6000000.5
    }}"#;

    #[test]
    fn decodes_exact_field_for_every_code_both_cases() {
        let expected = [
            ("usd", 65000.5),
            ("eur", 60000.1),
            ("gbp", 51000.25),
            ("jpy", 10200000.0),
            ("aud", 98000.75),
            ("cad", 88000.0),
            ("chf", 57000.9),
            ("cny", 470000.0),
            ("krw", 89000000.0),
            ("rub", 6000000.5),
        ];
        for (symbol, price) in expected {
            let lower = decode(SAMPLE.as_bytes(), symbol).unwrap();
            let upper = decode(SAMPLE.as_bytes(), &symbol.to_ascii_uppercase()).unwrap();
            assert_eq!(lower, price, "currency {symbol}");
            assert_eq!(upper, price, "currency {symbol} (upper)");
        }
    }

    #[test]
    fn unsupported_currency_error_names_the_input() {
        for input in ["XYZ", ""] {
            let err = decode(SAMPLE.as_bytes(), input).unwrap_err();
            assert!(
                err.to_string().contains(input),
                "message {:?} should contain {:?}",
                err.to_string(),
                input
            );
        }
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = decode(b"{not json", "usd").unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn shape_mismatch_is_a_decode_error() {
        // Valid JSON, wrong shape — e.g. a missing field
        let err = decode(br#"{"bitcoin":{"usd":65000.5}}"#, "usd").unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn api_error_body_fails_as_shape_mismatch() {
        // CoinGecko rate-limit style body; the status code is never checked,
        // so this surfaces as a decode failure.
        let body = br#"{"status":{"error_code":429,"error_message":"You've exceeded the Rate Limit."}}"#;
        let err = decode(body, "usd").unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn malformed_body_reported_before_unsupported_currency() {
        let err = decode(b"{not json", "XYZ").unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn quote_keeps_raw_precision() {
        let quote = PriceQuote::decode(SAMPLE.as_bytes()).unwrap();
        assert_eq!(quote.price(CurrencyCode::Eur), 60000.1);
        assert!(quote.fetched_at() <= Utc::now());
    }
}
