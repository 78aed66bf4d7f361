//! The closed set of supported vs-currencies.

use std::fmt;
use std::str::FromStr;

use crate::error::DecodeError;

/// A currency Bitcoin can be quoted against.
///
/// Closed enumeration: the CoinGecko request asks for exactly these ten
/// vs-currencies, so selection over the decoded payload is an exhaustive
/// match. Anything outside the set is an error, never a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurrencyCode {
    Usd,
    Eur,
    Gbp,
    Jpy,
    Aud,
    Cad,
    Chf,
    Cny,
    Krw,
    Rub,
}

impl CurrencyCode {
    /// All supported codes, in the order they appear in the API query.
    pub const ALL: [CurrencyCode; 10] = [
        CurrencyCode::Usd,
        CurrencyCode::Eur,
        CurrencyCode::Gbp,
        CurrencyCode::Jpy,
        CurrencyCode::Aud,
        CurrencyCode::Cad,
        CurrencyCode::Chf,
        CurrencyCode::Cny,
        CurrencyCode::Krw,
        CurrencyCode::Rub,
    ];

    /// Lowercase symbol as used in the CoinGecko query and payload.
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "usd",
            CurrencyCode::Eur => "eur",
            CurrencyCode::Gbp => "gbp",
            CurrencyCode::Jpy => "jpy",
            CurrencyCode::Aud => "aud",
            CurrencyCode::Cad => "cad",
            CurrencyCode::Chf => "chf",
            CurrencyCode::Cny => "cny",
            CurrencyCode::Krw => "krw",
            CurrencyCode::Rub => "rub",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = DecodeError;

    /// Case-insensitive match against the supported set.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for code in Self::ALL {
            if s.eq_ignore_ascii_case(code.as_str()) {
                return Ok(code);
            }
        }
        Err(DecodeError::UnsupportedCurrency(s.to_string()))
    }
}
