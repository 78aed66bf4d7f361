//! Built-in tools exposed by the demo server.
//!
//! - `hello-world`: template greeting, no external dependencies
//! - `bitcoin_price`: one CoinGecko fetch per call, failures rendered as text

pub mod bitcoin_price;
pub mod hello;

pub use bitcoin_price::BitcoinPriceTool;
pub use hello::HelloTool;
