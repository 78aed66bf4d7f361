//! Bitcoin price lookup tool.
//!
//! One fetch per invocation against the configured `PriceSource`, then
//! decode and format. Fetch/decode failures are rendered into the text
//! payload as a successful output — clients of the original server see
//! failures in-band, and that contract is preserved here.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, warn};

use coinwatch_quote::{decode, PriceSource, QuoteError};

use crate::tool::{Tool, ToolDefinition, ToolError, ToolOutput};

/// RFC1123-style timestamp, e.g. `Wed, 27 Aug 2026 10:15:00 GMT`.
const TIMESTAMP_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Get the latest Bitcoin price in various currencies.
pub struct BitcoinPriceTool {
    source: Arc<dyn PriceSource>,
}

impl BitcoinPriceTool {
    /// Tool backed by the given price source.
    pub fn new(source: Arc<dyn PriceSource>) -> Self {
        Self { source }
    }

    /// Fetch then decode, selecting `currency` case-insensitively.
    async fn lookup(&self, currency: &str) -> Result<f64, QuoteError> {
        let body = self.source.fetch().await?;
        let price = decode(&body, currency)?;
        Ok(price)
    }
}

#[async_trait]
impl Tool for BitcoinPriceTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "bitcoin_price".to_string(),
            description: "Get the latest Bitcoin price in various currencies".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "currency": {
                        "type": "string",
                        "description": "Currency code for Bitcoin price (e.g., USD, EUR). Defaults to USD."
                    }
                }
            }),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let requested = input
            .get("currency")
            .and_then(|v| v.as_str())
            .unwrap_or("");
        // Empty or missing currency defaults to USD
        let currency = if requested.is_empty() { "USD" } else { requested };

        debug!(currency = %currency, "bitcoin_price invoked");

        let text = match self.lookup(currency).await {
            Ok(price) => format!(
                "The current Bitcoin price is {price:.2} {currency} (as of {})",
                Utc::now().format(TIMESTAMP_FORMAT)
            ),
            Err(e) => {
                warn!(error = %e, "price lookup failed");
                // Rendered in-band as a successful payload, not a tool error
                format!("Error fetching Bitcoin price: {e}")
            }
        };

        Ok(ToolOutput::text(text))
    }
}
