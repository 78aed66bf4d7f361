use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Describes a tool's interface for protocol clients.
/// Serializes to the MCP tool format (name, description, JSON Schema).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique tool name (e.g., "bitcoin_price", "hello-world")
    pub name: String,
    /// Human-readable description shown to clients
    pub description: String,
    /// JSON Schema describing the expected input
    pub input_schema: Value,
}

/// Result of executing a tool, rendered back to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Text payload returned to the caller
    pub content: String,
    /// Whether this output represents an error
    pub is_error: bool,
}

impl ToolOutput {
    /// A successful text output.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }
}

/// The primary extension point: all tools implement this trait.
///
/// Tools are object-safe, Send + Sync, and async. Anything a tool needs
/// (HTTP clients, data sources) is injected through its constructor.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the tool's definition (name, description, JSON Schema).
    fn definition(&self) -> ToolDefinition;

    /// Execute the tool with the given JSON input.
    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl fmt::Display for ToolDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.description)
    }
}
