//! MCP transport layer.
//!
//! Defines the `McpTransport` trait for sending/receiving JSON-RPC messages,
//! a `StdioTransport` for production use, and a `ChannelTransport` for
//! exercising the server loop in tests.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::error::McpError;

/// Trait for MCP message transport.
///
/// The wire format is newline-delimited JSON: one message per line.
#[async_trait]
pub trait McpTransport: Send + Sync {
    /// Read the next JSON-RPC message line from the transport.
    /// Returns `None` when the transport is closed.
    async fn receive(&mut self) -> Result<Option<String>, McpError>;

    /// Write a JSON-RPC message line to the transport.
    async fn send(&mut self, message: &str) -> Result<(), McpError>;
}

/// Stdio-based transport: reads requests from stdin, writes responses to
/// stdout. Empty lines are skipped. Anything else the process wants to say
/// (logs) must go to stderr.
pub struct StdioTransport {
    reader: BufReader<tokio::io::Stdin>,
    writer: tokio::io::Stdout,
}

impl StdioTransport {
    /// Create a new stdio transport.
    pub fn new() -> Self {
        Self {
            reader: BufReader::new(tokio::io::stdin()),
            writer: tokio::io::stdout(),
        }
    }
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl McpTransport for StdioTransport {
    async fn receive(&mut self) -> Result<Option<String>, McpError> {
        loop {
            let mut line = String::new();
            let bytes_read = self.reader.read_line(&mut line).await?;
            if bytes_read == 0 {
                return Ok(None); // EOF
            }
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
        }
    }

    async fn send(&mut self, message: &str) -> Result<(), McpError> {
        self.writer.write_all(message.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }
}

/// In-memory transport for testing, backed by channel pairs.
pub struct ChannelTransport {
    incoming: tokio::sync::mpsc::Receiver<String>,
    outgoing: tokio::sync::mpsc::Sender<String>,
}

impl ChannelTransport {
    /// Create a pair of connected transports.
    ///
    /// Messages sent on one side are received by the other.
    pub fn pair() -> (Self, Self) {
        let (tx_a, rx_b) = tokio::sync::mpsc::channel(32);
        let (tx_b, rx_a) = tokio::sync::mpsc::channel(32);
        (
            Self {
                incoming: rx_a,
                outgoing: tx_a,
            },
            Self {
                incoming: rx_b,
                outgoing: tx_b,
            },
        )
    }
}

#[async_trait]
impl McpTransport for ChannelTransport {
    async fn receive(&mut self) -> Result<Option<String>, McpError> {
        Ok(self.incoming.recv().await)
    }

    async fn send(&mut self, message: &str) -> Result<(), McpError> {
        self.outgoing.send(message.to_string()).await.map_err(|e| {
            McpError::Transport(std::io::Error::new(std::io::ErrorKind::BrokenPipe, e))
        })
    }
}
