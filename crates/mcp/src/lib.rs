//! MCP (Model Context Protocol) implementation for coinwatch.
//!
//! Implements the MCP protocol over JSON-RPC 2.0, exposing tools, prompts,
//! and resources to protocol clients over a pluggable transport.
//!
//! # Architecture
//!
//! - **types**: JSON-RPC 2.0 and MCP-specific protocol types
//! - **transport**: Pluggable transport layer (stdio, channels)
//! - **prompt** / **resource**: traits and registries for prompt templates
//!   and static resources
//! - **server**: MCP server dispatching into the registries
//! - **error**: Unified error types
//!
//! # Usage
//!
//! ```no_run
//! use coinwatch_mcp::server::McpServer;
//! use coinwatch_mcp::transport::StdioTransport;
//! use coinwatch_tool_runtime::ToolRegistry;
//!
//! # async fn example() {
//! let registry = ToolRegistry::new();
//! let mut server = McpServer::new(registry);
//! let mut transport = StdioTransport::new();
//! server.run(&mut transport).await.unwrap();
//! # }
//! ```

pub mod error;
pub mod prompt;
pub mod resource;
pub mod server;
pub mod transport;
pub mod types;

pub use error::McpError;
pub use prompt::{Prompt, PromptError, PromptRegistry};
pub use resource::{Resource, ResourceError, ResourceRegistry};
pub use server::McpServer;
pub use transport::{ChannelTransport, McpTransport, StdioTransport};
pub use types::*;
