//! Tool runtime for the coinwatch MCP server.
//!
//! Defines the `Tool` trait and registry the MCP layer dispatches into,
//! plus the built-in tools the demo server exposes.

pub mod registry;
pub mod tool;
pub mod tools;

pub use registry::{RegistryError, ToolRegistry};
pub use tool::{Tool, ToolDefinition, ToolError, ToolOutput};
pub use tools::{BitcoinPriceTool, HelloTool};
