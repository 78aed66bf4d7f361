//! Greeting tool: substitutes the submitter name into a fixed sentence.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::tool::{Tool, ToolDefinition, ToolError, ToolOutput};

/// Arguments for the `hello-world` tool.
#[derive(Debug, Deserialize)]
struct HelloArgs {
    submitter: String,
    #[allow(dead_code)]
    content: HelloContent,
}

/// Structured content attached to the greeting. The greeting itself only
/// uses the submitter; the content object is validated for shape.
#[derive(Debug, Deserialize)]
struct HelloContent {
    #[allow(dead_code)]
    title: String,
    #[allow(dead_code)]
    #[serde(default)]
    description: Option<String>,
}

/// Say hello to a person with a personalized greeting message.
pub struct HelloTool;

#[async_trait]
impl Tool for HelloTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "hello-world".to_string(),
            description: "Say hello to a person with a personalized greeting message"
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "submitter": {
                        "type": "string",
                        "description": "Who is submitting"
                    },
                    "content": {
                        "type": "object",
                        "description": "The content to submit",
                        "properties": {
                            "title": {
                                "type": "string",
                                "description": "The title to submit"
                            },
                            "description": {
                                "type": "string",
                                "description": "Optional description"
                            }
                        },
                        "required": ["title"]
                    }
                },
                "required": ["submitter", "content"]
            }),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let args: HelloArgs = serde_json::from_value(input)
            .map_err(|e| ToolError::InvalidInput(e.to_string()))?;

        debug!(submitter = %args.submitter, "hello-world invoked");

        Ok(ToolOutput::text(format!(
            "Hello, {}! Welcome to the MCP Example.",
            args.submitter
        )))
    }
}
