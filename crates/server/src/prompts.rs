//! Demo prompt exposed by the server.

use serde_json::Value;

use coinwatch_mcp::prompt::{Prompt, PromptError};
use coinwatch_mcp::types::{Content, GetPromptResult, PromptArgument, PromptInfo, PromptMessage, Role};

/// A test prompt greeting the submitted title.
pub struct TestPrompt;

impl Prompt for TestPrompt {
    fn definition(&self) -> PromptInfo {
        PromptInfo {
            name: "prompt_test".to_string(),
            description: "This is a test prompt".to_string(),
            arguments: vec![
                PromptArgument {
                    name: "title".to_string(),
                    description: Some("The title to submit".to_string()),
                    required: true,
                },
                PromptArgument {
                    name: "description".to_string(),
                    description: Some("Optional description".to_string()),
                    required: false,
                },
            ],
        }
    }

    fn render(&self, arguments: &Value) -> Result<GetPromptResult, PromptError> {
        let title = arguments
            .get("title")
            .and_then(|v| v.as_str())
            .ok_or_else(|| PromptError::InvalidArguments("missing 'title' argument".to_string()))?;

        Ok(GetPromptResult {
            description: Some("description".to_string()),
            messages: vec![PromptMessage {
                role: Role::User,
                content: Content::text(format!("Hello, {title}!")),
            }],
        })
    }
}
