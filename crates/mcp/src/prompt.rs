//! Prompt templates.
//!
//! A `Prompt` is a named, parameterized message template. Rendering is
//! straight input-to-template substitution; registries mirror the tool
//! registry's Arc-per-entry shape.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::types::{GetPromptResult, PromptInfo};

/// A named message template exposed via `prompts/list` / `prompts/get`.
pub trait Prompt: Send + Sync {
    /// The prompt's name, description, and declared arguments.
    fn definition(&self) -> PromptInfo;

    /// Render the template with the given arguments object.
    fn render(&self, arguments: &Value) -> Result<GetPromptResult, PromptError>;
}

/// Manages registered prompts and lookup by name.
pub struct PromptRegistry {
    prompts: HashMap<String, Arc<dyn Prompt>>,
}

impl PromptRegistry {
    pub fn new() -> Self {
        Self {
            prompts: HashMap::new(),
        }
    }

    /// Register a prompt. Returns error if name already registered.
    pub fn register(&mut self, prompt: impl Prompt + 'static) -> Result<(), PromptError> {
        let def = prompt.definition();
        if self.prompts.contains_key(&def.name) {
            return Err(PromptError::DuplicateName(def.name));
        }
        self.prompts.insert(def.name, Arc::new(prompt));
        Ok(())
    }

    /// Look up a prompt by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Prompt>> {
        self.prompts.get(name).cloned()
    }

    /// List all registered prompt definitions (for prompts/list).
    pub fn list(&self) -> Vec<PromptInfo> {
        self.prompts.values().map(|p| p.definition()).collect()
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}

impl Default for PromptRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("Prompt with name '{0}' is already registered")]
    DuplicateName(String),

    #[error("Invalid prompt arguments: {0}")]
    InvalidArguments(String),
}
