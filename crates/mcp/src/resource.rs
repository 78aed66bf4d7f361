//! Static resources.
//!
//! A `Resource` is a content item addressable by a URI-like identifier,
//! exposed via `resources/list` / `resources/read`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::types::{ResourceContents, ResourceInfo};

/// A content item exposed to protocol clients.
pub trait Resource: Send + Sync {
    /// The resource's URI, name, description, and mime type.
    fn definition(&self) -> ResourceInfo;

    /// Produce the resource contents.
    fn read(&self) -> Result<ResourceContents, ResourceError>;
}

/// Manages registered resources and lookup by URI.
pub struct ResourceRegistry {
    resources: HashMap<String, Arc<dyn Resource>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self {
            resources: HashMap::new(),
        }
    }

    /// Register a resource. Returns error if the URI is already taken.
    pub fn register(&mut self, resource: impl Resource + 'static) -> Result<(), ResourceError> {
        let def = resource.definition();
        if self.resources.contains_key(&def.uri) {
            return Err(ResourceError::DuplicateUri(def.uri));
        }
        self.resources.insert(def.uri, Arc::new(resource));
        Ok(())
    }

    /// Look up a resource by URI.
    pub fn get(&self, uri: &str) -> Option<Arc<dyn Resource>> {
        self.resources.get(uri).cloned()
    }

    /// List all registered resource definitions (for resources/list).
    pub fn list(&self) -> Vec<ResourceInfo> {
        self.resources.values().map(|r| r.definition()).collect()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("Resource with URI '{0}' is already registered")]
    DuplicateUri(String),

    #[error("Failed to read resource: {0}")]
    ReadFailed(String),
}
