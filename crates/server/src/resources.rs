//! Demo resource exposed by the server.

use coinwatch_mcp::resource::{Resource, ResourceError};
use coinwatch_mcp::types::{ResourceContents, ResourceInfo};

const URI: &str = "test://resource";
const MIME_TYPE: &str = "application/json";

/// A static test resource with a fixed identifier and content type.
pub struct TestResource;

impl Resource for TestResource {
    fn definition(&self) -> ResourceInfo {
        ResourceInfo {
            uri: URI.to_string(),
            name: "resource_test".to_string(),
            description: Some("This is a test resource".to_string()),
            mime_type: Some(MIME_TYPE.to_string()),
        }
    }

    fn read(&self) -> Result<ResourceContents, ResourceError> {
        Ok(ResourceContents {
            uri: URI.to_string(),
            mime_type: Some(MIME_TYPE.to_string()),
            text: "This is a test resource".to_string(),
        })
    }
}
