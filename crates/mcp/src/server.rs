//! MCP server implementation.
//!
//! Dispatches JSON-RPC requests into the tool, prompt, and resource
//! registries. One request at a time, in stream order; tool invocations are
//! self-contained, so there is no shared mutable state between them.

use serde_json::Value;

use coinwatch_tool_runtime::ToolRegistry;

use crate::error::McpError;
use crate::prompt::PromptRegistry;
use crate::resource::ResourceRegistry;
use crate::transport::McpTransport;
use crate::types::*;

/// MCP server bridging the registries to protocol clients.
pub struct McpServer {
    tools: ToolRegistry,
    prompts: PromptRegistry,
    resources: ResourceRegistry,
    server_name: String,
    server_version: String,
    initialized: bool,
}

impl McpServer {
    /// Create a new MCP server wrapping the given tool registry.
    pub fn new(tools: ToolRegistry) -> Self {
        Self {
            tools,
            prompts: PromptRegistry::new(),
            resources: ResourceRegistry::new(),
            server_name: "coinwatch".to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            initialized: false,
        }
    }

    /// Set the server name advertised during initialization.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.server_name = name.into();
        self
    }

    /// Attach a prompt registry.
    pub fn with_prompts(mut self, prompts: PromptRegistry) -> Self {
        self.prompts = prompts;
        self
    }

    /// Attach a resource registry.
    pub fn with_resources(mut self, resources: ResourceRegistry) -> Self {
        self.resources = resources;
        self
    }

    /// Run the server loop, reading from and writing to the transport.
    ///
    /// Processes JSON-RPC requests until the transport is closed.
    pub async fn run<T: McpTransport>(&mut self, transport: &mut T) -> Result<(), McpError> {
        tracing::info!(server = %self.server_name, "MCP server starting");

        loop {
            let line = match transport.receive().await? {
                Some(line) => line,
                None => {
                    tracing::info!("Transport closed, shutting down");
                    break;
                }
            };

            tracing::debug!(message = %line, "Received message");

            // Distinguish requests (have "id") from notifications (no "id")
            // by parsing as generic Value first.
            let raw: Value = match serde_json::from_str(&line) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to parse JSON");
                    let resp = parse_error_response(e);
                    transport.send(&serde_json::to_string(&resp)?).await?;
                    continue;
                }
            };

            if raw.get("id").is_none() {
                if let Ok(notif) = serde_json::from_value::<JsonRpcNotification>(raw) {
                    self.handle_notification(&notif);
                }
                continue;
            }

            let request: JsonRpcRequest = match serde_json::from_value(raw) {
                Ok(req) => req,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to parse JSON-RPC request");
                    let resp = parse_error_response(e);
                    transport.send(&serde_json::to_string(&resp)?).await?;
                    continue;
                }
            };

            let response = self.handle_request(&request).await;
            let json = serde_json::to_string(&response)?;
            tracing::debug!(response = %json, "Sending response");
            transport.send(&json).await?;
        }

        Ok(())
    }

    /// Handle a single JSON-RPC request and produce a response.
    pub async fn handle_request(&mut self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();

        match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            "tools/list" => self.handle_list_tools(id),
            "tools/call" => self.handle_call_tool(id, &request.params).await,
            "prompts/list" => self.handle_list_prompts(id),
            "prompts/get" => self.handle_get_prompt(id, &request.params),
            "resources/list" => self.handle_list_resources(id),
            "resources/read" => self.handle_read_resource(id, &request.params),
            method => {
                tracing::warn!(method = %method, "Unknown method");
                error_response(id, McpError::MethodNotFound(method.to_string()))
            }
        }
    }

    fn handle_notification(&mut self, notif: &JsonRpcNotification) {
        match notif.method.as_str() {
            "notifications/initialized" => {
                tracing::info!("Client confirmed initialization");
            }
            "notifications/cancelled" => {
                tracing::debug!("Client cancelled a request");
            }
            method => {
                tracing::debug!(method = %method, "Unknown notification, ignoring");
            }
        }
    }

    fn handle_initialize(&mut self, id: RpcId) -> JsonRpcResponse {
        tracing::info!("Handling initialize");
        self.initialized = true;

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: false }),
                prompts: Some(PromptsCapability { list_changed: false }),
                resources: Some(ResourcesCapability {
                    subscribe: false,
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: self.server_name.clone(),
                version: Some(self.server_version.clone()),
            },
        };

        success_or_internal(id, result)
    }

    fn handle_list_tools(&self, id: RpcId) -> JsonRpcResponse {
        tracing::debug!("Handling tools/list");

        let tools: Vec<ToolInfo> = self.tools.list().into_iter().map(ToolInfo::from).collect();
        success_or_internal(id, ListToolsResult { tools })
    }

    async fn handle_call_tool(&self, id: RpcId, params: &Option<Value>) -> JsonRpcResponse {
        let call_params: CallToolParams = match parse_params(params) {
            Ok(p) => p,
            Err(e) => return error_response(id, e),
        };

        tracing::debug!(tool = %call_params.name, "Handling tools/call");

        let tool = match self.tools.get(&call_params.name) {
            Some(t) => t,
            None => return error_response(id, McpError::ToolNotFound(call_params.name)),
        };

        let result = match tool.execute(call_params.arguments).await {
            Ok(output) => CallToolResult {
                content: vec![Content::text(output.content)],
                is_error: output.is_error,
            },
            // Tool-level failures (e.g. invalid input) are reported in-band
            // as an error result, not as a protocol error.
            Err(e) => CallToolResult {
                content: vec![Content::text(e.to_string())],
                is_error: true,
            },
        };

        success_or_internal(id, result)
    }

    fn handle_list_prompts(&self, id: RpcId) -> JsonRpcResponse {
        tracing::debug!("Handling prompts/list");
        success_or_internal(
            id,
            ListPromptsResult {
                prompts: self.prompts.list(),
            },
        )
    }

    fn handle_get_prompt(&self, id: RpcId, params: &Option<Value>) -> JsonRpcResponse {
        let get_params: GetPromptParams = match parse_params(params) {
            Ok(p) => p,
            Err(e) => return error_response(id, e),
        };

        tracing::debug!(prompt = %get_params.name, "Handling prompts/get");

        let prompt = match self.prompts.get(&get_params.name) {
            Some(p) => p,
            None => return error_response(id, McpError::PromptNotFound(get_params.name)),
        };

        match prompt.render(&get_params.arguments) {
            Ok(result) => success_or_internal(id, result),
            Err(e) => error_response(id, McpError::InvalidParams(e.to_string())),
        }
    }

    fn handle_list_resources(&self, id: RpcId) -> JsonRpcResponse {
        tracing::debug!("Handling resources/list");
        success_or_internal(
            id,
            ListResourcesResult {
                resources: self.resources.list(),
            },
        )
    }

    fn handle_read_resource(&self, id: RpcId, params: &Option<Value>) -> JsonRpcResponse {
        let read_params: ReadResourceParams = match parse_params(params) {
            Ok(p) => p,
            Err(e) => return error_response(id, e),
        };

        tracing::debug!(uri = %read_params.uri, "Handling resources/read");

        let resource = match self.resources.get(&read_params.uri) {
            Some(r) => r,
            None => return error_response(id, McpError::ResourceNotFound(read_params.uri)),
        };

        match resource.read() {
            Ok(contents) => success_or_internal(
                id,
                ReadResourceResult {
                    contents: vec![contents],
                },
            ),
            Err(e) => error_response(id, McpError::InvalidParams(e.to_string())),
        }
    }
}

/// Deserialize method params, treating a missing object as invalid.
fn parse_params<P: serde::de::DeserializeOwned>(params: &Option<Value>) -> Result<P, McpError> {
    let params = params
        .as_ref()
        .ok_or_else(|| McpError::InvalidParams("missing params".to_string()))?;
    serde_json::from_value(params.clone()).map_err(|e| McpError::InvalidParams(e.to_string()))
}

fn error_response(id: RpcId, err: McpError) -> JsonRpcResponse {
    let rpc = err.to_rpc_error();
    JsonRpcResponse::error(id, rpc.code, rpc.message)
}

fn success_or_internal<R: serde::Serialize>(id: RpcId, result: R) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(val) => JsonRpcResponse::success(id, val),
        Err(e) => error_response(id, McpError::JsonParse(e)),
    }
}

/// Response for a line that never parsed far enough to yield an id.
fn parse_error_response(e: serde_json::Error) -> JsonRpcResponse {
    JsonRpcResponse {
        jsonrpc: "2.0".to_string(),
        id: RpcId::Number(0),
        result: None,
        error: Some(McpError::JsonParse(e).to_rpc_error()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{Prompt, PromptError};
    use crate::resource::{Resource, ResourceError};
    use crate::transport::ChannelTransport;
    use crate::transport::McpTransport as _;
    use coinwatch_tool_runtime::tools::HelloTool;

    struct TitlePrompt;

    impl Prompt for TitlePrompt {
        fn definition(&self) -> PromptInfo {
            PromptInfo {
                name: "prompt_test".to_string(),
                description: "This is a test prompt".to_string(),
                arguments: vec![PromptArgument {
                    name: "title".to_string(),
                    description: Some("The title to submit".to_string()),
                    required: true,
                }],
            }
        }

        fn render(&self, arguments: &Value) -> Result<GetPromptResult, PromptError> {
            let title = arguments
                .get("title")
                .and_then(|v| v.as_str())
                .ok_or_else(|| PromptError::InvalidArguments("missing 'title'".to_string()))?;
            Ok(GetPromptResult {
                description: Some("description".to_string()),
                messages: vec![PromptMessage {
                    role: Role::User,
                    content: Content::text(format!("Hello, {title}!")),
                }],
            })
        }
    }

    struct TestResource;

    impl Resource for TestResource {
        fn definition(&self) -> ResourceInfo {
            ResourceInfo {
                uri: "test://resource".to_string(),
                name: "resource_test".to_string(),
                description: Some("This is a test resource".to_string()),
                mime_type: Some("application/json".to_string()),
            }
        }

        fn read(&self) -> Result<ResourceContents, ResourceError> {
            Ok(ResourceContents {
                uri: "test://resource".to_string(),
                mime_type: Some("application/json".to_string()),
                text: "This is a test resource".to_string(),
            })
        }
    }

    fn test_server() -> McpServer {
        let mut tools = ToolRegistry::new();
        tools.register(HelloTool).unwrap();
        let mut prompts = PromptRegistry::new();
        prompts.register(TitlePrompt).unwrap();
        let mut resources = ResourceRegistry::new();
        resources.register(TestResource).unwrap();

        McpServer::new(tools)
            .with_prompts(prompts)
            .with_resources(resources)
    }

    #[tokio::test]
    async fn test_handle_initialize() {
        let mut server = test_server();
        let req = JsonRpcRequest::new(
            RpcId::Number(1),
            "initialize",
            Some(serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {},
                "clientInfo": {"name": "test-client"}
            })),
        );

        let resp = server.handle_request(&req).await;
        assert!(resp.error.is_none());
        let result: InitializeResult = serde_json::from_value(resp.result.unwrap()).unwrap();
        assert_eq!(result.protocol_version, PROTOCOL_VERSION);
        assert_eq!(result.server_info.name, "coinwatch");
        assert!(result.capabilities.tools.is_some());
        assert!(result.capabilities.prompts.is_some());
        assert!(result.capabilities.resources.is_some());
    }

    #[tokio::test]
    async fn test_ping() {
        let mut server = test_server();
        let req = JsonRpcRequest::new(RpcId::Number(1), "ping", None);
        let resp = server.handle_request(&req).await;
        assert!(resp.error.is_none());
        assert_eq!(resp.result.unwrap(), serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_handle_list_tools() {
        let mut server = test_server();
        let req = JsonRpcRequest::new(RpcId::Number(2), "tools/list", None);

        let resp = server.handle_request(&req).await;
        assert!(resp.error.is_none());
        let result: ListToolsResult = serde_json::from_value(resp.result.unwrap()).unwrap();
        assert_eq!(result.tools.len(), 1);
        assert_eq!(result.tools[0].name, "hello-world");
    }

    #[tokio::test]
    async fn test_handle_call_tool() {
        let mut server = test_server();
        let req = JsonRpcRequest::new(
            RpcId::Number(3),
            "tools/call",
            Some(serde_json::json!({
                "name": "hello-world",
                "arguments": {
                    "submitter": "mcp",
                    "content": {"title": "hi"}
                }
            })),
        );

        let resp = server.handle_request(&req).await;
        assert!(resp.error.is_none());
        let result: CallToolResult = serde_json::from_value(resp.result.unwrap()).unwrap();
        assert!(!result.is_error);
        match &result.content[0] {
            Content::Text { text } => {
                assert_eq!(text, "Hello, mcp! Welcome to the MCP Example.")
            }
        }
    }

    #[tokio::test]
    async fn test_handle_call_tool_invalid_input_is_in_band_error() {
        let mut server = test_server();
        let req = JsonRpcRequest::new(
            RpcId::Number(3),
            "tools/call",
            Some(serde_json::json!({
                "name": "hello-world",
                "arguments": {}
            })),
        );

        let resp = server.handle_request(&req).await;
        assert!(resp.error.is_none());
        let result: CallToolResult = serde_json::from_value(resp.result.unwrap()).unwrap();
        assert!(result.is_error);
    }

    #[tokio::test]
    async fn test_handle_call_tool_not_found() {
        let mut server = test_server();
        let req = JsonRpcRequest::new(
            RpcId::Number(4),
            "tools/call",
            Some(serde_json::json!({"name": "nonexistent", "arguments": {}})),
        );

        let resp = server.handle_request(&req).await;
        let err = resp.error.unwrap();
        assert_eq!(err.code, error_codes::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_handle_list_prompts() {
        let mut server = test_server();
        let req = JsonRpcRequest::new(RpcId::Number(5), "prompts/list", None);

        let resp = server.handle_request(&req).await;
        let result: ListPromptsResult = serde_json::from_value(resp.result.unwrap()).unwrap();
        assert_eq!(result.prompts.len(), 1);
        assert_eq!(result.prompts[0].name, "prompt_test");
    }

    #[tokio::test]
    async fn test_handle_get_prompt() {
        let mut server = test_server();
        let req = JsonRpcRequest::new(
            RpcId::Number(6),
            "prompts/get",
            Some(serde_json::json!({
                "name": "prompt_test",
                "arguments": {"title": "demo"}
            })),
        );

        let resp = server.handle_request(&req).await;
        assert!(resp.error.is_none());
        let result: GetPromptResult = serde_json::from_value(resp.result.unwrap()).unwrap();
        assert_eq!(result.description.as_deref(), Some("description"));
        match &result.messages[0].content {
            Content::Text { text } => assert_eq!(text, "Hello, demo!"),
        }
    }

    #[tokio::test]
    async fn test_handle_get_prompt_unknown_name() {
        let mut server = test_server();
        let req = JsonRpcRequest::new(
            RpcId::Number(7),
            "prompts/get",
            Some(serde_json::json!({"name": "nope", "arguments": {}})),
        );

        let resp = server.handle_request(&req).await;
        assert_eq!(resp.error.unwrap().code, error_codes::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_handle_list_and_read_resource() {
        let mut server = test_server();

        let req = JsonRpcRequest::new(RpcId::Number(8), "resources/list", None);
        let resp = server.handle_request(&req).await;
        let result: ListResourcesResult = serde_json::from_value(resp.result.unwrap()).unwrap();
        assert_eq!(result.resources[0].uri, "test://resource");
        assert_eq!(
            result.resources[0].mime_type.as_deref(),
            Some("application/json")
        );

        let req = JsonRpcRequest::new(
            RpcId::Number(9),
            "resources/read",
            Some(serde_json::json!({"uri": "test://resource"})),
        );
        let resp = server.handle_request(&req).await;
        let result: ReadResourceResult = serde_json::from_value(resp.result.unwrap()).unwrap();
        assert_eq!(result.contents[0].text, "This is a test resource");
    }

    #[tokio::test]
    async fn test_handle_read_resource_unknown_uri() {
        let mut server = test_server();
        let req = JsonRpcRequest::new(
            RpcId::Number(10),
            "resources/read",
            Some(serde_json::json!({"uri": "test://missing"})),
        );

        let resp = server.handle_request(&req).await;
        assert_eq!(resp.error.unwrap().code, error_codes::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_handle_unknown_method() {
        let mut server = test_server();
        let req = JsonRpcRequest::new(RpcId::Number(11), "unknown/method", None);

        let resp = server.handle_request(&req).await;
        assert_eq!(resp.error.unwrap().code, error_codes::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_server_run_with_channel_transport() {
        let (mut client_side, mut server_side) = ChannelTransport::pair();
        let mut server = test_server();

        let server_handle = tokio::spawn(async move { server.run(&mut server_side).await });

        let init_req = JsonRpcRequest::new(
            RpcId::Number(1),
            "initialize",
            Some(serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {},
                "clientInfo": {"name": "test"}
            })),
        );
        client_side
            .send(&serde_json::to_string(&init_req).unwrap())
            .await
            .unwrap();

        let resp_line = client_side.receive().await.unwrap().unwrap();
        let resp: JsonRpcResponse = serde_json::from_str(&resp_line).unwrap();
        assert!(resp.error.is_none());

        // A notification produces no response
        let notif = JsonRpcNotification::new("notifications/initialized", None);
        client_side
            .send(&serde_json::to_string(&notif).unwrap())
            .await
            .unwrap();

        let call_req = JsonRpcRequest::new(
            RpcId::Number(2),
            "tools/call",
            Some(serde_json::json!({
                "name": "hello-world",
                "arguments": {
                    "submitter": "transport",
                    "content": {"title": "t"}
                }
            })),
        );
        client_side
            .send(&serde_json::to_string(&call_req).unwrap())
            .await
            .unwrap();

        let resp_line = client_side.receive().await.unwrap().unwrap();
        let resp: JsonRpcResponse = serde_json::from_str(&resp_line).unwrap();
        assert_eq!(resp.id, RpcId::Number(2));
        let result: CallToolResult = serde_json::from_value(resp.result.unwrap()).unwrap();
        assert!(!result.is_error);

        // Drop client side to close the transport and let server exit
        drop(client_side);
        server_handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_unparseable_line_gets_parse_error() {
        let (mut client_side, mut server_side) = ChannelTransport::pair();
        let mut server = test_server();

        let server_handle = tokio::spawn(async move { server.run(&mut server_side).await });

        client_side.send("{not json").await.unwrap();
        let resp_line = client_side.receive().await.unwrap().unwrap();
        let resp: JsonRpcResponse = serde_json::from_str(&resp_line).unwrap();
        assert_eq!(resp.error.unwrap().code, error_codes::PARSE_ERROR);

        drop(client_side);
        server_handle.await.unwrap().unwrap();
    }
}
