use crate::config::Config;
use crate::ddgs::{ClientFactory, DdgsClientFactory};
use crate::dispatch::SearchDispatcher;
use crate::error::ToolError;
use crate::format::format_results;
use crate::tools::{Normalizer, registry};

use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, JsonObject, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

#[derive(Clone)]
pub struct DdgsSearchServer {
    normalizer: Normalizer,
    dispatcher: SearchDispatcher,
}

impl DdgsSearchServer {
    pub fn new(config: &Config) -> Self {
        Self::with_factory(config, Arc::new(DdgsClientFactory))
    }

    pub fn with_factory(config: &Config, factory: Arc<dyn ClientFactory>) -> Self {
        Self {
            normalizer: Normalizer::new(config.auto_backend.clone()),
            dispatcher: SearchDispatcher::new(factory, config.timeout),
        }
    }

    /// Runs one tool invocation and turns the outcome into a single text result.
    pub async fn handle(&self, name: &str, args: &JsonObject) -> CallToolResult {
        match self.run(name, args).await {
            Ok(text) => CallToolResult::success(vec![Content::text(text)]),
            Err(e) => {
                match &e {
                    ToolError::Internal(msg) => error!("{name} failed: {msg}"),
                    other => warn!("{name} failed: {other}"),
                }
                CallToolResult::error(vec![Content::text(e.user_message())])
            }
        }
    }

    async fn run(&self, name: &str, args: &JsonObject) -> Result<String, ToolError> {
        let tool = registry::find(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        let request = self.normalizer.normalize(tool, args)?;
        info!(
            "{} search: query={:?} max_results={} backend={}",
            request.kind(),
            request.query(),
            request.max_results(),
            request.backend().unwrap_or("-"),
        );
        debug!("normalized arguments: {}", serde_json::Value::Object(request.to_arguments()));
        let results = self.dispatcher.dispatch(request).await?;
        if results.is_empty() {
            info!("{} search returned no results", results.kind());
        } else {
            debug!("{} search returned {} results", results.kind(), results.len());
        }
        Ok(format_results(&results))
    }
}

impl ServerHandler for DdgsSearchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "ddgs-search".into(),
                title: None,
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Metasearch over DuckDuckGo and friends: text, images, videos, news and books.".into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = registry::list().iter().map(|tool| tool.to_tool()).collect();
        Ok(ListToolsResult::with_all_items(tools))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = request.arguments.unwrap_or_default();
        Ok(self.handle(&request.name, &args).await)
    }
}
