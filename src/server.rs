//! MCP server exposing documentation search index queries.

use crate::state::DocState;
use crate::tools::inspect_entry::{InspectEntryRequest, handle_inspect_entry};
use crate::tools::list_pages::{ListPagesRequest, handle_list_pages};
use crate::tools::load_index::{LoadIndexRequest, handle_load_index};
use crate::tools::search::{SearchRequest, handle_search};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars::{self, JsonSchema, generate::SchemaSettings},
    tool, tool_handler, tool_router,
};
use std::borrow::Cow;
use std::sync::Arc;

/// MCP server for documentation search index queries
#[derive(Clone)]
pub struct IndexServer {
    /// Shared state (loaded indexes, default payload)
    state: Arc<DocState>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for IndexServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexServer")
            .field("state", &self.state)
            .finish()
    }
}

impl Default for IndexServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl IndexServer {
    pub fn new() -> Self {
        Self {
            state: Arc::new(DocState::new()),
            tool_router: Self::tool_router(),
        }
    }

    /// Get a reference to the shared DocState.
    pub const fn doc_state(&self) -> &Arc<DocState> {
        &self.state
    }

    #[tool(
        description = "Load a documentation search index (search_index.js or its bare JSON payload) and make it the default for later calls. Reports entry, page and category counts.",
        input_schema = inline_schema_for_type::<LoadIndexRequest>()
    )]
    async fn load_index(
        &self,
        Parameters(request): Parameters<LoadIndexRequest>,
    ) -> std::result::Result<String, String> {
        handle_load_index(&self.state, request).await
    }

    #[tool(
        description = "Search documentation entries using TF-IDF full-text search over titles, docstrings and page names. Exact title matches are boosted. Optionally filter by category (page, section, method, ...).",
        input_schema = inline_schema_for_type::<SearchRequest>()
    )]
    async fn search(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> std::result::Result<String, String> {
        handle_search(&self.state, request).await
    }

    #[tool(
        description = "List documentation pages in build order with the titles documented on each page.",
        input_schema = inline_schema_for_type::<ListPagesRequest>()
    )]
    async fn list_pages(
        &self,
        Parameters(request): Parameters<ListPagesRequest>,
    ) -> std::result::Result<String, String> {
        handle_list_pages(&self.state, request).await
    }

    #[tool(
        description = "Show the full docstring, symbol and signature of entries with a given title. Accepts qualified ('Pkg.fit') or unqualified ('fit') titles.",
        input_schema = inline_schema_for_type::<InspectEntryRequest>()
    )]
    async fn inspect_entry(
        &self,
        Parameters(request): Parameters<InspectEntryRequest>,
    ) -> std::result::Result<String, String> {
        handle_inspect_entry(&self.state, request).await
    }
}

#[tool_handler]
impl ServerHandler for IndexServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "documenter-search: query generated documentation search indexes. \
                 Start with load_index unless an index path was given on the command line, \
                 then use search, list_pages and inspect_entry.",
            )
    }
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}

/// Generate an inline JSON schema for MCP tools
///
/// Sets `inline_subschemas = true` so nested types are emitted inline
/// instead of as `$ref` definitions.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.transforms = vec![Box::new(schemars::transform::AddNullable::default())];
    settings.inline_subschemas = true;

    let generator = settings.into_generator();
    let schema = generator.into_root_schema_for::<T>();
    match serde_json::to_value(schema) {
        Ok(serde_json::Value::Object(object)) => Arc::new(object),
        _ => Arc::new(JsonObject::new()),
    }
}
