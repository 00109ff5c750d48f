use anyhow::Context;
use documenter_search::server::{IndexServer, expand_tilde};
use rmcp::{ServiceExt, transport::stdio};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    documenter_search::tracing::init();

    tracing::info!("Starting documenter-search MCP server");

    let server = IndexServer::new();

    // Optional positional argument: payload to preload and use as default
    if let Some(arg) = std::env::args().nth(1) {
        let path = PathBuf::from(expand_tilde(&arg).into_owned());
        let state = server.doc_state();
        let index = state
            .get_index(&path)
            .await
            .with_context(|| format!("Failed to preload {}", path.display()))?;
        tracing::info!(
            "Preloaded {} entries across {} pages",
            index.docs().len(),
            index.docs().pages().len()
        );
        state.set_default_path(path).await;
    }

    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    service.waiting().await?;

    Ok(())
}
