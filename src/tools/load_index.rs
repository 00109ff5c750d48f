use crate::entry::Category;
use crate::state::DocState;
use rmcp::schemars;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LoadIndexRequest {
    /// Path to a search index payload (`search_index.js` or bare JSON)
    pub path: String,
    /// Drop any loaded copy and re-read the payload from disk
    #[serde(default)]
    pub reload: bool,
}

/// Load a payload, make it the default for later requests and summarize it.
pub async fn handle_load_index(state: &Arc<DocState>, request: LoadIndexRequest) -> Result<String, String> {
    let path = state
        .resolve_path(Some(request.path.as_str()))
        .await
        .map_err(|e| format!("{:#}", e))?;

    if request.reload && state.evict(&path).await {
        tracing::info!("Reloading search index from {}", path.display());
    }

    let index = state.get_index(&path).await.map_err(|e| format!("{:#}", e))?;
    state.set_default_path(path.clone()).await;

    let docs = index.docs();
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in docs {
        *counts.entry(entry.category.as_str()).or_default() += 1;
    }

    Ok(format_response(&path, docs.len(), docs.pages().len(), &counts))
}

pub fn format_response(path: &Path, entries: usize, pages: usize, counts: &BTreeMap<&str, usize>) -> String {
    let mut output = format!("Loaded search index from {}\n\n", path.display());
    let _ = writeln!(output, "Entries: {}", entries);
    let _ = writeln!(output, "Pages: {}", pages);

    if !counts.is_empty() {
        output.push_str("\nBy category:\n");
        for (category, count) in counts {
            let marker = if Category::from((*category).to_string()).is_symbol() {
                " (symbol)"
            } else {
                ""
            };
            let _ = writeln!(output, "• {}: {}{}", category, count, marker);
        }
    }

    output
}
