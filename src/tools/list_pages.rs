use crate::state::DocState;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;
use std::sync::Arc;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListPagesRequest {
    /// Path to the search index payload. Defaults to the preloaded index.
    #[serde(default)]
    pub path: Option<String>,
}

/// List pages in build order with the titles documented on each.
pub async fn handle_list_pages(state: &Arc<DocState>, request: ListPagesRequest) -> Result<String, String> {
    let path = state
        .resolve_path(request.path.as_deref())
        .await
        .map_err(|e| format!("{:#}", e))?;
    let index = state.get_index(&path).await.map_err(|e| format!("{:#}", e))?;
    let docs = index.docs();

    let pages = docs.pages();
    if pages.is_empty() {
        return Ok(format!("Search index at {} has no entries.\n", path.display()));
    }

    let mut output = format!("{} page(s) in {}:\n\n", pages.len(), path.display());
    for group in &pages {
        let _ = writeln!(output, "## {} ({} entries)", group.page, group.positions.len());

        // Consecutive duplicates are page fragments sharing the page title
        let mut last_title: Option<&str> = None;
        for entry in group.positions.iter().filter_map(|&p| docs.get(p)) {
            if last_title == Some(entry.title.as_str()) {
                continue;
            }
            last_title = Some(entry.title.as_str());
            let _ = writeln!(output, "• {} ({})", entry.title, entry.category);
        }
        output.push('\n');
    }

    Ok(output)
}
