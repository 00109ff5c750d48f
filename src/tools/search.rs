//! TF-IDF search handler for finding documentation entries.

use crate::entry::Category;
use crate::search::DetailedSearchResult;
use crate::state::DocState;
use rmcp::schemars;
use serde::Deserialize;
use std::{fmt::Write as _, sync::Arc};

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    /// Search query term
    pub query: String,
    /// Path to the search index payload. Defaults to the preloaded index.
    #[serde(default)]
    pub path: Option<String>,
    /// Restrict results to one category (e.g. "method", "page", "section")
    #[serde(default)]
    pub category: Option<String>,
    /// Maximum number of results to return (default: 10)
    #[serde(default = "default_limit")]
    pub limit: Option<usize>,
}

fn default_limit() -> Option<usize> {
    Some(10)
}

/// Execute the search operation using TF-IDF indexing.
pub async fn handle_search(state: &Arc<DocState>, request: SearchRequest) -> Result<String, String> {
    let path = state
        .resolve_path(request.path.as_deref())
        .await
        .map_err(|e| format!("{:#}", e))?;
    let index = state.get_index(&path).await.map_err(|e| format!("{:#}", e))?;

    let category: Option<Category> = request
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| Category::from(c.to_string()));

    let limit = request.limit.unwrap_or(10);
    let results = index.search_detailed(&request.query, category.as_ref(), limit);

    if results.is_empty() {
        let mut msg = format!(
            "No results found for '{}' in {}.\n\n",
            request.query,
            path.display()
        );

        msg.push_str("Search tips:\n");
        msg.push_str("• Try a shorter or more general term\n");
        msg.push_str("• Search uses stemming: 'coefficients' matches 'coefficient'\n");
        if category.is_some() {
            msg.push_str("• Drop the category filter to search every entry\n");
        }

        return Ok(msg);
    }

    Ok(format_search_results(&results, &request.query))
}

/// Format search results into a readable string output.
fn format_search_results(results: &[DetailedSearchResult<'_>], query: &str) -> String {
    let mut output = format!("Search results for '{}':\n\n", query);

    let max_score = results
        .first()
        .map(|r| r.rank)
        .filter(|r| *r > 0.0)
        .unwrap_or(1.0);

    for (idx, result) in results.iter().enumerate() {
        let relevance = ((result.rank / max_score) * 100.0).round().clamp(0.0, 100.0) as u8;
        let entry = result.entry;

        let _ = writeln!(
            output,
            "{}. `{}` ({}) on page '{}' - relevance: {}%",
            idx + 1,
            entry.title,
            entry.category,
            entry.page,
            relevance
        );
        if !entry.location.is_empty() {
            let _ = writeln!(output, "   location: {}", entry.location);
        }
        if let Some(summary) = entry.summary().and_then(|s| s.lines().next()) {
            let _ = writeln!(output, "   {}", summary.trim());
        }

        output.push('\n');
    }

    output
}
