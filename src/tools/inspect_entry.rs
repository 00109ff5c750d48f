use crate::entry::DocEntry;
use crate::search::symbol_relevance;
use crate::state::DocState;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;
use std::sync::Arc;

/// Suggestions shown when no title matches.
const MAX_SUGGESTIONS: usize = 5;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct InspectEntryRequest {
    /// Entry title, qualified (`Pkg.fit`) or not (`fit`)
    pub title: String,
    /// Path to the search index payload. Defaults to the preloaded index.
    #[serde(default)]
    pub path: Option<String>,
}

/// Show every entry with a matching title, including full text and anchor.
pub async fn handle_inspect_entry(
    state: &Arc<DocState>,
    request: InspectEntryRequest,
) -> Result<String, String> {
    let path = state
        .resolve_path(request.path.as_deref())
        .await
        .map_err(|e| format!("{:#}", e))?;
    let index = state.get_index(&path).await.map_err(|e| format!("{:#}", e))?;
    let docs = index.docs();

    let matches = docs.find_title(&request.title);
    if matches.is_empty() {
        let mut suggestions: Vec<(u32, &str)> = docs
            .iter()
            .filter_map(|e| symbol_relevance(&e.title, &request.title).map(|r| (r, e.title.as_str())))
            .collect();
        suggestions.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(b.1)));
        suggestions.dedup_by(|a, b| a.1 == b.1);

        let mut msg = format!("No entry titled '{}'.", request.title);
        if !suggestions.is_empty() {
            msg.push_str(" Did you mean one of these?\n\n");
            for (_, title) in suggestions.into_iter().take(MAX_SUGGESTIONS) {
                let _ = writeln!(msg, "• `{}`", title);
            }
        }
        return Ok(msg);
    }

    let mut output = String::new();
    for (position, entry) in matches {
        format_entry(&mut output, position, entry);
    }
    Ok(output)
}

fn format_entry(output: &mut String, position: usize, entry: &DocEntry) {
    let _ = writeln!(output, "# {} ({})", entry.title, entry.category);
    let _ = writeln!(output, "page: {}", entry.page);
    let _ = writeln!(output, "entry: #{}", position);
    if let Some(anchor) = entry.anchor() {
        let _ = writeln!(output, "symbol: {}", anchor.symbol);
        if let Some(signature) = anchor.signature {
            let _ = writeln!(output, "signature: {}", signature);
        }
    }

    let text = entry.text.trim();
    if !text.is_empty() {
        let _ = write!(output, "\n{}\n", text);
    }
    output.push('\n');
}
