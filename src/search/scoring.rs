//! Search relevance scoring for direct title matches.

/// Calculate simple text relevance score, case-insensitively.
///
/// Returns a score based on how well the query matches the text:
/// - 100: Exact match
/// - 50: Text starts with query
/// - 10: Text contains query
/// - None: No match
pub fn calculate_relevance(text: &str, query: &str) -> Option<u32> {
    let text = text.to_lowercase();
    let query = query.trim().to_lowercase();

    if query.is_empty() {
        None
    } else if text == query {
        Some(100)
    } else if text.starts_with(&query) {
        Some(50)
    } else if text.contains(&query) {
        Some(10)
    } else {
        None
    }
}

/// Relevance of a title against a query, also trying the title without its
/// module qualifier (`Pkg.fit` matches `fit` exactly).
pub fn symbol_relevance(title: &str, query: &str) -> Option<u32> {
    let qualified = calculate_relevance(title, query);
    let unqualified = title
        .rsplit_once('.')
        .and_then(|(_, name)| calculate_relevance(name, query));
    qualified.max(unqualified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("extract_coefs", "extract_coefs", Some(100))]
    #[case("extract_coefs", "EXTRACT", Some(50))]
    #[case("extract_coefs", "coefs", Some(10))]
    #[case("extract_coefs", "symbol", None)]
    #[case("extract_coefs", "  ", None)]
    fn test_calculate_relevance(#[case] text: &str, #[case] query: &str, #[case] expected: Option<u32>) {
        check!(calculate_relevance(text, query) == expected);
    }

    #[rstest]
    #[case("UnfoldStats.extract_coefs", "extract_coefs", Some(100))]
    #[case("UnfoldStats.extract_coefs", "UnfoldStats.extract_coefs", Some(100))]
    #[case("UnfoldStats.extract_coefs", "extract", Some(50))]
    #[case("UnfoldStats.extract_coefs", "unfold", Some(50))]
    #[case("Home", "home", Some(100))]
    #[case("Home", "pkg", None)]
    fn test_symbol_relevance(#[case] title: &str, #[case] query: &str, #[case] expected: Option<u32>) {
        check!(symbol_relevance(title, query) == expected);
    }
}
