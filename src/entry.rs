//! Documentation entry records and their categories.

use serde::{Deserialize, Serialize};
use std::{convert::Infallible, fmt, str::FromStr};

/// One record of a documentation search index.
///
/// Field names match the payload consumed by the documentation viewer and
/// must not be renamed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocEntry {
    /// Anchor or path within the documentation site (e.g. `#Pkg.f-Tuple{Any}`).
    pub location: String,
    /// Human-readable page name.
    pub page: String,
    /// Symbol or section title.
    pub title: String,
    /// Rendered docstring or summary text. May be empty.
    pub text: String,
    /// What kind of documented thing this entry describes.
    pub category: Category,
}

/// Category of a documentation entry.
///
/// Unknown category strings are preserved in [`Category::Other`] so that a
/// parse/serialize round-trip never loses information.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Page,
    Section,
    Method,
    Function,
    Type,
    Module,
    Macro,
    Constant,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Page => "page",
            Self::Section => "section",
            Self::Method => "method",
            Self::Function => "function",
            Self::Type => "type",
            Self::Module => "module",
            Self::Macro => "macro",
            Self::Constant => "constant",
            Self::Other(s) => s,
        }
    }

    /// Whether this category documents a code symbol rather than prose.
    pub const fn is_symbol(&self) -> bool {
        matches!(
            self,
            Self::Method | Self::Function | Self::Type | Self::Module | Self::Macro | Self::Constant
        )
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            "page" => Self::Page,
            "section" => Self::Section,
            "method" => Self::Method,
            "function" => Self::Function,
            "type" => Self::Type,
            "module" => Self::Module,
            "macro" => Self::Macro,
            "constant" => Self::Constant,
            _ => Self::Other(value),
        }
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Category {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed fragment of an entry location.
///
/// `#UnfoldStats.extract_coefs-Tuple{Any, Any}` splits into the symbol
/// `UnfoldStats.extract_coefs` and the signature `Tuple{Any, Any}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor<'a> {
    /// Document path before the `#`, empty for the index page.
    pub path: &'a str,
    pub symbol: &'a str,
    pub signature: Option<&'a str>,
}

impl Anchor<'_> {
    /// The symbol without its module qualifier (`extract_coefs`).
    pub fn name(&self) -> &str {
        unqualified(self.symbol)
    }
}

impl DocEntry {
    /// Parse the `#fragment` part of the location, if any.
    pub fn anchor(&self) -> Option<Anchor<'_>> {
        let (path, fragment) = self.location.split_once('#')?;
        if fragment.is_empty() {
            return None;
        }

        // Signatures start at the first `-` followed by a type-ish token;
        // symbol names never contain `-`.
        let (symbol, signature) = match fragment.split_once('-') {
            Some((symbol, sig)) if !symbol.is_empty() && !sig.is_empty() => (symbol, Some(sig)),
            _ => (fragment, None),
        };

        Some(Anchor {
            path,
            symbol,
            signature,
        })
    }

    pub const fn is_symbol(&self) -> bool {
        self.category.is_symbol()
    }

    /// Title with any module qualifier removed.
    pub fn short_title(&self) -> &str {
        unqualified(&self.title)
    }

    /// First non-empty paragraph of the rendered text.
    pub fn summary(&self) -> Option<&str> {
        self.text
            .split("\n\n")
            .map(str::trim)
            .find(|paragraph| !paragraph.is_empty())
    }

    /// Document path of this entry, without the fragment.
    pub fn document(&self) -> &str {
        self.location
            .split_once('#')
            .map_or(self.location.as_str(), |(path, _)| path)
    }
}

fn unqualified(symbol: &str) -> &str {
    symbol.rsplit_once('.').map_or(symbol, |(_, name)| name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    fn entry(location: &str, title: &str, text: &str, category: &str) -> DocEntry {
        DocEntry {
            location: location.to_string(),
            page: "Home".to_string(),
            title: title.to_string(),
            text: text.to_string(),
            category: Category::from(category.to_string()),
        }
    }

    #[rstest]
    #[case("page", Category::Page)]
    #[case("section", Category::Section)]
    #[case("method", Category::Method)]
    #[case("constant", Category::Constant)]
    #[case("keyword", Category::Other("keyword".to_string()))]
    fn test_category_from_string(#[case] input: &str, #[case] expected: Category) {
        let category: Category = input.parse().unwrap();
        check!(category == expected);
        check!(category.as_str() == input);
    }

    #[test]
    fn test_category_serializes_as_plain_string() {
        let json = serde_json::to_string(&Category::Method).unwrap();
        check!(json == "\"method\"");
        let other: Category = serde_json::from_str("\"abstract type\"").unwrap();
        check!(other == Category::Other("abstract type".to_string()));
    }

    #[test]
    fn test_anchor_with_signature() {
        let e = entry(
            "#UnfoldStats.extract_coefs-Tuple{Unfold.UnfoldModel, Any, Any}",
            "UnfoldStats.extract_coefs",
            "",
            "method",
        );
        let anchor = e.anchor().unwrap();
        check!(anchor.path == "");
        check!(anchor.symbol == "UnfoldStats.extract_coefs");
        check!(anchor.signature == Some("Tuple{Unfold.UnfoldModel, Any, Any}"));
        check!(anchor.name() == "extract_coefs");
    }

    #[rstest]
    #[case("", None)]
    #[case("#", None)]
    #[case("#UnfoldStats", Some(("UnfoldStats", None)))]
    #[case("api/#Pkg.run", Some(("Pkg.run", None)))]
    fn test_anchor_variants(#[case] location: &str, #[case] expected: Option<(&str, Option<&str>)>) {
        let e = entry(location, "x", "", "section");
        let anchor = e.anchor().map(|a| (a.symbol, a.signature));
        check!(anchor == expected);
    }

    #[test]
    fn test_document_path() {
        check!(entry("api/#Pkg.run", "x", "", "method").document() == "api/");
        check!(entry("", "x", "", "page").document() == "");
        check!(entry("guide/", "x", "", "page").document() == "guide/");
    }

    #[test]
    fn test_summary_skips_leading_blank_paragraphs() {
        let e = entry("", "f", "\n\nf(x)\n\nDoes things.\n\n\n", "method");
        check!(e.summary() == Some("f(x)"));
        check!(entry("", "Home", "", "page").summary().is_none());
    }

    #[test]
    fn test_short_title_and_symbol_flag() {
        let e = entry("#A.b-Tuple{}", "A.b", "", "method");
        check!(e.short_title() == "b");
        check!(e.is_symbol());
        check!(!entry("", "Home", "", "page").is_symbol());
    }
}
