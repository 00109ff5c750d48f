//! Read-only, ordered collection of documentation entries.

use crate::entry::{Category, DocEntry};
use std::sync::Arc;
use xxhash_rust::xxh3::xxh3_64;

/// A loaded documentation search index.
///
/// Entries keep documentation build order. The collection is immutable once
/// built; reloading produces a new `SearchIndex` rather than mutating one.
/// Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchIndex {
    entries: Arc<[DocEntry]>,
}

/// Entries sharing a page name, in first-appearance order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageGroup {
    pub page: String,
    /// Positions into [`SearchIndex::entries`], ascending.
    pub positions: Vec<usize>,
}

impl SearchIndex {
    pub fn new(entries: Vec<DocEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    pub fn entries(&self) -> &[DocEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&DocEntry> {
        self.entries.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DocEntry> {
        self.entries.iter()
    }

    /// Group entries by page name.
    pub fn pages(&self) -> Vec<PageGroup> {
        let mut groups: Vec<PageGroup> = Vec::new();
        for (position, entry) in self.entries.iter().enumerate() {
            match groups.iter_mut().find(|g| g.page == entry.page) {
                Some(group) => group.positions.push(position),
                None => groups.push(PageGroup {
                    page: entry.page.clone(),
                    positions: vec![position],
                }),
            }
        }
        groups
    }

    pub fn by_category<'a>(
        &'a self,
        category: &'a Category,
    ) -> impl Iterator<Item = (usize, &'a DocEntry)> + 'a {
        self.entries
            .iter()
            .enumerate()
            .filter(move |(_, entry)| &entry.category == category)
    }

    /// Find entries by title, case-insensitively.
    ///
    /// Matches either the full title (`UnfoldStats.extract_coefs`) or the
    /// title without its module qualifier (`extract_coefs`).
    pub fn find_title(&self, title: &str) -> Vec<(usize, &DocEntry)> {
        let title = title.trim();
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| {
                entry.title.eq_ignore_ascii_case(title)
                    || entry.short_title().eq_ignore_ascii_case(title)
            })
            .collect()
    }

    /// Content hash of the canonical payload serialization.
    pub fn fingerprint(&self) -> u64 {
        xxh3_64(crate::payload::to_json(self).as_bytes())
    }
}

impl<'a> IntoIterator for &'a SearchIndex {
    type Item = &'a DocEntry;
    type IntoIter = std::slice::Iter<'a, DocEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<DocEntry> for SearchIndex {
    fn from_iter<I: IntoIterator<Item = DocEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    fn entry(page: &str, title: &str, category: Category) -> DocEntry {
        DocEntry {
            location: String::new(),
            page: page.to_string(),
            title: title.to_string(),
            text: String::new(),
            category,
        }
    }

    fn sample() -> SearchIndex {
        SearchIndex::from_iter([
            entry("Home", "Home", Category::Page),
            entry("API", "Pkg.run", Category::Method),
            entry("Home", "Pkg", Category::Section),
            entry("API", "Pkg.stop", Category::Function),
        ])
    }

    #[test]
    fn test_pages_in_first_appearance_order() {
        let pages = sample().pages();
        check!(pages.len() == 2);
        check!(pages[0].page == "Home");
        check!(pages[0].positions == vec![0, 2]);
        check!(pages[1].page == "API");
        check!(pages[1].positions == vec![1, 3]);
    }

    #[test]
    fn test_by_category() {
        let index = sample();
        let methods: Vec<_> = index.by_category(&Category::Method).map(|(i, _)| i).collect();
        check!(methods == vec![1]);
    }

    #[test]
    fn test_find_title_qualified_and_short() {
        let index = sample();
        check!(index.find_title("Pkg.run").len() == 1);
        check!(index.find_title("run").len() == 1);
        check!(index.find_title("STOP")[0].0 == 3);
        check!(index.find_title("missing").is_empty());
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let a = sample();
        let b = sample();
        check!(a.fingerprint() == b.fingerprint());

        let c = SearchIndex::from_iter(a.iter().skip(1).cloned());
        check!(a.fingerprint() != c.fingerprint());
    }

    #[test]
    fn test_clone_shares_entries() {
        let a = sample();
        let b = a.clone();
        check!(std::ptr::eq(a.entries().as_ptr(), b.entries().as_ptr()));
    }
}
