use std::collections::HashMap;

use crate::models::Snippet;

/// Immutable-per-generation mapping from shortcut to replacement text.
///
/// A table is built wholesale from the full snippet list and swapped out
/// atomically when the configuration changes; nothing mutates it afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnippetTable {
    entries: HashMap<String, String>,
    max_shortcut_len: usize,
}

impl SnippetTable {
    /// Build a table from a snippet list. Entries are inserted in list
    /// order, so a later entry for a duplicate shortcut silently wins.
    ///
    /// Entries with an empty shortcut are skipped; an empty key occurs in
    /// every window and can never be typed.
    pub fn build(snippets: &[Snippet]) -> Self {
        let mut entries = HashMap::with_capacity(snippets.len());
        for snippet in snippets {
            if snippet.shortcut.is_empty() {
                continue;
            }
            entries.insert(snippet.shortcut.clone(), snippet.text.clone());
        }

        let max_shortcut_len = entries
            .keys()
            .map(|shortcut| shortcut.chars().count())
            .max()
            .unwrap_or(0);

        Self {
            entries,
            max_shortcut_len,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Character count of the longest shortcut, 0 for an empty table.
    /// This is the cap for the match window.
    pub fn max_shortcut_len(&self) -> usize {
        self.max_shortcut_len
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn replacement(&self, shortcut: &str) -> Option<&str> {
        self.entries.get(shortcut).map(String::as_str)
    }

    /// Find the shortcut to fire for the given window contents, testing
    /// each shortcut for occurrence anywhere in the window.
    ///
    /// Map iteration order is arbitrary, so when several shortcuts match at
    /// once the winner is chosen deterministically: the longest shortcut,
    /// ties broken by the lexicographically smallest one.
    pub fn best_match(&self, window: &str) -> Option<(&str, &str)> {
        self.entries
            .iter()
            .filter(|(shortcut, _)| window.contains(shortcut.as_str()))
            .max_by(|(a, _), (b, _)| {
                a.chars()
                    .count()
                    .cmp(&b.chars().count())
                    .then_with(|| b.cmp(a))
            })
            .map(|(shortcut, text)| (shortcut.as_str(), text.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(shortcut: &str, text: &str) -> Snippet {
        Snippet::new(shortcut.to_string(), text.to_string())
    }

    #[test]
    fn build_computes_max_shortcut_len_in_characters() {
        let table = SnippetTable::build(&[
            snippet("brb", "be right back"),
            snippet("omw", "on my way"),
            snippet("sig", "Kind regards"),
        ]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.max_shortcut_len(), 3);
    }

    #[test]
    fn max_len_counts_chars_not_bytes() {
        // "grüß" is 4 characters but 6 bytes in UTF-8.
        let table = SnippetTable::build(&[snippet("grüß", "Grüße aus Berlin")]);
        assert_eq!(table.max_shortcut_len(), 4);
    }

    #[test]
    fn empty_table_has_zero_cap() {
        let table = SnippetTable::build(&[]);
        assert!(table.is_empty());
        assert_eq!(table.max_shortcut_len(), 0);
        assert_eq!(table.best_match("anything"), None);
    }

    #[test]
    fn duplicate_shortcut_last_write_wins() {
        let table = SnippetTable::build(&[snippet("a", "1"), snippet("a", "2")]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.replacement("a"), Some("2"));
    }

    #[test]
    fn build_is_idempotent_over_the_same_list() {
        let list = vec![
            snippet("brb", "be right back"),
            snippet("brb", "back soon"),
            snippet("omw", "on my way"),
        ];
        assert_eq!(SnippetTable::build(&list), SnippetTable::build(&list));
    }

    #[test]
    fn empty_shortcuts_are_skipped() {
        let table = SnippetTable::build(&[snippet("", "nope"), snippet("ok", "fine")]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.max_shortcut_len(), 2);
        assert_eq!(table.best_match("zzz"), None);
    }

    #[test]
    fn best_match_finds_shortcut_anywhere_in_window() {
        let table = SnippetTable::build(&[snippet("brb", "be right back")]);
        assert_eq!(
            table.best_match("xbrbx"),
            Some(("brb", "be right back"))
        );
        assert_eq!(table.best_match("brx"), None);
    }

    #[test]
    fn best_match_prefers_longest_then_smallest() {
        let table = SnippetTable::build(&[
            snippet("aa", "short"),
            snippet("aaa", "long"),
            snippet("aab", "other"),
        ]);
        // Longest wins over its own prefix.
        assert_eq!(table.best_match("xaaa"), Some(("aaa", "long")));
        // Equal lengths: lexicographically smallest wins.
        assert_eq!(table.best_match("aaab"), Some(("aaa", "long")));
        assert_eq!(table.best_match("aab"), Some(("aab", "other")));
    }
}
