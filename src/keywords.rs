//! Case-insensitive keyword matching over configurable tables.

use aho_corasick::{AhoCorasick, BuildError, MatchKind};

/// Keywords shorter than this are acronyms ("ai", "crm") and always need a
/// whole-word match, even in prefix mode.
const MIN_PREFIX_LEN: usize = 4;

/// A compiled keyword table.
///
/// Matches are case-insensitive and must start on a word boundary, so `api`
/// does not fire inside `rapid`. By default a match must also end on a word
/// boundary, allowing a plural `s`/`es`. Prefix tables drop the trailing
/// boundary for longer keywords so `chat` matches `chatbot`.
pub struct KeywordSet<'k> {
    matcher: AhoCorasick,
    keywords: &'k [String],
    prefixes: bool,
}

impl<'k> KeywordSet<'k> {
    /// Compile a table of whole-word keywords.
    pub fn new(keywords: &'k [String]) -> Result<Self, BuildError> {
        Self::build(keywords, false)
    }

    /// Compile a table whose keywords also match as word prefixes.
    pub fn word_prefixes(keywords: &'k [String]) -> Result<Self, BuildError> {
        Self::build(keywords, true)
    }

    fn build(keywords: &'k [String], prefixes: bool) -> Result<Self, BuildError> {
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(keywords)?;
        Ok(Self {
            matcher,
            keywords,
            prefixes,
        })
    }

    /// Distinct keywords present in `text`, in table order.
    ///
    /// Overlapping keywords all count: "inventory management" reports both
    /// `inventory` and `inventory management`.
    pub fn find(&self, text: &str) -> Vec<&'k str> {
        let mut hit = vec![false; self.keywords.len()];
        for m in self.matcher.find_overlapping_iter(text) {
            let id = m.pattern().as_usize();
            if m.start() < m.end() && self.accepts(text, m.start(), m.end(), id) {
                hit[id] = true;
            }
        }

        self.keywords
            .iter()
            .zip(hit)
            .filter_map(|(keyword, hit)| hit.then_some(keyword.as_str()))
            .collect()
    }

    /// Whether any keyword of the table is present in `text`.
    pub fn contains_any(&self, text: &str) -> bool {
        !self.find(text).is_empty()
    }

    fn accepts(&self, text: &str, start: usize, end: usize, id: usize) -> bool {
        let bytes = text.as_bytes();
        if start > 0 && bytes[start - 1].is_ascii_alphanumeric() {
            return false;
        }
        if self.prefixes && self.keywords[id].len() >= MIN_PREFIX_LEN {
            return true;
        }
        ends_word(&bytes[end..])
    }
}

/// Whether a match followed by `rest` ends a word, allowing a plural.
fn ends_word(rest: &[u8]) -> bool {
    let boundary = |i: usize| rest.get(i).is_none_or(|b| !b.is_ascii_alphanumeric());
    let at = |i: usize, c: u8| rest.get(i).is_some_and(|b| b.to_ascii_lowercase() == c);

    boundary(0) || (at(0, b's') && boundary(1)) || (at(0, b'e') && at(1, b's') && boundary(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_case_insensitive_whole_words() {
        let keywords = table(&["api", "chat"]);
        let set = KeywordSet::new(&keywords).unwrap();

        assert_eq!(set.find("Public API for partners"), vec!["api"]);
        assert!(set.find("Rapid prototyping").is_empty());
        assert_eq!(set.find("Live CHAT widget"), vec!["chat"]);
    }

    #[test]
    fn test_overlapping_keywords_all_count() {
        let keywords = table(&["inventory", "inventory management", "warehouse"]);
        let set = KeywordSet::new(&keywords).unwrap();

        assert_eq!(
            set.find("Inventory management"),
            vec!["inventory", "inventory management"]
        );
        assert_eq!(
            set.find("Warehouse inventory"),
            vec!["inventory", "warehouse"]
        );
    }

    #[test]
    fn test_plurals_match_whole_words() {
        let keywords = table(&["dashboard", "marketplace", "api"]);
        let set = KeywordSet::new(&keywords).unwrap();

        assert_eq!(set.find("Admin dashboards"), vec!["dashboard"]);
        assert_eq!(set.find("Two marketplaces"), vec!["marketplace"]);
        assert_eq!(set.find("Partner APIs"), vec!["api"]);
        assert!(set.find("Dashboarding").is_empty());
    }

    #[test]
    fn test_word_prefixes() {
        let keywords = table(&["chat", "ai", "dashboard"]);
        let set = KeywordSet::word_prefixes(&keywords).unwrap();

        assert_eq!(set.find("Chatbot support"), vec!["chat"]);
        assert_eq!(set.find("Dashboarding tools"), vec!["dashboard"]);
        // Short keywords stay whole words.
        assert!(set.find("Airline booking").is_empty());
        assert_eq!(set.find("AI assistant"), vec!["ai"]);
        // The leading boundary still applies.
        assert!(set.find("Webchat").is_empty());
    }

    #[test]
    fn test_hyphenated_and_punctuated_keywords() {
        let keywords = table(&["real-time", "angular.js", "php 5"]);
        let set = KeywordSet::new(&keywords).unwrap();

        assert_eq!(set.find("real-time updates"), vec!["real-time"]);
        assert_eq!(set.find("Angular.js frontend"), vec!["angular.js"]);
        assert_eq!(set.find("PHP 5.6 backend"), vec!["php 5"]);
        assert!(set.find("PHP 56").is_empty());
    }

    #[test]
    fn test_empty_keyword_ignored() {
        let keywords = table(&["", "cart"]);
        let set = KeywordSet::new(&keywords).unwrap();
        assert_eq!(set.find("cart"), vec!["cart"]);
        assert!(!set.contains_any("nothing here"));
    }
}
