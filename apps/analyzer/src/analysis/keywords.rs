//! Keyword Extractor — naive frequency ranking of significant words.
//!
//! No stemming, lemmatization or n-grams. A token survives only if it is
//! purely alphabetic, longer than three characters, and not a stop word.

use std::collections::{HashMap, HashSet};

/// Number of keywords extracted from each document per analysis.
pub const DEFAULT_KEYWORD_COUNT: usize = 15;

const MIN_KEYWORD_LEN: usize = 4;

/// Punctuation that always separates tokens, even without surrounding whitespace.
const SPLIT_CHARS: &[char] = &[
    ',', ';', ':', '!', '?', '(', ')', '[', ']', '{', '}', '"', '<', '>', '“', '”',
];

#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    stop_words: HashSet<String>,
}

impl KeywordExtractor {
    pub fn new<I, S>(stop_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stop_words: stop_words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Returns up to `count` distinct lowercase words, most frequent first.
    /// Ties keep the order in which words were first seen.
    pub fn extract(&self, text: &str, count: usize) -> Vec<String> {
        if text.is_empty() || count == 0 {
            return Vec::new();
        }

        let lowered = text.to_lowercase();

        // Insertion-ordered frequency table.
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<(&str, usize)> = Vec::new();

        for token in tokenize(&lowered) {
            if !self.is_significant(token) {
                continue;
            }
            match index.get(token) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(token, counts.len());
                    counts.push((token, 1));
                }
            }
        }

        // Stable sort keeps first-seen order among equal counts.
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
            .into_iter()
            .take(count)
            .map(|(word, _)| word.to_string())
            .collect()
    }

    fn is_significant(&self, token: &str) -> bool {
        token.chars().count() >= MIN_KEYWORD_LEN
            && token.chars().all(char::is_alphabetic)
            && !self.stop_words.contains(token)
    }
}

/// Word tokenizer: splits on whitespace and hard punctuation, trims sentence
/// punctuation from token edges, then splits clitics off as their own tokens
/// (`company's` -> `company` `'s`, `wouldn't` -> `would` `n't`). Other inner
/// punctuation is kept so `node.js` or `e-mail` stay whole and later fail the
/// alphabetic check.
fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || SPLIT_CHARS.contains(&c))
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|t| !t.is_empty())
        .flat_map(split_clitic)
}

/// Clitic suffixes, matched against lowercased text. `n't` goes first so
/// `wouldn't` does not match anything shorter.
const CLITICS: &[&str] = &[
    "n't", "n’t", "'s", "'re", "'ve", "'ll", "'d", "'m", "’s", "’re", "’ve", "’ll", "’d", "’m",
];

fn split_clitic(token: &str) -> impl Iterator<Item = &str> {
    let (stem, clitic) = CLITICS
        .iter()
        .find(|c| token.len() > c.len() && token.ends_with(*c))
        .map(|c| token.split_at(token.len() - c.len()))
        .unwrap_or((token, ""));
    [stem, clitic].into_iter().filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_stop_words;

    fn extractor() -> KeywordExtractor {
        KeywordExtractor::new(parse_stop_words(include_str!(
            "../../config/stopwords_en.txt"
        )))
    }

    #[test]
    fn test_empty_text_returns_empty() {
        assert!(extractor().extract("", 15).is_empty());
    }

    #[test]
    fn test_ranks_by_frequency() {
        let text = "Rust rust RUST python python kubernetes";
        let words = extractor().extract(text, 15);
        assert_eq!(words, vec!["rust", "python", "kubernetes"]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let text = "zebra apple mango apple zebra mango";
        let words = extractor().extract(text, 15);
        assert_eq!(words, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_fewer_qualifying_words_than_requested_is_not_padded() {
        let words = extractor().extract("Senior engineer", 15);
        assert_eq!(words, vec!["senior", "engineer"]);
    }

    #[test]
    fn test_truncates_to_count() {
        let text = "alpha alpha alpha bravo bravo charlie";
        let words = extractor().extract(text, 2);
        assert_eq!(words, vec!["alpha", "bravo"]);
    }

    #[test]
    fn test_drops_stop_words_short_and_non_alphabetic_tokens() {
        let text = "Those were the days: API, SQL, python3, node.js, e-mail, C++ \
                    and 2024 ourselves themselves because";
        let words = extractor().extract(text, 15);
        assert_eq!(words, vec!["days"]);
    }

    #[test]
    fn test_never_returns_filtered_tokens() {
        let ex = extractor();
        let text = "Yourselves should've been there; \"leadership\" (leadership) \
                    team-player 10x about above below distributed systems, systems!";
        for word in ex.extract(text, 50) {
            assert!(word.chars().count() > 3, "{word} is too short");
            assert!(word.chars().all(char::is_alphabetic), "{word} is not alphabetic");
            assert!(!ex.stop_words.contains(&word), "{word} is a stop word");
        }
    }

    #[test]
    fn test_surrounding_punctuation_is_trimmed() {
        let words = extractor().extract("'leadership' leadership. (leadership)", 15);
        assert_eq!(words, vec!["leadership"]);
    }

    #[test]
    fn test_clitics_are_split_from_their_stems() {
        let words = extractor().extract(
            "The company's platform grew. Company growth. I wouldn't say it.",
            15,
        );
        assert_eq!(words, vec!["company", "platform", "grew", "growth", "would"]);
    }

    #[test]
    fn test_clitic_tokens_themselves_never_survive() {
        let tokens: Vec<&str> = tokenize("they're we've can't she'd i'm").collect();
        assert_eq!(
            tokens,
            vec!["they", "'re", "we", "'ve", "ca", "n't", "she", "'d", "i", "'m"]
        );
        assert!(extractor()
            .extract("they're we've can't she'd i'm", 15)
            .is_empty());
    }
}
