use std::collections::HashSet;

/// Built-in English stopword list, extendable per run from config.
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "her", "has", "had", "his",
    "how", "its", "may", "our", "out", "who", "did", "get", "been", "from", "have", "this",
    "that", "with", "they", "will", "was", "were", "what", "when", "where", "which", "while",
    "would", "could", "should", "there", "their", "them", "then", "than", "these", "those",
    "some", "such", "very", "into", "over", "under", "about", "after", "before", "between",
    "because", "more", "most", "much", "many", "also", "just", "only", "other", "same", "each",
    "being", "doing", "does", "don", "own", "too", "any", "both", "down", "few", "further",
    "here", "once", "again", "against", "above", "below", "through", "during", "until", "off",
    "itself", "himself", "herself", "themselves", "yourself", "she", "him", "you", "your",
    "yours", "ours", "mine", "his", "hers", "theirs", "it", "we", "he", "is", "as", "at", "by",
    "on", "in", "of", "to", "be", "or", "an", "if", "no", "so", "up", "do", "me", "my", "us",
];

/// Stopword filter: built-in list plus user extensions.
#[derive(Debug, Clone)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    pub fn new(extra: &[String]) -> Self {
        let mut words: HashSet<String> = STOPWORDS.iter().map(|w| w.to_string()).collect();
        for word in extra {
            words.insert(word.to_lowercase());
        }
        Self { words }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::new(&[])
    }
}

/// Tokenize one document: lowercase, split on non-alphanumeric boundaries,
/// drop short tokens, pure numbers, and stopwords. Order is preserved:
/// the topic model consumes the token stream positionally.
pub fn tokenize(text: &str, min_token_len: usize, stopwords: &Stopwords) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= min_token_len)
        .filter(|t| !t.chars().all(|c| c.is_ascii_digit()))
        .filter(|t| !stopwords.contains(t))
        .map(|t| t.to_string())
        .collect()
}
