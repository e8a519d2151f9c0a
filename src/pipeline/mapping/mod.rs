pub mod backbone;
pub mod svo;

pub use backbone::*;
pub use svo::*;

/// Case-insensitive whole-word containment: `needle` must appear in
/// `haystack` with non-alphanumeric (or string-edge) boundaries on both
/// sides. Both inputs are expected lowercased.
pub(crate) fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    for (start, _) in haystack.match_indices(needle) {
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map(|c| !c.is_alphanumeric())
            .unwrap_or(true);
        let after_ok = haystack[start + needle.len()..]
            .chars()
            .next()
            .map(|c| !c.is_alphanumeric())
            .unwrap_or(true);
        if before_ok && after_ok {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::contains_word;

    #[test]
    fn matches_whole_words_only() {
        assert!(contains_word("the stream temperature rose", "temperature"));
        assert!(contains_word("stream temperature", "stream temperature"));
        assert!(!contains_word("streamflow dropped", "stream"));
        assert!(!contains_word("uptemperature", "temperature"));
    }

    #[test]
    fn matches_at_string_edges() {
        assert!(contains_word("nitrate", "nitrate"));
        assert!(contains_word("nitrate levels", "nitrate"));
        assert!(contains_word("high nitrate", "nitrate"));
    }

    #[test]
    fn punctuation_is_a_boundary() {
        assert!(contains_word("reduce nitrate, then monitor", "nitrate"));
        assert!(contains_word("(salinity)", "salinity"));
    }

    #[test]
    fn empty_needle_never_matches() {
        assert!(!contains_word("anything", ""));
    }
}
