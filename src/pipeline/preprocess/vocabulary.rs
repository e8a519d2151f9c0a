use std::collections::HashMap;

use super::PreprocessError;

/// Corpus vocabulary: term ↔ id mapping plus document frequencies.
/// Term ids are assigned by rank (document frequency descending, term
/// ascending on ties), so identical corpora always produce identical ids.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
    doc_freq: Vec<usize>,
    pub n_docs: usize,
}

impl Vocabulary {
    /// Build the vocabulary from per-document token streams, pruning terms
    /// seen in fewer than `min_doc_freq` documents and capping the result
    /// at `max_vocabulary` terms.
    pub fn build(
        token_streams: &[Vec<String>],
        min_doc_freq: usize,
        max_vocabulary: usize,
    ) -> Result<Self, PreprocessError> {
        let mut df: HashMap<&str, usize> = HashMap::new();
        for tokens in token_streams {
            let mut seen: Vec<&str> = tokens.iter().map(|t| t.as_str()).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *df.entry(term).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(&str, usize)> = df
            .into_iter()
            .filter(|(_, freq)| *freq >= min_doc_freq)
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(max_vocabulary);

        if ranked.is_empty() {
            return Err(PreprocessError::EmptyVocabulary {
                min_doc_freq,
                n_docs: token_streams.len(),
            });
        }

        let terms: Vec<String> = ranked.iter().map(|(t, _)| t.to_string()).collect();
        let doc_freq: Vec<usize> = ranked.iter().map(|(_, f)| *f).collect();
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();

        Ok(Self {
            terms,
            index,
            doc_freq,
            n_docs: token_streams.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn id_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn term(&self, id: usize) -> &str {
        &self.terms[id]
    }

    pub fn doc_freq(&self, id: usize) -> usize {
        self.doc_freq[id]
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn streams(docs: &[&str]) -> Vec<Vec<String>> {
        docs.iter()
            .map(|d| d.split_whitespace().map(|t| t.to_string()).collect())
            .collect()
    }

    #[test]
    fn ranks_by_document_frequency_then_term() {
        let vocab = Vocabulary::build(
            &streams(&["water fish", "water nitrate", "water fish"]),
            1,
            100,
        )
        .unwrap();
        // water df=3, fish df=2, nitrate df=1
        assert_eq!(vocab.term(0), "water");
        assert_eq!(vocab.term(1), "fish");
        assert_eq!(vocab.term(2), "nitrate");
        assert_eq!(vocab.doc_freq(0), 3);
    }

    #[test]
    fn ties_break_alphabetically() {
        let vocab = Vocabulary::build(&streams(&["zebra apple"]), 1, 100).unwrap();
        assert_eq!(vocab.term(0), "apple");
        assert_eq!(vocab.term(1), "zebra");
    }

    #[test]
    fn repeated_term_in_one_doc_counts_once() {
        let vocab = Vocabulary::build(&streams(&["water water water", "fish"]), 1, 100).unwrap();
        assert_eq!(vocab.doc_freq(vocab.id_of("water").unwrap()), 1);
    }

    #[test]
    fn min_doc_freq_prunes() {
        let vocab =
            Vocabulary::build(&streams(&["water fish", "water nitrate"]), 2, 100).unwrap();
        assert_eq!(vocab.len(), 1);
        assert_eq!(vocab.term(0), "water");
        assert!(vocab.id_of("fish").is_none());
    }

    #[test]
    fn max_vocabulary_caps() {
        let vocab = Vocabulary::build(
            &streams(&["water fish nitrate", "water fish", "water"]),
            1,
            2,
        )
        .unwrap();
        assert_eq!(vocab.len(), 2);
        assert!(vocab.id_of("nitrate").is_none());
    }

    #[test]
    fn all_pruned_is_an_error() {
        let result = Vocabulary::build(&streams(&["water", "fish"]), 3, 100);
        assert!(matches!(
            result,
            Err(PreprocessError::EmptyVocabulary { .. })
        ));
    }

    #[test]
    fn identical_corpora_identical_ids() {
        let a = Vocabulary::build(&streams(&["water fish", "fish nitrate"]), 1, 100).unwrap();
        let b = Vocabulary::build(&streams(&["water fish", "fish nitrate"]), 1, 100).unwrap();
        assert_eq!(a.terms(), b.terms());
    }
}
