use super::vocabulary::Vocabulary;

/// Vectorized corpus: per-document term-id streams (for the topic model)
/// and L2-normalized TF-IDF weights (for reporting).
#[derive(Debug, Clone)]
pub struct DocumentVectors {
    /// In-vocabulary term ids per document, order and multiplicity kept.
    pub token_streams: Vec<Vec<usize>>,
    /// Sparse TF-IDF vectors: (term id, weight), sorted by weight descending.
    pub tfidf: Vec<Vec<(usize, f64)>>,
}

/// Map token streams through the vocabulary and compute TF-IDF weights.
/// Out-of-vocabulary tokens are dropped.
pub fn vectorize(token_streams: &[Vec<String>], vocab: &Vocabulary) -> DocumentVectors {
    let id_streams: Vec<Vec<usize>> = token_streams
        .iter()
        .map(|tokens| tokens.iter().filter_map(|t| vocab.id_of(t)).collect())
        .collect();

    let n_docs = vocab.n_docs as f64;
    let tfidf = id_streams
        .iter()
        .map(|stream| {
            let mut counts: Vec<(usize, usize)> = Vec::new();
            let mut sorted = stream.clone();
            sorted.sort_unstable();
            for id in sorted {
                match counts.last_mut() {
                    Some((last_id, n)) if *last_id == id => *n += 1,
                    _ => counts.push((id, 1)),
                }
            }

            let mut weights: Vec<(usize, f64)> = counts
                .iter()
                .map(|&(id, tf)| {
                    // Smoothed idf, never negative even for df == n_docs
                    let idf = ((1.0 + n_docs) / (1.0 + vocab.doc_freq(id) as f64)).ln() + 1.0;
                    (id, tf as f64 * idf)
                })
                .collect();

            // L2 normalize
            let norm: f64 = weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, w) in &mut weights {
                    *w /= norm;
                }
            }

            weights.sort_by(|a, b| {
                b.1.partial_cmp(&a.1)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.0.cmp(&b.0))
            });
            weights
        })
        .collect();

    DocumentVectors {
        token_streams: id_streams,
        tfidf,
    }
}
