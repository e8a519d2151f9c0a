use crate::models::{Topic, TopicTerm};
use crate::pipeline::preprocess::Vocabulary;

/// Fitted topic model: normalized topic-term and document-topic
/// distributions.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicModel {
    /// K x V, rows sum to 1.
    pub topic_term: Vec<Vec<f64>>,
    /// D x K, rows sum to 1.
    pub doc_topic: Vec<Vec<f64>>,
}

impl TopicModel {
    /// Normalize raw Gibbs counts into posterior mean distributions with
    /// the symmetric priors folded in.
    pub fn from_counts(
        doc_topic_counts: &[Vec<usize>],
        topic_term_counts: &[Vec<usize>],
        alpha: f64,
        beta: f64,
    ) -> Self {
        let k = topic_term_counts.len();

        let topic_term = topic_term_counts
            .iter()
            .map(|row| {
                let vocab_size = row.len();
                let total: f64 = row.iter().sum::<usize>() as f64 + beta * vocab_size as f64;
                row.iter().map(|&c| (c as f64 + beta) / total).collect()
            })
            .collect();

        let doc_topic = doc_topic_counts
            .iter()
            .map(|row| {
                let total: f64 = row.iter().sum::<usize>() as f64 + alpha * k as f64;
                row.iter().map(|&c| (c as f64 + alpha) / total).collect()
            })
            .collect();

        Self {
            topic_term,
            doc_topic,
        }
    }

    pub fn topic_count(&self) -> usize {
        self.topic_term.len()
    }

    /// Materialize `Topic` records with the top-N terms per topic and the
    /// per-document membership weights.
    pub fn topics(&self, vocab: &Vocabulary, top_n: usize) -> Vec<Topic> {
        (0..self.topic_count())
            .map(|topic_id| {
                let row = &self.topic_term[topic_id];
                let mut ranked: Vec<(usize, f64)> =
                    row.iter().copied().enumerate().collect();
                ranked.sort_by(|a, b| {
                    b.1.partial_cmp(&a.1)
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then_with(|| a.0.cmp(&b.0))
                });
                ranked.truncate(top_n);

                Topic {
                    id: topic_id,
                    top_terms: ranked
                        .into_iter()
                        .map(|(term_id, weight)| TopicTerm {
                            term: vocab.term(term_id).to_string(),
                            weight,
                        })
                        .collect(),
                    document_weights: self
                        .doc_topic
                        .iter()
                        .map(|doc| doc[topic_id])
                        .collect(),
                }
            })
            .collect()
    }
}
