//! Latent Dirichlet Allocation via collapsed Gibbs sampling.
//!
//! The sampler is fully deterministic for a fixed seed: documents and token
//! positions are visited in order, and all randomness flows from one seeded
//! StdRng. The iteration budget is the convergence guard; there is no
//! adaptive stopping.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::model::TopicModel;
use super::TopicModelError;

/// Sampler parameters. `alpha` and `beta` are symmetric Dirichlet priors
/// over document-topic and topic-term distributions.
#[derive(Debug, Clone)]
pub struct LdaParams {
    pub topic_count: usize,
    pub iterations: usize,
    pub alpha: f64,
    pub beta: f64,
    pub seed: u64,
}

/// Fit LDA over per-document term-id streams.
pub fn fit(
    token_streams: &[Vec<usize>],
    vocab_size: usize,
    params: &LdaParams,
) -> Result<TopicModel, TopicModelError> {
    let k = params.topic_count;
    if k == 0 {
        return Err(TopicModelError::InvalidTopicCount);
    }
    if k > vocab_size {
        return Err(TopicModelError::TopicCountExceedsVocabulary {
            topic_count: k,
            vocab_size,
        });
    }

    let n_docs = token_streams.len();
    let total_tokens: usize = token_streams.iter().map(|s| s.len()).sum();
    if total_tokens == 0 {
        return Err(TopicModelError::EmptyTokenStream);
    }

    tracing::info!(
        documents = n_docs,
        tokens = total_tokens,
        topics = k,
        iterations = params.iterations,
        seed = params.seed,
        "Fitting topic model"
    );

    let mut rng = StdRng::seed_from_u64(params.seed);

    // Count matrices
    let mut doc_topic = vec![vec![0usize; k]; n_docs];
    let mut topic_term = vec![vec![0usize; vocab_size]; k];
    let mut topic_total = vec![0usize; k];

    // Initial random assignment
    let mut assignments: Vec<Vec<usize>> = Vec::with_capacity(n_docs);
    for (d, stream) in token_streams.iter().enumerate() {
        let mut doc_assignments = Vec::with_capacity(stream.len());
        for &w in stream {
            let z = rng.gen_range(0..k);
            doc_topic[d][z] += 1;
            topic_term[z][w] += 1;
            topic_total[z] += 1;
            doc_assignments.push(z);
        }
        assignments.push(doc_assignments);
    }

    let beta_sum = params.beta * vocab_size as f64;
    let mut weights = vec![0.0f64; k];

    for iteration in 0..params.iterations {
        for (d, stream) in token_streams.iter().enumerate() {
            for (pos, &w) in stream.iter().enumerate() {
                let z_old = assignments[d][pos];
                doc_topic[d][z_old] -= 1;
                topic_term[z_old][w] -= 1;
                topic_total[z_old] -= 1;

                let mut total = 0.0;
                for (z, weight) in weights.iter_mut().enumerate() {
                    *weight = (doc_topic[d][z] as f64 + params.alpha)
                        * (topic_term[z][w] as f64 + params.beta)
                        / (topic_total[z] as f64 + beta_sum);
                    total += *weight;
                }

                let mut u = rng.gen::<f64>() * total;
                let mut z_new = k - 1;
                for (z, &weight) in weights.iter().enumerate() {
                    u -= weight;
                    if u <= 0.0 {
                        z_new = z;
                        break;
                    }
                }

                doc_topic[d][z_new] += 1;
                topic_term[z_new][w] += 1;
                topic_total[z_new] += 1;
                assignments[d][pos] = z_new;
            }
        }

        if (iteration + 1) % 50 == 0 {
            tracing::debug!(iteration = iteration + 1, "Gibbs sweep complete");
        }
    }

    Ok(TopicModel::from_counts(
        &doc_topic,
        &topic_term,
        params.alpha,
        params.beta,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_corpus() -> Vec<Vec<usize>> {
        // Two themes: terms {0,1} co-occur, terms {2,3} co-occur
        vec![
            vec![0, 1, 0, 1, 0],
            vec![0, 1, 1, 0],
            vec![2, 3, 2, 3, 2],
            vec![2, 3, 3, 2],
        ]
    }

    fn params(seed: u64) -> LdaParams {
        LdaParams {
            topic_count: 2,
            iterations: 100,
            alpha: 0.1,
            beta: 0.01,
            seed,
        }
    }

    #[test]
    fn same_seed_same_model() {
        let corpus = tiny_corpus();
        let a = fit(&corpus, 4, &params(7)).unwrap();
        let b = fit(&corpus, 4, &params(7)).unwrap();
        assert_eq!(a.topic_term, b.topic_term);
        assert_eq!(a.doc_topic, b.doc_topic);
    }

    #[test]
    fn separates_cooccurring_terms() {
        let corpus = tiny_corpus();
        let model = fit(&corpus, 4, &params(7)).unwrap();
        // Terms 0 and 1 should land in the same dominant topic, 2 and 3 in
        // the other.
        let dominant = |term: usize| -> usize {
            (0..2)
                .max_by(|&a, &b| {
                    model.topic_term[a][term]
                        .partial_cmp(&model.topic_term[b][term])
                        .unwrap()
                })
                .unwrap()
        };
        assert_eq!(dominant(0), dominant(1));
        assert_eq!(dominant(2), dominant(3));
        assert_ne!(dominant(0), dominant(2));
    }

    #[test]
    fn distributions_are_normalized() {
        let corpus = tiny_corpus();
        let model = fit(&corpus, 4, &params(7)).unwrap();
        for topic in &model.topic_term {
            let sum: f64 = topic.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9);
        }
        for doc in &model.doc_topic {
            let sum: f64 = doc.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn zero_topics_rejected() {
        let mut p = params(7);
        p.topic_count = 0;
        assert!(matches!(
            fit(&tiny_corpus(), 4, &p),
            Err(TopicModelError::InvalidTopicCount)
        ));
    }

    #[test]
    fn more_topics_than_vocabulary_rejected() {
        let mut p = params(7);
        p.topic_count = 10;
        assert!(matches!(
            fit(&tiny_corpus(), 4, &p),
            Err(TopicModelError::TopicCountExceedsVocabulary { .. })
        ));
    }

    #[test]
    fn empty_stream_rejected() {
        let corpus: Vec<Vec<usize>> = vec![vec![], vec![]];
        assert!(matches!(
            fit(&corpus, 4, &params(7)),
            Err(TopicModelError::EmptyTokenStream)
        ));
    }

    #[test]
    fn empty_documents_tolerated_among_full_ones() {
        let corpus = vec![vec![0, 1, 0], vec![], vec![2, 3, 2]];
        let model = fit(&corpus, 4, &params(7)).unwrap();
        assert_eq!(model.doc_topic.len(), 3);
        // The empty document falls back to the uniform prior
        let uniform = 1.0 / 2.0;
        for &w in &model.doc_topic[1] {
            assert!((w - uniform).abs() < 1e-9);
        }
    }
}
