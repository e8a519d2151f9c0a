pub mod lda;
pub mod model;

pub use lda::*;
pub use model::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TopicModelError {
    #[error("topic_count must be at least 1")]
    InvalidTopicCount,

    #[error("topic_count ({topic_count}) exceeds vocabulary size ({vocab_size})")]
    TopicCountExceedsVocabulary {
        topic_count: usize,
        vocab_size: usize,
    },

    #[error("Corpus token stream is empty — nothing to model")]
    EmptyTokenStream,
}
