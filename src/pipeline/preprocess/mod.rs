pub mod tokenize;
pub mod vectorize;
pub mod vocabulary;

pub use tokenize::*;
pub use vectorize::*;
pub use vocabulary::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PreprocessError {
    #[error(
        "Vocabulary is empty after pruning (min_doc_freq={min_doc_freq}, \
         {n_docs} documents): corpus too small or stopword list too aggressive"
    )]
    EmptyVocabulary { min_doc_freq: usize, n_docs: usize },
}
