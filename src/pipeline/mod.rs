pub mod components;
pub mod extraction;
pub mod import;
pub mod mapping;
pub mod preprocess;
pub mod processor;
pub mod topics;

pub use processor::*;
