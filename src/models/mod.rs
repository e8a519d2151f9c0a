pub mod backbone;
pub mod document;
pub mod enums;
pub mod mapping;
pub mod svo;
pub mod topic;

pub use backbone::*;
pub use document::*;
pub use enums::*;
pub use mapping::*;
pub use svo::*;
pub use topic::*;
