mod chunker;
mod document;
mod policy;

pub use chunker::*;
pub use document::*;
pub use policy::*;
