pub mod document;
pub mod model;
pub mod snapshot;
pub mod source;

pub use document::*;
pub use model::*;
pub use snapshot::*;
pub use source::*;
