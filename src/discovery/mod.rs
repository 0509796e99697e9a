//! Gateway discovery: indexing connections, finding a flow's references, and turning
//! gateway-backed connections into usage records.

pub mod extractor;
pub mod index;
pub mod registry;
pub mod resolver;
pub mod usage;

pub use extractor::*;
pub use index::*;
pub use registry::*;
pub use resolver::*;
pub use usage::*;
