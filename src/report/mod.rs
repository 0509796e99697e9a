pub mod aggregator;
pub mod export;
pub mod summary;

pub use aggregator::*;
pub use export::*;
pub use summary::*;
