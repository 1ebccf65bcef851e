//! Sequential batch engine
//!
//! `items -> dispatcher (builder + engine, per item) -> aggregator -> report`

pub mod aggregator;
pub mod cancel;
pub mod dispatcher;
pub mod item;

pub use aggregator::aggregate;
pub use cancel::CancellationToken;
pub use dispatcher::{BatchOptions, Dispatcher};
pub use item::{BatchReport, ItemError, ItemErrorKind, ItemOutcome, ItemResult, ItemSpec};
