//! Types shared by the cadlex error and logging facilities
//!
//! - [`RequestId`] correlates a batch or an executed instruction with its
//!   log events and returned errors.
//! - [`schema`] holds the canonical log field keys and event names.

pub mod correlation;
pub mod schema;

pub use correlation::RequestId;
