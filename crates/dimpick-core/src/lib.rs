#![forbid(unsafe_code)]

//! Core: input events, hit-test geometry, and logging for dimpick.

pub mod event;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace};
