//! Window limiter module
//!
//! Supports: skip/take windows over iterators, streams and hand-written traversal loops
//!
//! # Overview
//!
//! A [`Limit`] decides, for candidates delivered one at a time, which of them fall inside a
//! `[skip, skip + max)` window and when the traversal can stop. It needs no random access and no
//! knowledge of the total size of the source. [`LimitConfig`] is the immutable template a
//! limiter is built from; the adapters drive a limiter for the common cases.

mod adapters;
mod types;

pub use adapters::{StreamWindowExt, WindowExt, Windowed, WindowedStream};
pub use types::{Limit, LimitConfig, Page};

#[cfg(test)]
mod tests;
