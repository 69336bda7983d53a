//! # rowlimit
//!
//! A minimal, Rust-native windowing primitive for "skip N, take M" pagination over any
//! sequential data source: an iterator, a database cursor, a stream of rows.
//!
//! ## Features
//!
//! - **Window Limiter**: O(1), allocation-free skip/take state machine driven once per item
//! - **Early Stop**: tells the caller when the window is filled and whether more rows exist
//! - **Adapters**: filter predicate, `Iterator` and `Stream` wrappers
//! - **Config**: immutable window templates loaded from YAML, JSON or query parameters
//!
//! ## Quick Start
//!
//! ```rust
//! use rowlimit::{LimitConfig, WindowExt};
//!
//! // Third page of 10
//! let page = (0..100).windowed(LimitConfig::for_page(2, 10).build()).collect_page();
//!
//! assert_eq!(page.items, (20..30).collect::<Vec<_>>());
//! assert!(page.has_more);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Callers                              │
//! │   traversal loop    filter predicate    Iterator / Stream    │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────────────────────────────────────────────────────┐
//! │                           Limit                              │
//! │   next_row()   should_output()   should_continue()           │
//! │   max_items()  total_items()                                 │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────────────────────────────────────────────────────┐
//! │        LimitConfig: YAML / JSON / query params / pages       │
//! └──────────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Window limiter and adapters
pub mod limit;

/// Window configuration loading
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use limit::{Limit, LimitConfig, Page, StreamWindowExt, WindowExt, Windowed, WindowedStream};

pub use config::{load_limit_config, load_limit_config_from_str};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
