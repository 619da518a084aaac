//! # Pattern Catalog
//!
//! Runnable demonstrations of classic object-oriented design patterns,
//! each reworked into the shape Rust prefers.
//!
//! ## Patterns Covered
//!
//! 1. **Builder** - a director drives interchangeable house builders
//! 2. **Chain of Responsibility** - registration checks linked in order
//! 3. **Command** - a toggle button holding on/off commands
//! 4. **Factory Method** - a model key resolved to a car or an error
//! 5. **State** - a two-state machine expressed as a transition table
//! 6. **Strategy** - a bounded cache with FIFO, LRU and LFU eviction
//! 7. **Visitor** - area and perimeter over a closed set of shapes
//!
//! ## Running the Demos
//!
//! ```bash
//! cargo run -- list
//! cargo run -- run strategy
//! cargo run -- --config catalog.toml run all
//! ```
//!
//! Every demo writes its transcript to an `io::Write`, so tests can run
//! them against a `Vec<u8>`.

pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod patterns;

pub use catalog::{run_all, run_demo, DemoKind};
pub use config::CatalogConfig;
pub use error::{PatternError, Result};
