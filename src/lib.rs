//! # filecontent - Idempotent file content management
//!
//! filecontent makes sure a text file at a given path holds exactly the
//! content you ask for. It creates the file when it is missing, rewrites it
//! when the content differs and leaves it alone otherwise. A check (dry-run)
//! mode reports the same decision without touching the filesystem.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────┐      ┌──────────────────────────┐
//! │   CLI (apply / check)    │      │  Module protocol (JSON)  │
//! └────────────┬─────────────┘      └────────────┬─────────────┘
//!              │                                 │ invocation
//!              │        ┌────────────────────┐   │
//!              │        │  Module Registry   │   │
//!              │        │  (file_content)    │   │
//!              │        └─────────┬──────────┘   │
//!              ▼                  ▼              ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                 Reconciler (reconcile)                  │
//! │        observe → compare → write (apply only)           │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! use filecontent::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let request = Request::new("/etc/motd", "Welcome!\n")?.with_dry_run(true);
//!     let result = reconcile(&request)?;
//!     println!("{} (changed: {})", result.message, result.changed);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod prelude {
    //! Convenient re-exports of commonly used types and traits.

    pub use crate::error::{Error, Result};
    pub use crate::invocation::{invoke, parse_args, ModuleArgs};
    pub use crate::modules::{Module, ModuleContext, ModuleOutput, ModuleRegistry};
    pub use crate::reconcile::{reconcile, Outcome, Reconciliation, Request};
}

/// Error types and result aliases.
pub mod error;

/// Typed argument boundary for host-driven module invocations.
pub mod invocation;

/// Module trait, registry, and the `file_content` module.
pub mod modules;

/// The idempotent read-compare-write reconciler.
pub mod reconcile;

/// Returns the filecontent version string.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
