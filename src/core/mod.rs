// Internal modules - not part of public API
pub(crate) mod cancel;
pub(crate) mod config;
pub(crate) mod error;
pub(crate) mod matcher;
pub(crate) mod progress;
pub(crate) mod report;
pub(crate) mod stats;
pub(crate) mod walker;


// Public API - curated exports only
pub mod api;

// Re-export key items at module level for convenience
pub use api::*;
