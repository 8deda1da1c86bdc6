pub(crate) mod executor;
pub(crate) mod operation;
pub(crate) mod repository;
pub(crate) mod runner;

// Public API - curated exports only
pub mod api;

pub use api::*;
