//! Shared types, error model, and configuration for docrank.
//!
//! This crate is the foundation depended on by all other docrank crates.
//! It provides:
//! - [`DocrankError`]: the unified error type
//! - Domain types ([`RawRecord`], [`Document`], [`Heading`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, ContentConfig, DEFAULT_CATEGORY_ORDER, DEFAULT_RELATED_COUNT, ListingConfig,
    config_dir, config_file_path, init_config, load_config, load_config_from,
};
pub use error::{DocrankError, Result};
pub use types::{Document, Heading, RawRecord, UNCATEGORIZED};
