//! Infrastructure layer providing external service integrations.
//!
//! Seed loading, CSV export and startup configuration live here; the table
//! logic itself never touches the filesystem.

pub mod persistence;
pub mod seed;
pub mod config;

pub use persistence::*;
pub use seed::*;
pub use config::*;
