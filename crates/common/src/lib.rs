//! Shared configuration, error taxonomy and wire types for the review watcher.

pub mod config;
pub mod error;
pub mod types;
