//! Core types and shared functionality for subgrab.
//!
//! This crate provides:
//! - Filesystem response cache with time-bounded staleness
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;

pub use cache::CacheStore;
pub use config::AppConfig;
pub use error::{Element, Error};
