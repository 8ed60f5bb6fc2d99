//! Core module - Shared types and utilities
//!
//! This module provides:
//! - Settings threaded through the backends
//! - Backend error type
//! - Rendering of cached documents
//! - Path and hashing helpers
//! - Logging setup

pub mod error;
pub mod logging;
pub mod paths;
pub mod render;
pub mod settings;
pub mod util;
