//! Cache module - Manages the JSON response cache
//!
//! Provides:
//! - Response storage keyed by request (store)
//! - Recursive enumeration of cached documents (scan)
//! - The inspect, search and rm commands

pub mod inspect;
pub mod remove;
pub mod scan;
pub mod search;
pub mod store;
