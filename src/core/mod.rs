//! Example resolution.
//!
//! This module contains:
//! - Resolver: path dispatch for stock, catalog and saved examples
//! - Saving: size-capped writes to the remote store

pub mod resolver;

pub use resolver::{ExampleError, Resolver, MAX_SAVED_BYTES};
