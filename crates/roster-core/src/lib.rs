//! Core types and trait definitions for the roster recruitment service.
//!
//! This crate is deliberately free of HTTP and database dependencies;
//! everything here is plain data plus the store abstraction over it.

pub mod candidate;
pub mod email;
pub mod error;
pub mod identity;
pub mod query;
pub mod store;

pub use error::{Error, Result};
