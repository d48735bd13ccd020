//! Core types and trait definitions for the Campus document service.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! document store and the identity provider are both expressed as traits so
//! the HTTP layer never depends on a concrete backend or SDK.

pub mod building;
pub mod document;
pub mod error;
pub mod floor;
pub mod form;
pub mod identity;
pub mod memory;
pub mod model;
pub mod resource;
pub mod store;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
