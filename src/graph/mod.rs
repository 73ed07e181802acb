//! Core graph types and operations.
//!
//! This module defines the fundamental building blocks:
//! - [`Payload`]: Capability trait for caller-supplied node payloads
//! - [`Genealogy`]: The mutation engine and main graph interface
//! - [`Children`]: Lazy iterator over a node's child payloads

mod algorithms;
mod genealogy;
mod payload;
mod store;

pub use genealogy::{Children, Genealogy};
pub use payload::{Payload, PayloadSource};
