//! # genograph
//!
//! A transactional genealogy graph engine: a mutable, multi-parent DAG in
//! which every node descends from a single fixed root (the **stem**).
//!
//! ## Core Principles
//!
//! - **Payload Agnostic**: Bring your own node type, we handle the graph
//! - **All-or-Nothing**: A failed mutation leaves the graph untouched
//! - **No Orphans**: Removal cascades exactly to nodes losing their last parent
//! - **Zero Magic**: Explicit over implicit, always
//!
//! ## Architecture
//!
//! genograph is organized in layers:
//!
//! ```text
//! Host application (payload type, payload source)
//!     ↓
//! Mutation engine (create, connect, remove with rollback)
//!     ↓
//! Traversal (removal-set fixed point, ancestry checks)
//!     ↓
//! Node store + edge index (payload arena, parent/child id sets)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use genograph::{Genealogy, Payload};
//!
//! struct Strain(&'static str);
//!
//! impl Payload for Strain {
//!     type Id = &'static str;
//!     fn id(&self) -> &'static str {
//!         self.0
//!     }
//! }
//!
//! let mut graph = Genealogy::new("root", Strain("root"));
//! graph.create("a", &"root", Strain("a")).unwrap();
//! graph.create("b", &"root", Strain("b")).unwrap();
//! graph.create_with_parents("c", &["a", "b"], Strain("c")).unwrap();
//!
//! // "c" keeps a parent after "a" goes, so it survives the cascade.
//! graph.remove(&"a").unwrap();
//! assert!(graph.exists(&"c"));
//! assert_eq!(graph.parents_of(&"c").unwrap(), vec!["b"]);
//! ```
//!
//! The engine is single-threaded by design: every mutation takes `&mut self`
//! and runs to completion. Hosts that need shared access wrap the whole graph
//! in their own lock.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod graph;

// Re-export main types
pub use error::{GraphError, Result};
pub use graph::{Children, Genealogy, Payload, PayloadSource};
