//! Capability traits for caller-supplied node payloads.
//!
//! The engine never inspects payload contents; it only needs each payload to
//! expose its own id, and optionally a way to build a payload from an id.

use std::fmt::Display;
use std::hash::Hash;

/// A node payload stored in the genealogy graph.
///
/// Payloads are opaque to the engine. The only requirement is that a payload
/// can report its own identifier, and that the identifier type is cheap to
/// clone, hashable, totally ordered, and printable (ids appear in error
/// messages and log lines).
///
/// The engine trusts that `id()` agrees with the id the payload was stored
/// under; it never re-verifies the pairing.
pub trait Payload {
    /// Identifier type keying this payload in the graph.
    type Id: Clone + Eq + Ord + Hash + Display;

    /// The payload's own identifier.
    fn id(&self) -> Self::Id;
}

/// A factory capable of constructing a payload from just an id.
///
/// Used by [`Genealogy::with_source`] and [`Genealogy::create_from`] when the
/// host wants the engine to drive payload construction. Construction errors
/// are propagated verbatim as [`GraphError::PayloadConstruction`].
///
/// [`Genealogy::with_source`]: crate::Genealogy::with_source
/// [`Genealogy::create_from`]: crate::Genealogy::create_from
/// [`GraphError::PayloadConstruction`]: crate::GraphError::PayloadConstruction
pub trait PayloadSource<P: Payload> {
    /// Error produced when construction fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build a payload for the given id.
    fn build(&self, id: &P::Id) -> std::result::Result<P, Self::Error>;
}
