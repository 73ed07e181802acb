//! Node store and edge index: the single source of truth for node existence,
//! payload ownership, and parent/child adjacency.
//!
//! Adjacency is kept as plain id sets, never owning handles, so parent/child
//! cross-references can never keep a node alive: a node is destroyed exactly
//! when its record leaves the store.

use super::payload::Payload;
use log::trace;
use std::collections::{BTreeSet, HashMap};
use std::fmt::Display;
use std::hash::Hash;

/// A stored node: the owned payload plus both sides of the edge index.
#[derive(Debug)]
pub(crate) struct NodeRecord<P: Payload> {
    pub(crate) payload: P,
    pub(crate) parents: BTreeSet<P::Id>,
    pub(crate) children: BTreeSet<P::Id>,
}

impl<P: Payload> NodeRecord<P> {
    fn new(payload: P) -> Self {
        Self {
            payload,
            parents: BTreeSet::new(),
            children: BTreeSet::new(),
        }
    }
}

/// Arena of node records keyed by id.
///
/// `BTreeSet` adjacency gives deterministic, sorted iteration for
/// `parents_of` and children views.
#[derive(Debug)]
pub(crate) struct NodeStore<P: Payload> {
    nodes: HashMap<P::Id, NodeRecord<P>>,
}

impl<P: Payload> NodeStore<P> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn ids(&self) -> impl Iterator<Item = &P::Id> {
        self.nodes.keys()
    }

    pub(crate) fn contains(&self, id: &P::Id) -> bool {
        self.nodes.contains_key(id)
    }

    pub(crate) fn payload(&self, id: &P::Id) -> Option<&P> {
        self.nodes.get(id).map(|record| &record.payload)
    }

    pub(crate) fn parents(&self, id: &P::Id) -> Option<&BTreeSet<P::Id>> {
        self.nodes.get(id).map(|record| &record.parents)
    }

    pub(crate) fn children(&self, id: &P::Id) -> Option<&BTreeSet<P::Id>> {
        self.nodes.get(id).map(|record| &record.children)
    }

    /// Insert a fresh record with empty adjacency. The id must be vacant.
    pub(crate) fn insert(&mut self, id: P::Id, payload: P) {
        debug_assert!(!self.nodes.contains_key(&id));
        self.nodes.insert(id, NodeRecord::new(payload));
    }

    /// Drop a record, returning it so the caller can inspect its adjacency.
    pub(crate) fn remove_entry(&mut self, id: &P::Id) -> Option<NodeRecord<P>> {
        self.nodes.remove(id)
    }

    /// Add the parent->child edge on both sides as a paired unit.
    ///
    /// Both records are checked before either side changes; either both the
    /// parent-side and child-side entries change, or neither does. Returns
    /// `false` if the edge was already present.
    pub(crate) fn link(&mut self, parent: &P::Id, child: &P::Id) -> bool {
        debug_assert!(self.nodes.contains_key(parent));
        debug_assert!(self.nodes.contains_key(child));
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return false;
        }

        let newly_added = self
            .nodes
            .get_mut(parent)
            .map(|record| record.children.insert(child.clone()))
            .unwrap_or(false);

        if let Some(record) = self.nodes.get_mut(child) {
            record.parents.insert(parent.clone());
        }

        newly_added
    }

    /// Remove the parent->child edge on both sides as a paired unit.
    ///
    /// Missing records are tolerated so the commit pass of a removal can
    /// unlink against records that are themselves being dropped.
    pub(crate) fn unlink(&mut self, parent: &P::Id, child: &P::Id) -> bool {
        let mut removed = false;

        if let Some(record) = self.nodes.get_mut(parent) {
            removed |= record.children.remove(child);
        }

        if let Some(record) = self.nodes.get_mut(child) {
            removed |= record.parents.remove(parent);
        }

        removed
    }
}

/// One reversible step applied to the store.
#[derive(Debug)]
pub(crate) enum Edit<Id> {
    /// A record was inserted under `id`.
    Insert { id: Id },
    /// The parent->child edge was added.
    Link { parent: Id, child: Id },
}

/// Reversible record of the steps a mutation has applied so far.
///
/// A mutation records each step as it goes; on failure the engine unwinds the
/// log in reverse, restoring the store to its pre-call state. On success the
/// log is simply dropped.
#[derive(Debug)]
pub(crate) struct EditLog<Id> {
    edits: Vec<Edit<Id>>,
}

impl<Id: Clone + Eq + Ord + Hash + Display> EditLog<Id> {
    pub(crate) fn new() -> Self {
        Self { edits: Vec::new() }
    }

    pub(crate) fn record_insert(&mut self, id: Id) {
        self.edits.push(Edit::Insert { id });
    }

    pub(crate) fn record_link(&mut self, parent: Id, child: Id) {
        self.edits.push(Edit::Link { parent, child });
    }

    /// Undo every recorded step, most recent first.
    pub(crate) fn undo<P: Payload<Id = Id>>(self, store: &mut NodeStore<P>) {
        trace!("unwinding {} partial edit(s)", self.edits.len());
        for edit in self.edits.into_iter().rev() {
            match edit {
                Edit::Insert { id } => {
                    store.remove_entry(&id);
                }
                Edit::Link { parent, child } => {
                    store.unlink(&parent, &child);
                }
            }
        }
    }
}
