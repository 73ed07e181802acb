//! Main `Genealogy` interface for graph operations.

use super::algorithms;
use super::payload::{Payload, PayloadSource};
use super::store::{EditLog, NodeStore};
use crate::error::{GraphError, Result};
use log::{debug, trace};

/// A genealogy graph: a DAG of payloads rooted at a single stem node.
///
/// Every node is reachable from the stem, every non-stem node has at least
/// one parent, and the stem can never be removed. All mutating operations
/// are all-or-nothing: on any error the graph is exactly as it was before
/// the call.
///
/// All mutation takes `&mut self` and runs to completion, so the borrow
/// checker rules out interleaved mutation; a host that needs shared access
/// must wrap the whole engine in its own lock.
///
/// # Example
///
/// ```
/// use genograph::{Genealogy, Payload};
///
/// struct Strain(String);
///
/// impl Payload for Strain {
///     type Id = String;
///     fn id(&self) -> String {
///         self.0.clone()
///     }
/// }
///
/// let mut graph = Genealogy::new("root".to_string(), Strain("root".into()));
/// graph.create("a".to_string(), &"root".to_string(), Strain("a".into())).unwrap();
/// assert!(graph.exists(&"a".to_string()));
/// ```
pub struct Genealogy<P: Payload> {
    stem_id: P::Id,
    store: NodeStore<P>,
}

impl<P: Payload> Genealogy<P> {
    /// Create a genealogy holding only the stem node.
    pub fn new(stem_id: P::Id, stem_payload: P) -> Self {
        debug!("creating genealogy with stem: id={stem_id}");
        let mut store = NodeStore::new();
        store.insert(stem_id.clone(), stem_payload);
        Self { stem_id, store }
    }

    /// Create a genealogy whose stem payload is built by `source`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::PayloadConstruction`] if the source fails;
    /// the construction error is propagated verbatim as the source.
    pub fn with_source<S>(stem_id: P::Id, source: &S) -> Result<Self>
    where
        S: PayloadSource<P>,
    {
        let stem_payload = source
            .build(&stem_id)
            .map_err(|e| GraphError::payload_construction(&stem_id, e))?;
        Ok(Self::new(stem_id, stem_payload))
    }

    /// The id of the stem node.
    pub fn stem_id(&self) -> &P::Id {
        &self.stem_id
    }

    /// Whether a node with this id is present. Never fails.
    pub fn exists(&self, id: &P::Id) -> bool {
        self.store.contains(id)
    }

    /// Get a node's payload by id.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotFound`] if the node doesn't exist.
    pub fn get(&self, id: &P::Id) -> Result<&P> {
        self.store
            .payload(id)
            .ok_or_else(|| GraphError::not_found(id))
    }

    /// Get a node's parent ids, sorted by id.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotFound`] if the node doesn't exist.
    pub fn parents_of(&self, id: &P::Id) -> Result<Vec<P::Id>> {
        self.store
            .parents(id)
            .map(|parents| parents.iter().cloned().collect())
            .ok_or_else(|| GraphError::not_found(id))
    }

    /// Iterate over a node's children, yielding each child's payload in
    /// sorted id order.
    ///
    /// The iterator is lazy, finite, and restartable ([`Clone`]). It borrows
    /// the graph immutably, so the graph cannot be mutated while an
    /// iteration is alive.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotFound`] if the node doesn't exist.
    pub fn children_of(&self, id: &P::Id) -> Result<Children<'_, P>> {
        self.store
            .children(id)
            .map(|children| Children {
                ids: children.iter(),
                store: &self.store,
            })
            .ok_or_else(|| GraphError::not_found(id))
    }

    /// The total number of nodes, stem included.
    pub fn node_count(&self) -> usize {
        self.store.len()
    }

    /// Iterate over all node ids, in no particular order.
    pub fn node_ids(&self) -> impl Iterator<Item = &P::Id> {
        self.store.ids()
    }

    /// Create a node with a single parent.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::AlreadyExists`] if `id` is taken, or
    /// [`GraphError::NotFound`] if the parent doesn't exist. Either way no
    /// state is changed.
    pub fn create(&mut self, id: P::Id, parent_id: &P::Id, payload: P) -> Result<()> {
        self.create_with_parents(id, std::slice::from_ref(parent_id), payload)
    }

    /// Create a node attached to every parent in `parent_ids`.
    ///
    /// Duplicate parent ids collapse to a single edge. An empty parent list
    /// is a documented no-op: the node is not created and no error is
    /// returned.
    ///
    /// Linking is incremental; if any parent turns out not to exist, every
    /// partial link already applied is undone before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::AlreadyExists`] if `id` is taken, or
    /// [`GraphError::NotFound`] if any parent doesn't exist.
    pub fn create_with_parents(&mut self, id: P::Id, parent_ids: &[P::Id], payload: P) -> Result<()> {
        if parent_ids.is_empty() {
            trace!("create with empty parent list is a no-op");
            return Ok(());
        }
        if self.store.contains(&id) {
            return Err(GraphError::already_exists(&id));
        }

        debug!("creating node: id={id}, parents={}", parent_ids.len());
        let mut log = EditLog::new();
        self.store.insert(id.clone(), payload);
        log.record_insert(id.clone());

        for parent_id in parent_ids {
            // The new id itself is not a pre-existing node, so it can never
            // serve as its own parent.
            if *parent_id == id || !self.store.contains(parent_id) {
                log.undo(&mut self.store);
                return Err(GraphError::not_found(parent_id));
            }
            if self.store.link(parent_id, &id) {
                log.record_link(parent_id.clone(), id.clone());
            }
        }

        trace!("node {id} created");
        Ok(())
    }

    /// Create a node whose payload is built by `source`.
    ///
    /// The payload is constructed before any mutation, so a construction
    /// failure leaves the graph untouched.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::PayloadConstruction`] if the source fails, plus
    /// everything [`create_with_parents`](Self::create_with_parents) can
    /// return.
    pub fn create_from<S>(&mut self, id: P::Id, parent_ids: &[P::Id], source: &S) -> Result<()>
    where
        S: PayloadSource<P>,
    {
        if parent_ids.is_empty() {
            trace!("create with empty parent list is a no-op");
            return Ok(());
        }
        if self.store.contains(&id) {
            return Err(GraphError::already_exists(&id));
        }

        let payload = source
            .build(&id)
            .map_err(|e| GraphError::payload_construction(&id, e))?;
        self.create_with_parents(id, parent_ids, payload)
    }

    /// Add `parent_id` as an additional parent of `child_id`.
    ///
    /// Idempotent: if the edge already exists the call succeeds without
    /// changing anything.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotFound`] if either node doesn't exist, or
    /// [`GraphError::WouldCycle`] if `parent_id == child_id` or `parent_id`
    /// is already a descendant of `child_id`. No state is changed on error.
    pub fn connect(&mut self, child_id: &P::Id, parent_id: &P::Id) -> Result<()> {
        let child_parents = self
            .store
            .parents(child_id)
            .ok_or_else(|| GraphError::not_found(child_id))?;
        if !self.store.contains(parent_id) {
            return Err(GraphError::not_found(parent_id));
        }

        if child_parents.contains(parent_id) {
            trace!("edge {parent_id} -> {child_id} already present");
            return Ok(());
        }
        if parent_id == child_id || algorithms::is_descendant(&self.store, parent_id, child_id) {
            return Err(GraphError::WouldCycle {
                parent: parent_id.to_string(),
                child: child_id.to_string(),
            });
        }

        debug!("connecting: parent={parent_id}, child={child_id}");
        self.store.link(parent_id, child_id);
        Ok(())
    }

    /// Remove a node, cascading to every descendant that loses its last
    /// remaining parent.
    ///
    /// The cascade is computed as a read-only fixed point first; only then
    /// does a commit pass edit the graph, so the two phases can never leave
    /// it partially edited. A descendant with any surviving parent is kept.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotFound`] if the node doesn't exist, or
    /// [`GraphError::CannotRemoveStem`] for the stem. No state is changed on
    /// error.
    pub fn remove(&mut self, id: &P::Id) -> Result<()> {
        if !self.store.contains(id) {
            return Err(GraphError::not_found(id));
        }
        if *id == self.stem_id {
            return Err(GraphError::CannotRemoveStem {
                id: id.to_string(),
            });
        }

        debug!("removing node: id={id}");
        let doomed = algorithms::removal_set(&self.store, id);

        // Commit pass: drop each record, then detach it from surviving
        // neighbors on the side that still exists.
        for node in &doomed {
            let Some(record) = self.store.remove_entry(node) else {
                continue;
            };
            for parent in &record.parents {
                if !doomed.contains(parent) {
                    self.store.unlink(parent, node);
                }
            }
            for child in &record.children {
                if !doomed.contains(child) {
                    self.store.unlink(node, child);
                }
            }
        }

        trace!("removed {} node(s)", doomed.len());
        Ok(())
    }
}

/// Lazy iterator over a node's children, yielding each child's payload.
///
/// Produced by [`Genealogy::children_of`]. Children come out in sorted id
/// order. Cloning the iterator restarts it from its current position, and
/// calling `children_of` again restarts from the beginning.
pub struct Children<'g, P: Payload> {
    ids: std::collections::btree_set::Iter<'g, P::Id>,
    store: &'g NodeStore<P>,
}

impl<'g, P: Payload> Iterator for Children<'g, P> {
    type Item = &'g P;

    fn next(&mut self) -> Option<&'g P> {
        loop {
            let id = self.ids.next()?;
            if let Some(payload) = self.store.payload(id) {
                return Some(payload);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.ids.len()))
    }
}

impl<P: Payload> Clone for Children<'_, P> {
    fn clone(&self) -> Self {
        Self {
            ids: self.ids.clone(),
            store: self.store,
        }
    }
}

impl<P: Payload> std::iter::FusedIterator for Children<'_, P> {}
