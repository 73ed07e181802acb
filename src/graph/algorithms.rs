//! Read-only traversals over the node store.
//!
//! Both traversals here are pure: they inspect adjacency but never mutate it.
//! `remove` leans on that separation — the cascade is fully computed before a
//! single edge changes, so a traversal bug can never leave the graph
//! partially edited.

use super::payload::Payload;
use super::store::NodeStore;
use std::collections::{HashSet, VecDeque};

/// Compute the full removal set for `target` as a fixed point.
///
/// A node other than the target enters the set iff **every** one of its
/// parents is already in the set. Whenever a node is admitted, its children
/// are re-queued, so a child whose last surviving parent was just swallowed
/// gets re-checked against its full parent set. A node with any parent
/// outside the set survives.
///
/// The caller guarantees `target` exists and is not the stem.
pub(crate) fn removal_set<P: Payload>(store: &NodeStore<P>, target: &P::Id) -> HashSet<P::Id> {
    let mut doomed = HashSet::new();
    doomed.insert(target.clone());

    let mut queue: VecDeque<P::Id> = store
        .children(target)
        .into_iter()
        .flatten()
        .cloned()
        .collect();

    while let Some(candidate) = queue.pop_front() {
        if doomed.contains(&candidate) {
            continue;
        }

        let all_parents_doomed = store
            .parents(&candidate)
            .is_some_and(|parents| parents.iter().all(|parent| doomed.contains(parent)));

        if all_parents_doomed {
            doomed.insert(candidate.clone());
            if let Some(children) = store.children(&candidate) {
                queue.extend(children.iter().cloned());
            }
        }
    }

    doomed
}

/// Whether `node` is reachable from `of` via one or more child edges.
///
/// Backs the `connect` cycle guard: adding the edge `parent -> child` is
/// rejected when `parent` is already a descendant of `child`.
pub(crate) fn is_descendant<P: Payload>(store: &NodeStore<P>, node: &P::Id, of: &P::Id) -> bool {
    let mut visited = HashSet::new();
    let mut queue: VecDeque<P::Id> = store.children(of).into_iter().flatten().cloned().collect();

    while let Some(current) = queue.pop_front() {
        if current == *node {
            return true;
        }
        if !visited.insert(current.clone()) {
            continue;
        }
        if let Some(children) = store.children(&current) {
            queue.extend(children.iter().cloned());
        }
    }

    false
}
