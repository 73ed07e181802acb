//! Shared fixtures for integration tests.

#![allow(dead_code)]

use genograph::{Genealogy, Payload, PayloadSource};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use thiserror::Error;

/// Minimal test payload: remembers its id and a human-readable label.
#[derive(Debug, Clone, PartialEq)]
pub struct Specimen {
    pub id: String,
    pub label: String,
}

impl Specimen {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            label: format!("specimen {id}"),
        }
    }
}

impl Payload for Specimen {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }
}

/// Construction error produced by [`SpecimenSource`].
#[derive(Debug, Error)]
#[error("refusing to build {0}")]
pub struct BuildRefused(pub String);

/// Payload source that can be told to fail for one specific id.
#[derive(Default)]
pub struct SpecimenSource {
    pub fail_on: Option<String>,
}

impl PayloadSource<Specimen> for SpecimenSource {
    type Error = BuildRefused;

    fn build(&self, id: &String) -> Result<Specimen, BuildRefused> {
        if self.fail_on.as_deref() == Some(id.as_str()) {
            Err(BuildRefused(id.clone()))
        } else {
            Ok(Specimen::new(id))
        }
    }
}

/// A graph holding just the stem node `"root"`.
pub fn seeded() -> Genealogy<Specimen> {
    Genealogy::new("root".to_string(), Specimen::new("root"))
}

pub fn id(s: &str) -> String {
    s.to_string()
}

/// Full observable state: for each id, its sorted parent and child id lists.
///
/// Used to verify the rollback law — a failed operation must leave the
/// snapshot bit-for-bit identical.
pub fn snapshot(graph: &Genealogy<Specimen>) -> BTreeMap<String, (Vec<String>, Vec<String>)> {
    graph
        .node_ids()
        .map(|node| {
            let parents = graph.parents_of(node).unwrap();
            let children: Vec<String> = graph
                .children_of(node)
                .unwrap()
                .map(|child| child.id.clone())
                .collect();
            (node.clone(), (parents, children))
        })
        .collect()
}

/// Assert every structural invariant of the genealogy:
/// parent/child mutual consistency, the stem being the only parentless node,
/// and every node being reachable from the stem.
pub fn assert_invariants(graph: &Genealogy<Specimen>) {
    let ids: BTreeSet<String> = graph.node_ids().cloned().collect();
    let stem = graph.stem_id().clone();
    assert!(ids.contains(&stem), "stem missing from store");
    assert_eq!(ids.len(), graph.node_count());

    for node in &ids {
        assert!(graph.exists(node));
        let parents = graph.parents_of(node).unwrap();
        if *node == stem {
            assert!(parents.is_empty(), "stem must have no parents");
        } else {
            assert!(!parents.is_empty(), "non-stem node {node} has no parents");
        }

        for parent in &parents {
            let back: Vec<String> = graph
                .children_of(parent)
                .unwrap()
                .map(|child| child.id.clone())
                .collect();
            assert!(
                back.contains(node),
                "{parent} is a parent of {node} but lacks the child edge"
            );
        }
        for child in graph.children_of(node).unwrap() {
            assert!(
                graph.parents_of(&child.id).unwrap().contains(node),
                "{node} has child {} without the parent edge",
                child.id
            );
        }
    }

    let mut seen = BTreeSet::from([stem.clone()]);
    let mut queue = VecDeque::from([stem]);
    while let Some(current) = queue.pop_front() {
        for child in graph.children_of(&current).unwrap() {
            if seen.insert(child.id.clone()) {
                queue.push_back(child.id.clone());
            }
        }
    }
    assert_eq!(seen, ids, "unreachable nodes survive in the store");
}
