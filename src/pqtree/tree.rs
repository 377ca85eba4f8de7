//! The PQ-tree wrapper: construction, frontier access, reordering.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;

use super::error::TreeError;
use super::node::PQNode;
use crate::Id;

/// A PQ-tree over a fixed element universe.
///
/// Freshly built trees have a single P-node root with one leaf per element:
/// no constraints, every permutation allowed. Reductions reshape the
/// interior; the universe never changes for the lifetime of the tree.
///
/// # Examples
///
/// ```
/// use pq_timetable::pqtree::PQTree;
///
/// let mut tree = PQTree::new(["s1", "s2", "s3", "s4"]).unwrap();
/// tree.reduce(&["s2".into(), "s3".into()]).unwrap();
///
/// let frontier = tree.frontier();
/// let p2 = frontier.iter().position(|id| id == "s2").unwrap();
/// let p3 = frontier.iter().position(|id| id == "s3").unwrap();
/// assert_eq!(p2.abs_diff(p3), 1);
/// ```
#[derive(Debug, Clone)]
pub struct PQTree {
    root: PQNode,
    universe: BTreeSet<Id>,
}

impl PQTree {
    /// Builds the unconstrained tree: a P-node root with one leaf per element.
    pub fn new<I, S>(elements: I) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Id>,
    {
        let mut universe = BTreeSet::new();
        let mut leaves = Vec::new();
        for element in elements {
            let id: Id = element.into();
            if !universe.insert(id.clone()) {
                return Err(TreeError::DuplicateElement(id));
            }
            leaves.push(PQNode::Leaf(id));
        }
        if leaves.is_empty() {
            return Err(TreeError::EmptyUniverse);
        }
        let root = if leaves.len() == 1 {
            leaves.remove(0)
        } else {
            PQNode::P(leaves)
        };
        Ok(Self { root, universe })
    }

    /// Wraps an explicitly assembled root, normalizing degenerate nodes.
    ///
    /// Fails if the leaves do not form a duplicate-free, non-empty universe.
    pub fn from_root(root: PQNode) -> Result<Self, TreeError> {
        let mut universe = BTreeSet::new();
        let mut duplicate = None;
        root.visit_leaves(&mut |label| {
            if duplicate.is_none() && !universe.insert(label.clone()) {
                duplicate = Some(label.clone());
            }
        });
        if let Some(label) = duplicate {
            return Err(TreeError::DuplicateElement(label));
        }
        match root.normalized() {
            Some(root) => Ok(Self { root, universe }),
            None => Err(TreeError::EmptyUniverse),
        }
    }

    /// The element set the tree was built over.
    pub fn universe(&self) -> &BTreeSet<Id> {
        &self.universe
    }

    /// Number of elements in the universe.
    pub fn len(&self) -> usize {
        self.universe.len()
    }

    pub fn is_empty(&self) -> bool {
        self.universe.is_empty()
    }

    pub fn contains(&self, element: &str) -> bool {
        self.universe.contains(element)
    }

    pub fn root(&self) -> &PQNode {
        &self.root
    }

    pub(crate) fn root_mut(&mut self) -> &mut PQNode {
        &mut self.root
    }

    /// The current left-to-right leaf sequence (one representative ordering).
    pub fn frontier(&self) -> Vec<Id> {
        let mut out = Vec::with_capacity(self.universe.len());
        self.root.frontier_into(&mut out);
        out
    }

    /// Picks an equivalent ordering at random: shuffles every P-node's
    /// children and reverses each Q-node with probability 1/2.
    ///
    /// The permutation family is unchanged; only the representative
    /// [`frontier`](Self::frontier) moves. The caller supplies the random
    /// source, so seeded generators give reproducible orderings.
    pub fn reorder<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        fn reorder_node<R: Rng + ?Sized>(node: &mut PQNode, rng: &mut R) {
            match node {
                PQNode::Leaf(_) => {}
                PQNode::P(children) => {
                    children.shuffle(rng);
                    for child in children {
                        reorder_node(child, rng);
                    }
                }
                PQNode::Q(children) => {
                    if rng.gen_bool(0.5) {
                        children.reverse();
                    }
                    for child in children {
                        reorder_node(child, rng);
                    }
                }
            }
        }
        reorder_node(&mut self.root, rng);
    }
}
