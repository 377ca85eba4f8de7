//! Bounded enumeration of the permutation family.

use std::collections::HashSet;

use super::node::PQNode;
use super::tree::PQTree;
use crate::Id;

/// Cap on the number of distinct orderings materialized by
/// [`PQTree::all_frontiers`].
///
/// Enumeration is exponential in the worst case (a free P-node over n
/// elements embodies n! orderings), so callers always pass an explicit cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumerationBudget {
    /// Maximum number of distinct frontiers returned.
    pub max_frontiers: usize,
}

impl EnumerationBudget {
    pub const fn new(max_frontiers: usize) -> Self {
        Self { max_frontiers }
    }
}

impl Default for EnumerationBudget {
    fn default() -> Self {
        Self {
            max_frontiers: 1000,
        }
    }
}

/// The distinct orderings a tree currently embodies.
///
/// `complete() == false` means the budget stopped the expansion: the
/// sequences present are all valid, but the family may hold more.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontiers {
    sequences: Vec<Vec<Id>>,
    complete: bool,
}

impl Frontiers {
    pub fn sequences(&self) -> &[Vec<Id>] {
        &self.sequences
    }

    pub fn into_sequences(self) -> Vec<Vec<Id>> {
        self.sequences
    }

    /// Whether the whole family was materialized.
    pub fn complete(&self) -> bool {
        self.complete
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec<Id>> {
        self.sequences.iter()
    }
}

impl PQTree {
    /// Materializes the distinct frontiers of the current tree shape.
    ///
    /// Every P-node contributes all permutations of its children, every
    /// Q-node its stored and reversed child order, composed recursively.
    /// Expansion stops at the budget and the result is flagged incomplete;
    /// truncation is never silent.
    pub fn all_frontiers(&self, budget: EnumerationBudget) -> Frontiers {
        if budget.max_frontiers == 0 {
            return Frontiers {
                sequences: Vec::new(),
                complete: false,
            };
        }
        let (sequences, complete) = enumerate(self.root(), budget.max_frontiers);
        Frontiers {
            sequences,
            complete,
        }
    }
}

/// Deduplicating, budget-aware sequence sink.
struct Collector {
    limit: usize,
    seen: HashSet<Vec<Id>>,
    out: Vec<Vec<Id>>,
    truncated: bool,
}

impl Collector {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            seen: HashSet::new(),
            out: Vec::new(),
            truncated: false,
        }
    }

    /// Returns false once the budget is exhausted; duplicates never count
    /// against the budget.
    fn push(&mut self, sequence: Vec<Id>) -> bool {
        if self.seen.contains(&sequence) {
            return true;
        }
        if self.out.len() == self.limit {
            self.truncated = true;
            return false;
        }
        self.seen.insert(sequence.clone());
        self.out.push(sequence);
        true
    }
}

fn enumerate(node: &PQNode, limit: usize) -> (Vec<Vec<Id>>, bool) {
    match node {
        PQNode::Leaf(label) => (vec![vec![label.clone()]], true),
        PQNode::P(children) => enumerate_p(children, limit),
        PQNode::Q(children) => enumerate_q(children, limit),
    }
}

fn child_options(children: &[PQNode], limit: usize) -> (Vec<Vec<Vec<Id>>>, bool) {
    let mut complete = true;
    let mut options = Vec::with_capacity(children.len());
    for child in children {
        let (sequences, child_complete) = enumerate(child, limit);
        complete &= child_complete;
        options.push(sequences);
    }
    (options, complete)
}

fn enumerate_p(children: &[PQNode], limit: usize) -> (Vec<Vec<Id>>, bool) {
    let (options, children_complete) = child_options(children, limit);
    let mut collector = Collector::new(limit);
    let mut order: Vec<usize> = (0..options.len()).collect();
    permute(&mut order, 0, &mut |permutation| {
        let ordered: Vec<&Vec<Vec<Id>>> = permutation.iter().map(|&i| &options[i]).collect();
        cross(&ordered, &mut collector)
    });
    let complete = children_complete && !collector.truncated;
    (collector.out, complete)
}

fn enumerate_q(children: &[PQNode], limit: usize) -> (Vec<Vec<Id>>, bool) {
    let (options, children_complete) = child_options(children, limit);
    let mut collector = Collector::new(limit);
    let forward: Vec<&Vec<Vec<Id>>> = options.iter().collect();
    if cross(&forward, &mut collector) {
        let reversed: Vec<&Vec<Vec<Id>>> = options.iter().rev().collect();
        cross(&reversed, &mut collector);
    }
    let complete = children_complete && !collector.truncated;
    (collector.out, complete)
}

/// Visits every permutation of `indices`, stopping early when the visitor
/// returns false.
fn permute<F>(indices: &mut [usize], k: usize, visit: &mut F) -> bool
where
    F: FnMut(&[usize]) -> bool,
{
    if k == indices.len() {
        return visit(indices);
    }
    for i in k..indices.len() {
        indices.swap(k, i);
        if !permute(indices, k + 1, visit) {
            indices.swap(k, i);
            return false;
        }
        indices.swap(k, i);
    }
    true
}

/// Concatenates one choice per child, in the given child order, feeding
/// every combination to the collector.
fn cross(options: &[&Vec<Vec<Id>>], collector: &mut Collector) -> bool {
    let mut prefix = Vec::new();
    cross_rec(options, 0, &mut prefix, collector)
}

fn cross_rec(
    options: &[&Vec<Vec<Id>>],
    depth: usize,
    prefix: &mut Vec<Id>,
    collector: &mut Collector,
) -> bool {
    if depth == options.len() {
        return collector.push(prefix.clone());
    }
    for choice in options[depth] {
        let checkpoint = prefix.len();
        prefix.extend(choice.iter().cloned());
        let keep_going = cross_rec(options, depth + 1, prefix, collector);
        prefix.truncate(checkpoint);
        if !keep_going {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pqtree::TreeError;

    fn seqs(frontiers: &Frontiers) -> Vec<Vec<Id>> {
        let mut v = frontiers.sequences().to_vec();
        v.sort();
        v
    }

    fn ids(labels: &[&str]) -> Vec<Id> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_leaf_has_one_frontier() {
        let tree = PQTree::new(["only"]).unwrap();
        let frontiers = tree.all_frontiers(EnumerationBudget::default());
        assert!(frontiers.complete());
        assert_eq!(frontiers.sequences(), &[ids(&["only"])]);
    }

    #[test]
    fn free_p_node_yields_all_permutations() {
        let tree = PQTree::new(["a", "b", "c"]).unwrap();
        let frontiers = tree.all_frontiers(EnumerationBudget::default());
        assert!(frontiers.complete());
        assert_eq!(frontiers.len(), 6);
        assert_eq!(
            seqs(&frontiers),
            vec![
                ids(&["a", "b", "c"]),
                ids(&["a", "c", "b"]),
                ids(&["b", "a", "c"]),
                ids(&["b", "c", "a"]),
                ids(&["c", "a", "b"]),
                ids(&["c", "b", "a"]),
            ]
        );
    }

    #[test]
    fn q_node_yields_forward_and_reversed_order() {
        let tree = PQTree::from_root(PQNode::q(vec![
            PQNode::leaf("a"),
            PQNode::leaf("b"),
            PQNode::leaf("c"),
        ]))
        .unwrap();
        let frontiers = tree.all_frontiers(EnumerationBudget::default());
        assert!(frontiers.complete());
        assert_eq!(
            seqs(&frontiers),
            vec![ids(&["a", "b", "c"]), ids(&["c", "b", "a"])]
        );
    }

    #[test]
    fn nested_choices_multiply() {
        let tree = PQTree::from_root(PQNode::p(vec![
            PQNode::leaf("a"),
            PQNode::q(vec![PQNode::leaf("b"), PQNode::leaf("c")]),
        ]))
        .unwrap();
        let frontiers = tree.all_frontiers(EnumerationBudget::default());
        assert!(frontiers.complete());
        assert_eq!(
            seqs(&frontiers),
            vec![
                ids(&["a", "b", "c"]),
                ids(&["a", "c", "b"]),
                ids(&["b", "c", "a"]),
                ids(&["c", "b", "a"]),
            ]
        );
    }

    #[test]
    fn exact_budget_is_still_complete() {
        let tree = PQTree::new(["a", "b", "c"]).unwrap();
        let frontiers = tree.all_frontiers(EnumerationBudget::new(6));
        assert!(frontiers.complete());
        assert_eq!(frontiers.len(), 6);
    }

    #[test]
    fn budget_truncates_and_flags_partial() {
        let elements: Vec<String> = (1..=10).map(|i| format!("s{i}")).collect();
        let tree = PQTree::new(elements).unwrap();

        let frontiers = tree.all_frontiers(EnumerationBudget::new(50));
        assert!(!frontiers.complete());
        assert_eq!(frontiers.len(), 50);

        // every returned sequence is still a permutation of the universe
        for f in frontiers.sequences() {
            let mut sorted = f.clone();
            sorted.sort();
            assert_eq!(sorted.len(), 10);
            assert!(tree.universe().iter().all(|id| sorted.contains(id)));
        }
    }

    #[test]
    fn zero_budget_returns_empty_partial_set() {
        let tree = PQTree::new(["a", "b"]).unwrap();
        let frontiers = tree.all_frontiers(EnumerationBudget::new(0));
        assert!(frontiers.is_empty());
        assert!(!frontiers.complete());
    }

    #[test]
    fn from_root_empty_tree_is_rejected() {
        assert_eq!(
            PQTree::from_root(PQNode::p(Vec::new())).unwrap_err(),
            TreeError::EmptyUniverse
        );
    }
}
