//! Bottom-up template reduction.
//!
//! [`PQTree::reduce`] restricts the permutation family so that a subset of
//! the universe appears contiguously in every remaining frontier. Each node
//! of the pertinent subtree is classified as empty, full, or partial with
//! respect to the subset, then rebuilt by the template matching that
//! classification. The whole operation is transactional: it either commits
//! a restructured root or leaves the tree untouched.

use std::collections::BTreeSet;

use tracing::trace;

use super::error::ReduceError;
use super::node::PQNode;
use super::tree::PQTree;
use crate::Id;

/// Outcome of a successful reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    /// The tree was restructured to enforce the constraint.
    Applied,
    /// The constraint already held; the tree is unchanged.
    AlreadySatisfied,
}

impl PQTree {
    /// Restricts the tree so every remaining frontier keeps `subset` contiguous.
    ///
    /// Subsets of size 0 or 1 and the full universe are trivially satisfied.
    /// Re-applying a constraint that already holds returns
    /// [`Reduction::AlreadySatisfied`] with no structural change.
    ///
    /// On any error the tree is left exactly as it was before the call, so
    /// callers may probe alternative constraints freely.
    pub fn reduce(&mut self, subset: &[Id]) -> Result<Reduction, ReduceError> {
        let mut set: BTreeSet<&str> = BTreeSet::new();
        for id in subset {
            if !self.contains(id) {
                return Err(ReduceError::UnknownElement(id.clone()));
            }
            if !set.insert(id.as_str()) {
                return Err(ReduceError::DuplicateElement(id.clone()));
            }
        }
        if set.len() <= 1 || set.len() == self.len() {
            return Ok(Reduction::AlreadySatisfied);
        }

        // Work on a clone; commit only on success.
        let (root, changed) = reduce_toward_pertinent_root(self.root().clone(), &set)?;
        *self.root_mut() = root;
        Ok(if changed {
            Reduction::Applied
        } else {
            Reduction::AlreadySatisfied
        })
    }
}

/// Leaves of `node` that fall inside the subset.
fn count_in(node: &PQNode, set: &BTreeSet<&str>) -> usize {
    match node {
        PQNode::Leaf(label) => usize::from(set.contains(label.as_str())),
        PQNode::P(children) | PQNode::Q(children) => {
            children.iter().map(|c| count_in(c, set)).sum()
        }
    }
}

/// Descends to the pertinent root, the deepest node whose subtree holds the
/// whole subset, and applies the root templates there. Ancestors of the
/// pertinent root need no change.
fn reduce_toward_pertinent_root(
    node: PQNode,
    set: &BTreeSet<&str>,
) -> Result<(PQNode, bool), ReduceError> {
    match node {
        PQNode::Leaf(_) => Ok((node, false)),
        PQNode::P(mut children) => match holder_of_all(&children, set) {
            Some(i) => {
                let changed = descend(&mut children, i, set)?;
                Ok((PQNode::P(children), changed))
            }
            None => apply_p_root(children, set),
        },
        PQNode::Q(mut children) => match holder_of_all(&children, set) {
            Some(i) => {
                let changed = descend(&mut children, i, set)?;
                Ok((PQNode::Q(children), changed))
            }
            None => apply_q_root(children, set),
        },
    }
}

fn holder_of_all(children: &[PQNode], set: &BTreeSet<&str>) -> Option<usize> {
    children.iter().position(|c| count_in(c, set) == set.len())
}

fn descend(
    children: &mut [PQNode],
    index: usize,
    set: &BTreeSet<&str>,
) -> Result<bool, ReduceError> {
    let taken = std::mem::replace(&mut children[index], PQNode::P(Vec::new()));
    let (node, changed) = reduce_toward_pertinent_root(taken, set)?;
    children[index] = node;
    Ok(changed)
}

/// A subtree after non-root template processing.
enum Reduced {
    /// No subset leaves below; node intact.
    Empty(PQNode),
    /// Only subset leaves below; node intact.
    Full(PQNode),
    /// Mixed subtree, rebuilt as the child list of a Q-node whose frontier
    /// reads empty block first, full block last.
    Partial(Vec<PQNode>),
}

enum Mark {
    Empty,
    Full,
    Partial,
}

impl Reduced {
    fn mark(&self) -> Mark {
        match self {
            Reduced::Empty(_) => Mark::Empty,
            Reduced::Full(_) => Mark::Full,
            Reduced::Partial(_) => Mark::Partial,
        }
    }
}

/// Wraps sibling blocks under one P-node, or passes a single node through.
fn group(mut nodes: Vec<PQNode>) -> PQNode {
    if nodes.len() == 1 {
        nodes.remove(0)
    } else {
        PQNode::P(nodes)
    }
}

fn reduce_subtree(node: PQNode, set: &BTreeSet<&str>) -> Result<Reduced, ReduceError> {
    match node {
        PQNode::Leaf(label) => Ok(if set.contains(label.as_str()) {
            Reduced::Full(PQNode::Leaf(label))
        } else {
            Reduced::Empty(PQNode::Leaf(label))
        }),
        PQNode::P(children) => reduce_p_subtree(children, set),
        PQNode::Q(children) => reduce_q_subtree(children, set),
    }
}

/// Non-root P templates: full children group freely; at most one partial
/// child may sit on the boundary between the empty and full blocks.
fn reduce_p_subtree(children: Vec<PQNode>, set: &BTreeSet<&str>) -> Result<Reduced, ReduceError> {
    let mut empties = Vec::new();
    let mut fulls = Vec::new();
    let mut partial: Option<Vec<PQNode>> = None;

    for child in children {
        match reduce_subtree(child, set)? {
            Reduced::Empty(n) => empties.push(n),
            Reduced::Full(n) => fulls.push(n),
            Reduced::Partial(boundary) => {
                if partial.is_some() {
                    trace!("unsatisfiable: interior P-node with two partial children");
                    return Err(ReduceError::Unsatisfiable);
                }
                partial = Some(boundary);
            }
        }
    }

    if partial.is_none() {
        if fulls.is_empty() {
            return Ok(Reduced::Empty(group(empties)));
        }
        if empties.is_empty() {
            return Ok(Reduced::Full(group(fulls)));
        }
    }

    // Empty block, then the partial boundary, then the full block.
    let mut out = Vec::new();
    if !empties.is_empty() {
        out.push(group(empties));
    }
    if let Some(boundary) = partial {
        out.extend(boundary);
    }
    if !fulls.is_empty() {
        out.push(group(fulls));
    }
    Ok(Reduced::Partial(out))
}

/// Non-root Q pattern: up to whole-node reversal, the children must read as
/// an empty run, at most one partial at the boundary, then a full run.
fn edge_oriented(marks: &[Mark]) -> bool {
    let mut in_full_zone = false;
    for mark in marks {
        match mark {
            Mark::Empty if !in_full_zone => {}
            Mark::Partial if !in_full_zone => in_full_zone = true,
            Mark::Full => in_full_zone = true,
            _ => return false,
        }
    }
    true
}

/// Flattens validated children into a Q child list, splicing partials.
fn splice(reduced: Vec<Reduced>) -> Vec<PQNode> {
    let mut out = Vec::new();
    for r in reduced {
        match r {
            Reduced::Empty(n) | Reduced::Full(n) => out.push(n),
            Reduced::Partial(children) => out.extend(children),
        }
    }
    out
}

fn uniform_node(r: Reduced) -> Option<PQNode> {
    match r {
        Reduced::Empty(n) | Reduced::Full(n) => Some(n),
        Reduced::Partial(_) => None,
    }
}

fn reduce_q_subtree(children: Vec<PQNode>, set: &BTreeSet<&str>) -> Result<Reduced, ReduceError> {
    let mut reduced = Vec::with_capacity(children.len());
    for child in children {
        reduced.push(reduce_subtree(child, set)?);
    }

    if reduced.iter().all(|r| matches!(r, Reduced::Empty(_))) {
        let nodes = reduced.into_iter().filter_map(uniform_node).collect();
        return Ok(Reduced::Empty(PQNode::Q(nodes)));
    }
    if reduced.iter().all(|r| matches!(r, Reduced::Full(_))) {
        let nodes = reduced.into_iter().filter_map(uniform_node).collect();
        return Ok(Reduced::Full(PQNode::Q(nodes)));
    }

    let marks: Vec<Mark> = reduced.iter().map(Reduced::mark).collect();
    if edge_oriented(&marks) {
        return Ok(Reduced::Partial(splice(reduced)));
    }
    let mut reversed: Vec<Mark> = marks;
    reversed.reverse();
    if edge_oriented(&reversed) {
        reduced.reverse();
        return Ok(Reduced::Partial(splice(reduced)));
    }

    trace!("unsatisfiable: interior Q-node interleaves full and empty children");
    Err(ReduceError::Unsatisfiable)
}

/// Root P templates: group the full block (plus up to two boundary partials
/// spliced into a Q) under one child; empty children stay free.
fn apply_p_root(
    children: Vec<PQNode>,
    set: &BTreeSet<&str>,
) -> Result<(PQNode, bool), ReduceError> {
    let mut empties = Vec::new();
    let mut fulls = Vec::new();
    let mut partials: Vec<Vec<PQNode>> = Vec::new();

    for child in children {
        match reduce_subtree(child, set)? {
            Reduced::Empty(n) => empties.push(n),
            Reduced::Full(n) => fulls.push(n),
            Reduced::Partial(boundary) => partials.push(boundary),
        }
    }

    if partials.len() > 2 {
        trace!("unsatisfiable: pertinent P-root with more than two partial children");
        return Err(ReduceError::Unsatisfiable);
    }
    if partials.is_empty() && empties.is_empty() {
        // The whole subtree is the subset; nothing to enforce.
        return Ok((group(fulls), false));
    }

    let mut block: Vec<PQNode> = Vec::new();
    let mut partials = partials.into_iter();
    if let Some(opening) = partials.next() {
        // Empty side outward, full side toward the block.
        block.extend(opening);
    }
    if !fulls.is_empty() {
        block.push(group(fulls));
    }
    if let Some(mut closing) = partials.next() {
        closing.reverse();
        block.extend(closing);
    }
    let block = if block.len() == 1 {
        block.remove(0)
    } else {
        PQNode::Q(block)
    };

    if empties.is_empty() {
        Ok((block, true))
    } else {
        let mut out = empties;
        out.push(block);
        Ok((PQNode::P(out), true))
    }
}

/// Root Q template: the full children must form one run, with at most one
/// partial child on each edge of that run.
fn apply_q_root(
    children: Vec<PQNode>,
    set: &BTreeSet<&str>,
) -> Result<(PQNode, bool), ReduceError> {
    let mut reduced = Vec::with_capacity(children.len());
    for child in children {
        reduced.push(reduce_subtree(child, set)?);
    }

    enum Zone {
        Lead,
        Block,
        Tail,
    }
    let mut zone = Zone::Lead;
    let mut changed = false;
    let mut out = Vec::new();

    for r in reduced {
        match r {
            Reduced::Empty(n) => {
                if matches!(zone, Zone::Block) {
                    zone = Zone::Tail;
                }
                out.push(n);
            }
            Reduced::Full(n) => {
                if matches!(zone, Zone::Tail) {
                    trace!("unsatisfiable: pertinent Q-root splits the full run");
                    return Err(ReduceError::Unsatisfiable);
                }
                zone = Zone::Block;
                out.push(n);
            }
            Reduced::Partial(mut boundary) => {
                changed = true;
                match zone {
                    Zone::Lead => {
                        // Opening boundary: empty side outward.
                        zone = Zone::Block;
                        out.extend(boundary);
                    }
                    Zone::Block => {
                        // Closing boundary: full side toward the run.
                        zone = Zone::Tail;
                        boundary.reverse();
                        out.extend(boundary);
                    }
                    Zone::Tail => {
                        trace!("unsatisfiable: pertinent Q-root splits the full run");
                        return Err(ReduceError::Unsatisfiable);
                    }
                }
            }
        }
    }

    Ok((PQNode::Q(out), changed))
}
