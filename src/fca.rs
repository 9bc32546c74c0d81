//! Fast concept analysis: closures, cover neighbors and lattice traversals.
//!
//! A formal concept of a context `R ⊆ X × Y` is a pair `(O, A)` where `A` is
//! exactly the set of attributes common to all of `O` and `O` exactly the set
//! of objects sharing all of `A`. Concepts form a complete lattice ordered by
//! extent inclusion; this module enumerates it on demand using Lindig's
//! neighbor algorithm.
//!
//! # Neighbors
//! [`fold_upper`] computes the immediate upper covers of a concept by closing
//! `O ∪ {i}` for each candidate object `i ∉ O` and keeping the result only
//! when no earlier still-viable candidate is pulled in along with `i` (the
//! online minimality test). [`fold_lower`] is the exact dual over attributes.
//!
//! # Traversals
//! Whole-lattice walks keep an ordered worklist keyed by the extent bit
//! vector (a `BTreeMap`) and pop the minimum (bottom-up) or maximum
//! (top-down) entry. The visited set is disjoint from the worklist;
//! re-inserting an already visited concept is a no-op detected on pop. Each
//! concept is therefore the source of exactly one callback invocation, and
//! the `(concept, neighbor)` pairs seen across a whole fold enumerate every
//! cover edge exactly once, which is the contract the rule miner builds on.
//!
//! All outputs are deterministic: discovery order is fixed by the total order
//! on bit vectors and the ascending index order of candidate iteration.

use crate::bitset::{Bitset, Element};
use crate::bitvec::BitVec;
use crate::context::Context;
use crate::error::Result;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::debug;

/// A formal concept `(O, A)`. Ordered and compared by the object component
/// only; the attribute component is uniquely determined by it.
#[derive(Clone)]
pub struct Concept<X: Element, Y: Element> {
    objects: Bitset<X>,
    attributes: Bitset<Y>,
}

impl<X: Element, Y: Element> Concept<X, Y> {
    pub fn objects(&self) -> &Bitset<X> {
        &self.objects
    }

    pub fn attributes(&self) -> &Bitset<Y> {
        &self.attributes
    }

    /// Worklist key: the extent bit vector.
    fn key(&self) -> BitVec {
        self.objects.bits().clone()
    }
}

impl<X: Element, Y: Element> PartialEq for Concept<X, Y> {
    fn eq(&self, other: &Self) -> bool {
        self.objects.bits() == other.objects.bits()
    }
}

impl<X: Element, Y: Element> Eq for Concept<X, Y> {}

impl<X: Element, Y: Element> fmt::Display for Concept<X, Y> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.objects, self.attributes)
    }
}

impl<X: Element, Y: Element> fmt::Debug for Concept<X, Y> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Close an object set: `(common'(common(O)), common(O))`. Idempotent.
pub fn closure<X: Element, Y: Element>(
    context: &Context<X, Y>,
    objects: &Bitset<X>,
) -> Result<Concept<X, Y>> {
    let attributes = context.common_attributes(objects)?;
    let objects = context.common_objects(&attributes)?;
    Ok(Concept { objects, attributes })
}

/// Close an attribute set: the dual of [`closure`].
pub fn closure_attrs<X: Element, Y: Element>(
    context: &Context<X, Y>,
    attributes: &Bitset<Y>,
) -> Result<Concept<X, Y>> {
    let objects = context.common_objects(attributes)?;
    let attributes = context.common_attributes(&objects)?;
    Ok(Concept { objects, attributes })
}

/// The greatest concept: all objects, their shared attributes.
pub fn top<X: Element, Y: Element>(context: &Context<X, Y>) -> Result<Concept<X, Y>> {
    closure_attrs(context, &context.empty_attributes())
}

/// The least concept: the closure of the empty object set.
pub fn bottom<X: Element, Y: Element>(context: &Context<X, Y>) -> Result<Concept<X, Y>> {
    closure(context, &context.empty_objects())
}

/// Fold over the immediate upper covers of `concept` in discovery order.
///
/// Candidates `i ∈ X \ O` are tried in ascending index order; `min` tracks
/// the candidates still eligible to produce a cover. `closure(O ∪ {i})` is a
/// cover exactly when it pulls in no other still-viable candidate.
pub fn fold_upper<X: Element, Y: Element, A, F>(
    context: &Context<X, Y>,
    concept: &Concept<X, Y>,
    mut acc: A,
    mut f: F,
) -> Result<A>
where
    F: FnMut(Concept<X, Y>, A) -> Result<A>,
{
    let mut min = context.full_objects().minus(&concept.objects)?;
    for i in min.indices() {
        let closed = closure(context, &concept.objects.add_index(i)?)?;
        let delta = closed.objects.minus(&concept.objects)?.remove_index(i)?;
        if min.intersect(&delta)?.is_empty() {
            acc = f(closed, acc)?;
        } else {
            min = min.remove_index(i)?;
        }
    }
    Ok(acc)
}

/// Fold over the immediate lower covers of `concept`; dual of [`fold_upper`]
/// over the attribute side.
pub fn fold_lower<X: Element, Y: Element, A, F>(
    context: &Context<X, Y>,
    concept: &Concept<X, Y>,
    mut acc: A,
    mut f: F,
) -> Result<A>
where
    F: FnMut(Concept<X, Y>, A) -> Result<A>,
{
    let mut min = context.full_attributes().minus(&concept.attributes)?;
    for j in min.indices() {
        let closed = closure_attrs(context, &concept.attributes.add_index(j)?)?;
        let delta = closed.attributes.minus(&concept.attributes)?.remove_index(j)?;
        if min.intersect(&delta)?.is_empty() {
            acc = f(closed, acc)?;
        } else {
            min = min.remove_index(j)?;
        }
    }
    Ok(acc)
}

/// The upper covers of `concept` in discovery order.
pub fn upper<X: Element, Y: Element>(
    context: &Context<X, Y>,
    concept: &Concept<X, Y>,
) -> Result<Vec<Concept<X, Y>>> {
    fold_upper(context, concept, Vec::new(), |cover, mut covers| {
        covers.push(cover);
        Ok(covers)
    })
}

/// The lower covers of `concept` in discovery order.
pub fn lower<X: Element, Y: Element>(
    context: &Context<X, Y>,
    concept: &Concept<X, Y>,
) -> Result<Vec<Concept<X, Y>>> {
    fold_lower(context, concept, Vec::new(), |cover, mut covers| {
        covers.push(cover);
        Ok(covers)
    })
}

/// Every concept of the lattice, in deterministic visit order.
pub fn concepts<X: Element, Y: Element>(context: &Context<X, Y>) -> Result<Vec<Concept<X, Y>>> {
    let mut worklist: BTreeMap<BitVec, Concept<X, Y>> = BTreeMap::new();
    let mut visited: BTreeSet<BitVec> = BTreeSet::new();
    let mut found = Vec::new();
    let start = top(context)?;
    worklist.insert(start.key(), start);
    while let Some((key, concept)) = worklist.pop_first() {
        if !visited.insert(key) {
            continue;
        }
        let lowers = lower(context, &concept)?;
        found.push(concept);
        for low in lowers {
            worklist.entry(low.key()).or_insert(low);
        }
    }
    debug!(concepts = found.len(), "lattice enumerated");
    Ok(found)
}

/// The number of concepts of the lattice.
pub fn size<X: Element, Y: Element>(context: &Context<X, Y>) -> Result<usize> {
    Ok(concepts(context)?.len())
}

/// Bottom-up fold: each concept is visited exactly once together with all of
/// its upper covers.
pub fn fold_concepts<X: Element, Y: Element, A, F>(
    context: &Context<X, Y>,
    mut acc: A,
    mut f: F,
) -> Result<A>
where
    F: FnMut(&Concept<X, Y>, &[Concept<X, Y>], A) -> Result<A>,
{
    let mut worklist: BTreeMap<BitVec, Concept<X, Y>> = BTreeMap::new();
    let mut visited: BTreeSet<BitVec> = BTreeSet::new();
    let start = bottom(context)?;
    worklist.insert(start.key(), start);
    while let Some((key, concept)) = worklist.pop_first() {
        if !visited.insert(key) {
            continue;
        }
        let uppers = upper(context, &concept)?;
        acc = f(&concept, &uppers, acc)?;
        for up in uppers {
            worklist.entry(up.key()).or_insert(up);
        }
    }
    Ok(acc)
}

/// Top-down fold: the dual of [`fold_concepts`], visiting each concept with
/// all of its lower covers.
pub fn fold_concepts_topdown<X: Element, Y: Element, A, F>(
    context: &Context<X, Y>,
    acc: A,
    f: F,
) -> Result<A>
where
    F: FnMut(&Concept<X, Y>, &[Concept<X, Y>], A) -> Result<A>,
{
    fold_concepts_pruned(context, |_| true, acc, f)
}

/// Pruned top-down fold: lower covers failing `keep` are reported to `f` but
/// never pushed as expansion frontiers. This is the miner's entry point; the
/// predicate is its minimum-support threshold.
pub fn fold_concepts_pruned<X: Element, Y: Element, A, P, F>(
    context: &Context<X, Y>,
    mut keep: P,
    mut acc: A,
    mut f: F,
) -> Result<A>
where
    P: FnMut(&Concept<X, Y>) -> bool,
    F: FnMut(&Concept<X, Y>, &[Concept<X, Y>], A) -> Result<A>,
{
    let mut worklist: BTreeMap<BitVec, Concept<X, Y>> = BTreeMap::new();
    let mut visited: BTreeSet<BitVec> = BTreeSet::new();
    let start = top(context)?;
    worklist.insert(start.key(), start);
    while let Some((key, concept)) = worklist.pop_last() {
        if !visited.insert(key) {
            continue;
        }
        let lowers = lower(context, &concept)?;
        acc = f(&concept, &lowers, acc)?;
        for low in lowers {
            if keep(&low) {
                worklist.entry(low.key()).or_insert(low);
            }
        }
    }
    Ok(acc)
}
