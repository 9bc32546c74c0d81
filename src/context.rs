//! Binary relations `R ⊆ X × Y` with their Galois operators.
//!
//! A [`Context`] owns one domain per side plus two adjacency spines: `fwd[i]`
//! holds the attributes related to object `i`, `rev[j]` the objects related
//! to attribute `j`. The two directions are kept symmetric by construction:
//! [`Context::relate`] and [`Context::unrelate`] always update both.
//!
//! Contexts are applicative like bitsets: mutators return a fresh context
//! sharing the domains, cloning only the adjacency spines and replacing the
//! two touched cells. Unmutated cells stay shared behind `Arc`.

use crate::bitset::{Bitset, Domain, Element};
use crate::error::{Result, TrellisError};
use std::sync::Arc;

/// Binary relation between an object domain `X` and an attribute domain `Y`.
pub struct Context<X: Element, Y: Element> {
    objects: Arc<Domain<X>>,
    attributes: Arc<Domain<Y>>,
    fwd: Vec<Arc<Bitset<Y>>>,
    rev: Vec<Arc<Bitset<X>>>,
}

impl<X: Element, Y: Element> Clone for Context<X, Y> {
    fn clone(&self) -> Self {
        Self {
            objects: Arc::clone(&self.objects),
            attributes: Arc::clone(&self.attributes),
            fwd: self.fwd.clone(),
            rev: self.rev.clone(),
        }
    }
}

impl<X: Element, Y: Element> Context<X, Y> {
    /// Build an empty relation over the given object and attribute lists.
    /// Both domains get fresh origin tags; duplicates keep their first
    /// position.
    pub fn make(xs: Vec<X>, ys: Vec<Y>) -> Result<Self> {
        let objects = Domain::make(xs)?;
        let attributes = Domain::make(ys)?;
        let fwd = (0..objects.size())
            .map(|_| Arc::new(Bitset::empty(&attributes)))
            .collect();
        let rev = (0..attributes.size())
            .map(|_| Arc::new(Bitset::empty(&objects)))
            .collect();
        Ok(Self { objects, attributes, fwd, rev })
    }

    pub fn objects(&self) -> &Arc<Domain<X>> {
        &self.objects
    }

    pub fn attributes(&self) -> &Arc<Domain<Y>> {
        &self.attributes
    }

    pub fn object_count(&self) -> usize {
        self.objects.size()
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.size()
    }

    /// The attributes related to `x`.
    pub fn row(&self, x: &X) -> Result<&Bitset<Y>> {
        Ok(&self.fwd[self.objects.index(x)?])
    }

    /// The objects related to `y`.
    pub fn column(&self, y: &Y) -> Result<&Bitset<X>> {
        Ok(&self.rev[self.attributes.index(y)?])
    }

    pub fn related(&self, x: &X, y: &Y) -> Result<bool> {
        let i = self.objects.index(x)?;
        let j = self.attributes.index(y)?;
        self.fwd[i].contains_index(j)
    }

    /// Fresh context with `(x, y)` added to the relation. Both adjacency
    /// directions are updated; unrelated cells stay shared.
    pub fn relate(&self, x: &X, y: &Y) -> Result<Self> {
        let i = self.objects.index(x)?;
        let j = self.attributes.index(y)?;
        let mut next = self.clone();
        next.fwd[i] = Arc::new(self.fwd[i].add_index(j)?);
        next.rev[j] = Arc::new(self.rev[j].add_index(i)?);
        Ok(next)
    }

    /// Fresh context with `(x, y)` removed from the relation.
    pub fn unrelate(&self, x: &X, y: &Y) -> Result<Self> {
        let i = self.objects.index(x)?;
        let j = self.attributes.index(y)?;
        let mut next = self.clone();
        next.fwd[i] = Arc::new(self.fwd[i].remove_index(j)?);
        next.rev[j] = Arc::new(self.rev[j].remove_index(i)?);
        Ok(next)
    }

    /// Fresh context holding `(X × Y) \ R`, both directions rebuilt.
    pub fn complement(&self) -> Self {
        let mut next = self.clone();
        next.fwd = self.fwd.iter().map(|b| Arc::new(b.complement())).collect();
        next.rev = self.rev.iter().map(|b| Arc::new(b.complement())).collect();
        next
    }

    pub fn empty_objects(&self) -> Bitset<X> {
        Bitset::empty(&self.objects)
    }

    pub fn full_objects(&self) -> Bitset<X> {
        Bitset::full(&self.objects)
    }

    pub fn empty_attributes(&self) -> Bitset<Y> {
        Bitset::empty(&self.attributes)
    }

    pub fn full_attributes(&self) -> Bitset<Y> {
        Bitset::full(&self.attributes)
    }

    fn check_objects(&self, o: &Bitset<X>) -> Result<()> {
        if o.domain().origin() == self.objects.origin() {
            Ok(())
        } else {
            Err(TrellisError::Compatibility(format!(
                "object set origin {} does not belong to this context",
                o.domain().origin()
            )))
        }
    }

    fn check_attributes(&self, a: &Bitset<Y>) -> Result<()> {
        if a.domain().origin() == self.attributes.origin() {
            Ok(())
        } else {
            Err(TrellisError::Compatibility(format!(
                "attribute set origin {} does not belong to this context",
                a.domain().origin()
            )))
        }
    }

    /// Galois operator `common`: the attributes shared by every object in
    /// `o`. The empty object set yields the full attribute domain, since the
    /// intersection fold is seeded with it.
    pub fn common_attributes(&self, o: &Bitset<X>) -> Result<Bitset<Y>> {
        self.check_objects(o)?;
        let rows: Vec<&Bitset<Y>> = o.indices().into_iter().map(|i| self.fwd[i].as_ref()).collect();
        self.full_attributes().intersects(&rows)
    }

    /// Galois operator `common'`: the objects sharing every attribute in
    /// `a`. The empty attribute set yields the full object domain.
    pub fn common_objects(&self, a: &Bitset<Y>) -> Result<Bitset<X>> {
        self.check_attributes(a)?;
        let columns: Vec<&Bitset<X>> =
            a.indices().into_iter().map(|j| self.rev[j].as_ref()).collect();
        self.full_objects().intersects(&columns)
    }
}
