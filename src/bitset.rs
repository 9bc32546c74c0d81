//! Typed applicative sets over fixed enumerated domains.
//!
//! A [`Domain`] freezes a list of elements into a bidirectional
//! element ↔ index mapping and mints an *origin tag*: a process-unique
//! integer identifying that particular construction. A [`Bitset`] couples a
//! shared (`Arc`) domain with an owned [`BitVec`] payload. Two bitsets may
//! only meet in a binary operation when their origin tags are equal, which
//! ties them to the very same `Domain` value: two independently constructed
//! domains over the same elements are *not* compatible. The check is a single
//! integer comparison.
//!
//! All "mutating" operations return a fresh bitset sharing the domain and
//! owning a new payload; no previously returned value ever observes a change.

use crate::bitvec::BitVec;
use crate::error::{Result, TrellisError};
use seahash::SeaHasher;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasherDefault, Hash};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

pub type ElementHasher = BuildHasherDefault<SeaHasher>;

/// Capability bound for domain elements: printable, hashable, comparable.
pub trait Element: fmt::Display + Eq + Hash + Clone {}
impl<T: fmt::Display + Eq + Hash + Clone> Element for T {}

// ------------- Domain -------------

static ORIGIN_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A fixed enumerated domain: element → index map, index → element array,
/// and the origin tag shared by every bitset derived from it.
pub struct Domain<T: Element> {
    forward: HashMap<T, usize, ElementHasher>,
    reverse: Vec<T>,
    origin: u64,
}

impl<T: Element> Domain<T> {
    /// Fix a domain from an element list. Duplicates keep their first
    /// position; an empty list is rejected.
    pub fn make(elements: Vec<T>) -> Result<Arc<Self>> {
        let mut forward: HashMap<T, usize, ElementHasher> = HashMap::default();
        let mut reverse: Vec<T> = Vec::new();
        for element in elements {
            if !forward.contains_key(&element) {
                forward.insert(element.clone(), reverse.len());
                reverse.push(element);
            }
        }
        if reverse.is_empty() {
            return Err(TrellisError::EmptyDomain);
        }
        let origin = ORIGIN_COUNTER.fetch_add(1, AtomicOrdering::Relaxed);
        Ok(Arc::new(Self { forward, reverse, origin }))
    }

    pub fn size(&self) -> usize {
        self.reverse.len()
    }

    pub fn origin(&self) -> u64 {
        self.origin
    }

    pub fn index(&self, element: &T) -> Result<usize> {
        self.forward
            .get(element)
            .copied()
            .ok_or_else(|| TrellisError::Domain(format!("element {} not in domain", element)))
    }

    pub fn member(&self, index: usize) -> Result<&T> {
        self.reverse.get(index).ok_or_else(|| {
            TrellisError::Domain(format!("index {} out of range 0..{}", index, self.reverse.len()))
        })
    }

    pub fn elements(&self) -> &[T] {
        &self.reverse
    }
}

// ------------- Bitset -------------

/// Applicative set over a shared [`Domain`].
#[derive(Clone)]
pub struct Bitset<T: Element> {
    domain: Arc<Domain<T>>,
    bits: BitVec,
}

impl<T: Element> Bitset<T> {
    /// The empty set over `domain`.
    pub fn empty(domain: &Arc<Domain<T>>) -> Self {
        Self { domain: Arc::clone(domain), bits: BitVec::zeroed(domain.size()) }
    }

    /// The full set over `domain`.
    pub fn full(domain: &Arc<Domain<T>>) -> Self {
        let mut bits = BitVec::zeroed(domain.size());
        bits.fill();
        Self { domain: Arc::clone(domain), bits }
    }

    /// A set holding the given elements of `domain`.
    pub fn of(domain: &Arc<Domain<T>>, elements: &[T]) -> Result<Self> {
        let mut bits = BitVec::zeroed(domain.size());
        for element in elements {
            bits.put(domain.index(element)?, true)?;
        }
        Ok(Self { domain: Arc::clone(domain), bits })
    }

    pub fn domain(&self) -> &Arc<Domain<T>> {
        &self.domain
    }

    pub fn bits(&self) -> &BitVec {
        &self.bits
    }

    pub fn size(&self) -> usize {
        self.bits.size()
    }

    pub fn count(&self) -> usize {
        self.bits.count()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn index(&self, element: &T) -> Result<usize> {
        self.domain.index(element)
    }

    pub fn member(&self, index: usize) -> Result<&T> {
        self.domain.member(index)
    }

    pub fn is_member(&self, element: &T) -> Result<bool> {
        self.bits.get(self.domain.index(element)?)
    }

    pub fn contains_index(&self, index: usize) -> Result<bool> {
        self.bits.get(index)
    }

    /// Fresh set with `element` added.
    pub fn add(&self, element: &T) -> Result<Self> {
        self.add_index(self.domain.index(element)?)
    }

    /// Fresh set with `element` removed.
    pub fn remove(&self, element: &T) -> Result<Self> {
        self.remove_index(self.domain.index(element)?)
    }

    pub fn add_index(&self, index: usize) -> Result<Self> {
        let mut next = self.clone();
        next.bits.put(index, true)?;
        Ok(next)
    }

    pub fn remove_index(&self, index: usize) -> Result<Self> {
        let mut next = self.clone();
        next.bits.put(index, false)?;
        Ok(next)
    }

    fn compatible(&self, other: &Self) -> Result<()> {
        if self.domain.origin == other.domain.origin {
            Ok(())
        } else {
            Err(TrellisError::Compatibility(format!(
                "origin {} vs {}",
                self.domain.origin, other.domain.origin
            )))
        }
    }

    pub fn union(&self, other: &Self) -> Result<Self> {
        self.compatible(other)?;
        let mut next = self.clone();
        next.bits.union(&other.bits)?;
        Ok(next)
    }

    pub fn intersect(&self, other: &Self) -> Result<Self> {
        self.compatible(other)?;
        let mut next = self.clone();
        next.bits.inter(&other.bits)?;
        Ok(next)
    }

    pub fn minus(&self, other: &Self) -> Result<Self> {
        self.compatible(other)?;
        let mut next = self.clone();
        next.bits.minus(&other.bits)?;
        Ok(next)
    }

    /// Symmetric difference.
    pub fn difference(&self, other: &Self) -> Result<Self> {
        self.compatible(other)?;
        let mut next = self.clone();
        next.bits.diff(&other.bits)?;
        Ok(next)
    }

    pub fn complement(&self) -> Self {
        let mut next = self.clone();
        next.bits.complement();
        next
    }

    /// `self ⊊ other`.
    pub fn subset(&self, other: &Self) -> Result<bool> {
        self.compatible(other)?;
        self.bits.lt(&other.bits)
    }

    /// `self ⊆ other`.
    pub fn subseteq(&self, other: &Self) -> Result<bool> {
        self.compatible(other)?;
        self.bits.le(&other.bits)
    }

    pub fn equal(&self, other: &Self) -> Result<bool> {
        self.compatible(other)?;
        Ok(self.bits == other.bits)
    }

    pub fn compare(&self, other: &Self) -> Result<Ordering> {
        self.compatible(other)?;
        self.bits.compare(&other.bits)
    }

    /// Union of `self` with every set in `others`, folded into one working
    /// payload. The empty list returns `self` unchanged.
    pub fn unions(&self, others: &[&Self]) -> Result<Self> {
        let mut next = self.clone();
        for other in others {
            next.compatible(other)?;
            next.bits.union(&other.bits)?;
        }
        Ok(next)
    }

    /// Intersection of `self` with every set in `others`. The empty list
    /// returns `self` unchanged; seeding with the full domain makes this the
    /// identity of intersection.
    pub fn intersects(&self, others: &[&Self]) -> Result<Self> {
        let mut next = self.clone();
        for other in others {
            next.compatible(other)?;
            next.bits.inter(&other.bits)?;
        }
        Ok(next)
    }

    /// Visit members in ascending domain-index order. The set itself is
    /// passed through so the callback can resolve indices via
    /// [`Bitset::member`].
    pub fn fold<A, F>(&self, acc: A, mut f: F) -> A
    where
        F: FnMut(&Self, usize, A) -> A,
    {
        self.bits.fold(acc, |i, acc| f(self, i, acc))
    }

    /// Ordered member indices.
    pub fn indices(&self) -> Vec<usize> {
        self.bits.members()
    }

    /// Members in ascending domain-index order.
    pub fn elements(&self) -> Vec<&T> {
        self.bits
            .members()
            .into_iter()
            .map(|i| &self.domain.reverse[i])
            .collect()
    }
}

impl<T: Element> fmt::Display for Bitset<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (n, element) in self.elements().into_iter().enumerate() {
            if n > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", element)?;
        }
        write!(f, "}}")
    }
}

impl<T: Element> fmt::Debug for Bitset<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
