//! Association rules and their violations, mined from lattice cover edges.
//!
//! All three miners drive the pruned top-down traversal with the predicate
//! `|O| ≥ min_support`, so the walk never expands below concepts that are
//! already too small to matter. [`rules`] emits visited concepts directly;
//! [`flaws`] and [`indep_rules`] evaluate each cover edge `(sup, sub)` seen
//! during the walk (`sub` a lower neighbor of `sup`) and report the edges
//! whose support, confidence and attribute-gap figures clear the configured
//! thresholds. Every figure is computed from the edge alone; the context is
//! never consulted again.

use crate::bitset::{Bitset, Element};
use crate::context::Context;
use crate::error::{Result, TrellisError};
use crate::fca::{self, Concept};
use std::fmt;
use tracing::debug;

/// Thresholds recognized by the miner.
#[derive(Debug, Clone)]
pub struct MinerOptions {
    /// Prune concepts with fewer objects (≥ 1).
    pub min_support: usize,
    /// Lower bound on `|O_sub| / |O_sup|` for a violation (∈ [0, 1]).
    pub min_confidence: f64,
    /// Upper bound on `|A_sub| − |A_sup|` for a violation (≥ 0).
    pub max_diff: usize,
    /// Minimum attributes per emitted rule (≥ 1).
    pub min_rhs: usize,
    /// Upper bound on confidence in independent-rule mode (∈ [0, 1]).
    pub max_confidence: f64,
    /// Minimum attributes of the weaker concept in independent-rule mode (≥ 1).
    pub min_width: usize,
}

impl Default for MinerOptions {
    fn default() -> Self {
        Self {
            min_support: 2,
            min_confidence: 0.9,
            max_diff: 1,
            min_rhs: 1,
            max_confidence: 0.1,
            min_width: 2,
        }
    }
}

impl MinerOptions {
    pub fn validate(&self) -> Result<()> {
        if self.min_support < 1 {
            return Err(TrellisError::Config("min_support must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(TrellisError::Config("min_confidence must lie in [0, 1]".into()));
        }
        if !(0.0..=1.0).contains(&self.max_confidence) {
            return Err(TrellisError::Config("max_confidence must lie in [0, 1]".into()));
        }
        if self.min_rhs < 1 {
            return Err(TrellisError::Config("min_rhs must be at least 1".into()));
        }
        if self.min_width < 1 {
            return Err(TrellisError::Config("min_width must be at least 1".into()));
        }
        Ok(())
    }
}

/// "The `support` objects all carry the attributes in `rhs`."
#[derive(Clone)]
pub struct Rule<X: Element, Y: Element> {
    pub rhs: Bitset<Y>,
    pub support: Bitset<X>,
}

impl<X: Element, Y: Element> Rule<X, Y> {
    fn of(concept: &Concept<X, Y>) -> Self {
        Self { rhs: concept.attributes().clone(), support: concept.objects().clone() }
    }

    pub fn support_count(&self) -> usize {
        self.support.count()
    }
}

fn names<T: Element>(set: &Bitset<T>) -> String {
    set.elements()
        .into_iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

impl<X: Element, Y: Element> fmt::Display for Rule<X, Y> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "rule (support {}): {}", self.support_count(), names(&self.rhs))
    }
}

/// A rule together with its weaker neighbor: the objects of `flaw` that fall
/// outside `rule` share `flaw.rhs` but fail to extend it to `rule.rhs`.
#[derive(Clone)]
pub struct Violation<X: Element, Y: Element> {
    pub rule: Rule<X, Y>,
    pub flaw: Rule<X, Y>,
    exceptions: Bitset<X>,
    gap: usize,
    confidence: f64,
}

impl<X: Element, Y: Element> Violation<X, Y> {
    pub fn new(rule: Rule<X, Y>, flaw: Rule<X, Y>) -> Result<Self> {
        if flaw.support.is_empty() {
            return Err(TrellisError::Domain("flaw rule has empty support".into()));
        }
        let exceptions = flaw.support.minus(&rule.support)?;
        let gap = rule.rhs.minus(&flaw.rhs)?.count();
        let confidence = rule.support.count() as f64 / flaw.support.count() as f64;
        Ok(Self { rule, flaw, exceptions, gap, confidence })
    }

    /// The exception objects `flaw.support \ rule.support`.
    pub fn exceptions(&self) -> &Bitset<X> {
        &self.exceptions
    }

    /// Attributes of the rule missing from the weaker neighbor.
    pub fn gap(&self) -> usize {
        self.gap
    }

    /// `|rule.support| / |flaw.support|`; high confidence means few
    /// exceptions.
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    fn record(&self, f: &mut fmt::Formatter, keyword: &str) -> fmt::Result {
        writeln!(
            f,
            "{} (confidence {:.2} support {} gap {} flaws {})",
            keyword,
            self.confidence,
            self.rule.support_count(),
            self.gap,
            self.exceptions.count()
        )?;
        writeln!(f, "  flaws ({}): {}", self.exceptions.count(), names(&self.exceptions))?;
        writeln!(f, "  {}", self.rule)?;
        write!(f, "  {}", self.flaw)
    }
}

impl<X: Element, Y: Element> fmt::Display for Violation<X, Y> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.record(f, "violation")
    }
}

/// Wrapper rendering a [`Violation`] with the `independent` keyword, for
/// independent-rule reports.
pub struct Independence<'a, X: Element, Y: Element>(pub &'a Violation<X, Y>);

impl<X: Element, Y: Element> fmt::Display for Independence<'_, X, Y> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.record(f, "independent")
    }
}

/// Emit every concept with at least `min_support` objects and `min_rhs`
/// attributes as a rule.
pub fn rules<X: Element, Y: Element>(
    context: &Context<X, Y>,
    options: &MinerOptions,
) -> Result<Vec<Rule<X, Y>>> {
    options.validate()?;
    let min_support = options.min_support;
    let min_rhs = options.min_rhs;
    let found = fca::fold_concepts_pruned(
        context,
        |concept| concept.objects().count() >= min_support,
        Vec::new(),
        |concept, _lowers, mut acc| {
            if concept.objects().count() >= min_support && concept.attributes().count() >= min_rhs
            {
                acc.push(Rule::of(concept));
            }
            Ok(acc)
        },
    )?;
    debug!(rules = found.len(), min_support, min_rhs, "rule mining complete");
    Ok(found)
}

/// Emit a violation for every cover edge whose stronger side keeps
/// `min_support` objects, retains at least `min_confidence` of the weaker
/// side's objects, and adds at most `max_diff` attributes.
pub fn flaws<X: Element, Y: Element>(
    context: &Context<X, Y>,
    options: &MinerOptions,
) -> Result<Vec<Violation<X, Y>>> {
    options.validate()?;
    let found = fca::fold_concepts_pruned(
        context,
        |concept| concept.objects().count() >= options.min_support,
        Vec::new(),
        |sup, lowers, mut acc| {
            for sub in lowers {
                let support = sub.objects().count();
                let confidence = support as f64 / sup.objects().count() as f64;
                let diff = sub.attributes().count() - sup.attributes().count();
                if support >= options.min_support
                    && confidence >= options.min_confidence
                    && diff <= options.max_diff
                {
                    acc.push(Violation::new(Rule::of(sub), Rule::of(sup))?);
                }
            }
            Ok(acc)
        },
    )?;
    debug!(violations = found.len(), "flaw mining complete");
    Ok(found)
}

/// The inverted edge walk: emit edges whose confidence stays at or below
/// `max_confidence` while the weaker side carries at least `min_width`
/// attributes. Low-confidence transitions mark independent feature groups.
pub fn indep_rules<X: Element, Y: Element>(
    context: &Context<X, Y>,
    options: &MinerOptions,
) -> Result<Vec<Violation<X, Y>>> {
    options.validate()?;
    let found = fca::fold_concepts_pruned(
        context,
        |concept| concept.objects().count() >= options.min_support,
        Vec::new(),
        |sup, lowers, mut acc| {
            for sub in lowers {
                let support = sub.objects().count();
                let confidence = support as f64 / sup.objects().count() as f64;
                if support >= options.min_support
                    && confidence <= options.max_confidence
                    && sup.attributes().count() >= options.min_width
                {
                    acc.push(Violation::new(Rule::of(sub), Rule::of(sup))?);
                }
            }
            Ok(acc)
        },
    )?;
    debug!(independents = found.len(), "independent-rule mining complete");
    Ok(found)
}
