//! Trellis – concept lattices and association rules over binary relations.
//!
//! Trellis implements Formal Concept Analysis on an in-memory context table:
//! a relation `R ⊆ X × Y` between *objects* and *attributes*. From it the
//! crate derives every *formal concept*, a pair `(O, A)` where `A` is the
//! set of attributes common to all of `O` and `O` the set of objects sharing
//! all of `A`, along with the cover structure of the concept lattice, and
//! mines association rules and their violations from the lattice edges.
//!
//! ## Modules
//! * [`bitvec`] – packed fixed-capacity bit vectors: set algebra plus the
//!   unsigned word-wise total order everything above relies on.
//! * [`bitset`] – typed applicative sets over shared [`bitset::Domain`]s,
//!   guarded by origin-tag compatibility checks.
//! * [`context`] – the relation itself and its Galois operators
//!   [`context::Context::common_attributes`] / [`context::Context::common_objects`].
//! * [`fca`] – closures, Lindig cover-neighbor enumeration and the
//!   deterministic whole-lattice traversals.
//! * [`mining`] – rule, violation and independent-group mining over cover
//!   edges, with support/confidence thresholds.
//! * [`tabula`] – parser for the `object : attr attr … ;` context-table
//!   language (grammar in `tabula.pest`).
//! * [`dot`] – DOT rendering of the lattice graph.
//!
//! ## Quick Start
//! ```
//! use trellis::context::Context;
//! use trellis::fca;
//!
//! let context = Context::make(vec!["chmod", "chown"], vec!["change", "file"]).unwrap()
//!     .relate(&"chmod", &"change").unwrap()
//!     .relate(&"chmod", &"file").unwrap()
//!     .relate(&"chown", &"change").unwrap();
//! assert_eq!(fca::size(&context).unwrap(), 2);
//! ```
//!
//! Or from a context table:
//! ```
//! use trellis::tabula;
//! use trellis::fca;
//!
//! let context = tabula::read_context("chmod: change file ; chown: change ;").unwrap();
//! let concepts = fca::concepts(&context).unwrap();
//! assert_eq!(concepts.len(), 2);
//! ```
//!
//! ## Semantics
//! Bitsets and contexts are *applicative*: operations return fresh values and
//! never disturb previously returned ones, while the packed [`bitvec::BitVec`]
//! underneath is cloned and mutated in place for efficiency. Traversal
//! output order is fully deterministic, fixed by the total order on extent
//! bit vectors. The engine is single-threaded and synchronous; every failed
//! precondition surfaces as a typed [`error::TrellisError`] and aborts the
//! enclosing traversal with no partial results.

pub mod bitset;
pub mod bitvec;
pub mod context;
pub mod dot;
pub mod error;
pub mod fca;
pub mod mining;
pub mod tabula;

pub use error::{Result, TrellisError};
