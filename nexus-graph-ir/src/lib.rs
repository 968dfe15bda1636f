//! RDF graph intermediate representation for the ME-Nexus codec
//!
//! This crate provides the types one export or import pass works with:
//! terms, triples, and the pass-scoped [`GraphStore`].
//!
//! # Key Design Principles
//!
//! 1. **Expanded IRIs only** - All IRIs are stored in expanded form.
//!    Compaction happens in the serializer at output time.
//!
//! 2. **Explicit datatypes** - Literals always carry an explicit datatype.
//!    Plain strings use `xsd:string`.
//!
//! 3. **Append-only, insertion-ordered** - Triples are never updated or
//!    removed within a pass, and their order is never rearranged, which is
//!    what makes serialized output deterministic.
//!
//! 4. **Pass-local state** - The blank-node counter and the reference
//!    resolution table live on the store instance. Two concurrent passes with
//!    their own stores never interfere.
//!
//! # Example
//!
//! ```
//! use nexus_graph_ir::{GraphStore, LiteralKind, Term};
//!
//! let mut store = GraphStore::new();
//! let alice = store.register_entity("me-nexus:participant-1");
//!
//! store.add_literal(
//!     alice.clone(),
//!     "http://www.w3.org/2000/01/rdf-schema#label",
//!     "Alice",
//!     LiteralKind::Text,
//! );
//!
//! store.resolve_pending().unwrap();
//! assert_eq!(store.triples().len(), 1);
//! ```

pub mod datatype;
mod error;
mod store;
mod term;
mod triple;

pub use datatype::Datatype;
pub use error::StoreError;
pub use store::{GraphStore, LiteralKind};
pub use term::{BlankId, LiteralValue, Term};
pub use triple::Triple;
