//! Turtle (TTL) graph-text codec for the ME-Nexus graph IR
//!
//! The writer renders an accumulated [`nexus_graph_ir::GraphStore`] as
//! prefixed, blank-node-labeled graph-text with deterministic ordering. The
//! reader parses the subset of Turtle the writer emits (prefixed names, full
//! IRIs, labeled blank nodes, typed literals, `;`/`,` lists), which is what
//! graph-text import needs.
//!
//! # Example
//!
//! ```
//! use nexus_graph_ir::{GraphStore, LiteralKind};
//! use nexus_graph_turtle::{read, write};
//!
//! let mut store = GraphStore::new();
//! let loc = store.register_entity("me-nexus:loc-1");
//! store.add_literal(
//!     loc,
//!     "http://www.w3.org/2000/01/rdf-schema#label",
//!     "Springfield Stage",
//!     LiteralKind::Text,
//! );
//!
//! let ttl = write(&store);
//! let parsed = read(&ttl).unwrap();
//! assert_eq!(parsed.triples.len(), 1);
//! ```

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{GraphTextError, Result};
pub use reader::{read, ParsedGraph};
pub use writer::write;
