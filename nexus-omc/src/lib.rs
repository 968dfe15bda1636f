//! Document/graph codec for OMC production-metadata entities
//!
//! Converts ME-Nexus entity documents (JSON trees with `entityType`,
//! `schemaVersionTag`, and an `identifier` array) to and from OMC RDF
//! graph-text, losslessly across a document -> graph -> document round trip.
//!
//! The codec is synchronous and performs no I/O: text in, text out. Each
//! export or import call owns its own [`nexus_graph_ir::GraphStore`]; the
//! static registries and mapping tables are read-only and safe for
//! unsynchronized concurrent reads, so independent passes may run on separate
//! threads freely.
//!
//! # Export
//!
//! ```
//! use serde_json::json;
//!
//! let doc = json!({
//!     "entityType": "Location",
//!     "identifier": [{"scope": "me-nexus", "value": "loc-1", "combinedForm": "me-nexus:loc-1"}],
//!     "address": {"street": "1 Main St", "locality": "Springfield"}
//! });
//! let ttl = nexus_omc::export_document(&doc).unwrap();
//! assert!(ttl.contains("a omc:Location"));
//! ```
//!
//! # Import
//!
//! ```
//! let result = nexus_omc::import_collection(r#"[
//!     {"entityType": "Location", "schemaVersionTag": "https://movielabs.com/omc/json/schema/v2.6",
//!      "identifier": [{"combinedForm": "me-nexus:loc-1"}]}
//! ]"#);
//! assert!(result.success);
//! assert_eq!(result.entities.len(), 1);
//! ```

pub mod adapters;
pub mod document;
mod error;
pub mod export;
pub mod extract;
pub mod import;
pub mod mapping;
pub mod registry;

pub use document::Identifier;
pub use error::{OmcError, Result};
pub use export::{export_collection, export_document};
pub use extract::{entities_from_graph, ExtractedEntity};
pub use import::{import_collection, import_single, ImportResult, ImportedEntity};
pub use registry::EntityType;
