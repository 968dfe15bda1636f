//! Context adapter
//!
//! A Context is mostly references: what it is for, what it uses, where it
//! happens. All of them are graph links.

use crate::error::Result;
use crate::mapping::{EntityMapping, FieldKind, ScalarField};
use crate::registry::EntityType;
use nexus_graph_ir::{GraphStore, Term};
use serde_json::Value;

pub(crate) static MAPPING: EntityMapping = EntityMapping {
    entity_type: EntityType::Context,
    scalars: &[
        ScalarField {
            doc_field: "contextType",
            aliases: &[],
            local_name: "contextType",
            kind: FieldKind::Text,
        },
        ScalarField {
            doc_field: "contextFor",
            aliases: &[],
            local_name: "contextFor",
            kind: FieldKind::Reference,
        },
        ScalarField {
            doc_field: "uses",
            aliases: &[],
            local_name: "uses",
            kind: FieldKind::Reference,
        },
        ScalarField {
            doc_field: "Location",
            aliases: &["location"],
            local_name: "hasLocation",
            kind: FieldKind::Reference,
        },
    ],
    blocks: &[],
};

/// Translate one Context document into triples
pub fn to_graph(store: &mut GraphStore, doc: &Value) -> Result<Term> {
    super::emit_entity(store, &MAPPING, doc)
}
