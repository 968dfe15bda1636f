//! Task adapter

use crate::error::Result;
use crate::mapping::{EntityMapping, FieldKind, NestedBlock, ScalarField};
use crate::registry::EntityType;
use nexus_graph_ir::{GraphStore, Term};
use serde_json::Value;

pub(crate) static MAPPING: EntityMapping = EntityMapping {
    entity_type: EntityType::Task,
    scalars: &[
        ScalarField {
            doc_field: "taskType",
            aliases: &[],
            local_name: "taskType",
            kind: FieldKind::Text,
        },
        ScalarField {
            doc_field: "assignedTo",
            aliases: &[],
            local_name: "assignedTo",
            kind: FieldKind::Reference,
        },
        ScalarField {
            doc_field: "Context",
            aliases: &["context"],
            local_name: "hasContext",
            kind: FieldKind::Reference,
        },
    ],
    blocks: &[NestedBlock {
        doc_field: "scheduling",
        local_name: "hasScheduling",
        node_class: None,
        fields: &[
            ScalarField {
                doc_field: "scheduledStart",
                aliases: &[],
                local_name: "scheduledStart",
                kind: FieldKind::DateTime,
            },
            ScalarField {
                doc_field: "scheduledEnd",
                aliases: &[],
                local_name: "scheduledEnd",
                kind: FieldKind::DateTime,
            },
        ],
        children: &[],
    }],
};

/// Translate one Task document into triples
pub fn to_graph(store: &mut GraphStore, doc: &Value) -> Result<Term> {
    super::emit_entity(store, &MAPPING, doc)
}
