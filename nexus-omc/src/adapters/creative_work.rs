//! CreativeWork adapter

use crate::error::Result;
use crate::mapping::{EntityMapping, FieldKind, NestedBlock, ScalarField};
use crate::registry::EntityType;
use nexus_graph_ir::{GraphStore, Term};
use serde_json::Value;

pub(crate) static MAPPING: EntityMapping = EntityMapping {
    entity_type: EntityType::CreativeWork,
    scalars: &[
        ScalarField {
            doc_field: "creativeWorkType",
            aliases: &[],
            local_name: "creativeWorkType",
            kind: FieldKind::Text,
        },
        ScalarField {
            doc_field: "approximateLength",
            aliases: &[],
            local_name: "approximateLength",
            kind: FieldKind::Text,
        },
        ScalarField {
            doc_field: "releaseDate",
            aliases: &[],
            local_name: "releaseDate",
            kind: FieldKind::Date,
        },
    ],
    blocks: &[NestedBlock {
        doc_field: "title",
        local_name: "hasTitle",
        node_class: None,
        fields: &[
            ScalarField {
                doc_field: "titleName",
                aliases: &[],
                local_name: "titleName",
                kind: FieldKind::Text,
            },
            ScalarField {
                doc_field: "titleType",
                aliases: &[],
                local_name: "titleType",
                kind: FieldKind::Text,
            },
        ],
        children: &[],
    }],
};

/// Translate one CreativeWork document into triples
pub fn to_graph(store: &mut GraphStore, doc: &Value) -> Result<Term> {
    super::emit_entity(store, &MAPPING, doc)
}
