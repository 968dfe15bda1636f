//! Asset adapter
//!
//! Structural and functional characteristic containers; file details nest one
//! level further down inside the structural block.

use crate::error::Result;
use crate::mapping::{EntityMapping, FieldKind, NestedBlock, ScalarField};
use crate::registry::EntityType;
use nexus_graph_ir::{GraphStore, Term};
use serde_json::Value;

pub(crate) static MAPPING: EntityMapping = EntityMapping {
    entity_type: EntityType::Asset,
    scalars: &[ScalarField {
        doc_field: "version",
        aliases: &[],
        local_name: "version",
        kind: FieldKind::Text,
    }],
    blocks: &[
        NestedBlock {
            doc_field: "structuralCharacteristics",
            local_name: "hasAssetStructuralCharacteristics",
            node_class: None,
            fields: &[ScalarField {
                doc_field: "structuralType",
                aliases: &[],
                local_name: "structuralType",
                kind: FieldKind::Text,
            }],
            children: &[NestedBlock {
                doc_field: "fileDetails",
                local_name: "hasFileDetails",
                node_class: None,
                fields: &[
                    ScalarField {
                        doc_field: "fileName",
                        aliases: &[],
                        local_name: "fileName",
                        kind: FieldKind::Text,
                    },
                    ScalarField {
                        doc_field: "fileExtension",
                        aliases: &[],
                        local_name: "fileExtension",
                        kind: FieldKind::Text,
                    },
                    ScalarField {
                        doc_field: "filePath",
                        aliases: &[],
                        local_name: "filePath",
                        kind: FieldKind::Text,
                    },
                    ScalarField {
                        doc_field: "fileSize",
                        aliases: &[],
                        local_name: "fileSize",
                        kind: FieldKind::Integer,
                    },
                ],
                children: &[],
            }],
        },
        NestedBlock {
            doc_field: "functionalCharacteristics",
            local_name: "hasAssetFunctionalCharacteristics",
            node_class: None,
            fields: &[ScalarField {
                doc_field: "functionalType",
                aliases: &[],
                local_name: "functionalType",
                kind: FieldKind::Text,
            }],
            children: &[],
        },
    ],
};

/// Translate one Asset document into triples
pub fn to_graph(store: &mut GraphStore, doc: &Value) -> Result<Term> {
    super::emit_entity(store, &MAPPING, doc)
}
