//! Participant adapter
//!
//! The structural characteristic node is typed `omc:Person` so that
//! Participant -> Person -> Location stays traversable in the graph, which is
//! how downstream tooling walks from crew to where they are based.

use crate::error::Result;
use crate::mapping::{EntityMapping, FieldKind, NestedBlock, ScalarField};
use crate::registry::EntityType;
use nexus_graph_ir::{GraphStore, Term};
use nexus_vocab::omc;
use serde_json::Value;

pub(crate) static MAPPING: EntityMapping = EntityMapping {
    entity_type: EntityType::Participant,
    scalars: &[],
    blocks: &[
        NestedBlock {
            doc_field: "structuralCharacteristics",
            local_name: "hasParticipantStructuralCharacteristic",
            node_class: Some(omc::PERSON),
            fields: &[
                ScalarField {
                    doc_field: "structuralType",
                    aliases: &[],
                    local_name: "structuralType",
                    kind: FieldKind::Text,
                },
                ScalarField {
                    doc_field: "firstGivenName",
                    aliases: &[],
                    local_name: "firstGivenName",
                    kind: FieldKind::Text,
                },
                ScalarField {
                    doc_field: "familyName",
                    aliases: &[],
                    local_name: "familyName",
                    kind: FieldKind::Text,
                },
                ScalarField {
                    doc_field: "jobTitle",
                    aliases: &[],
                    local_name: "jobTitle",
                    kind: FieldKind::Text,
                },
                ScalarField {
                    doc_field: "Location",
                    aliases: &["location"],
                    local_name: "hasLocation",
                    kind: FieldKind::Reference,
                },
            ],
            children: &[NestedBlock {
                doc_field: "contact",
                local_name: "hasContact",
                node_class: None,
                fields: &[
                    ScalarField {
                        doc_field: "email",
                        aliases: &[],
                        local_name: "email",
                        kind: FieldKind::Text,
                    },
                    ScalarField {
                        doc_field: "telephone",
                        aliases: &[],
                        local_name: "telephone",
                        kind: FieldKind::Text,
                    },
                ],
                children: &[],
            }],
        },
        NestedBlock {
            doc_field: "functionalCharacteristics",
            local_name: "hasParticipantFunctionalCharacteristic",
            node_class: None,
            fields: &[
                ScalarField {
                    doc_field: "functionalType",
                    aliases: &[],
                    local_name: "functionalType",
                    kind: FieldKind::Text,
                },
                ScalarField {
                    doc_field: "role",
                    aliases: &[],
                    local_name: "role",
                    kind: FieldKind::Text,
                },
            ],
            children: &[],
        },
    ],
};

/// Translate one Participant document into triples
pub fn to_graph(store: &mut GraphStore, doc: &Value) -> Result<Term> {
    super::emit_entity(store, &MAPPING, doc)
}
