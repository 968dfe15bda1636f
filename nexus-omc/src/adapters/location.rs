//! Location adapter
//!
//! Address and coordinate blocks. `street`/`locality` are the canonical
//! address field names; `streetNumberAndName`/`city` survive as accepted
//! input synonyms from older exports.

use crate::error::Result;
use crate::mapping::{EntityMapping, FieldKind, NestedBlock, ScalarField};
use crate::registry::EntityType;
use nexus_graph_ir::{GraphStore, Term};
use serde_json::Value;

pub(crate) static MAPPING: EntityMapping = EntityMapping {
    entity_type: EntityType::Location,
    scalars: &[],
    blocks: &[
        NestedBlock {
            doc_field: "address",
            local_name: "hasAddress",
            node_class: None,
            fields: &[
                ScalarField {
                    doc_field: "street",
                    aliases: &["streetNumberAndName"],
                    local_name: "street",
                    kind: FieldKind::Text,
                },
                ScalarField {
                    doc_field: "locality",
                    aliases: &["city"],
                    local_name: "locality",
                    kind: FieldKind::Text,
                },
                ScalarField {
                    doc_field: "region",
                    aliases: &[],
                    local_name: "region",
                    kind: FieldKind::Text,
                },
                ScalarField {
                    doc_field: "postalCode",
                    aliases: &[],
                    local_name: "postalCode",
                    kind: FieldKind::Text,
                },
                ScalarField {
                    doc_field: "country",
                    aliases: &[],
                    local_name: "country",
                    kind: FieldKind::Text,
                },
            ],
            children: &[],
        },
        NestedBlock {
            doc_field: "coordinates",
            local_name: "hasCoordinates",
            node_class: None,
            fields: &[
                ScalarField {
                    doc_field: "latitude",
                    aliases: &[],
                    local_name: "latitude",
                    kind: FieldKind::Double,
                },
                ScalarField {
                    doc_field: "longitude",
                    aliases: &[],
                    local_name: "longitude",
                    kind: FieldKind::Double,
                },
            ],
            children: &[],
        },
    ],
};

/// Translate one Location document into triples
pub fn to_graph(store: &mut GraphStore, doc: &Value) -> Result<Term> {
    super::emit_entity(store, &MAPPING, doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_address_block() {
        let mut store = GraphStore::new();
        let doc = json!({
            "entityType": "Location",
            "identifier": [{"scope": "me-nexus", "value": "loc-1", "combinedForm": "me-nexus:loc-1"}],
            "address": {"street": "1 Main St", "locality": "Springfield"}
        });
        to_graph(&mut store, &doc).unwrap();

        let address_triples: Vec<_> = store
            .triples()
            .iter()
            .filter(|t| t.s.is_blank() && t.s.as_blank().unwrap().as_str().contains("address"))
            .collect();
        assert_eq!(address_triples.len(), 2);
    }

    #[test]
    fn test_alias_fields_are_canonicalized() {
        let mut store = GraphStore::new();
        let doc = json!({
            "entityType": "Location",
            "identifier": [{"combinedForm": "me-nexus:loc-2"}],
            "address": {"streetNumberAndName": "2 Oak Ave", "city": "Duluth"}
        });
        to_graph(&mut store, &doc).unwrap();

        // Aliased input still lands on the canonical predicates.
        assert!(store
            .triples()
            .iter()
            .any(|t| t.p.as_iri().is_some_and(|p| p.ends_with("#street"))));
        assert!(store
            .triples()
            .iter()
            .any(|t| t.p.as_iri().is_some_and(|p| p.ends_with("#locality"))));
    }

    #[test]
    fn test_coordinates_are_doubles() {
        let mut store = GraphStore::new();
        let doc = json!({
            "entityType": "Location",
            "identifier": [{"combinedForm": "me-nexus:loc-3"}],
            "coordinates": {"latitude": 46.78, "longitude": -92.1}
        });
        to_graph(&mut store, &doc).unwrap();

        let lat = store
            .triples()
            .iter()
            .find(|t| t.p.as_iri().is_some_and(|p| p.ends_with("latitude")))
            .unwrap();
        let (_, dt) = lat.o.as_literal().unwrap();
        assert_eq!(dt.as_iri(), nexus_vocab::xsd::DOUBLE);
    }
}
