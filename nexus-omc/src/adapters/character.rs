//! Character adapter

use crate::error::Result;
use crate::mapping::{EntityMapping, FieldKind, ScalarField};
use crate::registry::EntityType;
use nexus_graph_ir::{GraphStore, Term};
use serde_json::Value;

pub(crate) static MAPPING: EntityMapping = EntityMapping {
    entity_type: EntityType::Character,
    scalars: &[
        ScalarField {
            doc_field: "characterName",
            aliases: &[],
            local_name: "characterName",
            kind: FieldKind::Text,
        },
        ScalarField {
            doc_field: "portrayedBy",
            aliases: &[],
            local_name: "portrayedBy",
            kind: FieldKind::Reference,
        },
        ScalarField {
            doc_field: "appearsIn",
            aliases: &[],
            local_name: "appearsIn",
            kind: FieldKind::Reference,
        },
    ],
    blocks: &[],
};

/// Translate one Character document into triples
pub fn to_graph(store: &mut GraphStore, doc: &Value) -> Result<Term> {
    super::emit_entity(store, &MAPPING, doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_portrayed_by_defers_until_participant_registers() {
        let mut store = GraphStore::new();
        let doc = json!({
            "entityType": "Character",
            "identifier": [{"combinedForm": "me-nexus:ch-1"}],
            "characterName": "Detective Halla",
            "portrayedBy": "me-nexus:p-1"
        });
        to_graph(&mut store, &doc).unwrap();
        assert_eq!(store.pending_len(), 1);

        store.register_entity("me-nexus:p-1");
        store.resolve_pending().unwrap();
        assert_eq!(store.pending_len(), 0);
    }
}
