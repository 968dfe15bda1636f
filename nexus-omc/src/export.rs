//! Export pass: entity documents -> graph-text
//!
//! One call owns one `GraphStore`. A pre-pass registers every identifier of
//! every document so cross-references resolve regardless of document order;
//! the adapters then emit triples; finalization resolves anything that was
//! deferred and fails loudly if a target never appeared.

use crate::adapters;
use crate::document::{self, fields};
use crate::error::{OmcError, Result};
use crate::registry::EntityType;
use nexus_graph_ir::GraphStore;
use serde_json::Value;
use tracing::debug;

/// Export a collection of entity documents as graph-text.
pub fn export_collection(docs: &[Value]) -> Result<String> {
    let mut store = GraphStore::new();

    // Register all identifiers first: an entity may be referenced by any of
    // its identifiers, from any document in the collection.
    for doc in docs {
        let ids = document::identifiers(doc);
        if let Some(primary) = ids.first() {
            let subject = store.register_entity(&primary.combined_form);
            for id in &ids[1..] {
                store.register_alias(&id.combined_form, &subject);
            }
        }
    }

    for doc in docs {
        let entity_type = declared_entity_type(doc)?;
        adapters::to_graph(&mut store, entity_type, doc)?;
    }

    store.resolve_pending()?;
    debug!(
        entities = docs.len(),
        triples = store.triples().len(),
        "export pass complete"
    );
    Ok(nexus_graph_turtle::write(&store))
}

/// Export a single entity document as graph-text.
pub fn export_document(doc: &Value) -> Result<String> {
    export_collection(std::slice::from_ref(doc))
}

/// Read and validate the entityType declaration of a document.
pub(crate) fn declared_entity_type(doc: &Value) -> Result<EntityType> {
    let name = doc
        .get(fields::ENTITY_TYPE)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or(OmcError::MissingEntityType)?;
    EntityType::from_name(name)
}
