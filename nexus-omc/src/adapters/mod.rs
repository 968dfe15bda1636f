//! Per-entity-type adapters
//!
//! Every adapter is a property-mapping table plus the shared emission engine
//! below. The engine owns the walk (Named Subject, class triple, identifier
//! nodes, label, table-driven scalars and nested blocks); the per-type
//! modules own only their tables and the `to_graph` entry point.
//!
//! Emission rules:
//! - absent / null / empty-string fields are skipped, never emitted as empty
//!   literals;
//! - a nested block with no populated fields is entirely omitted - no blank
//!   node is allocated for it;
//! - reference fields go through `GraphStore::add_reference` and can only
//!   become graph links.

pub mod asset;
pub mod character;
pub mod context;
pub mod creative_work;
pub mod location;
pub mod participant;
pub mod task;

use crate::document::{self, fields};
use crate::error::{OmcError, Result};
use crate::mapping::{lexical_form, EntityMapping, FieldKind, NestedBlock, ScalarField};
use crate::registry::EntityType;
use nexus_graph_ir::{GraphStore, LiteralKind, Term};
use nexus_vocab::{omc, rdf, rdfs};
use serde_json::{Map, Value};
use tracing::warn;

/// Translate one entity document into triples.
///
/// Dispatches on the entity type; returns the entity's Named Subject.
pub fn to_graph(store: &mut GraphStore, entity_type: EntityType, doc: &Value) -> Result<Term> {
    match entity_type {
        EntityType::CreativeWork => creative_work::to_graph(store, doc),
        EntityType::Asset => asset::to_graph(store, doc),
        EntityType::Participant => participant::to_graph(store, doc),
        EntityType::Location => location::to_graph(store, doc),
        EntityType::Task => task::to_graph(store, doc),
        EntityType::Context => context::to_graph(store, doc),
        EntityType::Character => character::to_graph(store, doc),
    }
}

/// The property table for an entity type (shared with reverse extraction)
pub fn mapping_for(entity_type: EntityType) -> &'static EntityMapping {
    match entity_type {
        EntityType::CreativeWork => &creative_work::MAPPING,
        EntityType::Asset => &asset::MAPPING,
        EntityType::Participant => &participant::MAPPING,
        EntityType::Location => &location::MAPPING,
        EntityType::Task => &task::MAPPING,
        EntityType::Context => &context::MAPPING,
        EntityType::Character => &character::MAPPING,
    }
}

/// Shared emission walk, driven entirely by the mapping table
pub(crate) fn emit_entity(
    store: &mut GraphStore,
    mapping: &EntityMapping,
    doc: &Value,
) -> Result<Term> {
    let obj = doc
        .as_object()
        .ok_or_else(|| OmcError::MalformedInput("entity document must be an object".into()))?;

    let ids = document::identifiers(doc);
    let primary = ids.first().ok_or_else(|| OmcError::MissingIdentifier {
        entity_type: mapping.entity_type.name().to_string(),
    })?;

    let subject = store.register_entity(&primary.combined_form);
    store.add_triple(
        subject.clone(),
        rdf::TYPE,
        Term::iri(mapping.entity_type.class_iri()),
    );

    for id in &ids {
        let node = store.new_blank(fields::IDENTIFIER);
        store.add_triple(subject.clone(), omc::HAS_IDENTIFIER, node.clone());
        store.add_literal(node.clone(), omc::IDENTIFIER_SCOPE, &id.scope, LiteralKind::Text);
        store.add_literal(node.clone(), omc::IDENTIFIER_VALUE, &id.value, LiteralKind::Text);
        store.add_literal(node, omc::COMBINED_FORM, &id.combined_form, LiteralKind::Text);
    }

    if let Some(name) = obj.get(fields::NAME).and_then(Value::as_str) {
        if !name.is_empty() {
            store.add_literal(subject.clone(), rdfs::LABEL, name, LiteralKind::Text);
        }
    }
    if let Some(desc) = obj.get(fields::DESCRIPTION).and_then(Value::as_str) {
        if !desc.is_empty() {
            store.add_literal(
                subject.clone(),
                &omc::iri(fields::DESCRIPTION),
                desc,
                LiteralKind::Text,
            );
        }
    }

    for field in mapping.scalars {
        emit_scalar(store, &subject, field, obj);
    }
    for block in mapping.blocks {
        if let Some(value) = block_value(obj, block) {
            emit_block(store, &subject, block, value);
        }
    }

    Ok(subject)
}

fn block_value<'a>(obj: &'a Map<String, Value>, block: &NestedBlock) -> Option<&'a Value> {
    obj.get(block.doc_field)
}

fn emit_scalar(store: &mut GraphStore, subject: &Term, field: &ScalarField, obj: &Map<String, Value>) {
    let Some(value) = field.value_in(obj) else {
        return;
    };
    let values: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        Value::Null => return,
        other => vec![other],
    };

    let predicate = omc::iri(field.local_name);
    for v in values {
        match field.kind {
            FieldKind::Reference => match document::reference_combined_form(v) {
                Some(combined) => {
                    store.add_reference(subject.clone(), &predicate, combined);
                }
                None => {
                    if !v.is_null() {
                        warn!(field = field.doc_field, "skipping malformed reference value");
                    }
                }
            },
            kind => match lexical_form(kind, v) {
                Some(lexical) => {
                    // literal_kind is Some for every non-Reference kind
                    let lk = kind.literal_kind().expect("literal field kind");
                    store.add_literal(subject.clone(), &predicate, lexical, lk);
                }
                None => {
                    let absent = v.is_null() || v.as_str().is_some_and(str::is_empty);
                    if !absent {
                        warn!(
                            field = field.doc_field,
                            "skipping value that does not fit its declared kind"
                        );
                    }
                }
            },
        }
    }
}

fn emit_block(store: &mut GraphStore, parent: &Term, block: &NestedBlock, value: &Value) {
    match value {
        Value::Array(items) => {
            for item in items {
                emit_block_object(store, parent, block, item);
            }
        }
        _ => emit_block_object(store, parent, block, value),
    }
}

fn emit_block_object(store: &mut GraphStore, parent: &Term, block: &NestedBlock, value: &Value) {
    let Some(obj) = value.as_object() else {
        if !value.is_null() {
            warn!(field = block.doc_field, "skipping non-object characteristic block");
        }
        return;
    };

    // A block with nothing to say gets no blank node at all; surfacing an
    // internal label as the only trace of an empty block is a defect.
    if !block_has_content(block, obj) {
        return;
    }

    let node = store.new_blank(block.doc_field);
    store.add_triple(parent.clone(), &omc::iri(block.local_name), node.clone());
    if let Some(class_iri) = block.node_class {
        store.add_triple(node.clone(), rdf::TYPE, Term::iri(class_iri));
    }

    for field in block.fields {
        emit_scalar(store, &node, field, obj);
    }
    for child in block.children {
        if let Some(child_value) = obj.get(child.doc_field) {
            emit_block(store, &node, child, child_value);
        }
    }
}

fn block_has_content(block: &NestedBlock, obj: &Map<String, Value>) -> bool {
    let scalar_content = block.fields.iter().any(|field| {
        field.value_in(obj).is_some_and(|value| {
            let values: Vec<&Value> = match value {
                Value::Array(items) => items.iter().collect(),
                other => vec![other],
            };
            values.iter().any(|v| match field.kind {
                FieldKind::Reference => document::reference_combined_form(v).is_some(),
                kind => lexical_form(kind, v).is_some(),
            })
        })
    });
    if scalar_content {
        return true;
    }
    block.children.iter().any(|child| match obj.get(child.doc_field) {
        Some(Value::Array(items)) => items
            .iter()
            .any(|item| item.as_object().is_some_and(|o| block_has_content(child, o))),
        Some(value) => value
            .as_object()
            .is_some_and(|o| block_has_content(child, o)),
        None => false,
    })
}
