//! Reverse extraction: parsed graph-text -> entity documents
//!
//! Walks the triples grouped by subject, recognizes entity subjects by their
//! class triple, and rebuilds documents through the same property-mapping
//! tables the adapters emit with. Blank nodes are consumed as nested blocks
//! and never become entities of their own.

use crate::adapters::mapping_for;
use crate::document::{fields, reference_object, Identifier};
use crate::mapping::{value_from_lexical, FieldKind, NestedBlock, ScalarField};
use crate::registry::EntityType;
use nexus_graph_ir::{Term, Triple};
use nexus_graph_turtle::ParsedGraph;
use nexus_vocab::{me, omc, rdf, rdfs, schema};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::warn;

/// One entity recovered from graph-text
#[derive(Clone, Debug)]
pub struct ExtractedEntity {
    /// Recognized entity type
    pub entity_type: EntityType,
    /// Reconstructed document
    pub content: Value,
}

/// Recover entity documents from a parsed graph.
///
/// Named subjects with an unrecognized (or missing) class triple are reported
/// as warnings and skipped; the pass never aborts over one bad subject.
pub fn entities_from_graph(graph: &ParsedGraph) -> (Vec<ExtractedEntity>, Vec<String>) {
    let mut order: Vec<&Term> = Vec::new();
    let mut by_subject: HashMap<&Term, Vec<&Triple>> = HashMap::new();
    for triple in &graph.triples {
        by_subject.entry(&triple.s).or_insert_with(|| {
            order.push(&triple.s);
            Vec::new()
        });
        by_subject.get_mut(&triple.s).unwrap().push(triple);
    }

    let mut entities = Vec::new();
    let mut warnings = Vec::new();

    for subject in order {
        let Some(subject_iri) = subject.as_iri() else {
            continue; // blank nodes are consumed as blocks below
        };
        let triples = &by_subject[subject];

        let class = triples
            .iter()
            .filter(|t| t.p.as_iri() == Some(rdf::TYPE))
            .find_map(|t| t.o.as_iri().and_then(EntityType::from_class_iri));

        let Some(entity_type) = class else {
            warnings.push(format!(
                "subject {} has no recognized entity class; skipped",
                subject_iri
            ));
            continue;
        };

        let content = build_document(entity_type, subject_iri, triples, &by_subject, &mut warnings);
        entities.push(ExtractedEntity {
            entity_type,
            content,
        });
    }

    (entities, warnings)
}

fn build_document(
    entity_type: EntityType,
    subject_iri: &str,
    triples: &[&Triple],
    by_subject: &HashMap<&Term, Vec<&Triple>>,
    warnings: &mut Vec<String>,
) -> Value {
    let mut doc = Map::new();
    doc.insert(
        fields::ENTITY_TYPE.to_string(),
        Value::from(entity_type.name()),
    );
    doc.insert(
        fields::SCHEMA_VERSION_TAG.to_string(),
        Value::from(schema::VERSION_TAG),
    );

    let ids = collect_identifiers(subject_iri, triples, by_subject);
    doc.insert(
        fields::IDENTIFIER.to_string(),
        Value::Array(ids.iter().map(Identifier::to_value).collect()),
    );

    if let Some(label) = first_literal(triples, rdfs::LABEL) {
        doc.insert(fields::NAME.to_string(), Value::from(label));
    }
    if let Some(desc) = first_literal(triples, &omc::iri(fields::DESCRIPTION)) {
        doc.insert(fields::DESCRIPTION.to_string(), Value::from(desc));
    }

    let mapping = mapping_for(entity_type);
    for field in mapping.scalars {
        collect_scalar(field, triples, &mut doc, warnings);
    }
    for block in mapping.blocks {
        collect_block(block, triples, by_subject, &mut doc, warnings);
    }

    Value::Object(doc)
}

fn collect_identifiers(
    subject_iri: &str,
    triples: &[&Triple],
    by_subject: &HashMap<&Term, Vec<&Triple>>,
) -> Vec<Identifier> {
    let mut ids = Vec::new();
    for triple in triples {
        if triple.p.as_iri() != Some(omc::HAS_IDENTIFIER) {
            continue;
        }
        let Some(node_triples) = by_subject.get(&triple.o) else {
            continue;
        };
        let scope = first_literal(node_triples, omc::IDENTIFIER_SCOPE);
        let value = first_literal(node_triples, omc::IDENTIFIER_VALUE);
        if let (Some(scope), Some(value)) = (scope, value) {
            ids.push(Identifier::new(scope, value));
        }
    }

    if ids.is_empty() {
        // No identifier structure in the graph: fall back to the URI itself.
        if let Some(combined) = me::combined_form(subject_iri) {
            if let Some((scope, value)) = combined.split_once(':') {
                ids.push(Identifier::new(scope, value));
            }
        }
    }
    ids
}

fn collect_scalar(
    field: &ScalarField,
    triples: &[&Triple],
    out: &mut Map<String, Value>,
    warnings: &mut Vec<String>,
) {
    let predicate = omc::iri(field.local_name);
    let mut values = Vec::new();

    for triple in triples {
        if triple.p.as_iri() != Some(predicate.as_str()) {
            continue;
        }
        match field.kind {
            FieldKind::Reference => {
                let Some(target_iri) = triple.o.as_iri() else {
                    continue;
                };
                let combined = match me::combined_form(target_iri) {
                    Some(c) => c,
                    None => {
                        warnings.push(format!(
                            "reference target {} is outside the entity-id namespace",
                            target_iri
                        ));
                        target_iri.to_string()
                    }
                };
                values.push(reference_object(&combined));
            }
            kind => {
                if let Some((value, _)) = triple.o.as_literal() {
                    values.push(value_from_lexical(kind, &value.lexical()));
                }
            }
        }
    }

    insert_values(out, field.doc_field, values);
}

fn collect_block(
    block: &NestedBlock,
    triples: &[&Triple],
    by_subject: &HashMap<&Term, Vec<&Triple>>,
    out: &mut Map<String, Value>,
    warnings: &mut Vec<String>,
) {
    let predicate = omc::iri(block.local_name);
    let mut values = Vec::new();

    for triple in triples {
        if triple.p.as_iri() != Some(predicate.as_str()) {
            continue;
        }
        if !triple.o.is_blank() {
            warn!(block = block.doc_field, "characteristic link does not point at a blank node");
            continue;
        }
        let Some(node_triples) = by_subject.get(&triple.o) else {
            continue;
        };

        let mut obj = Map::new();
        for field in block.fields {
            collect_scalar(field, node_triples, &mut obj, warnings);
        }
        for child in block.children {
            collect_block(child, node_triples, by_subject, &mut obj, warnings);
        }
        if !obj.is_empty() {
            values.push(Value::Object(obj));
        }
    }

    insert_values(out, block.doc_field, values);
}

fn insert_values(out: &mut Map<String, Value>, field: &str, mut values: Vec<Value>) {
    match values.len() {
        0 => {}
        1 => {
            out.insert(field.to_string(), values.pop().unwrap());
        }
        _ => {
            out.insert(field.to_string(), Value::Array(values));
        }
    }
}

fn first_literal(triples: &[&Triple], predicate: &str) -> Option<String> {
    triples.iter().find_map(|t| {
        if t.p.as_iri() == Some(predicate) {
            t.o.as_literal().map(|(v, _)| v.lexical())
        } else {
            None
        }
    })
}
