//! Document importer / multi-entity parser
//!
//! Accepts raw text in either representation (entity documents as JSON, or
//! graph-text) and recovers canonical entity documents. Collection input is
//! processed entity by entity: one malformed record becomes a warning, never
//! an aborted import. Strictly single-entity input fails hard instead.

use crate::document::{self, fields};
use crate::error::{OmcError, Result};
use crate::export::declared_entity_type;
use crate::extract::entities_from_graph;
use crate::registry::EntityType;
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::debug;

/// One accepted entity
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedEntity {
    /// Declared entity type name
    pub entity_type: String,
    /// Combined form of the entity's primary identifier
    pub entity_id: String,
    /// The canonical entity document (synthesized identifier spliced in,
    /// per-type transforms applied)
    pub content: Value,
    /// Display name, if the document carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Result surface for collection imports
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    /// False only when the whole call failed (unparseable input)
    pub success: bool,
    /// Accepted entities, in input order
    pub entities: Vec<ImportedEntity>,
    /// Per-entity problems that did not abort the import
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// The fatal error, when success is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Import a collection of entities from raw text.
///
/// Never panics and never returns an error value: fatal problems land in
/// `error`, per-entity problems in `warnings`, so a partial import reports
/// both what was accepted and what was skipped.
pub fn import_collection(text: &str) -> ImportResult {
    let (candidates, mut warnings) = match candidates_from_text(text) {
        Ok(parsed) => parsed,
        Err(err) => {
            return ImportResult {
                success: false,
                entities: Vec::new(),
                warnings: Vec::new(),
                error: Some(err.to_string()),
            };
        }
    };

    let mut entities = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for candidate in candidates {
        match accept_entity(candidate) {
            Ok(entity) => {
                if seen.contains(&entity.entity_id) {
                    warnings.push(format!(
                        "duplicate identifier {}: later entity dropped",
                        entity.entity_id
                    ));
                    continue;
                }
                seen.insert(entity.entity_id.clone());
                entities.push(entity);
            }
            Err(err) => warnings.push(format!("entity skipped: {}", err)),
        }
    }

    debug!(
        accepted = entities.len(),
        warnings = warnings.len(),
        "collection import complete"
    );
    ImportResult {
        success: true,
        entities,
        warnings,
        error: None,
    }
}

/// Import strictly single-entity input.
///
/// Any validation failure is fatal here; there is no warning channel to
/// demote it to.
pub fn import_single(text: &str) -> Result<ImportedEntity> {
    let (mut candidates, _warnings) = candidates_from_text(text)?;
    if candidates.len() != 1 {
        return Err(OmcError::MalformedInput(format!(
            "expected exactly one entity, found {}",
            candidates.len()
        )));
    }
    accept_entity(candidates.pop().unwrap())
}

/// Recover candidate entity documents from raw text.
///
/// Graph-text is detected first; otherwise the text must be JSON in one of
/// three shapes: a top-level array, an object with an `entities` array, or a
/// single entity object.
fn candidates_from_text(text: &str) -> Result<(Vec<Value>, Vec<String>)> {
    if looks_like_graph_text(text) {
        let graph = nexus_graph_turtle::read(text)?;
        let (extracted, warnings) = entities_from_graph(&graph);
        return Ok((extracted.into_iter().map(|e| e.content).collect(), warnings));
    }

    let parsed: Value = serde_json::from_str(text)
        .map_err(|e| OmcError::MalformedInput(e.to_string()))?;

    let candidates = match parsed {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("entities") {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(OmcError::MalformedInput(format!(
                    "\"entities\" must be an array, found {}",
                    json_kind(&other)
                )));
            }
            None => vec![Value::Object(obj)],
        },
        other => {
            return Err(OmcError::MalformedInput(format!(
                "expected an entity document or collection, found {}",
                json_kind(&other)
            )));
        }
    };
    Ok((candidates, Vec::new()))
}

/// Validate one candidate and shape it into an accepted entity.
fn accept_entity(candidate: Value) -> Result<ImportedEntity> {
    let entity_type = declared_entity_type(&candidate)?;

    let tag = candidate
        .get(fields::SCHEMA_VERSION_TAG)
        .and_then(Value::as_str)
        .unwrap_or_default();
    if !nexus_vocab::schema::tag_is_valid(tag) {
        return Err(OmcError::InvalidSchemaVersion {
            found: tag.to_string(),
        });
    }

    let primary = document::primary_combined_form(&candidate);
    let Value::Object(mut obj) = candidate else {
        return Err(OmcError::MalformedInput(
            "entity document must be an object".into(),
        ));
    };

    let entity_id = match primary {
        Some(combined) => combined,
        None => document::splice_identifier(&mut obj).combined_form,
    };

    for (_, transform) in TRANSFORMS.iter().filter(|(t, _)| *t == entity_type) {
        transform(&mut obj);
    }

    let name = obj
        .get(fields::NAME)
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(ImportedEntity {
        entity_type: entity_type.name().to_string(),
        entity_id,
        content: Value::Object(obj),
        name,
    })
}

fn looks_like_graph_text(text: &str) -> bool {
    text.lines()
        .map(str::trim_start)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .is_some_and(|line| line.starts_with("@prefix") || line.starts_with('<') || line.starts_with("_:"))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Per-type post-processing
// ---------------------------------------------------------------------------

type Transform = fn(&mut Map<String, Value>);

/// Entity-type-specific post-processing, applied after structural validation.
///
/// Each row promotes or normalizes data the wizard-era exports left in
/// side-channel positions, keeping the shaping logic out of the parser
/// control flow.
static TRANSFORMS: Lazy<Vec<(EntityType, Transform)>> = Lazy::new(|| {
    vec![
        (EntityType::Location, normalize_address_aliases),
        (EntityType::Participant, promote_job_title),
        (EntityType::CreativeWork, promote_bare_title),
    ]
});

/// `streetNumberAndName`/`city` -> `street`/`locality` inside the address
/// block; canonical names win when both are present.
fn normalize_address_aliases(doc: &mut Map<String, Value>) {
    let Some(address) = doc.get_mut("address").and_then(Value::as_object_mut) else {
        return;
    };
    for (alias, canonical) in [("streetNumberAndName", "street"), ("city", "locality")] {
        if let Some(value) = address.remove(alias) {
            address.entry(canonical).or_insert(value);
        }
    }
}

/// A top-level `jobTitle` belongs on the structural characteristic.
fn promote_job_title(doc: &mut Map<String, Value>) {
    let Some(job_title) = doc.remove("jobTitle") else {
        return;
    };
    let sc = doc
        .entry("structuralCharacteristics")
        .or_insert_with(|| Value::Object(Map::new()));
    if let Some(sc) = sc.as_object_mut() {
        sc.entry("jobTitle").or_insert(job_title);
    }
}

/// A bare-string `title` becomes the object form the adapter expects.
fn promote_bare_title(doc: &mut Map<String, Value>) {
    if let Some(Value::String(s)) = doc.get("title") {
        let title = s.clone();
        doc.insert(
            "title".to_string(),
            serde_json::json!({ "titleName": title }),
        );
    }
}
