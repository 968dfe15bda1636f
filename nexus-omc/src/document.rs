//! Entity-document field access
//!
//! Documents are JSON trees on the wire. This module centralizes the field
//! names and the identifier / reference conventions so adapters and the
//! importer never spell them twice.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use uuid::Uuid;

/// Document field names
pub mod fields {
    /// Entity type discriminator
    pub const ENTITY_TYPE: &str = "entityType";
    /// Schema version tag
    pub const SCHEMA_VERSION_TAG: &str = "schemaVersionTag";
    /// Identifier array
    pub const IDENTIFIER: &str = "identifier";
    /// Display name
    pub const NAME: &str = "name";
    /// Free-text description
    pub const DESCRIPTION: &str = "description";
    /// Identifier scope
    pub const SCOPE: &str = "scope";
    /// Identifier value within its scope
    pub const VALUE: &str = "value";
    /// Canonical `scope:value` cross-reference key
    pub const COMBINED_FORM: &str = "combinedForm";
}

/// Identifier scope used for synthesized identifiers
pub const SYNTHESIZED_SCOPE: &str = "me-nexus";

/// One entry of an entity's identifier array
///
/// `combined_form` is always `scope + ":" + value`; the constructor derives
/// it, so the two representations cannot diverge inside the codec.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    /// Issuing scope (e.g., "me-nexus")
    pub scope: String,
    /// Value within the scope
    pub value: String,
    /// Canonical `scope:value` key
    pub combined_form: String,
}

impl Identifier {
    /// Create an identifier, deriving the combined form
    pub fn new(scope: impl Into<String>, value: impl Into<String>) -> Self {
        let scope = scope.into();
        let value = value.into();
        let combined_form = format!("{}:{}", scope, value);
        Self {
            scope,
            value,
            combined_form,
        }
    }

    /// Synthesize a fresh identifier in the fixed scope
    pub fn synthesize() -> Self {
        Self::new(SYNTHESIZED_SCOPE, Uuid::new_v4().to_string())
    }

    /// Parse one identifier entry from a document.
    ///
    /// Accepts `{scope, value}` (combined form derived), a lone
    /// `{combinedForm}` (split at the first `:`), or the full triple. A
    /// stored combined form that diverges from `scope:value` is normalized
    /// to the derived form.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let scope = obj.get(fields::SCOPE).and_then(Value::as_str);
        let val = obj.get(fields::VALUE).and_then(Value::as_str);
        let combined = obj.get(fields::COMBINED_FORM).and_then(Value::as_str);

        match (scope, val) {
            (Some(s), Some(v)) if !s.is_empty() && !v.is_empty() => Some(Self::new(s, v)),
            _ => {
                let combined = combined?;
                let (s, v) = combined.split_once(':')?;
                if s.is_empty() || v.is_empty() {
                    return None;
                }
                Some(Self::new(s, v))
            }
        }
    }

    /// Render as a document identifier entry
    pub fn to_value(&self) -> Value {
        json!({
            fields::SCOPE: self.scope,
            fields::VALUE: self.value,
            fields::COMBINED_FORM: self.combined_form,
        })
    }
}

/// Read all well-formed identifiers from a document
pub fn identifiers(doc: &Value) -> Vec<Identifier> {
    match doc.get(fields::IDENTIFIER) {
        Some(Value::Array(entries)) => entries.iter().filter_map(Identifier::from_value).collect(),
        Some(single @ Value::Object(_)) => {
            Identifier::from_value(single).into_iter().collect()
        }
        _ => Vec::new(),
    }
}

/// The combined form of a document's first identifier
pub fn primary_combined_form(doc: &Value) -> Option<String> {
    identifiers(doc).into_iter().next().map(|id| id.combined_form)
}

/// Splice a synthesized identifier into a document that has none.
///
/// Returns the identifier so the caller can use it as the entity id.
pub fn splice_identifier(doc: &mut Map<String, Value>) -> Identifier {
    let id = Identifier::synthesize();
    doc.insert(
        fields::IDENTIFIER.to_string(),
        Value::Array(vec![id.to_value()]),
    );
    id
}

/// Extract the combined form from a reference field value.
///
/// Accepted forms (backward compatibility): a bare combined-form string, or
/// the object form `{"combinedForm": "scope:value"}`. Anything else is not a
/// reference.
pub fn reference_combined_form(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) if s.contains(':') => Some(s),
        Value::Object(obj) => obj.get(fields::COMBINED_FORM).and_then(Value::as_str),
        _ => None,
    }
}

/// Render a reference in the canonical object form
pub fn reference_object(combined_form: &str) -> Value {
    json!({ fields::COMBINED_FORM: combined_form })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_derives_combined_form() {
        let id = Identifier::new("me-nexus", "loc-1");
        assert_eq!(id.combined_form, "me-nexus:loc-1");
    }

    #[test]
    fn test_from_value_normalizes_divergent_combined_form() {
        let id = Identifier::from_value(&json!({
            "scope": "me-nexus",
            "value": "loc-1",
            "combinedForm": "stale:whatever"
        }))
        .unwrap();
        assert_eq!(id.combined_form, "me-nexus:loc-1");
    }

    #[test]
    fn test_from_value_splits_lone_combined_form() {
        let id = Identifier::from_value(&json!({ "combinedForm": "lab:a-7" })).unwrap();
        assert_eq!(id.scope, "lab");
        assert_eq!(id.value, "a-7");
    }

    #[test]
    fn test_from_value_rejects_empty_parts() {
        assert!(Identifier::from_value(&json!({ "combinedForm": ":x" })).is_none());
        assert!(Identifier::from_value(&json!({ "combinedForm": "x:" })).is_none());
        assert!(Identifier::from_value(&json!({ "combinedForm": "noseparator" })).is_none());
    }

    #[test]
    fn test_synthesized_identifiers_are_unique() {
        let a = Identifier::synthesize();
        let b = Identifier::synthesize();
        assert_eq!(a.scope, SYNTHESIZED_SCOPE);
        assert_ne!(a.value, b.value);
    }

    #[test]
    fn test_reference_forms() {
        assert_eq!(
            reference_combined_form(&json!("me-nexus:loc-1")),
            Some("me-nexus:loc-1")
        );
        assert_eq!(
            reference_combined_form(&json!({ "combinedForm": "me-nexus:loc-1" })),
            Some("me-nexus:loc-1")
        );
        assert_eq!(reference_combined_form(&json!("no-colon")), None);
        assert_eq!(reference_combined_form(&json!(42)), None);
    }
}
