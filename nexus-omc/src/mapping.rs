//! Property-mapping tables
//!
//! A table row maps one document field to one vocabulary predicate (by local
//! name) with a declared kind. Adapters consult the tables in both
//! directions, so adding a field or an entity type means adding rows, not
//! control flow.

use crate::registry::EntityType;
use chrono::{DateTime, NaiveDate};
use nexus_graph_ir::LiteralKind;
use serde_json::Value;

/// The kind of value a field carries
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Plain string
    Text,
    /// Whole number (xsd:integer)
    Integer,
    /// Floating point (xsd:double)
    Double,
    /// Boolean
    Boolean,
    /// Calendar date, `YYYY-MM-DD`
    Date,
    /// RFC 3339 date-time
    DateTime,
    /// Cross-entity reference (combined form); becomes a graph link, never a
    /// literal
    Reference,
}

impl FieldKind {
    /// The literal kind this field is emitted as.
    ///
    /// References have no literal kind; that is the point of the type.
    pub fn literal_kind(self) -> Option<LiteralKind> {
        match self {
            FieldKind::Text => Some(LiteralKind::Text),
            FieldKind::Integer => Some(LiteralKind::Integer),
            FieldKind::Double => Some(LiteralKind::Double),
            FieldKind::Boolean => Some(LiteralKind::Boolean),
            FieldKind::Date => Some(LiteralKind::Date),
            FieldKind::DateTime => Some(LiteralKind::DateTime),
            FieldKind::Reference => None,
        }
    }
}

/// One scalar (or reference) field of an entity or nested block
#[derive(Clone, Copy, Debug)]
pub struct ScalarField {
    /// Canonical document field name
    pub doc_field: &'static str,
    /// Accepted input synonyms, canonicalized on import
    pub aliases: &'static [&'static str],
    /// Vocabulary predicate local name
    pub local_name: &'static str,
    /// Value kind
    pub kind: FieldKind,
}

/// A nested characteristic block rendered as one blank node
#[derive(Clone, Copy, Debug)]
pub struct NestedBlock {
    /// Document field holding the block (also the blank-label hint)
    pub doc_field: &'static str,
    /// Predicate local name linking the entity to the block
    pub local_name: &'static str,
    /// Class IRI the blank node is typed with, if any
    pub node_class: Option<&'static str>,
    /// Scalar and reference fields of the block
    pub fields: &'static [ScalarField],
    /// Blocks nested one level further down
    pub children: &'static [NestedBlock],
}

/// The full property table for one entity type
#[derive(Clone, Copy, Debug)]
pub struct EntityMapping {
    /// The entity type this table describes
    pub entity_type: EntityType,
    /// Top-level scalar and reference fields
    pub scalars: &'static [ScalarField],
    /// Top-level nested blocks
    pub blocks: &'static [NestedBlock],
}

impl ScalarField {
    /// Look up this field's value in a document object, canonical name first,
    /// then aliases.
    pub fn value_in<'a>(&self, obj: &'a serde_json::Map<String, Value>) -> Option<&'a Value> {
        if let Some(v) = obj.get(self.doc_field) {
            return Some(v);
        }
        self.aliases.iter().find_map(|alias| obj.get(*alias))
    }
}

/// Convert a document value to the lexical form for its declared kind.
///
/// Returns None when the value is absent-equivalent (null, empty string) or
/// does not fit the kind; callers decide whether that is worth a warning.
pub fn lexical_form(kind: FieldKind, value: &Value) -> Option<String> {
    match kind {
        FieldKind::Text => match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        },
        FieldKind::Integer => match value {
            Value::Number(n) => n.as_i64().map(|i| i.to_string()),
            Value::String(s) => s.trim().parse::<i64>().ok().map(|i| i.to_string()),
            _ => None,
        },
        FieldKind::Double => match value {
            Value::Number(n) => n.as_f64().map(|f| f.to_string()),
            Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f.to_string()),
            _ => None,
        },
        FieldKind::Boolean => value.as_bool().map(|b| b.to_string()),
        FieldKind::Date => match value {
            Value::String(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|_| s.clone()),
            _ => None,
        },
        FieldKind::DateTime => match value {
            Value::String(s) => DateTime::parse_from_rfc3339(s).ok().map(|_| s.clone()),
            _ => None,
        },
        FieldKind::Reference => None,
    }
}

/// Convert a literal's lexical form back to a document value (import
/// direction). Falls back to a string when the lexical form does not parse,
/// rather than dropping data.
pub fn value_from_lexical(kind: FieldKind, lexical: &str) -> Value {
    match kind {
        FieldKind::Integer => lexical
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::from(lexical)),
        FieldKind::Double => lexical
            .parse::<f64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::from(lexical)),
        FieldKind::Boolean => lexical
            .parse::<bool>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::from(lexical)),
        _ => Value::from(lexical),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lexical_form_skips_absent_equivalents() {
        assert_eq!(lexical_form(FieldKind::Text, &json!("")), None);
        assert_eq!(lexical_form(FieldKind::Text, &json!(null)), None);
        assert_eq!(lexical_form(FieldKind::Text, &json!("x")), Some("x".into()));
    }

    #[test]
    fn test_lexical_form_numbers() {
        assert_eq!(lexical_form(FieldKind::Integer, &json!(42)), Some("42".into()));
        assert_eq!(lexical_form(FieldKind::Integer, &json!("17")), Some("17".into()));
        assert_eq!(lexical_form(FieldKind::Integer, &json!("x")), None);
        assert_eq!(
            lexical_form(FieldKind::Double, &json!(44.9)),
            Some("44.9".into())
        );
    }

    #[test]
    fn test_lexical_form_dates() {
        assert_eq!(
            lexical_form(FieldKind::Date, &json!("2024-05-01")),
            Some("2024-05-01".into())
        );
        assert_eq!(lexical_form(FieldKind::Date, &json!("05/01/2024")), None);
        assert_eq!(
            lexical_form(FieldKind::DateTime, &json!("2024-05-01T09:00:00Z")),
            Some("2024-05-01T09:00:00Z".into())
        );
        assert_eq!(lexical_form(FieldKind::DateTime, &json!("yesterday")), None);
    }

    #[test]
    fn test_value_from_lexical_round_trips_numbers() {
        assert_eq!(value_from_lexical(FieldKind::Integer, "42"), json!(42));
        assert_eq!(value_from_lexical(FieldKind::Double, "44.9"), json!(44.9));
        assert_eq!(value_from_lexical(FieldKind::Boolean, "true"), json!(true));
        assert_eq!(value_from_lexical(FieldKind::Text, "x"), json!("x"));
    }

    #[test]
    fn test_alias_lookup_prefers_canonical() {
        const F: ScalarField = ScalarField {
            doc_field: "street",
            aliases: &["streetNumberAndName"],
            local_name: "street",
            kind: FieldKind::Text,
        };
        let obj = json!({"streetNumberAndName": "2 Oak Ave"});
        assert_eq!(
            F.value_in(obj.as_object().unwrap()),
            Some(&json!("2 Oak Ave"))
        );
        let both = json!({"street": "1 Main St", "streetNumberAndName": "2 Oak Ave"});
        assert_eq!(
            F.value_in(both.as_object().unwrap()),
            Some(&json!("1 Main St"))
        );
    }
}
