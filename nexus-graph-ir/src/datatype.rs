//! RDF datatype representation
//!
//! Datatypes are always explicit - there is no "untyped" literal. Plain
//! strings default to `xsd:string`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// RDF literal datatype
///
/// Always an expanded IRI. Use the named constructors for the datatypes the
/// codec emits; `from_iri` covers anything a parsed graph carries.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Datatype(Arc<str>);

impl Datatype {
    /// Create a datatype from an expanded IRI
    pub fn from_iri(iri: impl AsRef<str>) -> Self {
        Datatype(Arc::from(iri.as_ref()))
    }

    /// xsd:string - default for plain string literals
    pub fn xsd_string() -> Self {
        Self::from_iri(nexus_vocab::xsd::STRING)
    }

    /// xsd:boolean
    pub fn xsd_boolean() -> Self {
        Self::from_iri(nexus_vocab::xsd::BOOLEAN)
    }

    /// xsd:integer
    pub fn xsd_integer() -> Self {
        Self::from_iri(nexus_vocab::xsd::INTEGER)
    }

    /// xsd:double
    pub fn xsd_double() -> Self {
        Self::from_iri(nexus_vocab::xsd::DOUBLE)
    }

    /// xsd:date
    pub fn xsd_date() -> Self {
        Self::from_iri(nexus_vocab::xsd::DATE)
    }

    /// xsd:dateTime
    pub fn xsd_date_time() -> Self {
        Self::from_iri(nexus_vocab::xsd::DATE_TIME)
    }

    /// Get the IRI representation of this datatype
    pub fn as_iri(&self) -> &str {
        &self.0
    }

    /// Check if this is the xsd:string datatype
    pub fn is_xsd_string(&self) -> bool {
        self.0.as_ref() == nexus_vocab::xsd::STRING
    }

    /// Check if this is a numeric type (integer or double)
    pub fn is_numeric(&self) -> bool {
        matches!(
            self.0.as_ref(),
            nexus_vocab::xsd::INTEGER | nexus_vocab::xsd::DOUBLE
        )
    }

    /// Check if this is a temporal type (date or dateTime)
    pub fn is_temporal(&self) -> bool {
        matches!(
            self.0.as_ref(),
            nexus_vocab::xsd::DATE | nexus_vocab::xsd::DATE_TIME
        )
    }
}

impl PartialEq for Datatype {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Datatype {}

impl Hash for Datatype {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl PartialOrd for Datatype {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Datatype {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl std::fmt::Display for Datatype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datatype_constructors() {
        assert_eq!(Datatype::xsd_string().as_iri(), nexus_vocab::xsd::STRING);
        assert_eq!(Datatype::xsd_integer().as_iri(), nexus_vocab::xsd::INTEGER);
        assert_eq!(
            Datatype::xsd_date_time().as_iri(),
            nexus_vocab::xsd::DATE_TIME
        );
    }

    #[test]
    fn test_classification() {
        assert!(Datatype::xsd_string().is_xsd_string());
        assert!(Datatype::xsd_integer().is_numeric());
        assert!(Datatype::xsd_double().is_numeric());
        assert!(!Datatype::xsd_string().is_numeric());
        assert!(Datatype::xsd_date().is_temporal());
        assert!(Datatype::xsd_date_time().is_temporal());
        assert!(!Datatype::xsd_boolean().is_temporal());
    }

    #[test]
    fn test_equality() {
        assert_eq!(Datatype::xsd_string(), Datatype::from_iri(nexus_vocab::xsd::STRING));
        assert_ne!(Datatype::xsd_string(), Datatype::xsd_integer());
    }
}
