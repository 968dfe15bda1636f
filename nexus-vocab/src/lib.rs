//! OMC RDF vocabulary constants and namespace helpers for ME-Nexus
//!
//! This crate is the single authority for the IRIs used by the codec:
//! the OMC (Ontology for Media Creation) schema namespace, the ME-Nexus
//! entity-id namespace, and the standard RDF/RDFS/XSD vocabularies.
//!
//! # Organization
//!
//! - `omc` - OMC schema vocabulary (classes and predicates)
//! - `me` - ME-Nexus entity-id namespace and subject URI derivation
//! - `rdf` / `rdfs` / `xsd` - standard vocabularies (the subset the codec emits)
//! - `prefixes` - the prefix table declared in serialized graph-text
//! - `schema` - document schema version tag and marker

/// OMC schema vocabulary (v2.8)
pub mod omc {
    /// OMC schema namespace IRI
    pub const NS: &str = "https://movielabs.com/omc/rdf/schema/v2.8#";

    // Classes

    /// omc:CreativeWork IRI
    pub const CREATIVE_WORK: &str = "https://movielabs.com/omc/rdf/schema/v2.8#CreativeWork";

    /// omc:Asset IRI
    pub const ASSET: &str = "https://movielabs.com/omc/rdf/schema/v2.8#Asset";

    /// omc:Participant IRI
    pub const PARTICIPANT: &str = "https://movielabs.com/omc/rdf/schema/v2.8#Participant";

    /// omc:Person IRI (class of a Participant's structural characteristic node)
    pub const PERSON: &str = "https://movielabs.com/omc/rdf/schema/v2.8#Person";

    /// omc:Location IRI
    pub const LOCATION: &str = "https://movielabs.com/omc/rdf/schema/v2.8#Location";

    /// omc:Task IRI
    pub const TASK: &str = "https://movielabs.com/omc/rdf/schema/v2.8#Task";

    /// omc:Context IRI
    pub const CONTEXT: &str = "https://movielabs.com/omc/rdf/schema/v2.8#Context";

    /// omc:Character IRI
    pub const CHARACTER: &str = "https://movielabs.com/omc/rdf/schema/v2.8#Character";

    // Identifier structure predicates

    /// omc:hasIdentifier IRI
    pub const HAS_IDENTIFIER: &str = "https://movielabs.com/omc/rdf/schema/v2.8#hasIdentifier";

    /// omc:identifierScope IRI
    pub const IDENTIFIER_SCOPE: &str = "https://movielabs.com/omc/rdf/schema/v2.8#identifierScope";

    /// omc:identifierValue IRI
    pub const IDENTIFIER_VALUE: &str = "https://movielabs.com/omc/rdf/schema/v2.8#identifierValue";

    /// omc:combinedForm IRI
    pub const COMBINED_FORM: &str = "https://movielabs.com/omc/rdf/schema/v2.8#combinedForm";

    /// Build an OMC predicate or class IRI from its local name.
    ///
    /// Property-mapping tables store local names; this is the one place
    /// they are joined to the namespace.
    pub fn iri(local_name: &str) -> String {
        format!("{}{}", NS, local_name)
    }

    /// Get the local name portion of an OMC IRI, or None if the IRI is
    /// not in the OMC namespace.
    #[inline]
    pub fn local_name(iri: &str) -> Option<&str> {
        iri.strip_prefix(NS)
    }
}

/// ME-Nexus entity-id namespace
pub mod me {
    use crate::iri_component;

    /// ME-Nexus entity-id namespace IRI
    pub const NS: &str = "https://me-nexus.com/id/";

    /// Derive the Named Subject URI for an identifier's combined form.
    ///
    /// Deterministic and injective: distinct combined forms always map to
    /// distinct URIs (component encoding escapes `%` itself).
    pub fn subject_iri(combined_form: &str) -> String {
        format!("{}{}", NS, iri_component::encode(combined_form))
    }

    /// Recover the combined form from a Named Subject URI.
    ///
    /// Returns None if the URI is outside the ME-Nexus namespace or carries
    /// a malformed percent escape.
    pub fn combined_form(subject_iri: &str) -> Option<String> {
        let encoded = subject_iri.strip_prefix(NS)?;
        iri_component::decode(encoded)
    }
}

/// RDF vocabulary constants
pub mod rdf {
    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
}

/// RDFS vocabulary constants
pub mod rdfs {
    /// rdfs:label IRI
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
}

/// XSD datatype constants (the subset the codec emits)
pub mod xsd {
    /// xsd:string IRI
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    /// xsd:boolean IRI
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

    /// xsd:integer IRI
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

    /// xsd:double IRI
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";

    /// xsd:date IRI
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";

    /// xsd:dateTime IRI
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
}

/// Prefix table declared at the top of serialized graph-text.
///
/// Ordered by prefix label; the serializer emits it verbatim, so this
/// ordering is part of the deterministic-output contract.
pub mod prefixes {
    /// (prefix, namespace IRI) pairs, sorted by prefix
    pub const TABLE: &[(&str, &str)] = &[
        ("me", crate::me::NS),
        ("omc", crate::omc::NS),
        ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
        ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
        ("xsd", "http://www.w3.org/2001/XMLSchema#"),
    ];

    /// Look up the namespace IRI for a prefix label.
    pub fn namespace(prefix: &str) -> Option<&'static str> {
        TABLE
            .iter()
            .find(|(p, _)| *p == prefix)
            .map(|(_, ns)| *ns)
    }
}

/// Document schema version tag
pub mod schema {
    /// Canonical schemaVersionTag value for emitted documents
    pub const VERSION_TAG: &str = "https://movielabs.com/omc/json/schema/v2.6";

    /// Version marker an incoming schemaVersionTag must carry
    pub const VERSION_MARKER: &str = "v2.6";

    /// Check whether a document's schemaVersionTag carries the expected
    /// version marker.
    #[inline]
    pub fn tag_is_valid(tag: &str) -> bool {
        tag.contains(VERSION_MARKER)
    }
}

/// Injective percent-encoding for IRI path components.
///
/// Combined forms contain `:` and occasionally characters that are not
/// legal in an IRI. Unreserved characters plus `:` pass through; everything
/// else (including `%`) is percent-encoded, which keeps the mapping
/// injective and reversible.
pub mod iri_component {
    fn is_unreserved(b: u8) -> bool {
        b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~' | b':')
    }

    /// Encode a string for use as an IRI path component.
    pub fn encode(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for b in s.bytes() {
            if is_unreserved(b) {
                out.push(b as char);
            } else {
                out.push('%');
                out.push(char::from_digit((b >> 4) as u32, 16).unwrap().to_ascii_uppercase());
                out.push(char::from_digit((b & 0xf) as u32, 16).unwrap().to_ascii_uppercase());
            }
        }
        out
    }

    /// Decode a percent-encoded IRI path component.
    ///
    /// Returns None on a malformed or non-UTF-8 escape sequence.
    pub fn decode(s: &str) -> Option<String> {
        let bytes = s.as_bytes();
        let mut out = Vec::with_capacity(bytes.len());
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'%' {
                let hi = (bytes.get(i + 1).copied()? as char).to_digit(16)?;
                let lo = (bytes.get(i + 2).copied()? as char).to_digit(16)?;
                out.push(((hi << 4) | lo) as u8);
                i += 3;
            } else {
                out.push(bytes[i]);
                i += 1;
            }
        }
        String::from_utf8(out).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_omc_iri_construction() {
        assert_eq!(
            omc::iri("hasLocation"),
            "https://movielabs.com/omc/rdf/schema/v2.8#hasLocation"
        );
        assert_eq!(omc::local_name(omc::ASSET), Some("Asset"));
        assert_eq!(omc::local_name("http://example.org/x"), None);
    }

    #[test]
    fn test_subject_iri_round_trip() {
        let iri = me::subject_iri("me-nexus:loc-1");
        assert_eq!(iri, "https://me-nexus.com/id/me-nexus:loc-1");
        assert_eq!(me::combined_form(&iri), Some("me-nexus:loc-1".to_string()));
    }

    #[test]
    fn test_subject_iri_encodes_unsafe_chars() {
        let iri = me::subject_iri("lab:asset 01/v2");
        assert_eq!(iri, "https://me-nexus.com/id/lab:asset%2001%2Fv2");
        assert_eq!(me::combined_form(&iri), Some("lab:asset 01/v2".to_string()));
    }

    #[test]
    fn test_subject_iri_injective_over_percent() {
        // A literal "%20" in a combined form must not collide with a space.
        let a = me::subject_iri("x:a b");
        let b = me::subject_iri("x:a%20b");
        assert_ne!(a, b);
        assert_eq!(me::combined_form(&a), Some("x:a b".to_string()));
        assert_eq!(me::combined_form(&b), Some("x:a%20b".to_string()));
    }

    #[test]
    fn test_decode_rejects_malformed_escape() {
        assert_eq!(iri_component::decode("abc%2"), None);
        assert_eq!(iri_component::decode("abc%zz"), None);
    }

    #[test]
    fn test_prefix_lookup() {
        assert_eq!(prefixes::namespace("omc"), Some(omc::NS));
        assert_eq!(prefixes::namespace("me"), Some(me::NS));
        assert_eq!(prefixes::namespace("nope"), None);
    }

    #[test]
    fn test_version_tag() {
        assert!(schema::tag_is_valid(schema::VERSION_TAG));
        assert!(schema::tag_is_valid("omc-json-v2.6"));
        assert!(!schema::tag_is_valid("https://movielabs.com/omc/json/schema/v1.0"));
    }
}
