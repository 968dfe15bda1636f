//! Pass-scoped graph store
//!
//! One export or import pass owns exactly one [`GraphStore`]. The store holds
//! the accumulated triples (append-only, insertion-ordered), the blank-node
//! allocator, and the reference resolution table. None of this state is
//! shared across passes, so identical input always produces identical output
//! and concurrent passes cannot interfere.

use crate::{Datatype, StoreError, Term, Triple};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::sync::Arc;

/// The literal kinds the codec emits
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LiteralKind {
    /// xsd:string
    Text,
    /// xsd:boolean
    Boolean,
    /// xsd:integer
    Integer,
    /// xsd:double
    Double,
    /// xsd:date
    Date,
    /// xsd:dateTime
    DateTime,
}

impl LiteralKind {
    /// The datatype this kind is tagged with
    pub fn datatype(self) -> Datatype {
        match self {
            LiteralKind::Text => Datatype::xsd_string(),
            LiteralKind::Boolean => Datatype::xsd_boolean(),
            LiteralKind::Integer => Datatype::xsd_integer(),
            LiteralKind::Double => Datatype::xsd_double(),
            LiteralKind::Date => Datatype::xsd_date(),
            LiteralKind::DateTime => Datatype::xsd_date_time(),
        }
    }
}

/// A reference whose target had not been registered when it was added
#[derive(Clone, Debug)]
struct PendingReference {
    subject: Term,
    predicate: Arc<str>,
    target: String,
}

/// Append-only triple store for one export/import pass
///
/// # Example
///
/// ```
/// use nexus_graph_ir::{GraphStore, LiteralKind};
///
/// let mut store = GraphStore::new();
/// let loc = store.register_entity("me-nexus:loc-1");
/// let addr = store.new_blank("address");
///
/// store.add_triple(loc, "https://movielabs.com/omc/rdf/schema/v2.8#hasAddress", addr.clone());
/// store.add_literal(
///     addr,
///     "https://movielabs.com/omc/rdf/schema/v2.8#street",
///     "1 Main St",
///     LiteralKind::Text,
/// );
/// store.resolve_pending().unwrap();
/// assert_eq!(store.triples().len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct GraphStore {
    triples: Vec<Triple>,
    /// Prefix declarations for serialization (deterministic order)
    prefixes: BTreeMap<String, String>,
    /// Monotonic blank-node counter, never reused within a pass
    blank_counter: u64,
    /// Per-field sequence numbers for blank labels
    blank_field_seq: FxHashMap<String, u64>,
    /// combined form -> Named Subject IRI, built from identifiers seen this pass
    resolution: FxHashMap<String, Arc<str>>,
    /// References waiting for their target to be registered
    pending: Vec<PendingReference>,
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore {
    /// Create an empty store seeded with the standard prefix table
    pub fn new() -> Self {
        let mut prefixes = BTreeMap::new();
        for (prefix, ns) in nexus_vocab::prefixes::TABLE {
            prefixes.insert((*prefix).to_string(), (*ns).to_string());
        }
        Self {
            triples: Vec::new(),
            prefixes,
            blank_counter: 0,
            blank_field_seq: FxHashMap::default(),
            resolution: FxHashMap::default(),
            pending: Vec::new(),
        }
    }

    /// Register an entity's identifier and return its Named Subject.
    ///
    /// Idempotent: registering the same combined form twice returns the same
    /// subject. Registration makes the combined form resolvable for
    /// `add_reference` in the rest of the pass.
    pub fn register_entity(&mut self, combined_form: &str) -> Term {
        if let Some(iri) = self.resolution.get(combined_form) {
            return Term::Iri(iri.clone());
        }
        let iri: Arc<str> = Arc::from(nexus_vocab::me::subject_iri(combined_form).as_str());
        self.resolution
            .insert(combined_form.to_string(), iri.clone());
        Term::Iri(iri)
    }

    /// Make an additional combined form resolve to an existing subject.
    ///
    /// Entities can carry several identifiers; every one of them must be
    /// usable as a reference target within the pass.
    pub fn register_alias(&mut self, combined_form: &str, subject: &Term) {
        if let Term::Iri(iri) = subject {
            self.resolution
                .entry(combined_form.to_string())
                .or_insert_with(|| iri.clone());
        }
    }

    /// Look up the Named Subject for a combined form, if registered
    pub fn subject_for(&self, combined_form: &str) -> Option<Term> {
        self.resolution
            .get(combined_form)
            .map(|iri| Term::Iri(iri.clone()))
    }

    /// Allocate a fresh Blank Subject for a nested block of `field`.
    ///
    /// Labels follow `b<counter>_<field>_<n>`: `<counter>` is the
    /// store-global monotonic counter, `<n>` the per-field sequence number.
    /// Labels are never reused within a pass.
    pub fn new_blank(&mut self, field: &str) -> Term {
        self.blank_counter += 1;
        let seq = self.blank_field_seq.entry(field.to_string()).or_insert(0);
        *seq += 1;
        Term::blank(format!("b{}_{}_{}", self.blank_counter, field, seq))
    }

    /// Append a triple
    pub fn add_triple(&mut self, subject: Term, predicate: &str, object: Term) {
        self.triples
            .push(Triple::new(subject, Term::iri(predicate), object));
    }

    /// Append a typed-literal triple
    ///
    /// The lexical form is stored as given; the kind supplies the datatype
    /// tag. Callers validate lexical forms before emission.
    pub fn add_literal(
        &mut self,
        subject: Term,
        predicate: &str,
        lexical: impl AsRef<str>,
        kind: LiteralKind,
    ) {
        let object = match kind {
            LiteralKind::Text => Term::string(lexical),
            _ => Term::typed(lexical, kind.datatype()),
        };
        self.add_triple(subject, predicate, object);
    }

    /// Append a cross-entity reference triple.
    ///
    /// Resolves eagerly when the target's identifier is already registered;
    /// otherwise the reference is parked until `resolve_pending`. A reference
    /// can only ever become an IRI object, never a literal.
    pub fn add_reference(&mut self, subject: Term, predicate: &str, target_combined_form: &str) {
        if let Some(target) = self.subject_for(target_combined_form) {
            self.add_triple(subject, predicate, target);
        } else {
            self.pending.push(PendingReference {
                subject,
                predicate: Arc::from(predicate),
                target: target_combined_form.to_string(),
            });
        }
    }

    /// Resolve all parked references.
    ///
    /// Must be called once at the end of the pass, before serialization. A
    /// reference whose target never appeared is fatal: the error names the
    /// failing relation so the caller can report it.
    pub fn resolve_pending(&mut self) -> crate::error::Result<()> {
        let pending = std::mem::take(&mut self.pending);
        for r in pending {
            match self.resolution.get(&r.target) {
                Some(iri) => {
                    let target = Term::Iri(iri.clone());
                    self.triples
                        .push(Triple::new(r.subject, Term::iri(&r.predicate), target));
                }
                None => {
                    return Err(StoreError::UnresolvedReference {
                        subject: r.subject.to_string(),
                        predicate: r.predicate.to_string(),
                        target: r.target,
                    });
                }
            }
        }
        Ok(())
    }

    /// Number of references still parked
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// The accumulated triples, in insertion order
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    /// Prefix declarations (prefix -> namespace IRI), deterministic order
    pub fn prefixes(&self) -> &BTreeMap<String, String> {
        &self.prefixes
    }

    /// Check if the store holds no triples
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Group triples by subject in first-appearance order.
    ///
    /// Triples within a group keep their insertion order. This is the
    /// serializer's iteration order, so it must stay deterministic.
    pub fn subject_blocks(&self) -> Vec<(&Term, Vec<&Triple>)> {
        let mut order: Vec<&Term> = Vec::new();
        let mut groups: FxHashMap<&Term, Vec<&Triple>> = FxHashMap::default();
        for triple in &self.triples {
            groups.entry(&triple.s).or_insert_with(|| {
                order.push(&triple.s);
                Vec::new()
            });
            groups.get_mut(&triple.s).unwrap().push(triple);
        }
        order
            .into_iter()
            .map(|s| {
                let ts = groups.remove(s).unwrap_or_default();
                (s, ts)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_labels_are_monotonic_and_field_scoped() {
        let mut store = GraphStore::new();
        let a = store.new_blank("address");
        let b = store.new_blank("contact");
        let c = store.new_blank("address");

        assert_eq!(a.as_blank().unwrap().as_str(), "b1_address_1");
        assert_eq!(b.as_blank().unwrap().as_str(), "b2_contact_1");
        assert_eq!(c.as_blank().unwrap().as_str(), "b3_address_2");
    }

    #[test]
    fn test_counters_are_store_local() {
        let mut one = GraphStore::new();
        let mut two = GraphStore::new();
        one.new_blank("address");
        // A second store starts from scratch regardless of the first.
        let b = two.new_blank("address");
        assert_eq!(b.as_blank().unwrap().as_str(), "b1_address_1");
    }

    #[test]
    fn test_register_entity_is_idempotent() {
        let mut store = GraphStore::new();
        let a = store.register_entity("me-nexus:loc-1");
        let b = store.register_entity("me-nexus:loc-1");
        assert_eq!(a, b);
        assert_eq!(
            a.as_iri(),
            Some("https://me-nexus.com/id/me-nexus:loc-1")
        );
    }

    #[test]
    fn test_alias_resolves_to_primary_subject() {
        let mut store = GraphStore::new();
        let subject = store.register_entity("me-nexus:loc-1");
        store.register_alias("imdb:tt0000001", &subject);
        assert_eq!(store.subject_for("imdb:tt0000001"), Some(subject));
    }

    #[test]
    fn test_eager_reference_resolution() {
        let mut store = GraphStore::new();
        let loc = store.register_entity("me-nexus:loc-1");
        let p = store.register_entity("me-nexus:participant-1");

        store.add_reference(p, "https://movielabs.com/omc/rdf/schema/v2.8#hasLocation", "me-nexus:loc-1");
        assert_eq!(store.pending_len(), 0);

        let t = &store.triples()[0];
        assert_eq!(t.o, loc);
    }

    #[test]
    fn test_deferred_reference_resolution() {
        let mut store = GraphStore::new();
        let p = store.register_entity("me-nexus:participant-1");

        // Target not yet known: parked, not emitted.
        store.add_reference(
            p,
            "https://movielabs.com/omc/rdf/schema/v2.8#hasLocation",
            "me-nexus:loc-1",
        );
        assert_eq!(store.pending_len(), 1);
        assert!(store.is_empty());

        // Target shows up later in the pass.
        store.register_entity("me-nexus:loc-1");
        store.resolve_pending().unwrap();

        assert_eq!(store.pending_len(), 0);
        assert_eq!(store.triples().len(), 1);
        assert!(store.triples()[0].o.is_iri());
    }

    #[test]
    fn test_unresolved_reference_is_fatal() {
        let mut store = GraphStore::new();
        let p = store.register_entity("me-nexus:participant-1");
        store.add_reference(
            p,
            "https://movielabs.com/omc/rdf/schema/v2.8#hasLocation",
            "me-nexus:nowhere",
        );

        let err = store.resolve_pending().unwrap_err();
        match err {
            StoreError::UnresolvedReference { target, predicate, .. } => {
                assert_eq!(target, "me-nexus:nowhere");
                assert!(predicate.ends_with("hasLocation"));
            }
        }
    }

    #[test]
    fn test_subject_blocks_first_appearance_order() {
        let mut store = GraphStore::new();
        let a = store.register_entity("me-nexus:a");
        let b = store.register_entity("me-nexus:b");

        store.add_literal(b.clone(), "http://www.w3.org/2000/01/rdf-schema#label", "B", LiteralKind::Text);
        store.add_literal(a.clone(), "http://www.w3.org/2000/01/rdf-schema#label", "A", LiteralKind::Text);
        store.add_literal(b.clone(), "https://movielabs.com/omc/rdf/schema/v2.8#description", "b2", LiteralKind::Text);

        let blocks = store.subject_blocks();
        assert_eq!(blocks.len(), 2);
        // b appeared first and keeps both of its triples together.
        assert_eq!(blocks[0].0, &b);
        assert_eq!(blocks[0].1.len(), 2);
        assert_eq!(blocks[1].0, &a);
    }

    #[test]
    fn test_literal_kinds_carry_datatype_tags() {
        let mut store = GraphStore::new();
        let s = store.register_entity("me-nexus:x");
        store.add_literal(s.clone(), "https://movielabs.com/omc/rdf/schema/v2.8#fileSize", "1024", LiteralKind::Integer);
        store.add_literal(s, "https://movielabs.com/omc/rdf/schema/v2.8#scheduledStart", "2024-05-01T09:00:00Z", LiteralKind::DateTime);

        let (_, dt) = store.triples()[0].o.as_literal().unwrap();
        assert_eq!(dt.as_iri(), nexus_vocab::xsd::INTEGER);
        let (_, dt) = store.triples()[1].o.as_literal().unwrap();
        assert_eq!(dt.as_iri(), nexus_vocab::xsd::DATE_TIME);
    }
}
