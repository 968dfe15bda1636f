//! A single graph fact: (subject, predicate, object)

use crate::Term;
use serde::{Deserialize, Serialize};

/// An RDF triple
///
/// # Invariants
///
/// - `s` is an IRI or blank node, never a literal.
/// - `p` is always an IRI.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    /// Subject term
    pub s: Term,
    /// Predicate term (always `Term::Iri`)
    pub p: Term,
    /// Object term
    pub o: Term,
}

impl Triple {
    /// Create a new triple
    pub fn new(s: Term, p: Term, o: Term) -> Self {
        debug_assert!(!s.is_literal(), "triple subject cannot be a literal");
        debug_assert!(p.is_iri(), "triple predicate must be an IRI");
        Self { s, p, o }
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} .", self.s, self.p, self.o)
    }
}
