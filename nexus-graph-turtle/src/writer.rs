//! Deterministic Turtle writer
//!
//! Renders the store's triples exactly as accumulated: prefix declarations
//! once, then one block per subject in first-appearance order, predicates in
//! insertion order. No sorting is introduced anywhere; determinism comes from
//! the store's insertion order being deterministic.

use nexus_graph_ir::{GraphStore, Term, Triple};
use std::collections::BTreeMap;

/// Serialize a store as Turtle graph-text.
///
/// Pure function of the store's contents. `GraphStore::resolve_pending` must
/// have been called first; parked references are invisible to the writer.
pub fn write(store: &GraphStore) -> String {
    let prefixes = store.prefixes();
    let mut out = String::new();

    for (prefix, ns) in prefixes {
        out.push_str("@prefix ");
        out.push_str(prefix);
        out.push_str(": <");
        out.push_str(ns);
        out.push_str("> .\n");
    }

    for (subject, triples) in store.subject_blocks() {
        out.push('\n');
        write_block(&mut out, subject, &triples, prefixes);
    }

    out
}

fn write_block(
    out: &mut String,
    subject: &Term,
    triples: &[&Triple],
    prefixes: &BTreeMap<String, String>,
) {
    out.push_str(&render_subject(subject, prefixes));
    for (i, triple) in triples.iter().enumerate() {
        if i == 0 {
            out.push(' ');
        } else {
            out.push_str(" ;\n    ");
        }
        out.push_str(&render_predicate(&triple.p, prefixes));
        out.push(' ');
        out.push_str(&render_object(&triple.o, prefixes));
    }
    out.push_str(" .\n");
}

fn render_subject(term: &Term, prefixes: &BTreeMap<String, String>) -> String {
    match term {
        Term::Iri(iri) => render_iri(iri, prefixes),
        Term::BlankNode(id) => format!("_:{}", id.as_str()),
        Term::Literal { .. } => unreachable!("literal in subject position"),
    }
}

fn render_predicate(term: &Term, prefixes: &BTreeMap<String, String>) -> String {
    match term.as_iri() {
        Some(iri) if iri == nexus_vocab::rdf::TYPE => "a".to_string(),
        Some(iri) => render_iri(iri, prefixes),
        None => unreachable!("non-IRI in predicate position"),
    }
}

fn render_object(term: &Term, prefixes: &BTreeMap<String, String>) -> String {
    match term {
        Term::Iri(iri) => render_iri(iri, prefixes),
        Term::BlankNode(id) => format!("_:{}", id.as_str()),
        Term::Literal { value, datatype } => {
            let mut s = format!("\"{}\"", escape(&value.lexical()));
            if !datatype.is_xsd_string() {
                s.push_str("^^");
                s.push_str(&render_iri(datatype.as_iri(), prefixes));
            }
            s
        }
    }
}

/// Compact an IRI against the prefix table, or fall back to `<iri>`.
///
/// Compaction only happens when the remaining local part is safe for a
/// prefixed name; entity URIs carry `:` in their local part and are always
/// written in full, which keeps the reader's lexer simple.
fn render_iri(iri: &str, prefixes: &BTreeMap<String, String>) -> String {
    let mut best: Option<(&str, &str)> = None;
    for (prefix, ns) in prefixes {
        if let Some(local) = iri.strip_prefix(ns.as_str()) {
            if local_is_safe(local) {
                match best {
                    Some((_, prev)) if prev.len() <= local.len() => {}
                    _ => best = Some((prefix, local)),
                }
            }
        }
    }
    match best {
        Some((prefix, local)) => format!("{}:{}", prefix, local),
        None => format!("<{}>", iri),
    }
}

fn local_is_safe(local: &str) -> bool {
    !local.is_empty()
        && !local.ends_with('.')
        && local
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'))
        && local
            .bytes()
            .next()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexus_graph_ir::LiteralKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_prefix_header_and_block() {
        let mut store = GraphStore::new();
        let loc = store.register_entity("me-nexus:loc-1");
        store.add_triple(loc.clone(), nexus_vocab::rdf::TYPE, Term::iri(nexus_vocab::omc::LOCATION));
        store.add_literal(loc, nexus_vocab::rdfs::LABEL, "Stage 7", LiteralKind::Text);

        let ttl = write(&store);
        assert!(ttl.starts_with("@prefix me: <https://me-nexus.com/id/> .\n"));
        assert!(ttl.contains(
            "<https://me-nexus.com/id/me-nexus:loc-1> a omc:Location ;\n    rdfs:label \"Stage 7\" ."
        ));
    }

    #[test]
    fn test_typed_literal_rendering() {
        let mut store = GraphStore::new();
        let s = store.register_entity("me-nexus:a-1");
        store.add_literal(
            s,
            &nexus_vocab::omc::iri("fileSize"),
            "2048",
            LiteralKind::Integer,
        );

        let ttl = write(&store);
        assert!(ttl.contains("omc:fileSize \"2048\"^^xsd:integer ."));
    }

    #[test]
    fn test_blank_node_blocks_are_separate() {
        let mut store = GraphStore::new();
        let loc = store.register_entity("me-nexus:loc-1");
        let addr = store.new_blank("address");
        store.add_triple(loc, &nexus_vocab::omc::iri("hasAddress"), addr.clone());
        store.add_literal(addr, &nexus_vocab::omc::iri("street"), "1 Main St", LiteralKind::Text);

        let ttl = write(&store);
        assert!(ttl.contains("omc:hasAddress _:b1_address_1 ."));
        assert!(ttl.contains("_:b1_address_1 omc:street \"1 Main St\" ."));
    }

    #[test]
    fn test_string_escaping() {
        let mut store = GraphStore::new();
        let s = store.register_entity("me-nexus:x");
        store.add_literal(
            s,
            nexus_vocab::rdfs::LABEL,
            "say \"hi\"\nback\\slash",
            LiteralKind::Text,
        );
        let ttl = write(&store);
        assert!(ttl.contains(r#""say \"hi\"\nback\\slash""#));
    }

    #[test]
    fn test_output_is_deterministic() {
        let build = || {
            let mut store = GraphStore::new();
            let a = store.register_entity("me-nexus:a");
            let b = store.register_entity("me-nexus:b");
            store.add_literal(a.clone(), nexus_vocab::rdfs::LABEL, "A", LiteralKind::Text);
            store.add_literal(b, nexus_vocab::rdfs::LABEL, "B", LiteralKind::Text);
            store.add_literal(a, &nexus_vocab::omc::iri("description"), "x", LiteralKind::Text);
            write(&store)
        };
        assert_eq!(build(), build());
    }
}
