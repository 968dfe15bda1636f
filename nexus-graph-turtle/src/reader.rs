//! Turtle reader for the emitted graph-text subset
//!
//! Covers what the writer produces: `@prefix` directives, full IRIs,
//! prefixed names, labeled blank nodes, the `a` keyword, typed string
//! literals, and `;`/`,` predicate-object lists. RDF collections, numeric
//! shorthand, and `[]` anonymous nodes are out of scope for this codec's
//! wire format and are rejected with a parse error.

use crate::error::{GraphTextError, Result};
use nexus_graph_ir::{Datatype, Term, Triple};
use std::collections::BTreeMap;

/// A parsed graph-text document
#[derive(Clone, Debug, Default)]
pub struct ParsedGraph {
    /// Declared prefixes (prefix -> namespace IRI)
    pub prefixes: BTreeMap<String, String>,
    /// Triples in document order
    pub triples: Vec<Triple>,
}

/// Parse a Turtle document.
pub fn read(input: &str) -> Result<ParsedGraph> {
    Parser::new(input)?.parse()
}

// ---------------------------------------------------------------------------
// Lexer
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
enum TokenKind {
    AtPrefix,
    Iri(String),
    PrefixedName(String, String),
    BlankNode(String),
    StringLiteral(String),
    CaretCaret,
    A,
    Semicolon,
    Comma,
    Dot,
    Eof,
}

#[derive(Clone, Debug)]
struct Token {
    kind: TokenKind,
    start: usize,
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b' ' | b'\t' | b'\r' | b'\n' => i += 1,
            b'#' => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'<' => {
                let start = i;
                i += 1;
                let iri_start = i;
                while i < bytes.len() && bytes[i] != b'>' {
                    i += 1;
                }
                if i >= bytes.len() {
                    return Err(GraphTextError::lexer(start, "unterminated IRI"));
                }
                tokens.push(Token {
                    kind: TokenKind::Iri(input[iri_start..i].to_string()),
                    start,
                });
                i += 1;
            }
            b'"' => {
                let start = i;
                i += 1;
                let mut value = String::new();
                loop {
                    if i >= bytes.len() {
                        return Err(GraphTextError::lexer(start, "unterminated string literal"));
                    }
                    match bytes[i] {
                        b'"' => {
                            i += 1;
                            break;
                        }
                        b'\\' => {
                            let esc = bytes.get(i + 1).copied().ok_or_else(|| {
                                GraphTextError::lexer(i, "dangling escape at end of input")
                            })?;
                            match esc {
                                b'\\' => value.push('\\'),
                                b'"' => value.push('"'),
                                b'n' => value.push('\n'),
                                b'r' => value.push('\r'),
                                b't' => value.push('\t'),
                                other => {
                                    return Err(GraphTextError::InvalidEscape(format!(
                                        "\\{}",
                                        other as char
                                    )))
                                }
                            }
                            i += 2;
                        }
                        _ => {
                            // Multi-byte UTF-8 sequences pass through intact.
                            let ch_len = utf8_len(bytes[i]);
                            value.push_str(&input[i..i + ch_len]);
                            i += ch_len;
                        }
                    }
                }
                tokens.push(Token {
                    kind: TokenKind::StringLiteral(value),
                    start,
                });
            }
            b'^' => {
                if bytes.get(i + 1) == Some(&b'^') {
                    tokens.push(Token {
                        kind: TokenKind::CaretCaret,
                        start: i,
                    });
                    i += 2;
                } else {
                    return Err(GraphTextError::lexer(i, "expected ^^"));
                }
            }
            b';' => {
                tokens.push(Token {
                    kind: TokenKind::Semicolon,
                    start: i,
                });
                i += 1;
            }
            b',' => {
                tokens.push(Token {
                    kind: TokenKind::Comma,
                    start: i,
                });
                i += 1;
            }
            b'.' => {
                tokens.push(Token {
                    kind: TokenKind::Dot,
                    start: i,
                });
                i += 1;
            }
            b'_' if bytes.get(i + 1) == Some(&b':') => {
                let start = i;
                i += 2;
                let label_start = i;
                while i < bytes.len() && is_name_byte(bytes[i]) {
                    i += 1;
                }
                if i == label_start {
                    return Err(GraphTextError::lexer(start, "empty blank node label"));
                }
                tokens.push(Token {
                    kind: TokenKind::BlankNode(input[label_start..i].to_string()),
                    start,
                });
            }
            b'@' => {
                let start = i;
                if input[i..].starts_with("@prefix") {
                    tokens.push(Token {
                        kind: TokenKind::AtPrefix,
                        start,
                    });
                    i += "@prefix".len();
                } else {
                    return Err(GraphTextError::lexer(start, "unknown @ directive"));
                }
            }
            _ if b.is_ascii_alphabetic() || b == b'_' => {
                let start = i;
                while i < bytes.len() && is_name_byte(bytes[i]) {
                    i += 1;
                }
                let word = &input[start..i];
                if bytes.get(i) == Some(&b':') {
                    // Prefixed name: prefix ':' local
                    i += 1;
                    let local_start = i;
                    while i < bytes.len() && is_name_byte(bytes[i]) {
                        i += 1;
                    }
                    tokens.push(Token {
                        kind: TokenKind::PrefixedName(
                            word.to_string(),
                            input[local_start..i].to_string(),
                        ),
                        start,
                    });
                } else if word == "a" {
                    tokens.push(Token {
                        kind: TokenKind::A,
                        start,
                    });
                } else {
                    return Err(GraphTextError::lexer(
                        start,
                        format!("unexpected bare word '{}'", word),
                    ));
                }
            }
            b':' => {
                // Empty-prefix name (":local")
                let start = i;
                i += 1;
                let local_start = i;
                while i < bytes.len() && is_name_byte(bytes[i]) {
                    i += 1;
                }
                tokens.push(Token {
                    kind: TokenKind::PrefixedName(String::new(), input[local_start..i].to_string()),
                    start,
                });
            }
            _ => {
                return Err(GraphTextError::lexer(
                    i,
                    format!("unexpected character '{}'", b as char),
                ));
            }
        }
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        start: bytes.len(),
    });
    Ok(tokens)
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.')
}

fn utf8_len(first: u8) -> usize {
    match first {
        b if b < 0x80 => 1,
        b if b >> 5 == 0b110 => 2,
        b if b >> 4 == 0b1110 => 3,
        _ => 4,
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    graph: ParsedGraph,
}

impl Parser {
    fn new(input: &str) -> Result<Self> {
        Ok(Self {
            tokens: tokenize(input)?,
            pos: 0,
            graph: ParsedGraph::default(),
        })
    }

    fn parse(mut self) -> Result<ParsedGraph> {
        while !self.is_at_end() {
            if self.current().kind == TokenKind::AtPrefix {
                self.parse_prefix_directive()?;
            } else {
                self.parse_triples()?;
            }
        }
        Ok(self.graph)
    }

    fn is_at_end(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, kind: &TokenKind, what: &str) -> Result<Token> {
        if std::mem::discriminant(&self.current().kind) == std::mem::discriminant(kind) {
            Ok(self.advance())
        } else {
            Err(GraphTextError::parse(
                self.current().start,
                format!("expected {}, found {:?}", what, self.current().kind),
            ))
        }
    }

    fn parse_prefix_directive(&mut self) -> Result<()> {
        self.advance(); // @prefix
        let (prefix, local) = match self.advance() {
            Token {
                kind: TokenKind::PrefixedName(p, l),
                ..
            } => (p, l),
            t => {
                return Err(GraphTextError::parse(t.start, "expected prefix name"));
            }
        };
        if !local.is_empty() {
            return Err(GraphTextError::parse(
                self.current().start,
                "prefix declaration must end with ':'",
            ));
        }
        let ns = match self.advance() {
            Token {
                kind: TokenKind::Iri(iri),
                ..
            } => iri,
            t => {
                return Err(GraphTextError::parse(t.start, "expected namespace IRI"));
            }
        };
        self.expect(&TokenKind::Dot, "'.'")?;
        self.graph.prefixes.insert(prefix, ns);
        Ok(())
    }

    fn parse_triples(&mut self) -> Result<()> {
        let subject = self.parse_subject()?;

        loop {
            let predicate = self.parse_predicate()?;
            loop {
                let object = self.parse_object()?;
                self.graph
                    .triples
                    .push(Triple::new(subject.clone(), predicate.clone(), object));
                if self.current().kind == TokenKind::Comma {
                    self.advance();
                } else {
                    break;
                }
            }
            match self.current().kind {
                TokenKind::Semicolon => {
                    self.advance();
                    // Trailing ';' before '.' is legal Turtle.
                    if self.current().kind == TokenKind::Dot {
                        break;
                    }
                }
                _ => break,
            }
        }

        self.expect(&TokenKind::Dot, "'.'")?;
        Ok(())
    }

    fn parse_subject(&mut self) -> Result<Term> {
        match self.advance() {
            Token {
                kind: TokenKind::Iri(iri),
                ..
            } => Ok(Term::iri(iri)),
            Token {
                kind: TokenKind::PrefixedName(p, l),
                ..
            } => Ok(Term::iri(self.expand(&p, &l)?)),
            Token {
                kind: TokenKind::BlankNode(label),
                ..
            } => Ok(Term::blank(label)),
            t => Err(GraphTextError::parse(
                t.start,
                format!("expected subject, found {:?}", t.kind),
            )),
        }
    }

    fn parse_predicate(&mut self) -> Result<Term> {
        match self.advance() {
            Token {
                kind: TokenKind::A, ..
            } => Ok(Term::iri(nexus_vocab::rdf::TYPE)),
            Token {
                kind: TokenKind::Iri(iri),
                ..
            } => Ok(Term::iri(iri)),
            Token {
                kind: TokenKind::PrefixedName(p, l),
                ..
            } => Ok(Term::iri(self.expand(&p, &l)?)),
            t => Err(GraphTextError::parse(
                t.start,
                format!("expected predicate, found {:?}", t.kind),
            )),
        }
    }

    fn parse_object(&mut self) -> Result<Term> {
        match self.advance() {
            Token {
                kind: TokenKind::Iri(iri),
                ..
            } => Ok(Term::iri(iri)),
            Token {
                kind: TokenKind::PrefixedName(p, l),
                ..
            } => Ok(Term::iri(self.expand(&p, &l)?)),
            Token {
                kind: TokenKind::BlankNode(label),
                ..
            } => Ok(Term::blank(label)),
            Token {
                kind: TokenKind::StringLiteral(value),
                ..
            } => {
                if self.current().kind == TokenKind::CaretCaret {
                    self.advance();
                    let datatype_iri = match self.advance() {
                        Token {
                            kind: TokenKind::Iri(iri),
                            ..
                        } => iri,
                        Token {
                            kind: TokenKind::PrefixedName(p, l),
                            ..
                        } => self.expand(&p, &l)?,
                        t => {
                            return Err(GraphTextError::parse(
                                t.start,
                                "expected datatype after ^^",
                            ));
                        }
                    };
                    Ok(Term::typed(value, Datatype::from_iri(datatype_iri)))
                } else {
                    Ok(Term::string(value))
                }
            }
            t => Err(GraphTextError::parse(
                t.start,
                format!("expected object, found {:?}", t.kind),
            )),
        }
    }

    fn expand(&self, prefix: &str, local: &str) -> Result<String> {
        let ns = self
            .graph
            .prefixes
            .get(prefix)
            .map(String::as_str)
            .or_else(|| nexus_vocab::prefixes::namespace(prefix))
            .ok_or_else(|| GraphTextError::UndefinedPrefix(prefix.to_string()))?;
        Ok(format!("{}{}", ns, local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_read_simple() {
        let ttl = r#"
            @prefix ex: <http://example.org/> .
            ex:alice ex:name "Alice" .
        "#;
        let graph = read(ttl).unwrap();
        assert_eq!(graph.triples.len(), 1);
        assert_eq!(
            graph.triples[0].s.as_iri(),
            Some("http://example.org/alice")
        );
        let (v, dt) = graph.triples[0].o.as_literal().unwrap();
        assert_eq!(v.as_str(), Some("Alice"));
        assert!(dt.is_xsd_string());
    }

    #[test]
    fn test_read_predicate_object_lists() {
        let ttl = r#"
            @prefix ex: <http://example.org/> .
            ex:alice a ex:Person ;
                ex:name "Alice" ;
                ex:likes ex:bob , ex:carol .
        "#;
        let graph = read(ttl).unwrap();
        assert_eq!(graph.triples.len(), 4);
        assert_eq!(
            graph.triples[0].p.as_iri(),
            Some(nexus_vocab::rdf::TYPE)
        );
        assert_eq!(
            graph.triples[3].o.as_iri(),
            Some("http://example.org/carol")
        );
    }

    #[test]
    fn test_read_blank_nodes_and_typed_literals() {
        let ttl = r#"
            @prefix omc: <https://movielabs.com/omc/rdf/schema/v2.8#> .
            @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
            <https://me-nexus.com/id/me-nexus:a-1> omc:hasFileDetails _:b1_fileDetails_1 .
            _:b1_fileDetails_1 omc:fileSize "2048"^^xsd:integer .
        "#;
        let graph = read(ttl).unwrap();
        assert_eq!(graph.triples.len(), 2);
        assert_eq!(
            graph.triples[0].o.as_blank().unwrap().as_str(),
            "b1_fileDetails_1"
        );
        let (v, dt) = graph.triples[1].o.as_literal().unwrap();
        assert_eq!(v.as_str(), Some("2048"));
        assert_eq!(dt.as_iri(), nexus_vocab::xsd::INTEGER);
    }

    #[test]
    fn test_read_escapes() {
        let ttl = r#"
            @prefix ex: <http://example.org/> .
            ex:x ex:label "line\nbreak \"quoted\" back\\slash" .
        "#;
        let graph = read(ttl).unwrap();
        let (v, _) = graph.triples[0].o.as_literal().unwrap();
        assert_eq!(v.as_str(), Some("line\nbreak \"quoted\" back\\slash"));
    }

    #[test]
    fn test_undefined_prefix_is_an_error() {
        let err = read("nope:x nope:y \"z\" .").unwrap_err();
        assert!(matches!(err, GraphTextError::UndefinedPrefix(p) if p == "nope"));
    }

    #[test]
    fn test_unterminated_string_is_an_error() {
        let err = read("@prefix ex: <http://example.org/> .\nex:x ex:y \"oops .").unwrap_err();
        assert!(matches!(err, GraphTextError::Lexer { .. }));
    }

    #[test]
    fn test_comments_are_skipped() {
        let ttl = r#"
            # header comment
            @prefix ex: <http://example.org/> .
            ex:a ex:b "c" . # trailing comment
        "#;
        let graph = read(ttl).unwrap();
        assert_eq!(graph.triples.len(), 1);
    }
}
