//! Human-readable rendering of terms and quads.
//!
//! Terms render in N-Triples term syntax, extended with RDF-star's `<< >>`
//! for quads in term position. A [`Quad`] on its own renders as an N-Quads
//! statement line. The output is meant for logs, error messages and test
//! diagnostics; it is not a serialiser and does not validate IRIs.
//!
//! ```text
//! <http://ex.org/s> <http://ex.org/p> "chat"@fr <http://ex.org/g> .
//! << _:b0 <http://ex.org/p> "42"^^<http://www.w3.org/2001/XMLSchema#integer> >>
//! ```

use std::fmt::{self, Display, Formatter};

use crate::term::{BlankNode, DefaultGraph, Literal, NamedNode, Quad, Term, Variable};
use crate::vocab;

impl Display for NamedNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.value())
    }
}

impl Display for BlankNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.value())
    }
}

/// `"lexical"`, `"lexical"@lang` or `"lexical"^^<datatype>`; `xsd:string`
/// is left implicit.
impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", escape_literal(self.value()))?;
        if self.is_language_tagged() {
            write!(f, "@{}", self.language())
        } else if self.datatype().value() != vocab::XSD_STRING {
            write!(f, "^^{}", self.datatype())
        } else {
            Ok(())
        }
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.value())
    }
}

impl Display for DefaultGraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("DEFAULT")
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Term::NamedNode(n) => n.fmt(f),
            Term::BlankNode(b) => b.fmt(f),
            Term::Literal(l) => l.fmt(f),
            Term::Variable(v) => v.fmt(f),
            Term::DefaultGraph(g) => g.fmt(f),
            Term::Quad(q) => {
                write!(f, "<< {} {} {}", q.subject(), q.predicate(), q.object())?;
                if !q.is_triple() {
                    write!(f, " {}", q.graph())?;
                }
                f.write_str(" >>")
            }
        }
    }
}

/// An N-Quads line without the trailing newline; the graph is omitted for
/// triples.
impl Display for Quad {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject(), self.predicate(), self.object())?;
        if !self.is_triple() {
            write!(f, " {}", self.graph())?;
        }
        f.write_str(" .")
    }
}

// --- helpers -----------------------------------------------------------------

/// Escape a lexical form for a double-quoted N-Triples string.
fn escape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04X}", c as u32)),
            _ => out.push(c),
        }
    }
    out
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{DataFactory, FactoryConfig, TermFactory};
    use crate::role::Dialect;

    #[test]
    fn leaf_terms() {
        let f = TermFactory::new(FactoryConfig {
            variables: true,
            ..FactoryConfig::default()
        })
        .unwrap();
        assert_eq!(f.named_node("http://ex.org/a").to_string(), "<http://ex.org/a>");
        assert_eq!(f.blank_node(Some("n1")).unwrap().to_string(), "_:n1");
        assert_eq!(f.variable("who").unwrap().to_string(), "?who");
        assert_eq!(f.default_graph().to_string(), "DEFAULT");
    }

    #[test]
    fn literal_forms() {
        let f = TermFactory::rdf11();
        assert_eq!(f.literal("plain", None).unwrap().to_string(), "\"plain\"");
        assert_eq!(
            f.literal("colour", Some("en-GB".into())).unwrap().to_string(),
            "\"colour\"@en-gb"
        );
        assert_eq!(
            f.literal("true", Some(f.named_node(vocab::XSD_BOOLEAN).into()))
                .unwrap()
                .to_string(),
            "\"true\"^^<http://www.w3.org/2001/XMLSchema#boolean>"
        );
    }

    #[test]
    fn literal_escaping() {
        let f = TermFactory::rdf11();
        let l = f.literal("line1\nline2\t\"q\"\\\x01", None).unwrap();
        assert_eq!(l.to_string(), r#""line1\nline2\t\"q\"\\\u0001""#);
        assert_eq!(f.literal("日本語", None).unwrap().to_string(), "\"日本語\"");
    }

    #[test]
    fn quad_lines() {
        let f = TermFactory::rdf11();
        let s = || -> Term { f.named_node("http://ex.org/s").into() };
        let p = || -> Term { f.named_node("http://ex.org/p").into() };
        let triple = f.quad(s(), p(), f.literal("o", None).unwrap().into(), None).unwrap();
        assert_eq!(
            triple.to_string(),
            "<http://ex.org/s> <http://ex.org/p> \"o\" ."
        );
        let quad = f
            .quad(s(), p(), s(), Some(f.blank_node(Some("g")).unwrap().into()))
            .unwrap();
        assert_eq!(
            quad.to_string(),
            "<http://ex.org/s> <http://ex.org/p> <http://ex.org/s> _:g ."
        );
    }

    #[test]
    fn quoted_triples_use_double_angle_brackets() {
        let f = TermFactory::new(FactoryConfig::new(Dialect::RdfStar)).unwrap();
        let inner = f
            .quoted(
                f.blank_node(Some("a")).unwrap().into(),
                f.named_node("http://ex.org/p").into(),
                f.named_node("http://ex.org/o").into(),
            )
            .unwrap();
        assert_eq!(inner.to_string(), "<< _:a <http://ex.org/p> <http://ex.org/o> >>");
        let outer = f
            .quad(inner, f.named_node("http://ex.org/q").into(), f.literal("x", None).unwrap().into(), None)
            .unwrap();
        assert_eq!(
            outer.to_string(),
            "<< _:a <http://ex.org/p> <http://ex.org/o> >> <http://ex.org/q> \"x\" ."
        );
    }
}
