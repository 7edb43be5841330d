//! Term variants and the quad they compose into.
//!
//! Every value in this module is immutable once constructed. Fields are read
//! through accessors; [`Literal`] and [`Quad`] can only be built by a
//! [`DataFactory`](crate::DataFactory), which is where their invariants are
//! enforced. Equality and hashing live in [`equality`](crate::equality).

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// The discriminant shared by every term, serialised as its
/// PascalCase name (e.g. `"NamedNode"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TermType {
    NamedNode,
    BlankNode,
    Literal,
    Variable,
    DefaultGraph,
    Quad,
}

impl TermType {
    /// Every term type, in declaration order.
    pub const ALL: [TermType; 6] = [
        TermType::NamedNode,
        TermType::BlankNode,
        TermType::Literal,
        TermType::Variable,
        TermType::DefaultGraph,
        TermType::Quad,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TermType::NamedNode => "NamedNode",
            TermType::BlankNode => "BlankNode",
            TermType::Literal => "Literal",
            TermType::Variable => "Variable",
            TermType::DefaultGraph => "DefaultGraph",
            TermType::Quad => "Quad",
        }
    }

    pub(crate) const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl std::fmt::Display for TermType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a [`TermType`] from its PascalCase name.
///
/// Returns `Err` with a descriptive message if the string is not recognised.
impl std::str::FromStr for TermType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TermType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown term type {:?}; expected one of: NamedNode, BlankNode, \
                     Literal, Variable, DefaultGraph, Quad",
                    s
                )
            })
    }
}

/// An IRI. The string is kept byte-for-byte as given; no syntax checks.
#[derive(Debug, Clone)]
pub struct NamedNode {
    pub(crate) iri: String,
}

impl NamedNode {
    pub fn new(iri: impl Into<String>) -> Self {
        Self { iri: iri.into() }
    }

    pub fn value(&self) -> &str {
        &self.iri
    }

    pub fn term_type(&self) -> TermType {
        TermType::NamedNode
    }
}

/// A blank node, identified without any serialisation prefix such as `_:`.
#[derive(Debug, Clone)]
pub struct BlankNode {
    pub(crate) id: String,
}

impl BlankNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn value(&self) -> &str {
        &self.id
    }

    pub fn term_type(&self) -> TermType {
        TermType::BlankNode
    }
}

/// A lexical value with a datatype and, for language-tagged strings, a
/// lowercase language tag.
///
/// A non-empty `language` always comes with the `rdf:langString` datatype.
/// The datatype is never absent.
#[derive(Debug, Clone)]
pub struct Literal {
    pub(crate) value: String,
    pub(crate) language: String,
    pub(crate) datatype: NamedNode,
}

impl Literal {
    /// Caller guarantees the language/datatype invariant.
    pub(crate) fn from_parts(value: String, language: String, datatype: NamedNode) -> Self {
        Self {
            value,
            language,
            datatype,
        }
    }

    /// The unescaped lexical form.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Lowercase BCP47 tag, or `""` when the literal has none.
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn datatype(&self) -> &NamedNode {
        &self.datatype
    }

    pub fn is_language_tagged(&self) -> bool {
        !self.language.is_empty()
    }

    pub fn term_type(&self) -> TermType {
        TermType::Literal
    }
}

/// A query variable, named without its leading `?` or `$`.
#[derive(Debug, Clone)]
pub struct Variable {
    pub(crate) name: String,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn value(&self) -> &str {
        &self.name
    }

    pub fn term_type(&self) -> TermType {
        TermType::Variable
    }
}

/// The default graph. Its value is always `""`; every instance is equal to
/// every other.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultGraph;

impl DefaultGraph {
    pub fn value(&self) -> &str {
        ""
    }

    pub fn term_type(&self) -> TermType {
        TermType::DefaultGraph
    }
}

/// A subject/predicate/object/graph tuple.
///
/// A quad is also a term (`termType` `Quad`, value `""`), which is how
/// RDF-star places one quad inside the subject or object of another. Quads
/// are built bottom-up and never mutated, so nesting cannot form a cycle.
#[derive(Debug, Clone)]
pub struct Quad {
    pub(crate) subject: Term,
    pub(crate) predicate: Term,
    pub(crate) object: Term,
    pub(crate) graph: Term,
}

impl Quad {
    /// Caller has already checked every position against a role set.
    pub(crate) fn from_parts(subject: Term, predicate: Term, object: Term, graph: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
            graph,
        }
    }

    pub fn subject(&self) -> &Term {
        &self.subject
    }

    pub fn predicate(&self) -> &Term {
        &self.predicate
    }

    pub fn object(&self) -> &Term {
        &self.object
    }

    pub fn graph(&self) -> &Term {
        &self.graph
    }

    /// True when the quad sits in the default graph, i.e. it is a triple.
    pub fn is_triple(&self) -> bool {
        matches!(self.graph, Term::DefaultGraph(_))
    }

    pub fn value(&self) -> &str {
        ""
    }

    pub fn term_type(&self) -> TermType {
        TermType::Quad
    }
}

/// Any RDF term.
#[derive(Debug, Clone)]
pub enum Term {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    Literal(Literal),
    Variable(Variable),
    DefaultGraph(DefaultGraph),
    Quad(Arc<Quad>),
}

impl Term {
    pub fn term_type(&self) -> TermType {
        self.as_ref().term_type()
    }

    /// The variant-specific `value` field; `""` for the default graph and
    /// for quads.
    pub fn value(&self) -> &str {
        match self {
            Term::NamedNode(n) => n.value(),
            Term::BlankNode(b) => b.value(),
            Term::Literal(l) => l.value(),
            Term::Variable(v) => v.value(),
            Term::DefaultGraph(_) | Term::Quad(_) => "",
        }
    }

    pub fn as_ref(&self) -> TermRef<'_> {
        match self {
            Term::NamedNode(n) => TermRef::NamedNode(n),
            Term::BlankNode(b) => TermRef::BlankNode(b),
            Term::Literal(l) => TermRef::Literal(l),
            Term::Variable(v) => TermRef::Variable(v),
            Term::DefaultGraph(g) => TermRef::DefaultGraph(g),
            Term::Quad(q) => TermRef::Quad(q),
        }
    }

    pub fn as_named_node(&self) -> Option<&NamedNode> {
        match self {
            Term::NamedNode(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_quad(&self) -> Option<&Quad> {
        match self {
            Term::Quad(q) => Some(q),
            _ => None,
        }
    }
}

/// A borrowed view of any term variant. The equality engine dispatches on
/// pairs of these.
#[derive(Debug, Clone, Copy)]
pub enum TermRef<'a> {
    NamedNode(&'a NamedNode),
    BlankNode(&'a BlankNode),
    Literal(&'a Literal),
    Variable(&'a Variable),
    DefaultGraph(&'a DefaultGraph),
    Quad(&'a Quad),
}

impl TermRef<'_> {
    pub fn term_type(self) -> TermType {
        match self {
            TermRef::NamedNode(_) => TermType::NamedNode,
            TermRef::BlankNode(_) => TermType::BlankNode,
            TermRef::Literal(_) => TermType::Literal,
            TermRef::Variable(_) => TermType::Variable,
            TermRef::DefaultGraph(_) => TermType::DefaultGraph,
            TermRef::Quad(_) => TermType::Quad,
        }
    }
}

macro_rules! impl_term_conversions {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Term {
                fn from(t: $variant) -> Self {
                    Term::$variant(t)
                }
            }

            impl<'a> From<&'a $variant> for TermRef<'a> {
                fn from(t: &'a $variant) -> Self {
                    TermRef::$variant(t)
                }
            }
        )*
    };
}

impl_term_conversions!(NamedNode, BlankNode, Literal, Variable, DefaultGraph);

impl From<Quad> for Term {
    fn from(q: Quad) -> Self {
        Term::Quad(Arc::new(q))
    }
}

impl From<Arc<Quad>> for Term {
    fn from(q: Arc<Quad>) -> Self {
        Term::Quad(q)
    }
}

impl<'a> From<&'a Quad> for TermRef<'a> {
    fn from(q: &'a Quad) -> Self {
        TermRef::Quad(q)
    }
}

impl<'a> From<&'a Term> for TermRef<'a> {
    fn from(t: &'a Term) -> Self {
        t.as_ref()
    }
}

// --- tests -------------------------------------------------------------------
