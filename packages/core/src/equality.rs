//! Structural equality for terms and quads.
//!
//! [`equals`] is the one algorithm every `equals` method, every `PartialEq`
//! impl and therefore every map lookup goes through. It dispatches on the
//! pair of discriminants, short-circuits on a mismatch, and recurses into
//! literal datatypes and the four positions of a quad. It never panics, and
//! an absent `other` is simply unequal.
//!
//! The `Hash` impls at the bottom hash exactly the fields `equals` compares,
//! so equal terms always hash equally.

use std::hash::{Hash, Hasher};

use crate::term::{BlankNode, DefaultGraph, Literal, NamedNode, Quad, Term, TermRef, Variable};

/// Value equality of `this` and `other`. `None` is never equal to anything.
pub fn equals(this: TermRef<'_>, other: Option<TermRef<'_>>) -> bool {
    let Some(other) = other else {
        return false;
    };
    match (this, other) {
        (TermRef::NamedNode(a), TermRef::NamedNode(b)) => a.iri == b.iri,
        (TermRef::BlankNode(a), TermRef::BlankNode(b)) => a.id == b.id,
        (TermRef::Literal(a), TermRef::Literal(b)) => {
            a.value == b.value
                && a.language == b.language
                && equals((&a.datatype).into(), Some((&b.datatype).into()))
        }
        (TermRef::Variable(a), TermRef::Variable(b)) => a.name == b.name,
        (TermRef::DefaultGraph(_), TermRef::DefaultGraph(_)) => true,
        (TermRef::Quad(a), TermRef::Quad(b)) => [
            (&a.subject, &b.subject),
            (&a.predicate, &b.predicate),
            (&a.object, &b.object),
            (&a.graph, &b.graph),
        ]
        .into_iter()
        .all(|(x, y)| equals(x.as_ref(), Some(y.as_ref()))),
        _ => false,
    }
}

macro_rules! impl_equality {
    ($($ty:ty),*) => {
        $(
            impl $ty {
                /// True iff `other` is present, has the same term type, and
                /// all semantic fields are equal by value.
                pub fn equals(&self, other: Option<&Term>) -> bool {
                    equals(self.into(), other.map(Term::as_ref))
                }
            }

            impl PartialEq for $ty {
                fn eq(&self, other: &Self) -> bool {
                    equals(self.into(), Some(other.into()))
                }
            }

            impl Eq for $ty {}
        )*
    };
}

impl_equality!(NamedNode, BlankNode, Literal, Variable, DefaultGraph, Quad, Term);

macro_rules! impl_eq_term {
    ($($ty:ty),*) => {
        $(
            impl PartialEq<Term> for $ty {
                fn eq(&self, other: &Term) -> bool {
                    self.equals(Some(other))
                }
            }
        )*
    };
}

impl_eq_term!(NamedNode, BlankNode, Literal, Variable, DefaultGraph, Quad);

impl Hash for NamedNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.iri.hash(state);
    }
}

impl Hash for BlankNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
        self.language.hash(state);
        self.datatype.hash(state);
    }
}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl Hash for DefaultGraph {
    fn hash<H: Hasher>(&self, _state: &mut H) {}
}

impl Hash for Quad {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.subject.hash(state);
        self.predicate.hash(state);
        self.object.hash(state);
        self.graph.hash(state);
    }
}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.term_type().hash(state);
        match self {
            Term::NamedNode(n) => n.hash(state),
            Term::BlankNode(b) => b.hash(state),
            Term::Literal(l) => l.hash(state),
            Term::Variable(v) => v.hash(state),
            Term::DefaultGraph(g) => g.hash(state),
            Term::Quad(q) => q.hash(state),
        }
    }
}

// --- tests -------------------------------------------------------------------
