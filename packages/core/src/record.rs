//! The plain record shape of a term, as exchanged in JSON.
//!
//! ```json
//! { "termType": "Literal", "value": "chat", "language": "fr",
//!   "datatype": { "termType": "NamedNode",
//!                 "value": "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString" } }
//! ```
//!
//! [`Term`] serialises through this shape. Going the other way is deliberately
//! not a `Deserialize` impl on `Term`: deserialise a [`TermRecord`] and pass
//! it to [`DataFactory::import_record`](crate::DataFactory::import_record) so
//! the result is validated like any other constructed term.

use serde::{Deserialize, Serialize, Serializer};

use crate::error::FactoryError;
use crate::term::{Quad, Term, TermType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermRecord {
    pub term_type: TermType,

    /// Absent in input means `""`.
    #[serde(default)]
    pub value: String,

    /// Literals only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Literals only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<Box<TermRecord>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<Box<TermRecord>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<Box<TermRecord>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<Box<TermRecord>>,

    /// Absent on a quad record means the default graph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<Box<TermRecord>>,
}

impl TermRecord {
    /// Rejects fields that have no meaning for `term_type`: language and
    /// datatype outside literals, components outside quads, and a value on
    /// the default graph or a quad.
    pub(crate) fn check_shape(&self) -> Result<(), FactoryError> {
        let literal_fields = self.language.is_some() || self.datatype.is_some();
        let components = self.subject.is_some()
            || self.predicate.is_some()
            || self.object.is_some()
            || self.graph.is_some();
        let stray = if literal_fields && self.term_type != TermType::Literal {
            Some("a language or datatype")
        } else if components && self.term_type != TermType::Quad {
            Some("quad components")
        } else if !self.value.is_empty()
            && matches!(self.term_type, TermType::DefaultGraph | TermType::Quad)
        {
            Some("a value")
        } else {
            None
        };
        match stray {
            Some(what) => Err(FactoryError::InvalidArgument(format!(
                "{} record must not carry {what}",
                self.term_type
            ))),
            None => Ok(()),
        }
    }

    fn leaf(term_type: TermType, value: &str) -> Self {
        Self {
            term_type,
            value: value.to_string(),
            language: None,
            datatype: None,
            subject: None,
            predicate: None,
            object: None,
            graph: None,
        }
    }
}

impl From<&Term> for TermRecord {
    fn from(term: &Term) -> Self {
        match term {
            Term::Literal(l) => TermRecord {
                language: Some(l.language().to_string()),
                datatype: Some(Box::new(TermRecord::leaf(
                    TermType::NamedNode,
                    l.datatype().value(),
                ))),
                ..TermRecord::leaf(TermType::Literal, l.value())
            },
            Term::Quad(q) => TermRecord::from(&**q),
            other => TermRecord::leaf(other.term_type(), other.value()),
        }
    }
}

impl From<&Quad> for TermRecord {
    fn from(quad: &Quad) -> Self {
        let boxed = |t: &Term| Some(Box::new(TermRecord::from(t)));
        TermRecord {
            subject: boxed(quad.subject()),
            predicate: boxed(quad.predicate()),
            object: boxed(quad.object()),
            graph: boxed(quad.graph()),
            ..TermRecord::leaf(TermType::Quad, "")
        }
    }
}

impl Serialize for Term {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TermRecord::from(self).serialize(serializer)
    }
}

impl Serialize for Quad {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TermRecord::from(self).serialize(serializer)
    }
}

// --- tests -------------------------------------------------------------------
