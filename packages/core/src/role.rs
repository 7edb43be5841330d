//! Which term variants may appear in which quad position, per dialect.
//!
//! A [`RoleSet`] is pure data: four [`TermTypeSet`]s looked up by
//! [`Position`]. The factory consults it in
//! [`quad`](crate::DataFactory::quad); nothing else makes decisions with it.

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::term::TermType;

/// The RDF dialect a factory enforces.
///
/// Serialises as `"rdf11"` or `"rdf-star"`. Parsing also accepts the
/// aliases `plain`, `rdf1.1`, `star` and `rdfstar`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Dialect {
    /// Plain RDF 1.1.
    #[default]
    #[serde(rename = "rdf11")]
    Rdf11,
    /// RDF 1.1 plus quads in subject and object position.
    #[serde(rename = "rdf-star")]
    RdfStar,
}

/// Deserialises through [`FromStr`](std::str::FromStr), so JSON and
/// environment input accept the same spellings.
impl<'de> Deserialize<'de> for Dialect {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl Dialect {
    pub fn role_set(self) -> RoleSet {
        match self {
            Dialect::Rdf11 => RoleSet::RDF11,
            Dialect::RdfStar => RoleSet::RDF_STAR,
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Rdf11 => write!(f, "rdf11"),
            Dialect::RdfStar => write!(f, "rdf-star"),
        }
    }
}

/// Parses a [`Dialect`] case-insensitively.
///
/// Returns `Err` with a descriptive message if the string is not recognised.
impl std::str::FromStr for Dialect {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rdf11" | "rdf1.1" | "plain" => Ok(Dialect::Rdf11),
            "rdf-star" | "rdfstar" | "star" => Ok(Dialect::RdfStar),
            _ => Err(format!(
                "unknown dialect {:?}; expected one of: rdf11, rdf-star",
                s
            )),
        }
    }
}

/// A position inside a quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Subject,
    Predicate,
    Object,
    Graph,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Subject => write!(f, "subject"),
            Position::Predicate => write!(f, "predicate"),
            Position::Object => write!(f, "object"),
            Position::Graph => write!(f, "graph"),
        }
    }
}

/// A set of [`TermType`]s, one bit per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TermTypeSet(u8);

impl TermTypeSet {
    pub const EMPTY: TermTypeSet = TermTypeSet(0);

    pub const fn with(self, term_type: TermType) -> Self {
        TermTypeSet(self.0 | term_type.bit())
    }

    pub const fn contains(self, term_type: TermType) -> bool {
        self.0 & term_type.bit() != 0
    }

    pub fn iter(self) -> impl Iterator<Item = TermType> {
        TermType::ALL.into_iter().filter(move |t| self.contains(*t))
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<TermType> for TermTypeSet {
    fn from_iter<I: IntoIterator<Item = TermType>>(iter: I) -> Self {
        iter.into_iter().fold(TermTypeSet::EMPTY, TermTypeSet::with)
    }
}

/// Formats as `{NamedNode, BlankNode}`.
impl std::fmt::Display for TermTypeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, t) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(t.as_str())?;
        }
        f.write_str("}")
    }
}

const RESOURCE: TermTypeSet = TermTypeSet::EMPTY
    .with(TermType::NamedNode)
    .with(TermType::BlankNode);

/// The permitted variants for each quad position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoleSet {
    pub subject: TermTypeSet,
    pub predicate: TermTypeSet,
    pub object: TermTypeSet,
    pub graph: TermTypeSet,
}

impl RoleSet {
    /// Plain RDF 1.1 data.
    pub const RDF11: RoleSet = RoleSet {
        subject: RESOURCE,
        predicate: TermTypeSet::EMPTY.with(TermType::NamedNode),
        object: RESOURCE.with(TermType::Literal),
        graph: RESOURCE.with(TermType::DefaultGraph),
    };

    /// RDF 1.1 plus nested quads as subject or object.
    pub const RDF_STAR: RoleSet = RoleSet {
        subject: RoleSet::RDF11.subject.with(TermType::Quad),
        predicate: RoleSet::RDF11.predicate,
        object: RoleSet::RDF11.object.with(TermType::Quad),
        graph: RoleSet::RDF11.graph,
    };

    /// The pattern form of this role set: every position also accepts a
    /// [`Variable`](crate::Variable), as in query patterns.
    pub const fn with_variables(self) -> RoleSet {
        RoleSet {
            subject: self.subject.with(TermType::Variable),
            predicate: self.predicate.with(TermType::Variable),
            object: self.object.with(TermType::Variable),
            graph: self.graph.with(TermType::Variable),
        }
    }

    pub fn permitted(&self, position: Position) -> TermTypeSet {
        match position {
            Position::Subject => self.subject,
            Position::Predicate => self.predicate,
            Position::Object => self.object,
            Position::Graph => self.graph,
        }
    }

    pub fn permits(&self, position: Position, term_type: TermType) -> bool {
        self.permitted(position).contains(term_type)
    }
}

// --- tests -------------------------------------------------------------------
