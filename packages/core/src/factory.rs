//! The construction surface for terms and quads.
//!
//! [`DataFactory`] is the contract parsers and other producers code against;
//! [`TermFactory`] is the implementation shipped with this crate. A factory
//! is configured once with a [`Dialect`] and enforces it for every quad it
//! builds.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::FactoryError;
use crate::record::TermRecord;
use crate::role::{Dialect, Position, RoleSet};
use crate::term::{
    BlankNode, DefaultGraph, Literal, NamedNode, Quad, Term, TermType, Variable,
};
use crate::validation;
use crate::vocab;

/// The optional second argument of [`DataFactory::literal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageOrDatatype {
    Language(String),
    Datatype(NamedNode),
}

impl From<&str> for LanguageOrDatatype {
    fn from(language: &str) -> Self {
        LanguageOrDatatype::Language(language.to_string())
    }
}

impl From<String> for LanguageOrDatatype {
    fn from(language: String) -> Self {
        LanguageOrDatatype::Language(language)
    }
}

impl From<NamedNode> for LanguageOrDatatype {
    fn from(datatype: NamedNode) -> Self {
        LanguageOrDatatype::Datatype(datatype)
    }
}

/// Builds terms and quads.
///
/// Only `blank_node(None)` touches mutable state; everything else is pure.
/// The trait is object safe, so consumers can hold a `&dyn DataFactory`.
pub trait DataFactory {
    /// A named node holding `iri` exactly as given.
    fn named_node(&self, iri: &str) -> NamedNode;

    /// A blank node with identifier `id`, or with a freshly generated
    /// identifier when `id` is `None`.
    fn blank_node(&self, id: Option<&str>) -> Result<BlankNode, FactoryError>;

    /// A literal. See [`LanguageOrDatatype`] for how the second argument is
    /// interpreted; without it the datatype is `xsd:string`.
    fn literal(
        &self,
        value: &str,
        language_or_datatype: Option<LanguageOrDatatype>,
    ) -> Result<Literal, FactoryError>;

    /// Whether [`variable`](DataFactory::variable) is available.
    fn supports_variables(&self) -> bool {
        false
    }

    fn variable(&self, _name: &str) -> Result<Variable, FactoryError> {
        Err(FactoryError::UnsupportedOperation("variable"))
    }

    fn default_graph(&self) -> DefaultGraph {
        DefaultGraph
    }

    /// A quad whose positions are checked against this factory's role set.
    /// `graph` defaults to the default graph.
    fn quad(
        &self,
        subject: Term,
        predicate: Term,
        object: Term,
        graph: Option<Term>,
    ) -> Result<Quad, FactoryError>;

    /// Rebuild `term` through this factory, revalidating it for this
    /// factory's dialect.
    fn import_term(&self, term: &Term) -> Result<Term, FactoryError> {
        Ok(match term {
            Term::NamedNode(n) => self.named_node(n.value()).into(),
            Term::BlankNode(b) => self.blank_node(Some(b.value()))?.into(),
            Term::Literal(l) => self.literal(l.value(), Some(literal_tag(l)))?.into(),
            Term::Variable(v) => self.variable(v.value())?.into(),
            Term::DefaultGraph(_) => self.default_graph().into(),
            Term::Quad(q) => self.import_quad(q)?.into(),
        })
    }

    fn import_quad(&self, quad: &Quad) -> Result<Quad, FactoryError> {
        self.quad(
            self.import_term(quad.subject())?,
            self.import_term(quad.predicate())?,
            self.import_term(quad.object())?,
            Some(self.import_term(quad.graph())?),
        )
    }

    /// Build a term from its plain record form (e.g. deserialised JSON).
    ///
    /// Fields that do not belong to the record's term type are rejected, as
    /// is a literal record whose language and datatype disagree.
    fn import_record(&self, record: &TermRecord) -> Result<Term, FactoryError> {
        record.check_shape()?;
        Ok(match record.term_type {
            TermType::NamedNode => self.named_node(&record.value).into(),
            TermType::BlankNode => self.blank_node(Some(&record.value))?.into(),
            TermType::Literal => {
                let datatype = match record.datatype.as_deref() {
                    None => None,
                    Some(r) => match self.import_record(r)? {
                        Term::NamedNode(n) => Some(n),
                        other => {
                            return Err(FactoryError::InvalidArgument(format!(
                                "literal datatype must be a NamedNode, got {}",
                                other.term_type()
                            )))
                        }
                    },
                };
                let language = record.language.as_deref().filter(|l| !l.is_empty());
                let tag = match (language, datatype) {
                    (Some(language), Some(datatype))
                        if datatype.value() != vocab::RDF_LANG_STRING =>
                    {
                        return Err(FactoryError::InvalidArgument(format!(
                            "literal record has language {language:?} and conflicting datatype {datatype}"
                        )))
                    }
                    (Some(language), _) => Some(LanguageOrDatatype::Language(language.to_string())),
                    (None, Some(datatype)) if datatype.value() == vocab::RDF_LANG_STRING => {
                        return Err(FactoryError::InvalidArgument(
                            "rdf:langString literal record has no language".into(),
                        ))
                    }
                    (None, Some(datatype)) => Some(LanguageOrDatatype::Datatype(datatype)),
                    (None, None) => None,
                };
                self.literal(&record.value, tag)?.into()
            }
            TermType::Variable => self.variable(&record.value)?.into(),
            TermType::DefaultGraph => self.default_graph().into(),
            TermType::Quad => {
                let component = |name: &str, part: Option<&TermRecord>| match part {
                    Some(r) => self.import_record(r),
                    None => Err(FactoryError::InvalidArgument(format!(
                        "quad record is missing its {name}"
                    ))),
                };
                let graph = record
                    .graph
                    .as_deref()
                    .map(|g| self.import_record(g))
                    .transpose()?;
                self.quad(
                    component("subject", record.subject.as_deref())?,
                    component("predicate", record.predicate.as_deref())?,
                    component("object", record.object.as_deref())?,
                    graph,
                )?
                .into()
            }
        })
    }
}

/// The `literal` argument that reproduces `l`.
fn literal_tag(l: &Literal) -> LanguageOrDatatype {
    if l.is_language_tagged() {
        LanguageOrDatatype::Language(l.language().to_string())
    } else {
        LanguageOrDatatype::Datatype(l.datatype().clone())
    }
}

/// Configuration of a [`TermFactory`].
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `RDF_DIALECT` | `rdf11` | Dialect enforced by `quad` (`rdf11` or `rdf-star`) |
/// | `RDF_VARIABLES` | `false` | Enable `variable` and the pattern role set |
/// | `RDF_BLANK_PREFIX` | `b` | Prefix of generated blank node identifiers |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    pub dialect: Dialect,

    /// When set, `variable` is available and every quad position also
    /// accepts variables.
    pub variables: bool,

    /// Generated blank node identifiers are this prefix followed by a
    /// counter. Must not be empty.
    pub blank_node_prefix: String,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::Rdf11,
            variables: false,
            blank_node_prefix: "b".into(),
        }
    }
}

impl FactoryConfig {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }

    /// Populate config from environment variables, applying defaults where absent.
    pub fn from_env() -> Result<Self, FactoryError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, FactoryError> {
        let mut config = Self::default();
        if let Some(dialect) = lookup("RDF_DIALECT") {
            config.dialect = dialect
                .parse()
                .map_err(FactoryError::InvalidArgument)?;
        }
        if let Some(variables) = lookup("RDF_VARIABLES") {
            config.variables = match variables.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                other => {
                    return Err(FactoryError::InvalidArgument(format!(
                        "RDF_VARIABLES must be a boolean, got {other:?}"
                    )))
                }
            };
        }
        if let Some(prefix) = lookup("RDF_BLANK_PREFIX") {
            config.blank_node_prefix = prefix;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FactoryError> {
        if self.blank_node_prefix.is_empty() {
            return Err(FactoryError::InvalidArgument(
                "blank node prefix must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// The role set `quad` enforces under this configuration.
    pub fn role_set(&self) -> RoleSet {
        let roles = self.dialect.role_set();
        if self.variables {
            roles.with_variables()
        } else {
            roles
        }
    }
}

/// The crate's [`DataFactory`].
///
/// Generated blank node identifiers are unique for the lifetime of the
/// factory, including across threads; the counter is never reset.
#[derive(Debug)]
pub struct TermFactory {
    config: FactoryConfig,
    roles: RoleSet,
    next_blank: AtomicU64,
}

impl TermFactory {
    pub fn new(config: FactoryConfig) -> Result<Self, FactoryError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// A plain RDF 1.1 factory with default settings.
    pub fn rdf11() -> Self {
        Self::with_dialect(Dialect::Rdf11)
    }

    /// An RDF-star factory with default settings.
    pub fn rdf_star() -> Self {
        Self::with_dialect(Dialect::RdfStar)
    }

    fn with_dialect(dialect: Dialect) -> Self {
        Self::build(FactoryConfig::new(dialect))
    }

    fn build(config: FactoryConfig) -> Self {
        let roles = config.role_set();
        debug!(
            dialect = %config.dialect,
            variables = config.variables,
            "data factory constructed"
        );
        Self {
            config,
            roles,
            next_blank: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    pub fn dialect(&self) -> Dialect {
        self.config.dialect
    }

    pub fn role_set(&self) -> &RoleSet {
        &self.roles
    }
}

impl Default for TermFactory {
    fn default() -> Self {
        Self::rdf11()
    }
}

impl DataFactory for TermFactory {
    fn named_node(&self, iri: &str) -> NamedNode {
        NamedNode::new(iri)
    }

    fn blank_node(&self, id: Option<&str>) -> Result<BlankNode, FactoryError> {
        match id {
            Some(id) => {
                validation::validate_blank_node_id(id).inspect_err(|e| debug!("{e}"))?;
                Ok(BlankNode::new(id))
            }
            None => {
                let n = self.next_blank.fetch_add(1, Ordering::Relaxed);
                let id = format!("{}{n}", self.config.blank_node_prefix);
                trace!(id = %id, "generated blank node");
                Ok(BlankNode::new(id))
            }
        }
    }

    fn literal(
        &self,
        value: &str,
        language_or_datatype: Option<LanguageOrDatatype>,
    ) -> Result<Literal, FactoryError> {
        let (language, datatype) = match language_or_datatype {
            Some(LanguageOrDatatype::Language(tag)) if !tag.is_empty() => (
                validation::canonical_language(&tag).inspect_err(|e| debug!("{e}"))?,
                NamedNode::new(vocab::RDF_LANG_STRING),
            ),
            Some(LanguageOrDatatype::Datatype(datatype)) => {
                validation::validate_datatype(&datatype).inspect_err(|e| debug!("{e}"))?;
                (String::new(), datatype)
            }
            Some(LanguageOrDatatype::Language(_)) | None => {
                (String::new(), NamedNode::new(vocab::XSD_STRING))
            }
        };
        Ok(Literal::from_parts(value.to_string(), language, datatype))
    }

    fn supports_variables(&self) -> bool {
        self.config.variables
    }

    fn variable(&self, name: &str) -> Result<Variable, FactoryError> {
        if !self.config.variables {
            return Err(FactoryError::UnsupportedOperation("variable"));
        }
        validation::validate_variable_name(name).inspect_err(|e| debug!("{e}"))?;
        Ok(Variable::new(name))
    }

    fn quad(
        &self,
        subject: Term,
        predicate: Term,
        object: Term,
        graph: Option<Term>,
    ) -> Result<Quad, FactoryError> {
        let graph = graph.unwrap_or_else(|| self.default_graph().into());
        validation::check_positions(
            &self.roles,
            [
                (Position::Subject, &subject),
                (Position::Predicate, &predicate),
                (Position::Object, &object),
                (Position::Graph, &graph),
            ],
        )
        .inspect_err(|e| debug!(dialect = %self.config.dialect, "rejected quad: {e}"))?;
        Ok(Quad::from_parts(subject, predicate, object, graph))
    }
}

impl TermFactory {
    /// [`quad`](DataFactory::quad), wrapped as a term for use in an RDF-star
    /// subject or object.
    pub fn quoted(
        &self,
        subject: Term,
        predicate: Term,
        object: Term,
    ) -> Result<Term, FactoryError> {
        self.quad(subject, predicate, object, None).map(Term::from)
    }
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn star_patterns() -> TermFactory {
        TermFactory::new(FactoryConfig {
            dialect: Dialect::RdfStar,
            variables: true,
            ..FactoryConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn named_node_is_verbatim() {
        let f = TermFactory::rdf11();
        assert_eq!(f.named_node("HTTP://Ex.org/%7e a").value(), "HTTP://Ex.org/%7e a");
    }

    #[test]
    fn blank_node_with_and_without_id() {
        let f = TermFactory::rdf11();
        assert_eq!(f.blank_node(Some("n1")).unwrap().value(), "n1");
        assert_eq!(f.blank_node(None).unwrap().value(), "b0");
        assert_eq!(f.blank_node(None).unwrap().value(), "b1");
        assert!(matches!(
            f.blank_node(Some("")),
            Err(FactoryError::InvalidArgument(_))
        ));
    }

    #[test]
    fn blank_node_counter_is_per_factory() {
        let a = TermFactory::rdf11();
        let b = TermFactory::rdf11();
        a.blank_node(None).unwrap();
        assert_eq!(b.blank_node(None).unwrap().value(), "b0");
        assert_eq!(a.blank_node(None).unwrap().value(), "b1");
    }

    #[test]
    fn blank_node_prefix_is_configurable() {
        let f = TermFactory::new(FactoryConfig {
            blank_node_prefix: "df_".into(),
            ..FactoryConfig::default()
        })
        .unwrap();
        assert_eq!(f.blank_node(None).unwrap().value(), "df_0");
    }

    #[test]
    fn plain_literal_defaults_to_xsd_string() {
        let l = TermFactory::rdf11().literal("x", None).unwrap();
        assert_eq!(l.value(), "x");
        assert_eq!(l.language(), "");
        assert_eq!(l.datatype().value(), vocab::XSD_STRING);
    }

    #[test]
    fn language_literal_is_lowercased_lang_string() {
        let l = TermFactory::rdf11().literal("colour", Some("en-GB".into())).unwrap();
        assert_eq!(l.language(), "en-gb");
        assert_eq!(l.datatype().value(), vocab::RDF_LANG_STRING);
    }

    #[test]
    fn empty_language_is_a_plain_literal() {
        let f = TermFactory::rdf11();
        assert_eq!(
            f.literal("x", Some("".into())).unwrap(),
            f.literal("x", None).unwrap()
        );
    }

    #[test]
    fn typed_literal_keeps_datatype() {
        let f = TermFactory::rdf11();
        let l = f
            .literal("42", Some(f.named_node(vocab::XSD_INTEGER).into()))
            .unwrap();
        assert_eq!(l.language(), "");
        assert_eq!(l.datatype().value(), vocab::XSD_INTEGER);
    }

    #[test]
    fn conflicting_or_empty_datatype_rejected() {
        let f = TermFactory::rdf11();
        for dt in ["", vocab::RDF_LANG_STRING] {
            assert!(matches!(
                f.literal("x", Some(f.named_node(dt).into())),
                Err(FactoryError::InvalidArgument(_))
            ));
        }
        assert!(matches!(
            f.literal("x", Some("en_GB".into())),
            Err(FactoryError::InvalidArgument(_))
        ));
    }

    #[test]
    fn variables_need_the_capability() {
        let plain = TermFactory::rdf11();
        assert!(!plain.supports_variables());
        assert_eq!(
            plain.variable("x"),
            Err(FactoryError::UnsupportedOperation("variable"))
        );

        let f = star_patterns();
        assert!(f.supports_variables());
        assert_eq!(f.variable("x").unwrap().value(), "x");
        assert!(f.variable("?x").is_err());
    }

    #[test]
    fn quad_defaults_graph() {
        let f = TermFactory::rdf11();
        let q = f
            .quad(
                f.named_node("s").into(),
                f.named_node("p").into(),
                f.literal("o", None).unwrap().into(),
                None,
            )
            .unwrap();
        assert!(q.is_triple());
        assert!(q.graph().equals(Some(&f.default_graph().into())));
    }

    #[test]
    fn default_graph_as_subject_rejected() {
        let f = TermFactory::rdf11();
        let err = f
            .quad(
                f.default_graph().into(),
                f.named_node("p").into(),
                f.named_node("o").into(),
                None,
            )
            .unwrap_err();
        assert_eq!(
            err,
            FactoryError::RoleViolation {
                position: Position::Subject,
                found: TermType::DefaultGraph,
                permitted: RoleSet::RDF11.subject,
            }
        );
    }

    #[test]
    fn literal_predicate_and_graph_rejected() {
        let f = TermFactory::rdf_star();
        let lit: Term = f.literal("x", None).unwrap().into();
        assert!(matches!(
            f.quad(f.named_node("s").into(), lit.clone(), f.named_node("o").into(), None),
            Err(FactoryError::RoleViolation { position: Position::Predicate, .. })
        ));
        assert!(matches!(
            f.quad(
                f.named_node("s").into(),
                f.named_node("p").into(),
                f.named_node("o").into(),
                Some(lit)
            ),
            Err(FactoryError::RoleViolation { position: Position::Graph, .. })
        ));
    }

    #[test]
    fn nested_quads_follow_dialect() {
        let star = TermFactory::rdf_star();
        let plain = TermFactory::rdf11();
        let inner = star
            .quoted(
                star.named_node("s").into(),
                star.named_node("p").into(),
                star.named_node("o").into(),
            )
            .unwrap();

        assert!(star
            .quad(inner.clone(), star.named_node("p2").into(), star.named_node("o2").into(), None)
            .is_ok());
        assert!(star
            .quad(star.named_node("s2").into(), star.named_node("p2").into(), inner.clone(), None)
            .is_ok());
        assert!(matches!(
            plain.quad(inner, plain.named_node("p2").into(), plain.named_node("o2").into(), None),
            Err(FactoryError::RoleViolation {
                position: Position::Subject,
                found: TermType::Quad,
                ..
            })
        ));
    }

    #[test]
    fn import_term_revalidates_for_target_dialect() {
        let star = TermFactory::rdf_star();
        let nested: Term = star
            .quad(
                star.quoted(
                    star.named_node("s").into(),
                    star.named_node("p").into(),
                    star.named_node("o").into(),
                )
                .unwrap(),
                star.named_node("p2").into(),
                star.literal("v", Some("EN".into())).unwrap().into(),
                Some(star.blank_node(Some("g")).unwrap().into()),
            )
            .unwrap()
            .into();

        assert_eq!(star.import_term(&nested).unwrap(), nested);
        assert!(matches!(
            TermFactory::rdf11().import_term(&nested),
            Err(FactoryError::RoleViolation { .. })
        ));
    }

    #[test]
    fn import_term_variable_needs_capability() {
        let v: Term = star_patterns().variable("x").unwrap().into();
        assert!(matches!(
            TermFactory::rdf_star().import_term(&v),
            Err(FactoryError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn pattern_factory_accepts_variables_everywhere() {
        let f = star_patterns();
        let v = |n: &str| -> Term { f.variable(n).unwrap().into() };
        assert!(f.quad(v("s"), v("p"), v("o"), Some(v("g"))).is_ok());
    }

    #[test]
    fn usable_as_trait_object() {
        let f = TermFactory::rdf11();
        let dynamic: &dyn DataFactory = &f;
        assert_eq!(dynamic.named_node("a"), f.named_node("a"));
        assert!(dynamic.variable("x").is_err());
    }

    #[test]
    fn config_from_lookup() {
        let env: HashMap<&str, &str> = [
            ("RDF_DIALECT", "rdf-star"),
            ("RDF_VARIABLES", "true"),
            ("RDF_BLANK_PREFIX", "n"),
        ]
        .into_iter()
        .collect();
        let config = FactoryConfig::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.dialect, Dialect::RdfStar);
        assert!(config.variables);
        assert_eq!(config.blank_node_prefix, "n");
        assert_eq!(config.role_set(), RoleSet::RDF_STAR.with_variables());
    }

    #[test]
    fn config_defaults_and_rejections() {
        assert_eq!(FactoryConfig::from_lookup(|_| None).unwrap(), FactoryConfig::default());
        assert!(FactoryConfig::from_lookup(|k| (k == "RDF_DIALECT").then(|| "owl".into())).is_err());
        assert!(FactoryConfig::from_lookup(|k| (k == "RDF_VARIABLES").then(|| "maybe".into())).is_err());
        assert!(FactoryConfig::from_lookup(|k| (k == "RDF_BLANK_PREFIX").then(String::new)).is_err());
    }

    #[test]
    fn config_deserialises_with_defaults() {
        let config: FactoryConfig = serde_json::from_str(r#"{"dialect": "rdf-star"}"#).unwrap();
        assert_eq!(config.dialect, Dialect::RdfStar);
        assert!(!config.variables);
        assert_eq!(config.blank_node_prefix, "b");

        let config: FactoryConfig = serde_json::from_str(r#"{"dialect": "rdfstar"}"#).unwrap();
        assert_eq!(config.dialect, Dialect::RdfStar);
        let config: FactoryConfig = serde_json::from_str(r#"{"dialect": "rdf1.1"}"#).unwrap();
        assert_eq!(config.dialect, Dialect::Rdf11);
    }
}
