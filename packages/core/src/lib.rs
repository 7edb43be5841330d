//! An interoperable in-memory model of RDF terms and quads.
//!
//! This crate fixes the shapes parsers, serialisers and stores exchange:
//! named nodes, blank nodes, literals, variables, the default graph, and
//! quads, including RDF-star quads nested in subject or object position.
//! Terms are immutable values compared by value, so they work as map and set
//! keys. A [`DataFactory`] is the only way to build literals and quads, and
//! it enforces the rules of the dialect it was configured for.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`term`] | Term variants: [`NamedNode`], [`BlankNode`], [`Literal`], [`Variable`], [`DefaultGraph`], [`Quad`], and the [`Term`] sum |
//! | [`role`] | Which variants may fill which quad position: [`Dialect`], [`RoleSet`] |
//! | [`equality`] | The recursive structural equality every `equals` / `==` uses |
//! | [`factory`] | [`DataFactory`] and its implementation [`TermFactory`] |
//! | [`validation`] | Argument and role checks used by the factory |
//! | [`record`] | The JSON record shape of a term: [`TermRecord`] |
//! | [`render`] | N-Triples style `Display` for terms and quads |
//! | [`vocab`] | RDF and XSD IRIs |
//!
//! # Quick start
//!
//! ```rust
//! use rdf_data_model::{DataFactory, TermFactory, FactoryError};
//!
//! let f = TermFactory::rdf_star();
//! let alice = f.named_node("http://example.org/alice");
//! let knows = f.named_node("http://xmlns.com/foaf/0.1/knows");
//! let bob = f.blank_node(None)?;
//!
//! // A triple about a triple.
//! let claim = f.quoted(alice.into(), knows.into(), bob.into())?;
//! let q = f.quad(
//!     claim,
//!     f.named_node("http://example.org/certainty").into(),
//!     f.literal("high", Some("en".into()))?.into(),
//!     None,
//! )?;
//! assert!(q.is_triple());
//!
//! // The same call is rejected by a plain RDF 1.1 factory.
//! let plain = TermFactory::rdf11();
//! assert!(matches!(
//!     plain.import_quad(&q),
//!     Err(FactoryError::RoleViolation { .. })
//! ));
//! # Ok::<(), FactoryError>(())
//! ```

pub mod equality;
pub mod error;
pub mod factory;
pub mod record;
pub mod render;
pub mod role;
pub mod term;
pub mod validation;
pub mod vocab;

pub use error::FactoryError;
pub use factory::{DataFactory, FactoryConfig, LanguageOrDatatype, TermFactory};
pub use record::TermRecord;
pub use role::{Dialect, Position, RoleSet, TermTypeSet};
pub use term::{
    BlankNode, DefaultGraph, Literal, NamedNode, Quad, Term, TermRef, TermType, Variable,
};
