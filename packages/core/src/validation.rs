use std::sync::LazyLock;

use regex::Regex;

use crate::error::FactoryError;
use crate::role::{Position, RoleSet};
use crate::term::{NamedNode, Quad, Term};
use crate::vocab;

/// Check a language tag and return its canonical (lowercase) form.
///
/// Tags follow the `LANGTAG` production shared by the Turtle family:
/// `[a-zA-Z]+ ('-' [a-zA-Z0-9]+)*`.
pub fn canonical_language(tag: &str) -> Result<String, FactoryError> {
    if !LANGTAG_RE.is_match(tag) {
        return Err(FactoryError::InvalidArgument(format!(
            "language tag {tag:?} is not well-formed"
        )));
    }
    Ok(tag.to_ascii_lowercase())
}

/// Check a datatype given explicitly to `literal`.
///
/// An empty IRI is rejected rather than replaced by a default, and
/// `rdf:langString` is rejected because it requires a language tag, which
/// cannot be supplied together with a datatype.
pub fn validate_datatype(datatype: &NamedNode) -> Result<(), FactoryError> {
    if datatype.value().is_empty() {
        return Err(FactoryError::InvalidArgument(
            "literal datatype IRI must not be empty".into(),
        ));
    }
    if datatype.value() == vocab::RDF_LANG_STRING {
        return Err(FactoryError::InvalidArgument(
            "rdf:langString literals need a language tag, not an explicit datatype".into(),
        ));
    }
    Ok(())
}

pub fn validate_blank_node_id(id: &str) -> Result<(), FactoryError> {
    if id.is_empty() {
        return Err(FactoryError::InvalidArgument(
            "blank node identifier must not be empty".into(),
        ));
    }
    Ok(())
}

/// Variable names are stored without their `?` or `$` sigil.
pub fn validate_variable_name(name: &str) -> Result<(), FactoryError> {
    if name.is_empty() {
        return Err(FactoryError::InvalidArgument(
            "variable name must not be empty".into(),
        ));
    }
    if name.starts_with(['?', '$']) {
        return Err(FactoryError::InvalidArgument(format!(
            "variable name {name:?} must not include its sigil"
        )));
    }
    Ok(())
}

/// Check that `term` may occupy `position` under `roles`.
///
/// A nested quad is checked recursively against the same role set; the
/// error then names the innermost offending position.
pub fn check_role(roles: &RoleSet, position: Position, term: &Term) -> Result<(), FactoryError> {
    let permitted = roles.permitted(position);
    let found = term.term_type();
    if !permitted.contains(found) {
        return Err(FactoryError::RoleViolation {
            position,
            found,
            permitted,
        });
    }
    if let Term::Quad(nested) = term {
        check_quad(roles, nested)?;
    }
    Ok(())
}

/// Check all four positions of a quad, in subject, predicate, object, graph
/// order. The first violation is returned.
pub fn check_quad(roles: &RoleSet, quad: &Quad) -> Result<(), FactoryError> {
    check_positions(
        roles,
        [
            (Position::Subject, quad.subject()),
            (Position::Predicate, quad.predicate()),
            (Position::Object, quad.object()),
            (Position::Graph, quad.graph()),
        ],
    )
}

pub(crate) fn check_positions(
    roles: &RoleSet,
    positions: [(Position, &Term); 4],
) -> Result<(), FactoryError> {
    positions
        .into_iter()
        .try_for_each(|(position, term)| check_role(roles, position, term))
}

// --- helpers -----------------------------------------------------------------

/// `^[a-zA-Z]+(-[a-zA-Z0-9]+)*$`
static LANGTAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z]+(-[a-zA-Z0-9]+)*$").expect("invalid language tag regex")
});

// --- tests -------------------------------------------------------------------
