//! RDF terms and triples.

use std::fmt;

use wac_core::vocab::{rdf, xsd};

/// A literal value with its datatype and optional language tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    /// Lexical form.
    pub value: String,
    /// Datatype IRI.
    pub datatype: String,
    /// Language tag for `rdf:langString` literals.
    pub language: Option<String>,
}

impl Literal {
    /// Creates an `xsd:string` literal.
    pub fn string(value: impl Into<String>) -> Self {
        Self::typed(value, xsd::STRING)
    }

    /// Creates a literal with an explicit datatype.
    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: datatype.into(),
            language: None,
        }
    }

    /// Creates a language-tagged string.
    pub fn lang(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: rdf::LANG_STRING.to_string(),
            language: Some(language.into()),
        }
    }
}

/// An RDF term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// An absolute (or, without base, unresolved) IRI.
    Iri(String),
    /// A blank node, identified by its document-local label.
    BlankNode(String),
    /// A literal.
    Literal(Literal),
}

impl Term {
    /// Creates an IRI term.
    pub fn iri(iri: impl Into<String>) -> Self {
        Self::Iri(iri.into())
    }

    /// Creates a blank node term.
    pub fn blank(label: impl Into<String>) -> Self {
        Self::BlankNode(label.into())
    }

    /// Returns the IRI if this term is one.
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Self::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Returns true for blank nodes.
    pub const fn is_blank(&self) -> bool {
        matches!(self, Self::BlankNode(_))
    }

    /// Returns an identifier for the node: the IRI, or `_:label` for blank nodes.
    ///
    /// Literals have no node identifier and return their lexical form.
    pub fn node_id(&self) -> String {
        match self {
            Self::Iri(iri) => iri.clone(),
            Self::BlankNode(label) => format!("_:{label}"),
            Self::Literal(literal) => literal.value.clone(),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(iri) => write!(f, "<{iri}>"),
            Self::BlankNode(label) => write!(f, "_:{label}"),
            Self::Literal(Literal {
                value,
                language: Some(lang),
                ..
            }) => write!(f, "{value:?}@{lang}"),
            Self::Literal(Literal {
                value, datatype, ..
            }) => {
                if datatype == xsd::STRING {
                    write!(f, "{value:?}")
                } else {
                    write!(f, "{value:?}^^<{datatype}>")
                }
            }
        }
    }
}

/// A single statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    /// Subject (IRI or blank node).
    pub subject: Term,
    /// Predicate (IRI).
    pub predicate: Term,
    /// Object.
    pub object: Term,
}

impl Triple {
    /// Creates a triple.
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        assert_eq!(Term::iri("http://x/a").node_id(), "http://x/a");
        assert_eq!(Term::blank("b0").node_id(), "_:b0");
    }

    #[test]
    fn test_display() {
        let triple = Triple::new(
            Term::iri("http://x/s"),
            Term::iri("http://x/p"),
            Term::Literal(Literal::lang("hallo", "de")),
        );
        assert_eq!(triple.to_string(), "<http://x/s> <http://x/p> \"hallo\"@de .");
    }

    #[test]
    fn test_typed_literal_display() {
        let term = Term::Literal(Literal::typed("1", xsd::INTEGER));
        assert_eq!(
            term.to_string(),
            "\"1\"^^<http://www.w3.org/2001/XMLSchema#integer>"
        );
    }
}
