//! Conjunctive triple-pattern queries.
//!
//! A [`Query`] is a list of [`TriplePattern`]s that must all match, joined
//! on shared variables. This covers both query shapes the decision engine
//! issues: existence (`ASK`) and enumeration (`SELECT`) over authorization
//! records, with a one-of constraint on the mode object.

use crate::term::{Term, Triple};

/// One position of a triple pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternTerm {
    /// A named variable, bound by the first pattern that mentions it.
    Variable(String),
    /// A fixed term.
    Constant(Term),
    /// Any of the listed terms. Never binds a variable.
    OneOf(Vec<Term>),
}

impl PatternTerm {
    /// A variable.
    pub fn var(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// A constant IRI.
    pub fn iri(iri: impl Into<String>) -> Self {
        Self::Constant(Term::iri(iri))
    }

    /// A constant term.
    pub fn term(term: Term) -> Self {
        Self::Constant(term)
    }

    /// A set of alternative IRIs.
    pub fn one_of_iris<I, S>(iris: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::OneOf(iris.into_iter().map(Term::iri).collect())
    }

    fn matches(&self, term: &Term, bindings: &mut Bindings) -> bool {
        match self {
            Self::Constant(expected) => expected == term,
            Self::OneOf(options) => options.contains(term),
            Self::Variable(name) => match bindings.get(name) {
                Some(bound) => bound == term,
                None => {
                    bindings.push(name.clone(), term.clone());
                    true
                }
            },
        }
    }
}

/// A `subject predicate object` pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriplePattern {
    /// Subject position.
    pub subject: PatternTerm,
    /// Predicate position.
    pub predicate: PatternTerm,
    /// Object position.
    pub object: PatternTerm,
}

impl TriplePattern {
    /// Creates a pattern.
    pub fn new(subject: PatternTerm, predicate: PatternTerm, object: PatternTerm) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// Matches `triple` under `bindings`, returning the extended bindings.
    pub fn matches(&self, triple: &Triple, bindings: &Bindings) -> Option<Bindings> {
        let mut extended = bindings.clone();
        (self.subject.matches(&triple.subject, &mut extended)
            && self.predicate.matches(&triple.predicate, &mut extended)
            && self.object.matches(&triple.object, &mut extended))
        .then_some(extended)
    }
}

/// A conjunction of triple patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    patterns: Vec<TriplePattern>,
}

impl Query {
    /// Creates an empty query (matches once, with no bindings).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pattern.
    pub fn pattern(
        mut self,
        subject: PatternTerm,
        predicate: PatternTerm,
        object: PatternTerm,
    ) -> Self {
        self.patterns
            .push(TriplePattern::new(subject, predicate, object));
        self
    }

    /// Adds an already constructed pattern.
    pub fn with(mut self, pattern: TriplePattern) -> Self {
        self.patterns.push(pattern);
        self
    }

    /// The patterns, in evaluation order.
    pub fn patterns(&self) -> &[TriplePattern] {
        &self.patterns
    }
}

/// One solution row: variable bindings in the order they were made.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bindings {
    values: Vec<(String, Term)>,
}

impl Bindings {
    /// The term bound to `name`.
    pub fn get(&self, name: &str) -> Option<&Term> {
        self.values
            .iter()
            .find_map(|(n, t)| (n == name).then_some(t))
    }

    /// The IRI bound to `name`, if it is an IRI.
    pub fn iri(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Term::as_iri)
    }

    /// Number of bound variables.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(variable, term)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Term)> {
        self.values.iter().map(|(n, t)| (n.as_str(), t))
    }

    fn push(&mut self, name: String, term: Term) {
        self.values.push((name, term));
    }
}
