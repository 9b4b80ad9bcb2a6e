//! In-memory graph.

use indexmap::IndexSet;

use crate::query::{Bindings, Query, TriplePattern};
use crate::term::{Term, Triple};

/// A set of triples in insertion order.
///
/// Insertion order is kept so that [`Graph::select`] yields rows in a
/// stable order: the order in which the document stated them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    triples: IndexSet<Triple>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a triple. Returns false if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    /// Returns true if the graph contains the triple.
    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Number of triples.
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Returns true if the graph has no triples.
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterates over the triples in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Objects of every `subject predicate ?o` statement.
    pub fn objects<'a>(
        &'a self,
        subject: &'a Term,
        predicate: &'a str,
    ) -> impl Iterator<Item = &'a Term> + 'a {
        self.triples.iter().filter_map(move |t| {
            (t.subject == *subject && t.predicate.as_iri() == Some(predicate)).then_some(&t.object)
        })
    }

    /// Existence query: does at least one solution of `query` exist?
    pub fn ask(&self, query: &Query) -> bool {
        let mut found = false;
        self.solve(query.patterns(), Bindings::default(), &mut |_| {
            found = true;
            false
        });
        found
    }

    /// Enumeration query: every distinct solution of `query`, in graph order.
    pub fn select(&self, query: &Query) -> Vec<Bindings> {
        let mut rows = IndexSet::new();
        self.solve(query.patterns(), Bindings::default(), &mut |row| {
            rows.insert(row);
            true
        });
        rows.into_iter().collect()
    }

    // Backtracking join over the patterns in order. `emit` returns false to stop.
    fn solve(
        &self,
        patterns: &[TriplePattern],
        bindings: Bindings,
        emit: &mut dyn FnMut(Bindings) -> bool,
    ) -> bool {
        let Some((first, rest)) = patterns.split_first() else {
            return emit(bindings);
        };
        for triple in &self.triples {
            if let Some(extended) = first.matches(triple, &bindings) {
                if !self.solve(rest, extended, emit) {
                    return false;
                }
            }
        }
        true
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        Self {
            triples: iter.into_iter().collect(),
        }
    }
}

impl Extend<Triple> for Graph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        self.triples.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::PatternTerm;

    const KNOWS: &str = "http://xmlns.com/foaf/0.1/knows";
    const NAME: &str = "http://xmlns.com/foaf/0.1/name";

    fn people() -> Graph {
        [
            ("http://x/alice", KNOWS, "http://x/bob"),
            ("http://x/bob", KNOWS, "http://x/carol"),
            ("http://x/alice", KNOWS, "http://x/carol"),
            ("http://x/carol", NAME, "http://x/name/carol"),
        ]
        .into_iter()
        .map(|(s, p, o)| Triple::new(Term::iri(s), Term::iri(p), Term::iri(o)))
        .collect()
    }

    #[test]
    fn test_insert_deduplicates() {
        let mut graph = people();
        let len = graph.len();
        let dup = graph.iter().next().unwrap().clone();
        assert!(!graph.insert(dup));
        assert_eq!(graph.len(), len);
    }

    #[test]
    fn test_ask() {
        let graph = people();
        let yes = Query::new().pattern(
            PatternTerm::iri("http://x/alice"),
            PatternTerm::iri(KNOWS),
            PatternTerm::var("x"),
        );
        let no = Query::new().pattern(
            PatternTerm::iri("http://x/carol"),
            PatternTerm::iri(KNOWS),
            PatternTerm::var("x"),
        );
        assert!(graph.ask(&yes));
        assert!(!graph.ask(&no));
    }

    #[test]
    fn test_select_join_in_graph_order() {
        let graph = people();
        let query = Query::new()
            .pattern(
                PatternTerm::iri("http://x/alice"),
                PatternTerm::iri(KNOWS),
                PatternTerm::var("friend"),
            )
            .pattern(
                PatternTerm::var("friend"),
                PatternTerm::var("p"),
                PatternTerm::var("o"),
            );
        let rows = graph.select(&query);
        let friends: Vec<_> = rows.iter().filter_map(|r| r.iri("friend")).collect();
        assert_eq!(friends, vec!["http://x/bob", "http://x/carol"]);
    }

    #[test]
    fn test_select_one_of() {
        let graph = people();
        let query = Query::new().pattern(
            PatternTerm::var("s"),
            PatternTerm::iri(KNOWS),
            PatternTerm::one_of_iris(["http://x/bob", "http://x/nobody"]),
        );
        let rows = graph.select(&query);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].iri("s"), Some("http://x/alice"));
    }

    #[test]
    fn test_select_distinct_rows() {
        let graph = people();
        // both alice statements project to the same row
        let query = Query::new().pattern(
            PatternTerm::var("s"),
            PatternTerm::iri(KNOWS),
            PatternTerm::one_of_iris(["http://x/bob", "http://x/carol"]),
        );
        let subjects: Vec<_> = graph
            .select(&query)
            .iter()
            .filter_map(|r| r.iri("s").map(str::to_string))
            .collect();
        assert_eq!(subjects, vec!["http://x/alice", "http://x/bob"]);
    }

    #[test]
    fn test_objects() {
        let graph = people();
        let alice = Term::iri("http://x/alice");
        assert_eq!(graph.objects(&alice, KNOWS).count(), 2);
    }

    #[test]
    fn test_empty_query_has_one_solution() {
        let graph = Graph::new();
        assert!(graph.ask(&Query::new()));
    }
}
