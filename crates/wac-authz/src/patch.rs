//! Patch intent analysis.
//!
//! Decides whether a mutating request only adds data. For N3 patches this
//! means looking for a `solid:deletes` clause. The formulae inside a patch
//! (`{ ... }`) may contain variables and nested blocks that a plain Turtle
//! parser rejects, so they are first collapsed into a single placeholder
//! blank node; only the patch's own top-level structure is inspected.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{NoExpand, Regex};
use tracing::debug;
use wac_core::vocab::solid;
use wac_core::RequestMethod;
use wac_graph::{PatternTerm, Query, TurtleParser};

use crate::error::{AccessError, AccessResult};

/// Blank node substituted for every neutralized block.
pub const PLACEHOLDER: &str = "_:placeholder";

fn innermost_block() -> &'static Regex {
    static BLOCK: OnceLock<Regex> = OnceLock::new();
    BLOCK.get_or_init(|| Regex::new(r"\{[^{}]*\}").expect("valid regex"))
}

/// Replaces every `{ ... }` block with [`PLACEHOLDER`], innermost first,
/// until no brace pairs remain.
///
/// ```
/// use wac_authz::patch::neutralize_blocks;
///
/// let body = "_:p solid:deletes { <a> <b> { ?x <c> ?y } }.";
/// assert_eq!(neutralize_blocks(body), "_:p solid:deletes _:placeholder .");
/// ```
pub fn neutralize_blocks(body: &str) -> Cow<'_, str> {
    let block = innermost_block();
    let replacement = format!("{PLACEHOLDER} ");
    let mut text = Cow::Borrowed(body);
    while block.is_match(&text) {
        let replaced = block
            .replace_all(&text, NoExpand(&replacement))
            .into_owned();
        text = Cow::Owned(replaced);
    }
    text
}

/// Returns true if the request body only appends.
///
/// `GET` and `POST` are always append-eligible; `PUT` and `DELETE` never
/// are. A `PATCH` is append-only unless it has a `solid:deletes` clause;
/// an empty or missing body has none. Even `solid:deletes {}` counts.
///
/// # Errors
///
/// [`AccessError::MalformedPatch`] if the neutralized body is not valid
/// Turtle.
pub fn is_append_only(method: RequestMethod, body: Option<&str>) -> AccessResult<bool> {
    match method {
        RequestMethod::Get | RequestMethod::Post => Ok(true),
        RequestMethod::Put | RequestMethod::Delete => Ok(false),
        RequestMethod::Patch => {
            let Some(body) = body else {
                return Ok(true);
            };
            let neutralized = neutralize_blocks(body);
            let graph = TurtleParser::new()
                .parse(&neutralized)
                .map_err(|e| AccessError::MalformedPatch(e.to_string()))?;

            let deletes = Query::new().pattern(
                PatternTerm::var("patch"),
                PatternTerm::iri(solid::DELETES),
                PatternTerm::var("formula"),
            );
            let has_deletes = graph.ask(&deletes);
            debug!(has_deletes, triples = graph.len(), "analyzed patch body");
            Ok(!has_deletes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INSERT_ONLY: &str = r"
        @prefix solid: <http://www.w3.org/ns/solid/terms#> .
        @prefix ex: <http://www.example.org/terms#> .

        _:insert a solid:InsertDeletePatch ;
            solid:inserts { <#alice> ex:knows <#bob> . } .
    ";

    const INSERT_DELETE: &str = r"
        @prefix solid: <http://www.w3.org/ns/solid/terms#> .
        @prefix ex: <http://www.example.org/terms#> .

        _:rename a solid:InsertDeletePatch ;
            solid:where   { ?person ex:familyName 'Garcia' . } ;
            solid:inserts { ?person ex:givenName 'Alex' . } ;
            solid:deletes { ?person ex:givenName 'Claudia' . } .
    ";

    #[test]
    fn test_neutralize_flat_blocks() {
        let out = neutralize_blocks("a { b } c { d }");
        assert_eq!(out, "a _:placeholder  c _:placeholder ");
    }

    #[test]
    fn test_neutralize_nested_blocks() {
        let out = neutralize_blocks("x { a { b { c } } d } y");
        assert_eq!(out, "x _:placeholder  y");
    }

    #[test]
    fn test_neutralize_empty_block() {
        assert_eq!(neutralize_blocks("solid:deletes {}"), "solid:deletes _:placeholder ");
    }

    #[test]
    fn test_neutralize_without_blocks_borrows() {
        assert!(matches!(neutralize_blocks("<a> <b> <c> ."), Cow::Borrowed(_)));
    }

    #[test]
    fn test_unbalanced_braces_survive() {
        assert_eq!(neutralize_blocks("a { b"), "a { b");
    }

    #[test]
    fn test_fixed_methods() {
        assert!(is_append_only(RequestMethod::Get, None).unwrap());
        assert!(is_append_only(RequestMethod::Post, Some("anything { at all")).unwrap());
        assert!(!is_append_only(RequestMethod::Put, None).unwrap());
        assert!(!is_append_only(RequestMethod::Delete, Some(INSERT_ONLY)).unwrap());
    }

    #[test]
    fn test_patch_insert_only() {
        assert!(is_append_only(RequestMethod::Patch, Some(INSERT_ONLY)).unwrap());
    }

    #[test]
    fn test_patch_with_deletes() {
        assert!(!is_append_only(RequestMethod::Patch, Some(INSERT_DELETE)).unwrap());
    }

    #[test]
    fn test_patch_empty_deletes_counts() {
        let body = "@prefix solid: <http://www.w3.org/ns/solid/terms#> .\n\
                    _:p solid:inserts { <a> <b> <c> . } ; solid:deletes { } .";
        assert!(!is_append_only(RequestMethod::Patch, Some(body)).unwrap());
    }

    #[test]
    fn test_patch_empty_body() {
        assert!(is_append_only(RequestMethod::Patch, Some("")).unwrap());
        assert!(is_append_only(RequestMethod::Patch, None).unwrap());
    }

    #[test]
    fn test_deletes_inside_formula_ignored() {
        // a deletes predicate quoted inside an inserted formula is data, not a clause
        let body = "@prefix solid: <http://www.w3.org/ns/solid/terms#> .\n\
                    _:p solid:inserts { <a> solid:deletes <c> . } .";
        assert!(is_append_only(RequestMethod::Patch, Some(body)).unwrap());
    }

    #[test]
    fn test_malformed_patch() {
        let err = is_append_only(RequestMethod::Patch, Some("_:p solid:inserts ?x .")).unwrap_err();
        assert!(matches!(err, AccessError::MalformedPatch(_)));
    }
}
