//! Builders for ACL and group documents.
//!
//! The builders emit Turtle, so fixtures exercise the same parsing path as
//! documents fetched from a pod.

use std::fmt::Write as _;

use wac_core::vocab::{acl, foaf, vcard};
use wac_core::AccessMode;

const PREFIXES: &str = "@prefix acl: <http://www.w3.org/ns/auth/acl#> .\n\
                        @prefix foaf: <http://xmlns.com/foaf/0.1/> .\n\
                        @prefix vcard: <http://www.w3.org/2006/vcard/ns#> .\n";

/// One `acl:Authorization` record.
///
/// ```
/// use wac_core::AccessMode;
/// use wac_test::Authorization;
///
/// let auth = Authorization::new("public")
///     .access_to("http://localhost:8080/test")
///     .mode(AccessMode::Read)
///     .public();
/// assert!(auth.to_turtle().starts_with("<#public> a acl:Authorization"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Authorization {
    id: String,
    access_to: Vec<String>,
    defaults: Vec<String>,
    modes: Vec<AccessMode>,
    agent_classes: Vec<&'static str>,
    agents: Vec<String>,
    groups: Vec<String>,
}

impl Authorization {
    /// Creates a record. `id` is a fragment of the ACL document (`"public"`
    /// becomes `<#public>`) or an absolute IRI.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Adds an `acl:accessTo` target.
    pub fn access_to(mut self, resource: impl Into<String>) -> Self {
        self.access_to.push(resource.into());
        self
    }

    /// Adds an `acl:default` container.
    pub fn default_for(mut self, container: impl Into<String>) -> Self {
        self.defaults.push(container.into());
        self
    }

    /// Adds a granted mode.
    pub fn mode(mut self, mode: AccessMode) -> Self {
        self.modes.push(mode);
        self
    }

    /// Adds several granted modes.
    pub fn modes(mut self, modes: impl IntoIterator<Item = AccessMode>) -> Self {
        self.modes.extend(modes);
        self
    }

    /// Grants to everyone.
    pub fn public(mut self) -> Self {
        self.agent_classes.push(foaf::AGENT);
        self
    }

    /// Grants to any authenticated agent.
    pub fn authenticated(mut self) -> Self {
        self.agent_classes.push(acl::AUTHENTICATED_AGENT);
        self
    }

    /// Grants to a named agent.
    pub fn agent(mut self, webid: impl Into<String>) -> Self {
        self.agents.push(webid.into());
        self
    }

    /// Grants to the members of a group.
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// Renders the record as Turtle. Prefixes `acl:`, `foaf:` and `vcard:`
    /// are assumed to be declared.
    pub fn to_turtle(&self) -> String {
        let subject = node(&self.id);
        let mut out = format!("{subject} a acl:Authorization");

        let mut clause = |predicate: &str, objects: Vec<String>| {
            if !objects.is_empty() {
                let _ = write!(out, " ;\n    {predicate} {}", objects.join(", "));
            }
        };
        clause("acl:accessTo", self.access_to.iter().map(|r| iri(r)).collect());
        clause("acl:default", self.defaults.iter().map(|r| iri(r)).collect());
        clause("acl:mode", self.modes.iter().map(|m| iri(m.iri())).collect());
        clause("acl:agentClass", self.agent_classes.iter().map(|c| iri(c)).collect());
        clause("acl:agent", self.agents.iter().map(|a| iri(a)).collect());
        clause("acl:agentGroup", self.groups.iter().map(|g| iri(g)).collect());

        out.push_str(" .\n");
        out
    }
}

/// Builds a complete ACL document.
#[derive(Debug, Clone, Default)]
pub struct AclDocumentBuilder {
    authorizations: Vec<Authorization>,
    extra: Vec<String>,
}

impl AclDocumentBuilder {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an authorization.
    pub fn with(mut self, authorization: Authorization) -> Self {
        self.authorizations.push(authorization);
        self
    }

    /// Appends raw Turtle after the authorizations.
    pub fn raw(mut self, turtle: impl Into<String>) -> Self {
        self.extra.push(turtle.into());
        self
    }

    /// Renders the document.
    pub fn build(&self) -> String {
        let mut out = String::from(PREFIXES);
        for authorization in &self.authorizations {
            out.push('\n');
            out.push_str(&authorization.to_turtle());
        }
        for extra in &self.extra {
            out.push('\n');
            out.push_str(extra);
            out.push('\n');
        }
        out
    }
}

/// Builds a group document listing `vcard:hasMember` statements.
#[derive(Debug, Clone, Default)]
pub struct GroupDocumentBuilder {
    members: Vec<(String, String)>,
}

impl GroupDocumentBuilder {
    /// Creates an empty group document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `<group> vcard:hasMember <webid>`, where `group` is a fragment of
    /// the group document or an absolute IRI.
    pub fn member(mut self, group: impl Into<String>, webid: impl Into<String>) -> Self {
        self.members.push((group.into(), webid.into()));
        self
    }

    /// Renders the document.
    pub fn build(&self) -> String {
        let mut out = String::from(PREFIXES);
        for (group, webid) in &self.members {
            let _ = writeln!(out, "{} <{}> {} .", node(group), vcard::HAS_MEMBER, iri(webid));
        }
        out
    }
}

fn iri(value: &str) -> String {
    format!("<{value}>")
}

fn node(id: &str) -> String {
    if id.contains(':') || id.starts_with('#') {
        iri(id)
    } else {
        format!("<#{id}>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wac_graph::{PatternTerm, Query, TurtleParser};

    const BASE: &str = "http://localhost:8080/test.acl";

    #[test]
    fn test_node_forms() {
        assert_eq!(node("public"), "<#public>");
        assert_eq!(node("#0"), "<#0>");
        assert_eq!(node("http://x/g#1"), "<http://x/g#1>");
    }

    #[test]
    fn test_document_parses() {
        let doc = AclDocumentBuilder::new()
            .with(
                Authorization::new("owner")
                    .access_to("http://localhost:8080/test")
                    .default_for("http://localhost:8080/")
                    .modes([AccessMode::Read, AccessMode::Write, AccessMode::Control])
                    .agent("https://alice.example/card#me"),
            )
            .with(
                Authorization::new("team")
                    .access_to("http://localhost:8080/test")
                    .mode(AccessMode::Append)
                    .group("http://localhost:8080/group#0"),
            )
            .build();

        let graph = TurtleParser::new().with_base(BASE).unwrap().parse(&doc).unwrap();
        let modes = Query::new().pattern(
            PatternTerm::iri(format!("{BASE}#owner")),
            PatternTerm::iri(acl::MODE),
            PatternTerm::var("mode"),
        );
        assert_eq!(graph.select(&modes).len(), 3);
        assert!(graph.ask(&Query::new().pattern(
            PatternTerm::iri(format!("{BASE}#team")),
            PatternTerm::iri(acl::AGENT_GROUP),
            PatternTerm::iri("http://localhost:8080/group#0"),
        )));
    }

    #[test]
    fn test_group_document_parses() {
        let doc = GroupDocumentBuilder::new()
            .member("1", "https://alice.example/card#me")
            .build();
        let graph = TurtleParser::new()
            .with_base("http://localhost:8080/group")
            .unwrap()
            .parse(&doc)
            .unwrap();
        assert!(graph.ask(&Query::new().pattern(
            PatternTerm::iri("http://localhost:8080/group#1"),
            PatternTerm::iri(vcard::HAS_MEMBER),
            PatternTerm::iri("https://alice.example/card#me"),
        )));
    }
}
