//! Grantee checks.
//!
//! Each [`Grantee`] variant knows how to ask the resolved ACL document
//! whether an authorization grants the required mode to its kind of
//! grantee. The shared part of every query (record type, target clause,
//! mode clause) comes from the [`EvaluationContext`].

use std::fmt;

use wac_core::vocab::{acl, foaf, rdf};
use wac_core::{AccessMode, AgentIdentity};
use wac_graph::{PatternTerm, Query};

use crate::resolver::ResolvedAcl;

/// Variable bound to the matching authorization.
pub const AUTHZ_VAR: &str = "authz";

/// Variable bound to a candidate group.
pub const GROUP_VAR: &str = "group";

/// The kinds of grantee an authorization can name, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grantee {
    /// `acl:agentClass foaf:Agent`: everyone, including anonymous callers.
    Public,
    /// `acl:agentClass acl:AuthenticatedAgent`: any identified caller.
    Authenticated,
    /// `acl:agent <webid>`: the caller by name.
    Agent,
    /// `acl:agentGroup <group>`: members listed in the group document.
    AgentGroup,
}

impl Grantee {
    /// All grantee kinds in precedence order.
    pub const ALL: [Self; 4] = [Self::Public, Self::Authenticated, Self::Agent, Self::AgentGroup];

    /// Short name, used in logs and metrics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Authenticated => "authenticated",
            Self::Agent => "agent",
            Self::AgentGroup => "agent_group",
        }
    }

    /// Whether anonymous callers can match this grantee.
    pub const fn allows_anonymous(self) -> bool {
        matches!(self, Self::Public)
    }

    /// Builds the query for this grantee, or `None` if the caller cannot
    /// match it.
    ///
    /// Rows bind [`AUTHZ_VAR`]; `AgentGroup` rows also bind [`GROUP_VAR`],
    /// and membership is then checked against the group document.
    pub fn query(self, ctx: &EvaluationContext<'_>) -> Option<Query> {
        if ctx.agent.is_anonymous() && !self.allows_anonymous() {
            return None;
        }
        let (predicate, object) = match self {
            Self::Public => (PatternTerm::iri(acl::AGENT_CLASS), PatternTerm::iri(foaf::AGENT)),
            Self::Authenticated => (
                PatternTerm::iri(acl::AGENT_CLASS),
                PatternTerm::iri(acl::AUTHENTICATED_AGENT),
            ),
            Self::Agent => (
                PatternTerm::iri(acl::AGENT),
                PatternTerm::iri(ctx.agent.webid_str()?),
            ),
            Self::AgentGroup => (PatternTerm::iri(acl::AGENT_GROUP), PatternTerm::var(GROUP_VAR)),
        };
        Some(ctx.base_query().pattern(PatternTerm::var(AUTHZ_VAR), predicate, object))
    }
}

impl fmt::Display for Grantee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a grantee check needs to know about the request.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    /// The governing ACL document.
    pub resolved: &'a ResolvedAcl,
    /// The mode the request requires.
    pub mode: AccessMode,
    /// The caller.
    pub agent: &'a AgentIdentity,
}

impl<'a> EvaluationContext<'a> {
    /// Creates a context.
    pub fn new(resolved: &'a ResolvedAcl, mode: AccessMode, agent: &'a AgentIdentity) -> Self {
        Self {
            resolved,
            mode,
            agent,
        }
    }

    /// The clauses every grantee query shares.
    ///
    /// Inherited documents only grant through `acl:default` on the
    /// container they belong to; a resource's own document grants through
    /// `acl:accessTo` on the resource. The mode clause accepts every
    /// granted mode that satisfies the required one.
    pub fn base_query(&self) -> Query {
        let (target_predicate, target) = if self.resolved.is_inherited {
            (acl::DEFAULT, &self.resolved.governing_resource)
        } else {
            (acl::ACCESS_TO, &self.resolved.effective_target)
        };
        let modes = self.mode.accepted_grants().iter().map(|m| m.iri());

        Query::new()
            .pattern(
                PatternTerm::var(AUTHZ_VAR),
                PatternTerm::iri(rdf::TYPE),
                PatternTerm::iri(acl::AUTHORIZATION),
            )
            .pattern(
                PatternTerm::var(AUTHZ_VAR),
                PatternTerm::iri(target_predicate),
                PatternTerm::iri(target.as_str()),
            )
            .pattern(
                PatternTerm::var(AUTHZ_VAR),
                PatternTerm::iri(acl::MODE),
                PatternTerm::one_of_iris(modes),
            )
    }
}
