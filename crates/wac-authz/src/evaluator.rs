//! Grant evaluation against a resolved ACL document.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, instrument, warn};
use wac_core::vocab::vcard;
use wac_core::{AuthorizationId, ResourceId};
use wac_graph::{Bindings, Graph, GraphProvider, PatternTerm, Query};

use crate::config::EngineConfig;
use crate::grantee::{EvaluationContext, Grantee, AUTHZ_VAR, GROUP_VAR};

/// Runs grantee checks in precedence order.
#[derive(Debug, Clone)]
pub struct AuthorizationEvaluator {
    provider: Arc<dyn GraphProvider>,
    config: EngineConfig,
}

impl AuthorizationEvaluator {
    /// Creates an evaluator. `provider` is used to fetch group documents.
    pub fn new(provider: Arc<dyn GraphProvider>, config: EngineConfig) -> Self {
        Self { provider, config }
    }

    /// The evaluator configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the first grantee kind with a matching authorization, in
    /// the order public, authenticated, agent, group.
    ///
    /// Anonymous callers only ever reach the public check.
    pub async fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Option<(Grantee, AuthorizationId)> {
        for grantee in Grantee::ALL {
            if let Some(id) = self.check(grantee, ctx).await {
                return Some((grantee, id));
            }
        }
        None
    }

    /// Runs a single grantee check and returns the matching authorization.
    #[instrument(skip(self, grantee, ctx), fields(check = grantee.name(), mode = %ctx.mode))]
    pub async fn check(&self, grantee: Grantee, ctx: &EvaluationContext<'_>) -> Option<AuthorizationId> {
        if grantee == Grantee::AgentGroup && !self.config.check_groups {
            return None;
        }
        let query = grantee.query(ctx)?;
        let rows = ctx.resolved.document.select(&query);
        debug!(candidates = rows.len(), "grantee query evaluated");

        match grantee {
            Grantee::AgentGroup => {
                let webid = ctx.agent.webid_str()?;
                self.check_group_rows(&rows, webid).await
            }
            _ => rows.first().and_then(authorization_id),
        }
    }

    // Rows are (authorization, group) pairs in document order. Each group
    // document is fetched at most once; failures count as "not a member".
    async fn check_group_rows(&self, rows: &[Bindings], webid: &str) -> Option<AuthorizationId> {
        let mut documents: HashMap<ResourceId, Option<Arc<Graph>>> = HashMap::new();

        for row in rows {
            let Some(group) = row.iri(GROUP_VAR) else {
                continue;
            };
            let document_id = ResourceId::new(group);

            if !documents.contains_key(&document_id) {
                if documents.len() >= self.config.max_group_documents {
                    warn!(
                        group_document = %document_id,
                        limit = self.config.max_group_documents,
                        "group document limit reached, skipping"
                    );
                    continue;
                }
                let fetched = match self.provider.fetch(&document_id).await {
                    Ok(graph) => Some(graph),
                    Err(e) => {
                        warn!(
                            group_document = %document_id,
                            error = %e,
                            kind = e.kind(),
                            "failed to fetch group document"
                        );
                        None
                    }
                };
                documents.insert(document_id.clone(), fetched);
            }

            let Some(Some(graph)) = documents.get(&document_id) else {
                continue;
            };
            if is_member(graph, group, webid) {
                debug!(group, "agent is a group member");
                return authorization_id(row);
            }
        }
        None
    }
}

fn is_member(graph: &Graph, group: &str, webid: &str) -> bool {
    let query = Query::new().pattern(
        PatternTerm::iri(group),
        PatternTerm::iri(vcard::HAS_MEMBER),
        PatternTerm::iri(webid),
    );
    graph.ask(&query)
}

fn authorization_id(row: &Bindings) -> Option<AuthorizationId> {
    row.get(AUTHZ_VAR).map(|term| AuthorizationId::new(term.node_id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ResolvedAcl;
    use wac_core::{AccessMode, AgentIdentity};
    use wac_graph::{FetchError, MemoryGraphProvider, TurtleParser};
    use wac_test::RecordingProvider;

    const ACL: &str = "http://pod.example/doc.acl";
    const ALICE: &str = "https://alice.example/card#me";

    fn resolved(turtle: &str) -> ResolvedAcl {
        let graph = TurtleParser::new()
            .with_base(ACL)
            .unwrap()
            .parse(&format!(
                "@prefix acl: <http://www.w3.org/ns/auth/acl#> .\n\
                 @prefix foaf: <http://xmlns.com/foaf/0.1/> .\n{turtle}"
            ))
            .unwrap();
        ResolvedAcl {
            document: Arc::new(graph),
            document_id: ResourceId::new(ACL),
            effective_target: ResourceId::new("http://pod.example/doc"),
            governing_resource: ResourceId::new("http://pod.example/doc"),
            is_inherited: false,
        }
    }

    fn group_rule(id: &str, group: &str) -> String {
        format!(
            "<#{id}> a acl:Authorization ; acl:accessTo <http://pod.example/doc> ;\n\
             acl:mode acl:Append ; acl:agentGroup <{group}> .\n"
        )
    }

    fn members(group: &str, webid: &str) -> String {
        format!("<{group}> <http://www.w3.org/2006/vcard/ns#hasMember> <{webid}> .")
    }

    fn evaluator(provider: Arc<dyn GraphProvider>, config: EngineConfig) -> AuthorizationEvaluator {
        AuthorizationEvaluator::new(provider, config)
    }

    #[tokio::test]
    async fn test_public_wins_first() {
        let acl = resolved(
            "<#agent> a acl:Authorization ; acl:accessTo <http://pod.example/doc> ;\n\
               acl:mode acl:Read ; acl:agent <https://alice.example/card#me> .\n\
             <#public> a acl:Authorization ; acl:accessTo <http://pod.example/doc> ;\n\
               acl:mode acl:Read ; acl:agentClass foaf:Agent .",
        );
        let agent = AgentIdentity::webid(ALICE);
        let ctx = EvaluationContext::new(&acl, AccessMode::Read, &agent);
        let eval = evaluator(Arc::new(MemoryGraphProvider::new()), EngineConfig::default());

        let (grantee, id) = eval.evaluate(&ctx).await.unwrap();
        assert_eq!(grantee, Grantee::Public);
        assert_eq!(id.as_str(), "http://pod.example/doc.acl#public");
    }

    #[tokio::test]
    async fn test_group_membership_in_document_order() {
        let acl = resolved(&format!(
            "{}{}{}",
            group_rule("a", "http://pod.example/group#0"),
            group_rule("b", "http://pod.example/other#0"),
            group_rule("c", "http://pod.example/group#1"),
        ));
        let provider = MemoryGraphProvider::new()
            .with_turtle("http://pod.example/group", &members("http://pod.example/group#1", ALICE))
            .unwrap()
            .with_turtle("http://pod.example/other", &members("http://pod.example/other#0", "https://bob.example/#me"))
            .unwrap();
        let recording = Arc::new(RecordingProvider::new(provider));
        let agent = AgentIdentity::webid(ALICE);
        let ctx = EvaluationContext::new(&acl, AccessMode::Append, &agent);
        let eval = evaluator(recording.clone(), EngineConfig::default());

        let id = eval.check(Grantee::AgentGroup, &ctx).await.unwrap();
        assert_eq!(id.as_str(), "http://pod.example/doc.acl#c");
        assert_eq!(recording.fetch_count("http://pod.example/group"), 1);
        assert_eq!(recording.fetch_count("http://pod.example/other"), 1);
    }

    #[tokio::test]
    async fn test_group_fetch_failure_is_skipped() {
        let acl = resolved(&format!(
            "{}{}",
            group_rule("broken", "http://down.example/team#x"),
            group_rule("ok", "http://pod.example/group#0"),
        ));
        let provider = MemoryGraphProvider::new()
            .with_turtle("http://pod.example/group", &members("http://pod.example/group#0", ALICE))
            .unwrap();
        let recording = Arc::new(RecordingProvider::new(provider).with_failure(
            "http://down.example/team",
            FetchError::unreachable(&ResourceId::new("http://down.example/team"), "connection refused"),
        ));
        let agent = AgentIdentity::webid(ALICE);
        let ctx = EvaluationContext::new(&acl, AccessMode::Append, &agent);
        let eval = evaluator(recording, EngineConfig::default());

        let id = eval.check(Grantee::AgentGroup, &ctx).await.unwrap();
        assert_eq!(id.as_str(), "http://pod.example/doc.acl#ok");
    }

    #[tokio::test]
    async fn test_group_document_limit() {
        let acl = resolved(&format!(
            "{}{}",
            group_rule("first", "http://pod.example/g1#x"),
            group_rule("second", "http://pod.example/g2#x"),
        ));
        let provider = MemoryGraphProvider::new()
            .with_turtle("http://pod.example/g2", &members("http://pod.example/g2#x", ALICE))
            .unwrap();
        let recording = Arc::new(RecordingProvider::new(provider));
        let agent = AgentIdentity::webid(ALICE);
        let ctx = EvaluationContext::new(&acl, AccessMode::Append, &agent);
        let eval = evaluator(
            recording.clone(),
            EngineConfig::new().with_max_group_documents(1),
        );

        assert!(eval.check(Grantee::AgentGroup, &ctx).await.is_none());
        assert_eq!(recording.fetch_count("http://pod.example/g2"), 0);
    }

    #[tokio::test]
    async fn test_groups_disabled() {
        let acl = resolved(&group_rule("a", "http://pod.example/group#0"));
        let provider = MemoryGraphProvider::new()
            .with_turtle("http://pod.example/group", &members("http://pod.example/group#0", ALICE))
            .unwrap();
        let recording = Arc::new(RecordingProvider::new(provider));
        let agent = AgentIdentity::webid(ALICE);
        let ctx = EvaluationContext::new(&acl, AccessMode::Append, &agent);
        let eval = evaluator(recording.clone(), EngineConfig::new().with_check_groups(false));

        assert!(eval.evaluate(&ctx).await.is_none());
        assert_eq!(recording.total_fetches(), 0);
    }

    #[tokio::test]
    async fn test_anonymous_never_matches_identified_grants() {
        let acl = resolved(
            "<#auth> a acl:Authorization ; acl:accessTo <http://pod.example/doc> ;\n\
               acl:mode acl:Read ; acl:agentClass acl:AuthenticatedAgent .",
        );
        let agent = AgentIdentity::Anonymous;
        let ctx = EvaluationContext::new(&acl, AccessMode::Read, &agent);
        let eval = evaluator(Arc::new(MemoryGraphProvider::new()), EngineConfig::default());
        assert!(eval.evaluate(&ctx).await.is_none());
    }
}
