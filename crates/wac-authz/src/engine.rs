//! The access control decision engine.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, info_span, instrument, warn};
use wac_core::{
    AccessDecision, AccessMode, AclMapping, AgentIdentity, AuthorizationId, RequestMethod,
    ResourceId,
};
use wac_graph::GraphProvider;

use crate::classifier::{classify, is_control_request};
use crate::config::EngineConfig;
use crate::error::{AccessError, AccessResult};
use crate::evaluator::AuthorizationEvaluator;
use crate::grantee::{EvaluationContext, Grantee};
use crate::patch::is_append_only;
use crate::resolver::AclResolver;

/// A single access request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRequest {
    /// Target resource, without fragment.
    pub resource: ResourceId,
    /// Request method.
    pub method: RequestMethod,
    /// Request body, consulted for `PATCH`.
    pub body: Option<String>,
    /// The caller.
    pub agent: AgentIdentity,
}

impl AccessRequest {
    /// Creates an anonymous request without a body.
    pub fn new(resource: impl Into<ResourceId>, method: RequestMethod) -> Self {
        Self {
            resource: resource.into(),
            method,
            body: None,
            agent: AgentIdentity::Anonymous,
        }
    }

    /// Sets the request body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the caller.
    pub fn with_agent(mut self, agent: AgentIdentity) -> Self {
        self.agent = agent;
        self
    }

    /// Sets the caller's WebID.
    pub fn with_webid(self, webid: impl Into<String>) -> Self {
        self.with_agent(AgentIdentity::webid(webid))
    }
}

/// Decides access requests against Web Access Control documents.
///
/// The engine owns no per-request state and can be shared across tasks
/// behind an `Arc`.
#[derive(Debug, Clone)]
pub struct AccessControlEngine {
    resolver: AclResolver,
    evaluator: AuthorizationEvaluator,
    mapping: Arc<dyn AclMapping>,
}

impl AccessControlEngine {
    /// Creates an engine with the default configuration.
    pub fn new(provider: Arc<dyn GraphProvider>, mapping: Arc<dyn AclMapping>) -> Self {
        Self::with_config(provider, mapping, EngineConfig::default())
    }

    /// Creates an engine with the given configuration.
    pub fn with_config(
        provider: Arc<dyn GraphProvider>,
        mapping: Arc<dyn AclMapping>,
        config: EngineConfig,
    ) -> Self {
        Self {
            resolver: AclResolver::new(Arc::clone(&provider), Arc::clone(&mapping)),
            evaluator: AuthorizationEvaluator::new(provider, config),
            mapping,
        }
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        self.evaluator.config()
    }

    /// Decides whether `agent` may perform `method` on `resource`.
    ///
    /// `agent` is the caller's WebID, `None` (or empty) for anonymous
    /// callers. On success returns the authorization that granted access.
    ///
    /// # Errors
    ///
    /// - [`AccessError::UnsupportedMethod`] for methods other than `GET`,
    ///   `POST`, `PUT`, `PATCH` and `DELETE`
    /// - [`AccessError::MalformedPatch`] for unparsable `PATCH` bodies
    /// - [`AccessError::ResolutionFailure`] if no ACL document governs the
    ///   resource
    /// - [`AccessError::Unauthenticated`] if an anonymous caller has no
    ///   public grant
    /// - [`AccessError::Unauthorized`] if an identified caller has no grant
    pub async fn check_access(
        &self,
        resource: &str,
        method: &str,
        body: Option<&str>,
        agent: Option<&str>,
    ) -> AccessResult<AuthorizationId> {
        let start = Instant::now();
        let method: RequestMethod = match method.parse() {
            Ok(method) => method,
            Err(e) => {
                let result = Err(AccessError::from(e));
                info_span!("authorize", resource, method)
                    .in_scope(|| self.report(&result, start.elapsed()));
                return result.map(|(_, authorization, _)| authorization);
            }
        };
        let mut request =
            AccessRequest::new(resource, method).with_agent(AgentIdentity::from_option(agent));
        request.body = body.map(str::to_owned);
        self.authorize(&request).await
    }

    /// Like [`check_access`](Self::check_access), but reports denials as
    /// [`AccessDecision::Denied`] instead of errors.
    ///
    /// # Errors
    ///
    /// Every [`AccessError`] that is not a denial.
    pub async fn decide(
        &self,
        resource: &str,
        method: &str,
        body: Option<&str>,
        agent: Option<&str>,
    ) -> AccessResult<AccessDecision> {
        into_decision(self.check_access(resource, method, body, agent).await)
    }

    /// Decides a typed [`AccessRequest`].
    ///
    /// # Errors
    ///
    /// As [`check_access`](Self::check_access), minus `UnsupportedMethod`.
    #[instrument(
        skip(self, request),
        fields(
            resource = %request.resource,
            method = %request.method,
            agent = request.agent.log_id(),
        )
    )]
    pub async fn authorize(&self, request: &AccessRequest) -> AccessResult<AuthorizationId> {
        let start = Instant::now();
        let result = self.evaluate_request(request).await;
        self.report(&result, start.elapsed());

        result.map(|(_, authorization, _)| authorization)
    }

    /// Decides a typed [`AccessRequest`], reporting denials as
    /// [`AccessDecision::Denied`].
    ///
    /// # Errors
    ///
    /// Every [`AccessError`] that is not a denial.
    pub async fn authorize_decision(&self, request: &AccessRequest) -> AccessResult<AccessDecision> {
        into_decision(self.authorize(request).await)
    }

    /// The access mode a request requires.
    ///
    /// # Errors
    ///
    /// [`AccessError::MalformedPatch`] for unparsable `PATCH` bodies.
    pub fn required_mode(&self, request: &AccessRequest) -> AccessResult<AccessMode> {
        let is_control = is_control_request(self.mapping.as_ref(), &request.resource);
        let append_only = is_append_only(request.method, request.body.as_deref())?;
        Ok(classify(request.method, is_control, append_only))
    }

    fn report(
        &self,
        result: &AccessResult<(Grantee, AuthorizationId, AccessMode)>,
        elapsed: Duration,
    ) {
        match result {
            Ok((grantee, authorization, mode)) => info!(
                mode = %mode,
                check = grantee.name(),
                authorization = %authorization,
                elapsed_ms = elapsed.as_millis(),
                "access granted"
            ),
            Err(e) if e.is_denied() => info!(outcome = e.kind(), reason = %e, "access denied"),
            Err(e) => warn!(outcome = e.kind(), error = %e, "access check failed"),
        }

        if self.config().record_metrics {
            let (outcome, check) = outcome_labels(result);
            wac_telemetry::metrics::record_decision(outcome, check, elapsed);
        }
    }

    async fn evaluate_request(
        &self,
        request: &AccessRequest,
    ) -> AccessResult<(Grantee, AuthorizationId, AccessMode)> {
        let is_control = is_control_request(self.mapping.as_ref(), &request.resource);
        let mode = self.required_mode(request)?;
        let resolved = self.resolver.resolve(&request.resource, is_control).await?;
        let ctx = EvaluationContext::new(&resolved, mode, &request.agent);

        if let Some(authorization) = self.evaluator.check(Grantee::Public, &ctx).await {
            return Ok((Grantee::Public, authorization, mode));
        }

        let Some(webid) = request.agent.webid_str() else {
            return Err(AccessError::Unauthenticated {
                resource: request.resource.clone(),
                mode,
            });
        };

        for grantee in [Grantee::Authenticated, Grantee::Agent, Grantee::AgentGroup] {
            if let Some(authorization) = self.evaluator.check(grantee, &ctx).await {
                return Ok((grantee, authorization, mode));
            }
        }

        Err(AccessError::Unauthorized {
            resource: request.resource.clone(),
            mode,
            agent: webid.to_string(),
        })
    }
}

/// Metric labels for a decision: the outcome and the granting check.
fn outcome_labels<T>(result: &AccessResult<(Grantee, T, AccessMode)>) -> (&'static str, &'static str) {
    match result {
        Ok((grantee, _, _)) => ("granted", grantee.name()),
        Err(e) => (e.kind(), "none"),
    }
}

fn into_decision(result: AccessResult<AuthorizationId>) -> AccessResult<AccessDecision> {
    match result {
        Ok(authorization) => Ok(AccessDecision::Granted(authorization)),
        Err(e) if e.is_denied() => Ok(AccessDecision::Denied),
        Err(e) => Err(e),
    }
}
