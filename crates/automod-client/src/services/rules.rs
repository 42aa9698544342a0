//! Auto-moderation rule service
//!
//! Each operation validates locally, builds one [`ApiRequest`] and hands it
//! to the executor. Executor failures come back as [`RuleError`]s tagged with
//! the operation and the guild/rule they targeted.

use std::sync::Arc;

use automod_common::{Operation, RuleError, RuleErrorKind, RuleResult};
use automod_core::{ApiRequest, AutoModerationRule, RequestExecutor, Snowflake};
use http::{HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::dto::{CreateAutoModerationRule, ModifyAutoModerationRule};
use crate::routes;

/// Header carrying the audit-log reason for write operations
pub const AUDIT_LOG_REASON: &str = "x-audit-log-reason";

/// Client for a guild's auto-moderation rules
///
/// Holds no state besides the executor, so one instance can be shared
/// across tasks.
#[derive(Clone)]
pub struct RuleClient {
    executor: Arc<dyn RequestExecutor>,
}

impl RuleClient {
    pub fn new(executor: Arc<dyn RequestExecutor>) -> Self {
        Self { executor }
    }

    /// List every rule in the guild, in server order
    #[instrument(skip_all, fields(guild_id = %guild_id))]
    pub async fn list_rules(&self, guild_id: Snowflake) -> RuleResult<Vec<AutoModerationRule>> {
        let call = Call::new(Operation::List, guild_id, None);
        let body = self.send(&call, ApiRequest::get(routes::rules(guild_id))).await?;

        let rules: Vec<AutoModerationRule> = match body {
            Some(value) => call.decode(value)?,
            None => Vec::new(),
        };

        debug!(count = rules.len(), "Listed auto-moderation rules");
        Ok(rules)
    }

    /// Fetch a single rule
    #[instrument(skip_all, fields(guild_id = %guild_id, rule_id = %rule_id))]
    pub async fn get_rule(
        &self,
        guild_id: Snowflake,
        rule_id: Snowflake,
    ) -> RuleResult<AutoModerationRule> {
        let call = Call::new(Operation::Get, guild_id, Some(rule_id));
        let body = self
            .send(&call, ApiRequest::get(routes::rule(guild_id, rule_id)))
            .await?;

        let rule: AutoModerationRule = call.decode_required(body)?;
        debug!(name = %rule.name, "Fetched auto-moderation rule");
        Ok(rule)
    }

    /// Create a rule and return it as stored by the server
    ///
    /// The rule is validated in full first; a validation failure means no
    /// request was made.
    #[instrument(skip_all, fields(guild_id = %guild_id, name = %rule.name))]
    pub async fn create_rule(
        &self,
        guild_id: Snowflake,
        rule: &AutoModerationRule,
        reason: Option<&str>,
    ) -> RuleResult<AutoModerationRule> {
        let call = Call::new(Operation::Create, guild_id, None);
        rule.validate_for_create().map_err(|e| call.fail(e))?;

        let body = serde_json::to_value(CreateAutoModerationRule::from(rule))
            .map_err(|e| call.fail(RuleErrorKind::Decode(e.to_string())))?;
        let request = with_reason(ApiRequest::post(routes::rules(guild_id), body), reason);

        let created: AutoModerationRule = call.decode_required(self.send(&call, request).await?)?;
        info!(rule_id = %created.id, "Auto-moderation rule created");
        Ok(created)
    }

    /// Apply a sparse update and return the updated rule
    ///
    /// Only fields set on `request` are validated and sent. An empty request
    /// is still sent.
    #[instrument(skip_all, fields(guild_id = %guild_id, rule_id = %rule_id))]
    pub async fn modify_rule(
        &self,
        guild_id: Snowflake,
        rule_id: Snowflake,
        request: &ModifyAutoModerationRule,
    ) -> RuleResult<AutoModerationRule> {
        let call = Call::new(Operation::Modify, guild_id, Some(rule_id));
        request.validate_present().map_err(|e| call.fail(e))?;

        let body = request
            .to_body()
            .map_err(|e| call.fail(RuleErrorKind::Decode(e.to_string())))?;
        let api_request = with_reason(
            ApiRequest::patch(routes::rule(guild_id, rule_id), body),
            request.reason.as_deref(),
        );

        let updated: AutoModerationRule =
            call.decode_required(self.send(&call, api_request).await?)?;
        info!(enabled = updated.enabled, "Auto-moderation rule modified");
        Ok(updated)
    }

    /// Delete a rule
    ///
    /// Deleting a rule that does not exist fails with `NotFound`.
    #[instrument(skip_all, fields(guild_id = %guild_id, rule_id = %rule_id))]
    pub async fn delete_rule(
        &self,
        guild_id: Snowflake,
        rule_id: Snowflake,
        reason: Option<&str>,
    ) -> RuleResult<()> {
        let call = Call::new(Operation::Delete, guild_id, Some(rule_id));
        let request = with_reason(ApiRequest::delete(routes::rule(guild_id, rule_id)), reason);

        self.send(&call, request).await?;
        info!("Auto-moderation rule deleted");
        Ok(())
    }

    async fn send(&self, call: &Call, request: ApiRequest) -> RuleResult<Option<Value>> {
        self.executor.execute(request).await.map_err(|e| {
            let err = call.fail(e);
            warn!(error_code = err.error_code(), error = %err.kind, "Rule request failed");
            err
        })
    }
}

/// Operation context attached to every error
struct Call {
    operation: Operation,
    guild_id: Snowflake,
    rule_id: Option<Snowflake>,
}

impl Call {
    fn new(operation: Operation, guild_id: Snowflake, rule_id: Option<Snowflake>) -> Self {
        Self {
            operation,
            guild_id,
            rule_id,
        }
    }

    fn fail(&self, kind: impl Into<RuleErrorKind>) -> RuleError {
        RuleError::new(self.operation, self.guild_id, self.rule_id, kind)
    }

    fn decode<T: DeserializeOwned>(&self, value: Value) -> RuleResult<T> {
        serde_json::from_value(value).map_err(|e| self.fail(RuleErrorKind::Decode(e.to_string())))
    }

    fn decode_required<T: DeserializeOwned>(&self, body: Option<Value>) -> RuleResult<T> {
        let value = body
            .ok_or_else(|| self.fail(RuleErrorKind::Decode("empty response body".to_string())))?;
        self.decode(value)
    }
}

/// Attach the percent-encoded audit-log reason; blank reasons send no header
fn with_reason(request: ApiRequest, reason: Option<&str>) -> ApiRequest {
    let Some(reason) = reason.filter(|r| !r.trim().is_empty()) else {
        return request;
    };

    // Percent-encoded output is plain ASCII, always a valid header value
    match HeaderValue::from_str(&urlencoding::encode(reason)) {
        Ok(value) => request.with_header(HeaderName::from_static(AUDIT_LOG_REASON), value),
        Err(_) => request,
    }
}
