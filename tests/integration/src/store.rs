//! In-memory rule store
//!
//! Behaves like the platform's rule endpoints: assigns ids on create, keeps
//! rules per guild, and answers unknown ids with 404. It implements
//! [`RequestExecutor`] so a `RuleClient` can run against it directly, and
//! the test server forwards HTTP requests to it.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use automod_client::ModifyAutoModerationRule;
use automod_core::{
    ApiRequest, AutoModerationRule, ExecResult, ExecutorError, RequestExecutor, Snowflake,
    SnowflakeGenerator,
};
use dashmap::DashMap;
use http::Method;
use serde_json::Value;

/// User id recorded as the creator of every rule
pub const BOT_USER_ID: Snowflake = Snowflake::new(155_149_108_183_695_360);

const UNKNOWN_RULE: &str = "Unknown Auto Moderation Rule";

enum Route {
    Rules(Snowflake),
    Rule(Snowflake, Snowflake),
}

impl Route {
    fn parse(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        match segments.as_slice() {
            ["guilds", guild, "auto-moderation", "rules"] => Some(Self::Rules(guild.parse().ok()?)),
            ["guilds", guild, "auto-moderation", "rules", rule] => {
                Some(Self::Rule(guild.parse().ok()?, rule.parse().ok()?))
            }
            _ => None,
        }
    }
}

/// Rule storage shared by the direct executor and the HTTP test server
pub struct RuleStore {
    rules: DashMap<Snowflake, AutoModerationRule>,
    ids: SnowflakeGenerator,
    requests: Mutex<Vec<ApiRequest>>,
    faults: Mutex<VecDeque<ExecutorError>>,
    latency: Mutex<Option<Duration>>,
}

impl Default for RuleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleStore {
    pub fn new() -> Self {
        Self {
            rules: DashMap::new(),
            ids: SnowflakeGenerator::new(1),
            requests: Mutex::new(Vec::new()),
            faults: Mutex::new(VecDeque::new()),
            latency: Mutex::new(None),
        }
    }

    /// Fail the next request with `error` instead of handling it
    pub fn fail_next(&self, error: ExecutorError) {
        self.faults.lock().unwrap().push_back(error);
    }

    /// Delay every response
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = Some(latency);
    }

    /// Every request received, in arrival order
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Stored rule, bypassing the API
    pub fn rule(&self, rule_id: Snowflake) -> Option<AutoModerationRule> {
        self.rules.get(&rule_id).map(|r| r.clone())
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    fn handle(&self, request: &ApiRequest) -> ExecResult<Option<Value>> {
        let Some(route) = Route::parse(&request.path) else {
            return Err(ExecutorError::NotFound {
                message: "404: Not Found".to_string(),
            });
        };

        match (&request.method, route) {
            (&Method::GET, Route::Rules(guild_id)) => Ok(Some(to_value(&self.list(guild_id)))),
            (&Method::POST, Route::Rules(guild_id)) => self.create(guild_id, request.body.as_ref()),
            (&Method::GET, Route::Rule(guild_id, rule_id)) => self
                .find(guild_id, rule_id)
                .map(|rule| Some(to_value(&rule))),
            (&Method::PATCH, Route::Rule(guild_id, rule_id)) => {
                self.modify(guild_id, rule_id, request.body.as_ref())
            }
            (&Method::DELETE, Route::Rule(guild_id, rule_id)) => {
                self.find(guild_id, rule_id)?;
                self.rules.remove(&rule_id);
                Ok(None)
            }
            _ => Err(ExecutorError::Status {
                status: 405,
                code: Some(0),
                message: "405: Method Not Allowed".to_string(),
            }),
        }
    }

    fn list(&self, guild_id: Snowflake) -> Vec<AutoModerationRule> {
        let mut rules: Vec<AutoModerationRule> = self
            .rules
            .iter()
            .filter(|entry| entry.guild_id == guild_id)
            .map(|entry| entry.value().clone())
            .collect();
        rules.sort_by_key(|rule| rule.id);
        rules
    }

    fn find(&self, guild_id: Snowflake, rule_id: Snowflake) -> ExecResult<AutoModerationRule> {
        self.rules
            .get(&rule_id)
            .filter(|rule| rule.guild_id == guild_id)
            .map(|rule| rule.clone())
            .ok_or_else(|| ExecutorError::NotFound {
                message: UNKNOWN_RULE.to_string(),
            })
    }

    fn create(&self, guild_id: Snowflake, body: Option<&Value>) -> ExecResult<Option<Value>> {
        let mut rule: AutoModerationRule = decode(body)?;
        rule.validate_for_create().map_err(|e| invalid_form(&e.to_string()))?;

        rule.id = self.ids.generate();
        rule.guild_id = guild_id;
        rule.creator_id = BOT_USER_ID;
        self.rules.insert(rule.id, rule.clone());

        Ok(Some(to_value(&rule)))
    }

    fn modify(
        &self,
        guild_id: Snowflake,
        rule_id: Snowflake,
        body: Option<&Value>,
    ) -> ExecResult<Option<Value>> {
        let patch: ModifyAutoModerationRule = decode(body)?;
        self.find(guild_id, rule_id)?;

        let mut entry = self.rules.get_mut(&rule_id).ok_or_else(|| ExecutorError::NotFound {
            message: UNKNOWN_RULE.to_string(),
        })?;
        patch.apply_to(entry.value_mut());
        Ok(Some(to_value(entry.value())))
    }
}

#[async_trait]
impl RequestExecutor for RuleStore {
    async fn execute(&self, request: ApiRequest) -> ExecResult<Option<Value>> {
        self.requests.lock().unwrap().push(request.clone());

        let latency = *self.latency.lock().unwrap();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let fault = self.faults.lock().unwrap().pop_front();
        if let Some(error) = fault {
            return Err(error);
        }

        self.handle(&request)
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap()
}

fn decode<T: serde::de::DeserializeOwned>(body: Option<&Value>) -> ExecResult<T> {
    let body = body.cloned().unwrap_or(Value::Null);
    serde_json::from_value(body).map_err(|e| invalid_form(&e.to_string()))
}

fn invalid_form(detail: &str) -> ExecutorError {
    ExecutorError::Status {
        status: 400,
        code: Some(50035),
        message: format!("Invalid Form Body: {detail}"),
    }
}
