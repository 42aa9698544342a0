//! Request bodies for the rule endpoints
//!
//! Create sends every client-owned field of a rule. Modify sends a sparse
//! patch: only fields the caller set appear in the body, and falsy values
//! (`false`, `0`, `[]`) are sent as themselves.

use automod_core::entities::{MAX_EXEMPT_CHANNELS, MAX_EXEMPT_ROLES};
use automod_core::{
    Action, AutoModerationRule, Constraint, EventType, Field, Snowflake, TriggerMetadata,
    TriggerType, ValidationError,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Create
// ============================================================================

/// Body of a create request, borrowed from a rule
///
/// Server-owned ids (`id`, `guild_id`, `creator_id`) are never sent, even
/// when the source rule was fetched from the server.
#[derive(Debug, Serialize)]
pub struct CreateAutoModerationRule<'a> {
    pub name: &'a str,
    pub event_type: EventType,
    pub trigger_type: TriggerType,
    pub trigger_metadata: &'a TriggerMetadata,
    pub actions: &'a [Action],
    pub enabled: bool,
    pub exempt_roles: &'a [Snowflake],
    pub exempt_channels: &'a [Snowflake],
}

impl<'a> From<&'a AutoModerationRule> for CreateAutoModerationRule<'a> {
    fn from(rule: &'a AutoModerationRule) -> Self {
        Self {
            name: &rule.name,
            event_type: rule.event_type,
            trigger_type: rule.trigger_type,
            trigger_metadata: &rule.trigger_metadata,
            actions: &rule.actions,
            enabled: rule.enabled,
            exempt_roles: &rule.exempt_roles,
            exempt_channels: &rule.exempt_channels,
        }
    }
}

// ============================================================================
// Modify
// ============================================================================

/// Sparse update of an existing rule
///
/// `trigger_type` is absent on purpose: it cannot change after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyAutoModerationRule {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub name: Field<String>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub event_type: Field<EventType>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub trigger_metadata: Field<TriggerMetadata>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub actions: Field<Vec<Action>>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub enabled: Field<bool>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub exempt_roles: Field<Vec<Snowflake>>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub exempt_channels: Field<Vec<Snowflake>>,

    /// Audit-log reason, sent as a header
    #[serde(skip)]
    pub reason: Option<String>,
}

impl ModifyAutoModerationRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Field::Present(name.into());
        self
    }

    pub fn event_type(mut self, event_type: EventType) -> Self {
        self.event_type = Field::Present(event_type);
        self
    }

    pub fn trigger_metadata(mut self, metadata: TriggerMetadata) -> Self {
        self.trigger_metadata = Field::Present(metadata);
        self
    }

    pub fn actions(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.actions = Field::Present(actions.into_iter().collect());
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Field::Present(enabled);
        self
    }

    pub fn exempt_roles(mut self, roles: impl IntoIterator<Item = Snowflake>) -> Self {
        self.exempt_roles = Field::Present(roles.into_iter().collect());
        self
    }

    pub fn exempt_channels(mut self, channels: impl IntoIterator<Item = Snowflake>) -> Self {
        self.exempt_channels = Field::Present(channels.into_iter().collect());
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Whether no field is set; such a request is still a legal update
    pub fn is_empty(&self) -> bool {
        self.name.is_absent()
            && self.event_type.is_absent()
            && self.trigger_metadata.is_absent()
            && self.actions.is_absent()
            && self.enabled.is_absent()
            && self.exempt_roles.is_absent()
            && self.exempt_channels.is_absent()
    }

    /// Check the bounds of the fields that are set
    ///
    /// The allow-list is held to the keyword bound because the request does
    /// not say which trigger type the rule has.
    pub fn validate_present(&self) -> Result<(), ValidationError> {
        if let Field::Present(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ValidationError::required("name"));
            }
        }

        if let Field::Present(metadata) = &self.trigger_metadata {
            metadata
                .validate()
                .map_err(|e| ValidationError::from_validator("trigger_metadata", &e))?;
        }

        if let Field::Present(actions) = &self.actions {
            if actions.is_empty() {
                return Err(ValidationError::new("actions", Constraint::MinItems(1)));
            }
            for (index, action) in actions.iter().enumerate() {
                action
                    .validate()
                    .map_err(|e| ValidationError::from_validator(&format!("actions[{index}]"), &e))?;
            }
        }

        if let Field::Present(roles) = &self.exempt_roles {
            ValidationError::check_max_items("exempt_roles", roles.len(), MAX_EXEMPT_ROLES)?;
        }
        if let Field::Present(channels) = &self.exempt_channels {
            ValidationError::check_max_items("exempt_channels", channels.len(), MAX_EXEMPT_CHANNELS)?;
        }

        Ok(())
    }

    /// Overwrite the fields of `rule` that this request sets
    pub fn apply_to(&self, rule: &mut AutoModerationRule) {
        self.name.apply_to(&mut rule.name);
        self.event_type.apply_to(&mut rule.event_type);
        self.trigger_metadata.apply_to(&mut rule.trigger_metadata);
        self.actions.apply_to(&mut rule.actions);
        self.enabled.apply_to(&mut rule.enabled);
        self.exempt_roles.apply_to(&mut rule.exempt_roles);
        self.exempt_channels.apply_to(&mut rule.exempt_channels);
    }

    /// JSON body holding exactly the set fields
    pub fn to_body(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
