//! Auto-moderation rule entity
//!
//! Lifecycle: a client builds an unsaved rule (all ids zero), the server
//! assigns `id` and `creator_id` on creation, later updates are sparse
//! patches, and deletion is terminal.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::action::Action;
use super::trigger::{TriggerMetadata, TriggerType};
use crate::error::{Constraint, ValidationError};
use crate::value_objects::Snowflake;

/// Maximum exempt roles per rule
pub const MAX_EXEMPT_ROLES: usize = 20;
/// Maximum exempt channels per rule
pub const MAX_EXEMPT_CHANNELS: usize = 50;

/// When a rule is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum EventType {
    /// A member sends or edits a message
    MessageSend,
    /// A member edits their profile
    MemberUpdate,
    Unknown(u8),
}

impl From<u8> for EventType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::MessageSend,
            2 => Self::MemberUpdate,
            other => Self::Unknown(other),
        }
    }
}

impl From<EventType> for u8 {
    fn from(value: EventType) -> Self {
        match value {
            EventType::MessageSend => 1,
            EventType::MemberUpdate => 2,
            EventType::Unknown(other) => other,
        }
    }
}

/// Auto-moderation rule
///
/// `id`, `guild_id` and `creator_id` are owned by the server. They are zero
/// on a rule the client built itself and are never sent in request bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct AutoModerationRule {
    #[serde(default, skip_serializing_if = "Snowflake::is_zero")]
    pub id: Snowflake,

    #[serde(default, skip_serializing_if = "Snowflake::is_zero")]
    pub guild_id: Snowflake,

    #[validate(length(min = 1))]
    pub name: String,

    #[serde(default, skip_serializing_if = "Snowflake::is_zero")]
    pub creator_id: Snowflake,

    pub event_type: EventType,

    /// Fixed at creation; the server does not support changing it
    pub trigger_type: TriggerType,

    #[serde(default)]
    #[validate(nested)]
    pub trigger_metadata: TriggerMetadata,

    #[validate(nested)]
    pub actions: Vec<Action>,

    #[serde(default)]
    pub enabled: bool,

    // Bounds mirror MAX_EXEMPT_ROLES and MAX_EXEMPT_CHANNELS
    #[serde(default)]
    #[validate(length(max = 20))]
    pub exempt_roles: Vec<Snowflake>,

    #[serde(default)]
    #[validate(length(max = 50))]
    pub exempt_channels: Vec<Snowflake>,
}

impl AutoModerationRule {
    /// Create an unsaved rule with no actions, disabled
    pub fn new(name: impl Into<String>, event_type: EventType, trigger_type: TriggerType) -> Self {
        Self {
            id: Snowflake::default(),
            guild_id: Snowflake::default(),
            name: name.into(),
            creator_id: Snowflake::default(),
            event_type,
            trigger_type,
            trigger_metadata: TriggerMetadata::default(),
            actions: Vec::new(),
            enabled: false,
            exempt_roles: Vec::new(),
            exempt_channels: Vec::new(),
        }
    }

    pub fn with_trigger_metadata(mut self, metadata: TriggerMetadata) -> Self {
        self.trigger_metadata = metadata;
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_exempt_role(mut self, role_id: Snowflake) -> Self {
        if !self.exempt_roles.contains(&role_id) {
            self.exempt_roles.push(role_id);
        }
        self
    }

    pub fn with_exempt_channel(mut self, channel_id: Snowflake) -> Self {
        if !self.exempt_channels.contains(&channel_id) {
            self.exempt_channels.push(channel_id);
        }
        self
    }

    /// Whether the server has assigned this rule an id
    #[inline]
    pub fn is_saved(&self) -> bool {
        !self.id.is_zero()
    }

    /// Full pre-flight check for rule creation
    ///
    /// Requires a name and at least one action, and enforces every bound
    /// including the trigger-dependent allow-list limit.
    pub fn validate_for_create(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::required("name"));
        }
        if self.actions.is_empty() {
            return Err(ValidationError::new("actions", Constraint::MinItems(1)));
        }

        self.validate()
            .map_err(|e| ValidationError::from_validator("", &e))?;
        self.trigger_metadata.validate_for(self.trigger_type)
    }
}
