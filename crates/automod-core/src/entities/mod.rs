//! Domain entities - auto-moderation rules, triggers and actions

mod action;
mod rule;
mod trigger;

pub use action::{
    Action, ActionMetadata, ActionType, MAX_CUSTOM_MESSAGE_LENGTH, MAX_TIMEOUT_SECONDS,
};
pub use rule::{AutoModerationRule, EventType, MAX_EXEMPT_CHANNELS, MAX_EXEMPT_ROLES};
pub use trigger::{
    KeywordPresetType, TriggerMetadata, TriggerType, MAX_KEYWORD_ALLOW_LIST, MAX_KEYWORD_FILTER,
    MAX_MENTION_TOTAL_LIMIT, MAX_PRESET_ALLOW_LIST, MAX_REGEX_PATTERNS,
};
