//! Trigger types and trigger metadata
//!
//! Metadata travels as one flat JSON object; which of its fields matter is
//! decided by the rule's trigger type:
//!
//! | Trigger                | relevant fields                                      |
//! |------------------------|------------------------------------------------------|
//! | Keyword, MemberProfile | keyword_filter, regex_patterns, allow_list           |
//! | KeywordPreset          | presets, allow_list                                  |
//! | MentionSpam            | mention_total_limit, mention_raid_protection_enabled |
//! | Spam                   | none                                                 |
//!
//! Irrelevant fields are accepted and forwarded; the server ignores them.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ValidationError;

/// Maximum keyword filter entries on a Keyword rule
pub const MAX_KEYWORD_FILTER: usize = 1000;
/// Maximum regex patterns on a Keyword rule
pub const MAX_REGEX_PATTERNS: usize = 10;
/// Maximum allow-list entries on a Keyword rule
pub const MAX_KEYWORD_ALLOW_LIST: usize = 1000;
/// Maximum allow-list entries on a KeywordPreset rule
pub const MAX_PRESET_ALLOW_LIST: usize = 100;
/// Maximum unique role and user mentions per message
pub const MAX_MENTION_TOTAL_LIMIT: u8 = 50;

/// Category of content a rule inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum TriggerType {
    /// Content matches a user-defined keyword list
    Keyword,
    /// Content looks like generic spam
    Spam,
    /// Content matches a platform-maintained wordset
    KeywordPreset,
    /// Content mentions too many unique roles and users
    MentionSpam,
    /// Member profile contains words from a user-defined list
    MemberProfile,
    /// A trigger type this client does not know yet
    Unknown(u8),
}

impl From<u8> for TriggerType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Keyword,
            3 => Self::Spam,
            4 => Self::KeywordPreset,
            5 => Self::MentionSpam,
            6 => Self::MemberProfile,
            other => Self::Unknown(other),
        }
    }
}

impl From<TriggerType> for u8 {
    fn from(value: TriggerType) -> Self {
        match value {
            TriggerType::Keyword => 1,
            TriggerType::Spam => 3,
            TriggerType::KeywordPreset => 4,
            TriggerType::MentionSpam => 5,
            TriggerType::MemberProfile => 6,
            TriggerType::Unknown(other) => other,
        }
    }
}

/// Platform-maintained wordsets for KeywordPreset rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum KeywordPresetType {
    Profanity,
    SexualContent,
    Slurs,
    Unknown(u8),
}

impl From<u8> for KeywordPresetType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Profanity,
            2 => Self::SexualContent,
            3 => Self::Slurs,
            other => Self::Unknown(other),
        }
    }
}

impl From<KeywordPresetType> for u8 {
    fn from(value: KeywordPresetType) -> Self {
        match value {
            KeywordPresetType::Profanity => 1,
            KeywordPresetType::SexualContent => 2,
            KeywordPresetType::Slurs => 3,
            KeywordPresetType::Unknown(other) => other,
        }
    }
}

/// Additional data used to decide whether a rule triggers
///
/// Attribute bounds are literals and must equal the `MAX_*` constants above.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct TriggerMetadata {
    /// Substrings searched for in content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1000))]
    pub keyword_filter: Option<Vec<String>>,

    /// Regular expressions matched against content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 10))]
    pub regex_patterns: Option<Vec<String>>,

    /// Platform wordsets searched for in content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presets: Option<Vec<KeywordPresetType>>,

    /// Substrings that never trigger the rule; the tighter preset bound is
    /// checked in [`TriggerMetadata::validate_for`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1000))]
    pub allow_list: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 50))]
    pub mention_total_limit: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mention_raid_protection_enabled: Option<bool>,
}

impl TriggerMetadata {
    /// Metadata for a Keyword rule
    pub fn keyword<I, S>(filter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keyword_filter: Some(filter.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Metadata for a KeywordPreset rule
    pub fn keyword_preset(presets: impl IntoIterator<Item = KeywordPresetType>) -> Self {
        Self {
            presets: Some(presets.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Metadata for a MentionSpam rule
    pub fn mention_spam(total_limit: u8) -> Self {
        Self {
            mention_total_limit: Some(total_limit),
            ..Self::default()
        }
    }

    pub fn with_regex_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regex_patterns = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_allow_list<I, S>(mut self, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow_list = Some(allowed.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_raid_protection(mut self, enabled: bool) -> Self {
        self.mention_raid_protection_enabled = Some(enabled);
        self
    }

    /// Copy of this metadata with only the fields the trigger type reads
    pub fn relevant_to(&self, trigger_type: TriggerType) -> Self {
        match trigger_type {
            TriggerType::Keyword | TriggerType::MemberProfile => Self {
                keyword_filter: self.keyword_filter.clone(),
                regex_patterns: self.regex_patterns.clone(),
                allow_list: self.allow_list.clone(),
                ..Self::default()
            },
            TriggerType::KeywordPreset => Self {
                presets: self.presets.clone(),
                allow_list: self.allow_list.clone(),
                ..Self::default()
            },
            TriggerType::MentionSpam => Self {
                mention_total_limit: self.mention_total_limit,
                mention_raid_protection_enabled: self.mention_raid_protection_enabled,
                ..Self::default()
            },
            TriggerType::Spam => Self::default(),
            TriggerType::Unknown(_) => self.clone(),
        }
    }

    /// Check the bounds for the given trigger type
    ///
    /// Fields that are irrelevant to the trigger are still bound-checked but
    /// never rejected for being present.
    pub fn validate_for(&self, trigger_type: TriggerType) -> Result<(), ValidationError> {
        self.validate()
            .map_err(|e| ValidationError::from_validator("trigger_metadata", &e))?;

        if trigger_type == TriggerType::KeywordPreset {
            if let Some(allow_list) = &self.allow_list {
                ValidationError::check_max_items(
                    "trigger_metadata.allow_list",
                    allow_list.len(),
                    MAX_PRESET_ALLOW_LIST,
                )?;
            }
        }
        Ok(())
    }
}
