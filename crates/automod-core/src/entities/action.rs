//! Actions executed when a rule triggers

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::value_objects::Snowflake;

/// Longest timeout an action may apply: four weeks
pub const MAX_TIMEOUT_SECONDS: u32 = 2_419_200;
/// Longest custom block message, in code points
pub const MAX_CUSTOM_MESSAGE_LENGTH: usize = 150;

/// What happens when a rule triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum ActionType {
    /// Block the offending message
    BlockMessage,
    /// Log the content to a channel
    SendAlertMessage,
    /// Time out the author
    Timeout,
    /// Prevent the member from interacting in the guild
    BlockMemberInteraction,
    Unknown(u8),
}

impl From<u8> for ActionType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::BlockMessage,
            2 => Self::SendAlertMessage,
            3 => Self::Timeout,
            4 => Self::BlockMemberInteraction,
            other => Self::Unknown(other),
        }
    }
}

impl From<ActionType> for u8 {
    fn from(value: ActionType) -> Self {
        match value {
            ActionType::BlockMessage => 1,
            ActionType::SendAlertMessage => 2,
            ActionType::Timeout => 3,
            ActionType::BlockMemberInteraction => 4,
            ActionType::Unknown(other) => other,
        }
    }
}

/// Extra data an action needs at execution time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ActionMetadata {
    /// Channel alerts are logged to (SendAlertMessage)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<Snowflake>,

    /// Timeout length (Timeout)
    // Bounds mirror MAX_TIMEOUT_SECONDS and MAX_CUSTOM_MESSAGE_LENGTH
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 2419200))]
    pub duration_seconds: Option<u32>,

    /// Explanation shown to the member (BlockMessage)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 150))]
    pub custom_message: Option<String>,
}

/// An action and its metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: ActionType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub metadata: Option<ActionMetadata>,
}

impl Action {
    pub fn block_message() -> Self {
        Self {
            kind: ActionType::BlockMessage,
            metadata: None,
        }
    }

    /// Block the message and show the member a custom explanation
    pub fn block_message_with(custom_message: impl Into<String>) -> Self {
        Self {
            kind: ActionType::BlockMessage,
            metadata: Some(ActionMetadata {
                custom_message: Some(custom_message.into()),
                ..ActionMetadata::default()
            }),
        }
    }

    pub fn send_alert(channel_id: Snowflake) -> Self {
        Self {
            kind: ActionType::SendAlertMessage,
            metadata: Some(ActionMetadata {
                channel_id: Some(channel_id),
                ..ActionMetadata::default()
            }),
        }
    }

    pub fn timeout(duration_seconds: u32) -> Self {
        Self {
            kind: ActionType::Timeout,
            metadata: Some(ActionMetadata {
                duration_seconds: Some(duration_seconds),
                ..ActionMetadata::default()
            }),
        }
    }

    pub fn block_member_interaction() -> Self {
        Self {
            kind: ActionType::BlockMemberInteraction,
            metadata: None,
        }
    }
}
