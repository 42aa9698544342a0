//! API paths for guild auto-moderation rules

use automod_core::Snowflake;

/// `/guilds/{guild_id}/auto-moderation/rules`
pub fn rules(guild_id: Snowflake) -> String {
    format!("/guilds/{guild_id}/auto-moderation/rules")
}

/// `/guilds/{guild_id}/auto-moderation/rules/{rule_id}`
pub fn rule(guild_id: Snowflake, rule_id: Snowflake) -> String {
    format!("/guilds/{guild_id}/auto-moderation/rules/{rule_id}")
}
