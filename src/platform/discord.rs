use serde::Serialize;

use crate::components::Component;

/// Message flag bits
pub struct MessageFlags;

impl MessageFlags {
    /// Required for any message laid out with containers, sections and text displays
    pub const IS_COMPONENTS_V2: u64 = 1 << 15;
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct AllowedMentions {
    pub parse: Vec<String>,
}

/// Body of a message create/edit request
#[derive(Debug, Clone, Serialize)]
pub struct MessagePayload {
    pub flags: u64,
    pub components: Vec<Component>,
    pub allowed_mentions: AllowedMentions,
}

impl MessagePayload {
    /// A Components V2 message that renders mentions without pinging anyone
    pub fn components_v2(components: Vec<Component>) -> Self {
        Self {
            flags: MessageFlags::IS_COMPONENTS_V2,
            components,
            allowed_mentions: AllowedMentions::default(),
        }
    }
}

pub const CDN_BASE_URL: &str = "https://cdn.discordapp.com";

/// Client deep link to a guild's member settings page
pub fn member_settings_url(guild_id: u64) -> String {
    format!("discord://-/guilds/{guild_id}/settings/members")
}

pub fn avatar_url(user_id: u64, avatar_hash: &str, size: u16) -> String {
    let ext = if avatar_hash.starts_with("a_") {
        "gif"
    } else {
        "png"
    };
    format!("{CDN_BASE_URL}/avatars/{user_id}/{avatar_hash}.{ext}?size={size}")
}

/// Fallback avatar for users without a custom one
pub fn default_avatar_url(user_id: u64) -> String {
    let index = (user_id >> 22) % 6;
    format!("{CDN_BASE_URL}/embed/avatars/{index}.png")
}
