pub mod discord;
pub mod markdown;

/// A user as shown in rendered text
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct UserRef {
    /// Platform-specific user ID
    pub id: u64,
    /// Account name without discriminator (e.g., "hime.san")
    pub username: String,
}

impl UserRef {
    pub fn mention(&self) -> String {
        markdown::mention_user(self.id)
    }
}
