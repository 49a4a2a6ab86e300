pub mod loader;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::platform::{discord, UserRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReprimandKind {
    Warning,
    Notice,
    Ban,
    Kick,
    Note,
    Mute,
    HardMute,
    Censored,
    Filtered,
    Role,
}

impl ReprimandKind {
    pub const ALL: [ReprimandKind; 10] = [
        ReprimandKind::Warning,
        ReprimandKind::Notice,
        ReprimandKind::Ban,
        ReprimandKind::Kick,
        ReprimandKind::Note,
        ReprimandKind::Mute,
        ReprimandKind::HardMute,
        ReprimandKind::Censored,
        ReprimandKind::Filtered,
        ReprimandKind::Role,
    ];

    /// Kinds summarised on the member profile card
    pub const TALLIED: [ReprimandKind; 7] = [
        ReprimandKind::Warning,
        ReprimandKind::Notice,
        ReprimandKind::Ban,
        ReprimandKind::Kick,
        ReprimandKind::Note,
        ReprimandKind::Mute,
        ReprimandKind::Censored,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReprimandKind::Warning => "warning",
            ReprimandKind::Notice => "notice",
            ReprimandKind::Ban => "ban",
            ReprimandKind::Kick => "kick",
            ReprimandKind::Note => "note",
            ReprimandKind::Mute => "mute",
            ReprimandKind::HardMute => "hard_mute",
            ReprimandKind::Censored => "censored",
            ReprimandKind::Filtered => "filtered",
            ReprimandKind::Role => "role",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ReprimandKind::Warning => "Warning",
            ReprimandKind::Notice => "Notice",
            ReprimandKind::Ban => "Ban",
            ReprimandKind::Kick => "Kick",
            ReprimandKind::Note => "Note",
            ReprimandKind::Mute => "Mute",
            ReprimandKind::HardMute => "Hard Mute",
            ReprimandKind::Censored => "Censored",
            ReprimandKind::Filtered => "Filtered",
            ReprimandKind::Role => "Role",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            ReprimandKind::Warning => "⚠️",
            ReprimandKind::Notice => "📢",
            ReprimandKind::Ban => "🔨",
            ReprimandKind::Kick => "👞",
            ReprimandKind::Note => "📝",
            ReprimandKind::Mute => "🔇",
            ReprimandKind::HardMute => "🔕",
            ReprimandKind::Censored => "🚫",
            ReprimandKind::Filtered => "🧹",
            ReprimandKind::Role => "🎭",
        }
    }

    pub fn accent_color(self) -> u32 {
        match self {
            ReprimandKind::Warning => 0xFFA500,
            ReprimandKind::Notice => 0x3498DB,
            ReprimandKind::Ban => 0x2C3E50,
            ReprimandKind::Kick => 0xFF6347,
            ReprimandKind::Note => 0x95A5A6,
            ReprimandKind::Mute => 0xDC143C,
            ReprimandKind::HardMute => 0x8B0000,
            ReprimandKind::Censored => 0x9B59B6,
            ReprimandKind::Filtered => 0xE67E22,
            ReprimandKind::Role => 0x1ABC9C,
        }
    }

    /// Kinds that lapse on their own and can therefore be pardoned early
    pub fn is_expirable(self) -> bool {
        !matches!(self, ReprimandKind::Kick | ReprimandKind::Note)
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl std::fmt::Display for ReprimandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

impl std::str::FromStr for ReprimandKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        ReprimandKind::ALL
            .into_iter()
            .find(|k| k.as_str() == normalized)
            .ok_or_else(|| anyhow::anyhow!("Unknown reprimand kind: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReprimandStatus {
    #[default]
    Added,
    Updated,
    Expired,
    Pardoned,
    Deleted,
    Unknown,
}

impl ReprimandStatus {
    /// Whether a reprimand in this status still counts against the member
    pub fn is_counted(self) -> bool {
        matches!(self, ReprimandStatus::Added | ReprimandStatus::Updated)
    }

    pub fn title(self) -> &'static str {
        match self {
            ReprimandStatus::Added => "Added",
            ReprimandStatus::Updated => "Updated",
            ReprimandStatus::Expired => "Expired",
            ReprimandStatus::Pardoned => "Pardoned",
            ReprimandStatus::Deleted => "Deleted",
            ReprimandStatus::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for ReprimandStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

const MEDIA_EXTENSIONS: [&str; 9] = ["png", "jpg", "jpeg", "gif", "webp", "avif", "mp4", "webm", "mov"];

/// Evidence attached to a reprimand. `attachment://<name>` points at a file
/// uploaded with the message; anything else is a remote URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Attachment {
    pub url: String,
    #[serde(default)]
    pub spoiler: bool,
}

impl Attachment {
    /// Last path segment, without query string or fragment
    pub fn filename(&self) -> &str {
        let path = self.url.split(['?', '#']).next().unwrap_or_default();
        path.rsplit('/').next().unwrap_or(path)
    }

    /// Images and videos the client can show inline in a gallery
    pub fn is_media(&self) -> bool {
        self.filename()
            .rsplit_once('.')
            .is_some_and(|(_, ext)| MEDIA_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
    }

    pub fn is_upload(&self) -> bool {
        self.url.starts_with("attachment://")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Reprimand {
    pub id: Uuid,
    pub kind: ReprimandKind,
    #[serde(default)]
    pub status: ReprimandStatus,
    /// `None` when the reprimand was issued automatically
    #[serde(default)]
    pub moderator_id: Option<u64>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub reason: Option<String>,
    /// Moderator-only follow-up notes
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Warning weight; ignored for other kinds
    #[serde(default = "default_amount")]
    pub amount: u32,
    #[serde(default)]
    pub category: Option<String>,
    /// Offending content captured at the time, e.g. a censored message
    #[serde(default)]
    pub context: Option<String>,
}

fn default_amount() -> u32 {
    1
}

impl Reprimand {
    /// First block of the id, enough to tell entries apart on screen
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }

    pub fn is_pardonable(&self) -> bool {
        self.kind.is_expirable() && self.status.is_counted()
    }

    pub fn accent_color(&self) -> u32 {
        match self.status {
            ReprimandStatus::Added => self.kind.accent_color(),
            ReprimandStatus::Updated => 0x3498DB,
            ReprimandStatus::Expired => 0x95A5A6,
            ReprimandStatus::Pardoned => 0x1ABC9C,
            ReprimandStatus::Deleted => 0xE74C3C,
            ReprimandStatus::Unknown => 0x7F8C8D,
        }
    }

    fn weight(&self) -> u64 {
        match self.kind {
            ReprimandKind::Warning => u64::from(self.amount),
            _ => 1,
        }
    }

    fn in_category(&self, category: Option<&str>) -> bool {
        match category {
            None => true,
            Some(name) => self
                .category
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(name)),
        }
    }
}

/// The member whose history is being shown
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Member {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub avatar_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
}

impl Member {
    pub fn avatar_url(&self, size: u16) -> String {
        match &self.avatar_hash {
            Some(hash) => discord::avatar_url(self.id, hash, size),
            None => discord::default_avatar_url(self.id),
        }
    }

    /// Members who left the server have no join date
    pub fn in_guild(&self) -> bool {
        self.joined_at.is_some()
    }

    pub fn user_ref(&self) -> UserRef {
        UserRef {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// A set of reprimand kinds. Empty and full both mean "show everything".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(from = "Vec<ReprimandKind>", into = "Vec<ReprimandKind>")]
pub struct KindFilter(u16);

impl KindFilter {
    pub fn all() -> Self {
        ReprimandKind::ALL.into_iter().collect()
    }

    pub fn insert(&mut self, kind: ReprimandKind) {
        self.0 |= kind.bit();
    }

    pub fn is_everything(&self) -> bool {
        self.0 == 0 || *self == Self::all()
    }

    pub fn matches(&self, kind: ReprimandKind) -> bool {
        self.is_everything() || self.0 & kind.bit() != 0
    }

    /// Whether `kind` was picked explicitly (as opposed to implied by "everything")
    pub fn contains(&self, kind: ReprimandKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn kinds(&self) -> Vec<ReprimandKind> {
        ReprimandKind::ALL
            .into_iter()
            .filter(|k| self.contains(*k))
            .collect()
    }
}

impl FromIterator<ReprimandKind> for KindFilter {
    fn from_iter<I: IntoIterator<Item = ReprimandKind>>(iter: I) -> Self {
        let mut filter = KindFilter::default();
        for kind in iter {
            filter.insert(kind);
        }
        filter
    }
}

impl From<Vec<ReprimandKind>> for KindFilter {
    fn from(kinds: Vec<ReprimandKind>) -> Self {
        kinds.into_iter().collect()
    }
}

impl From<KindFilter> for Vec<ReprimandKind> {
    fn from(filter: KindFilter) -> Self {
        filter.kinds()
    }
}

/// Active and lifetime totals for one kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub active: u64,
    pub total: u64,
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.active, self.total)
    }
}

/// Count `kind` reprimands in `category` (`None` = every category).
/// Deleted reprimands never count; warnings count by their amount.
pub fn tally(reprimands: &[Reprimand], kind: ReprimandKind, category: Option<&str>) -> Tally {
    reprimands
        .iter()
        .filter(|r| r.kind == kind)
        .filter(|r| r.status != ReprimandStatus::Deleted)
        .filter(|r| r.in_category(category))
        .fold(Tally::default(), |mut acc, r| {
            acc.total += r.weight();
            if r.status.is_counted() {
                acc.active += r.weight();
            }
            acc
        })
}

/// Reprimands to list for a filter, newest first
pub fn select<'a>(
    reprimands: &'a [Reprimand],
    filter: &KindFilter,
    category: Option<&str>,
) -> Vec<&'a Reprimand> {
    let mut selected: Vec<&Reprimand> = reprimands
        .iter()
        .filter(|r| r.status != ReprimandStatus::Deleted)
        .filter(|r| filter.matches(r.kind))
        .filter(|r| r.in_category(category))
        .collect();
    selected.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    selected
}

/// Input document for one history render
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryFile {
    pub guild_id: u64,
    pub member: Member,
    pub requested_by: UserRef,
    /// The server's moderation categories, in display order
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub reprimands: Vec<Reprimand>,
}
