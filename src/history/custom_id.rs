//! Custom ids carried by the history view's interactive components.
//!
//! Each id round-trips through `Display` / `FromStr` so an interaction
//! reported back by the platform can be matched to the element that sent it.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

const PREFIX: &str = "history";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryCustomId {
    /// Edit button on a reprimand card
    Edit(Uuid),
    /// Action menu on a reprimand card
    Actions(Uuid),
    /// Kind filter menu
    Filter { user_id: u64 },
    /// Category filter menu
    Category { user_id: u64 },
    /// "Moderation actions..." menu for the member
    Moderate { user_id: u64 },
    /// Re-render the current page
    Refresh { user_id: u64 },
    /// Stop paging and disable the controls
    Close { user_id: u64 },
    /// Jump to a page
    Page { user_id: u64, page: usize },
    /// The "n / m" label between the page buttons
    PageIndicator { user_id: u64 },
}

impl fmt::Display for HistoryCustomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryCustomId::Edit(id) => write!(f, "{PREFIX}:edit:{}", id.simple()),
            HistoryCustomId::Actions(id) => write!(f, "{PREFIX}:actions:{}", id.simple()),
            HistoryCustomId::Filter { user_id } => write!(f, "{PREFIX}:filter:{user_id}"),
            HistoryCustomId::Category { user_id } => write!(f, "{PREFIX}:category:{user_id}"),
            HistoryCustomId::Moderate { user_id } => write!(f, "{PREFIX}:moderate:{user_id}"),
            HistoryCustomId::Refresh { user_id } => write!(f, "{PREFIX}:refresh:{user_id}"),
            HistoryCustomId::Close { user_id } => write!(f, "{PREFIX}:close:{user_id}"),
            HistoryCustomId::Page { user_id, page } => {
                write!(f, "{PREFIX}:page:{user_id}:{page}")
            }
            HistoryCustomId::PageIndicator { user_id } => {
                write!(f, "{PREFIX}:indicator:{user_id}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCustomIdError {
    #[error("custom id {0:?} does not belong to the history view")]
    ForeignPrefix(String),
    #[error("unknown history action in custom id {0:?}")]
    UnknownAction(String),
    #[error("malformed custom id {0:?}")]
    Malformed(String),
}

impl FromStr for HistoryCustomId {
    type Err = ParseCustomIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseCustomIdError::Malformed(s.to_string());

        let mut parts = s.split(':');
        if parts.next() != Some(PREFIX) {
            return Err(ParseCustomIdError::ForeignPrefix(s.to_string()));
        }
        let action = parts.next().ok_or_else(malformed)?;
        let args: Vec<&str> = parts.collect();

        let id = match (action, args.as_slice()) {
            ("edit", [uuid]) => HistoryCustomId::Edit(uuid.parse().map_err(|_| malformed())?),
            ("actions", [uuid]) => {
                HistoryCustomId::Actions(uuid.parse().map_err(|_| malformed())?)
            }
            ("filter", [user]) => HistoryCustomId::Filter {
                user_id: user.parse().map_err(|_| malformed())?,
            },
            ("category", [user]) => HistoryCustomId::Category {
                user_id: user.parse().map_err(|_| malformed())?,
            },
            ("moderate", [user]) => HistoryCustomId::Moderate {
                user_id: user.parse().map_err(|_| malformed())?,
            },
            ("refresh", [user]) => HistoryCustomId::Refresh {
                user_id: user.parse().map_err(|_| malformed())?,
            },
            ("close", [user]) => HistoryCustomId::Close {
                user_id: user.parse().map_err(|_| malformed())?,
            },
            ("page", [user, page]) => HistoryCustomId::Page {
                user_id: user.parse().map_err(|_| malformed())?,
                page: page.parse().map_err(|_| malformed())?,
            },
            ("indicator", [user]) => HistoryCustomId::PageIndicator {
                user_id: user.parse().map_err(|_| malformed())?,
            },
            (
                "edit" | "actions" | "filter" | "category" | "moderate" | "refresh" | "close"
                | "page" | "indicator",
                _,
            ) => return Err(malformed()),
            _ => return Err(ParseCustomIdError::UnknownAction(s.to_string())),
        };
        Ok(id)
    }
}

/// Option values of a reprimand card's action menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReprimandAction {
    Pardon,
    Delete,
}

impl ReprimandAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ReprimandAction::Pardon => "pardon",
            ReprimandAction::Delete => "delete",
        }
    }
}

impl FromStr for ReprimandAction {
    type Err = ParseCustomIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pardon" => Ok(ReprimandAction::Pardon),
            "delete" => Ok(ReprimandAction::Delete),
            other => Err(ParseCustomIdError::UnknownAction(other.to_string())),
        }
    }
}
