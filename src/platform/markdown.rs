use chrono::{DateTime, Utc};

/// Client-side rendering styles for `<t:unix:style>` tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampStyle {
    ShortTime,
    ShortDate,
    ShortDateTime,
    Relative,
}

impl TimestampStyle {
    fn code(self) -> char {
        match self {
            TimestampStyle::ShortTime => 't',
            TimestampStyle::ShortDate => 'd',
            TimestampStyle::ShortDateTime => 'f',
            TimestampStyle::Relative => 'R',
        }
    }
}

/// Timestamp token, rendered in the reader's own timezone
pub fn timestamp(at: DateTime<Utc>, style: TimestampStyle) -> String {
    format!("<t:{}:{}>", at.timestamp(), style.code())
}

pub fn mention_user(user_id: u64) -> String {
    format!("<@{user_id}>")
}

pub fn heading(level: usize, text: &str) -> String {
    format!("{} {text}", "#".repeat(level.clamp(1, 3)))
}

/// Small grey text line
pub fn subtext(text: &str) -> String {
    format!("-# {text}")
}

/// Quotes everything from here to the end of the message
pub fn block_quote(text: &str) -> String {
    format!(">>> {text}")
}

pub fn masked_link(label: &str, url: &str) -> String {
    format!("[{label}]({url})")
}

/// Cut `text` to at most `max_chars` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }

    // Walk to the byte index of the last char that still fits
    let end = text
        .char_indices()
        .nth(max_chars - 1)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());

    let mut out = text[..end].trim_end().to_string();
    out.push('…');
    out
}
