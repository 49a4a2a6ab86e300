use serde::Serialize;

use super::is_false;

/// A media reference; either a remote URL or `attachment://<filename>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnfurledMedia {
    pub url: String,
}

impl UnfurledMedia {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn attachment(filename: &str) -> Self {
        Self {
            url: format!("attachment://{filename}"),
        }
    }

    pub fn is_attachment(&self) -> bool {
        self.url.starts_with("attachment://")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Thumbnail {
    pub media: UnfurledMedia,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub spoiler: bool,
}

impl Thumbnail {
    pub fn new(media: UnfurledMedia) -> Self {
        Self {
            media,
            description: None,
            spoiler: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaGalleryItem {
    pub media: UnfurledMedia,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub spoiler: bool,
}

impl MediaGalleryItem {
    pub fn new(media: UnfurledMedia) -> Self {
        Self {
            media,
            description: None,
            spoiler: false,
        }
    }

    pub fn spoiler(mut self, spoiler: bool) -> Self {
        self.spoiler = spoiler;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MediaGallery {
    pub items: Vec<MediaGalleryItem>,
}

impl MediaGallery {
    pub fn new(items: Vec<MediaGalleryItem>) -> Self {
        Self { items }
    }
}

/// An uploaded file rendered inline; must point at an attachment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct File {
    pub file: UnfurledMedia,
    #[serde(skip_serializing_if = "is_false")]
    pub spoiler: bool,
}

impl File {
    pub fn attachment(filename: &str) -> Self {
        Self {
            file: UnfurledMedia::attachment(filename),
            spoiler: false,
        }
    }

    pub fn spoiler(mut self, spoiler: bool) -> Self {
        self.spoiler = spoiler;
        self
    }
}
