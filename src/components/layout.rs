use serde::{Serialize, Serializer};

use super::{is_false, Button, Component, ComponentType, Tagged, Thumbnail};

/// A block of markdown text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextDisplay {
    pub content: String,
}

impl TextDisplay {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// The single element attached to the side of a section
#[derive(Debug, Clone, PartialEq)]
pub enum Accessory {
    Button(Button),
    Thumbnail(Thumbnail),
}

impl Accessory {
    pub fn kind(&self) -> ComponentType {
        match self {
            Accessory::Button(_) => ComponentType::Button,
            Accessory::Thumbnail(_) => ComponentType::Thumbnail,
        }
    }
}

impl Serialize for Accessory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Accessory::Button(b) => Tagged::new(ComponentType::Button, b).serialize(serializer),
            Accessory::Thumbnail(t) => {
                Tagged::new(ComponentType::Thumbnail, t).serialize(serializer)
            }
        }
    }
}

impl From<Button> for Accessory {
    fn from(value: Button) -> Self {
        Accessory::Button(value)
    }
}

impl From<Thumbnail> for Accessory {
    fn from(value: Thumbnail) -> Self {
        Accessory::Thumbnail(value)
    }
}

/// Text displays paired with one accessory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    #[serde(serialize_with = "serialize_text_displays")]
    pub components: Vec<TextDisplay>,
    pub accessory: Accessory,
}

impl Section {
    pub fn new(accessory: impl Into<Accessory>) -> Self {
        Self {
            components: Vec::new(),
            accessory: accessory.into(),
        }
    }

    pub fn with_text(mut self, content: impl Into<String>) -> Self {
        self.components.push(TextDisplay::new(content));
        self
    }
}

fn serialize_text_displays<S: Serializer>(
    texts: &[TextDisplay],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(
        texts
            .iter()
            .map(|t| Tagged::new(ComponentType::TextDisplay, t)),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeparatorSpacing {
    #[default]
    Small,
    Large,
}

impl Serialize for SeparatorSpacing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(match self {
            SeparatorSpacing::Small => 1,
            SeparatorSpacing::Large => 2,
        })
    }
}

/// Vertical padding, optionally drawn as a line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Separator {
    pub divider: bool,
    pub spacing: SeparatorSpacing,
}

impl Separator {
    pub fn divider(spacing: SeparatorSpacing) -> Self {
        Self {
            divider: true,
            spacing,
        }
    }
}

/// A boxed group of components with an optional accent bar
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Container {
    pub components: Vec<Component>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<u32>,
    #[serde(skip_serializing_if = "is_false")]
    pub spoiler: bool,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_component(mut self, component: impl Into<Component>) -> Self {
        self.components.push(component.into());
        self
    }

    pub fn with_accent_color(mut self, color: u32) -> Self {
        self.accent_color = Some(color);
        self
    }

    pub fn push(&mut self, component: impl Into<Component>) {
        self.components.push(component.into());
    }
}

/// A horizontal row of buttons, or a single select menu
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ActionRow {
    pub components: Vec<Component>,
}

impl ActionRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_component(mut self, component: impl Into<Component>) -> Self {
        self.components.push(component.into());
        self
    }
}
