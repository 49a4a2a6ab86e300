//! Components V2 message layout.
//!
//! Every value here serializes to the platform's wire JSON. Concrete
//! components carry no `type` field of their own; it is attached by
//! [`Component`] (and by [`Accessory`] / section children) at serialization
//! time, so a tree can only be built from the shapes the platform accepts.

pub mod interactive;
pub mod layout;
pub mod media;
pub mod validate;

use serde::{Serialize, Serializer};

pub use interactive::{Button, ButtonStyle, Emoji, SelectMenu, SelectOption};
pub use layout::{Accessory, ActionRow, Container, Section, Separator, SeparatorSpacing, TextDisplay};
pub use media::{File, MediaGallery, MediaGalleryItem, Thumbnail, UnfurledMedia};

/// Wire type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    ActionRow,
    Button,
    StringSelect,
    Section,
    TextDisplay,
    Thumbnail,
    MediaGallery,
    File,
    Separator,
    Container,
}

impl ComponentType {
    pub fn code(self) -> u8 {
        match self {
            ComponentType::ActionRow => 1,
            ComponentType::Button => 2,
            ComponentType::StringSelect => 3,
            ComponentType::Section => 9,
            ComponentType::TextDisplay => 10,
            ComponentType::Thumbnail => 11,
            ComponentType::MediaGallery => 12,
            ComponentType::File => 13,
            ComponentType::Separator => 14,
            ComponentType::Container => 17,
        }
    }

    /// Whether a user can activate this component
    pub fn is_interactive(self) -> bool {
        matches!(self, ComponentType::Button | ComponentType::StringSelect)
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ComponentType::ActionRow => "ActionRow",
            ComponentType::Button => "Button",
            ComponentType::StringSelect => "StringSelect",
            ComponentType::Section => "Section",
            ComponentType::TextDisplay => "TextDisplay",
            ComponentType::Thumbnail => "Thumbnail",
            ComponentType::MediaGallery => "MediaGallery",
            ComponentType::File => "File",
            ComponentType::Separator => "Separator",
            ComponentType::Container => "Container",
        };
        f.write_str(name)
    }
}

impl Serialize for ComponentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Any component that may appear in a message tree
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    ActionRow(ActionRow),
    Button(Button),
    StringSelect(SelectMenu),
    Section(Section),
    TextDisplay(TextDisplay),
    Thumbnail(Thumbnail),
    MediaGallery(MediaGallery),
    File(File),
    Separator(Separator),
    Container(Container),
}

impl Component {
    pub fn kind(&self) -> ComponentType {
        match self {
            Component::ActionRow(_) => ComponentType::ActionRow,
            Component::Button(_) => ComponentType::Button,
            Component::StringSelect(_) => ComponentType::StringSelect,
            Component::Section(_) => ComponentType::Section,
            Component::TextDisplay(_) => ComponentType::TextDisplay,
            Component::Thumbnail(_) => ComponentType::Thumbnail,
            Component::MediaGallery(_) => ComponentType::MediaGallery,
            Component::File(_) => ComponentType::File,
            Component::Separator(_) => ComponentType::Separator,
            Component::Container(_) => ComponentType::Container,
        }
    }

    /// Custom id of an interactive component, if it has one
    pub fn custom_id(&self) -> Option<&str> {
        match self {
            Component::Button(b) => b.custom_id.as_deref(),
            Component::StringSelect(s) => Some(&s.custom_id),
            _ => None,
        }
    }
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = self.kind();
        match self {
            Component::ActionRow(c) => Tagged::new(kind, c).serialize(serializer),
            Component::Button(c) => Tagged::new(kind, c).serialize(serializer),
            Component::StringSelect(c) => Tagged::new(kind, c).serialize(serializer),
            Component::Section(c) => Tagged::new(kind, c).serialize(serializer),
            Component::TextDisplay(c) => Tagged::new(kind, c).serialize(serializer),
            Component::Thumbnail(c) => Tagged::new(kind, c).serialize(serializer),
            Component::MediaGallery(c) => Tagged::new(kind, c).serialize(serializer),
            Component::File(c) => Tagged::new(kind, c).serialize(serializer),
            Component::Separator(c) => Tagged::new(kind, c).serialize(serializer),
            Component::Container(c) => Tagged::new(kind, c).serialize(serializer),
        }
    }
}

macro_rules! impl_from_component {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Component {
                fn from(value: $ty) -> Self {
                    Component::$variant(value)
                }
            }
        )*
    };
}

impl_from_component! {
    ActionRow => ActionRow,
    Button => Button,
    SelectMenu => StringSelect,
    Section => Section,
    TextDisplay => TextDisplay,
    Thumbnail => Thumbnail,
    MediaGallery => MediaGallery,
    File => File,
    Separator => Separator,
    Container => Container,
}

/// A component body with its `type` code prepended
#[derive(Serialize)]
pub(crate) struct Tagged<'a, T: Serialize> {
    #[serde(rename = "type")]
    kind: ComponentType,
    #[serde(flatten)]
    inner: &'a T,
}

impl<'a, T: Serialize> Tagged<'a, T> {
    pub(crate) fn new(kind: ComponentType, inner: &'a T) -> Self {
        Self { kind, inner }
    }
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}
