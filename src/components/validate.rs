//! Platform limit checks for a Components V2 message.
//!
//! The platform rejects a whole message when any one limit is exceeded, so
//! every violation is collected instead of stopping at the first.

use std::collections::HashSet;

use super::{
    Accessory, ActionRow, Button, ButtonStyle, Component, ComponentType, Container, MediaGallery,
    Section, SelectMenu, TextDisplay, Thumbnail,
};

pub const MAX_TOTAL_COMPONENTS: usize = 40;
pub const MAX_TOTAL_TEXT_LENGTH: usize = 4000;
pub const MAX_ACTION_ROWS: usize = 5;
pub const MAX_ACTION_ROW_BUTTONS: usize = 5;
pub const MAX_SECTION_TEXT_DISPLAYS: usize = 3;
pub const MAX_BUTTON_LABEL_LENGTH: usize = 80;
pub const MAX_CUSTOM_ID_LENGTH: usize = 100;
pub const MAX_PLACEHOLDER_LENGTH: usize = 150;
pub const MAX_SELECT_OPTIONS: usize = 25;
pub const MAX_OPTION_TEXT_LENGTH: usize = 100;
pub const MAX_THUMBNAIL_DESCRIPTION_LENGTH: usize = 1024;
pub const MAX_GALLERY_ITEMS: usize = 10;
pub const MAX_GALLERY_DESCRIPTION_LENGTH: usize = 256;

/// One broken limit, located by a slash path from the message root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub problem: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.problem)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{} component limit violation(s):\n{}", .violations.len(), join_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| format!("  - {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check a top-level component list against the platform's limits
pub fn validate(components: &[Component]) -> Result<(), ValidationError> {
    let mut validator = Validator::default();
    validator.visit_all(components, "root", Parent::Root);
    validator.finish()
}

/// Count every component in the tree, nested ones included
pub fn count_components(components: &[Component]) -> usize {
    components.iter().map(count_one).sum()
}

fn count_one(component: &Component) -> usize {
    match component {
        Component::Container(c) => 1 + count_components(&c.components),
        Component::ActionRow(r) => 1 + count_components(&r.components),
        Component::Section(s) => 1 + s.components.len() + 1,
        _ => 1,
    }
}

/// Action rows at any depth
pub fn count_action_rows(components: &[Component]) -> usize {
    components
        .iter()
        .map(|component| match component {
            Component::ActionRow(_) => 1,
            Component::Container(c) => count_action_rows(&c.components),
            _ => 0,
        })
        .sum()
}

/// Sum of characters across every text display in the tree
pub fn text_length(components: &[Component]) -> usize {
    components
        .iter()
        .map(|component| match component {
            Component::TextDisplay(t) => t.content.chars().count(),
            Component::Container(c) => text_length(&c.components),
            Component::Section(s) => s.components.iter().map(|t| t.content.chars().count()).sum(),
            _ => 0,
        })
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parent {
    Root,
    Container,
    ActionRow,
}

#[derive(Default)]
struct Validator {
    violations: Vec<Violation>,
    total_components: usize,
    total_text: usize,
    action_rows: usize,
    custom_ids: HashSet<String>,
}

impl Validator {
    fn finish(self) -> Result<(), ValidationError> {
        let mut violations = self.violations;

        if self.total_components > MAX_TOTAL_COMPONENTS {
            violations.push(Violation {
                path: "root".to_string(),
                problem: format!(
                    "too many components: {} (max {MAX_TOTAL_COMPONENTS})",
                    self.total_components
                ),
            });
        }
        if self.total_text > MAX_TOTAL_TEXT_LENGTH {
            violations.push(Violation {
                path: "root".to_string(),
                problem: format!(
                    "total text too long: {} (max {MAX_TOTAL_TEXT_LENGTH})",
                    self.total_text
                ),
            });
        }
        if self.action_rows > MAX_ACTION_ROWS {
            violations.push(Violation {
                path: "root".to_string(),
                problem: format!(
                    "too many action rows: {} (max {MAX_ACTION_ROWS})",
                    self.action_rows
                ),
            });
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }

    fn fail(&mut self, path: &str, problem: impl Into<String>) {
        self.violations.push(Violation {
            path: path.to_string(),
            problem: problem.into(),
        });
    }

    fn visit_all(&mut self, components: &[Component], path: &str, parent: Parent) {
        for (i, component) in components.iter().enumerate() {
            let child_path = format!("{path}/{}[{i}]", component.kind());
            self.visit(component, &child_path, parent);
        }
    }

    fn visit(&mut self, component: &Component, path: &str, parent: Parent) {
        self.total_components += 1;
        self.check_placement(component.kind(), path, parent);

        match component {
            Component::Container(c) => self.visit_container(c, path),
            Component::ActionRow(r) => self.visit_action_row(r, path),
            Component::Section(s) => self.visit_section(s, path),
            Component::TextDisplay(t) => self.visit_text(t, path),
            Component::Button(b) => self.visit_button(b, path),
            Component::StringSelect(s) => self.visit_select(s, path),
            Component::Thumbnail(t) => self.visit_thumbnail(t, path),
            Component::MediaGallery(g) => self.visit_gallery(g, path),
            Component::File(f) => {
                if !f.file.is_attachment() {
                    self.fail(
                        path,
                        format!("file URL must start with attachment:// (got {})", f.file.url),
                    );
                }
            }
            Component::Separator(_) => {}
        }

        if let Some(custom_id) = component.custom_id() {
            self.visit_custom_id(custom_id, path);
        }
    }

    fn check_placement(&mut self, kind: ComponentType, path: &str, parent: Parent) {
        let allowed = match parent {
            Parent::Root => !matches!(
                kind,
                ComponentType::Button | ComponentType::StringSelect | ComponentType::Thumbnail
            ),
            Parent::Container => !matches!(
                kind,
                ComponentType::Container
                    | ComponentType::Button
                    | ComponentType::StringSelect
                    | ComponentType::Thumbnail
            ),
            Parent::ActionRow => kind.is_interactive(),
        };
        if !allowed {
            let place = match parent {
                Parent::Root => "the top level",
                Parent::Container => "a container",
                Parent::ActionRow => "an action row",
            };
            self.fail(path, format!("{kind} is not allowed in {place}"));
        }
    }

    fn visit_container(&mut self, container: &Container, path: &str) {
        if container.components.is_empty() {
            self.fail(path, "container is empty");
        }
        if let Some(color) = container.accent_color {
            if color > 0xFF_FF_FF {
                self.fail(path, format!("accent color {color:#x} is not a 24-bit RGB value"));
            }
        }
        self.visit_all(&container.components, path, Parent::Container);
    }

    fn visit_action_row(&mut self, row: &ActionRow, path: &str) {
        self.action_rows += 1;

        let selects = row
            .components
            .iter()
            .filter(|c| c.kind() == ComponentType::StringSelect)
            .count();
        let buttons = row
            .components
            .iter()
            .filter(|c| c.kind() == ComponentType::Button)
            .count();

        if row.components.is_empty() {
            self.fail(path, "action row is empty");
        } else if selects > 0 && row.components.len() > 1 {
            self.fail(path, "a select menu must be alone in its action row");
        } else if buttons > MAX_ACTION_ROW_BUTTONS {
            self.fail(
                path,
                format!("too many buttons: {buttons} (max {MAX_ACTION_ROW_BUTTONS})"),
            );
        }

        self.visit_all(&row.components, path, Parent::ActionRow);
    }

    fn visit_section(&mut self, section: &Section, path: &str) {
        let count = section.components.len();
        if count == 0 || count > MAX_SECTION_TEXT_DISPLAYS {
            self.fail(
                path,
                format!("section needs 1 to {MAX_SECTION_TEXT_DISPLAYS} text displays (got {count})"),
            );
        }
        for (i, text) in section.components.iter().enumerate() {
            self.total_components += 1;
            self.visit_text(text, &format!("{path}/TextDisplay[{i}]"));
        }

        self.total_components += 1;
        let accessory_path = format!("{path}/Accessory/{}", section.accessory.kind());
        match &section.accessory {
            Accessory::Button(b) => {
                self.visit_button(b, &accessory_path);
                if let Some(custom_id) = &b.custom_id {
                    self.visit_custom_id(custom_id, &accessory_path);
                }
            }
            Accessory::Thumbnail(t) => self.visit_thumbnail(t, &accessory_path),
        }
    }

    fn visit_text(&mut self, text: &TextDisplay, path: &str) {
        let length = text.content.chars().count();
        self.total_text += length;
        if text.content.trim().is_empty() {
            self.fail(path, "text display content is empty");
        }
    }

    fn visit_custom_id(&mut self, custom_id: &str, path: &str) {
        let length = custom_id.chars().count();
        if custom_id.trim().is_empty() {
            self.fail(path, "custom id is empty");
        } else if length > MAX_CUSTOM_ID_LENGTH {
            self.fail(
                path,
                format!("custom id too long: {length} (max {MAX_CUSTOM_ID_LENGTH})"),
            );
        }
        if !self.custom_ids.insert(custom_id.to_string()) {
            self.fail(path, format!("duplicate custom id {custom_id:?}"));
        }
    }

    fn visit_button(&mut self, button: &Button, path: &str) {
        if let Some(label) = &button.label {
            let length = label.chars().count();
            if length > MAX_BUTTON_LABEL_LENGTH {
                self.fail(
                    path,
                    format!("button label too long: {length} (max {MAX_BUTTON_LABEL_LENGTH})"),
                );
            }
        }
        if button.label.is_none() && button.emoji.is_none() {
            self.fail(path, "button needs a label or an emoji");
        }

        if button.style == ButtonStyle::Link {
            if button.url.as_deref().map_or(true, |u| u.trim().is_empty()) {
                self.fail(path, "link button URL is missing");
            }
            if button.custom_id.is_some() {
                self.fail(path, "link button cannot carry a custom id");
            }
            return;
        }

        if button.url.is_some() {
            self.fail(path, "only link buttons may carry a URL");
        }
        if button.custom_id.is_none() {
            self.fail(path, "non-link button missing custom id");
        }
    }

    fn visit_select(&mut self, menu: &SelectMenu, path: &str) {
        if let Some(placeholder) = &menu.placeholder {
            let length = placeholder.chars().count();
            if length > MAX_PLACEHOLDER_LENGTH {
                self.fail(
                    path,
                    format!("placeholder too long: {length} (max {MAX_PLACEHOLDER_LENGTH})"),
                );
            }
        }

        let options = menu.options.len();
        if options == 0 || options > MAX_SELECT_OPTIONS {
            self.fail(
                path,
                format!("select menu needs 1 to {MAX_SELECT_OPTIONS} options (got {options})"),
            );
        }

        let (min, max) = menu.value_bounds();
        if max < 1 {
            self.fail(path, "max_values must be at least 1");
        }
        if min > max {
            self.fail(path, format!("min_values {min} exceeds max_values {max}"));
        }
        if usize::from(max) > options {
            self.fail(
                path,
                format!("max_values {max} exceeds the {options} available options"),
            );
        }

        let mut values = HashSet::new();
        for (i, option) in menu.options.iter().enumerate() {
            let option_path = format!("{path}/Option[{i}]");
            if option.label.is_empty() || option.label.chars().count() > MAX_OPTION_TEXT_LENGTH {
                self.fail(
                    &option_path,
                    format!("option label must be 1 to {MAX_OPTION_TEXT_LENGTH} characters"),
                );
            }
            if option.value.is_empty() || option.value.chars().count() > MAX_OPTION_TEXT_LENGTH {
                self.fail(
                    &option_path,
                    format!("option value must be 1 to {MAX_OPTION_TEXT_LENGTH} characters"),
                );
            }
            if option
                .description
                .as_ref()
                .is_some_and(|d| d.chars().count() > MAX_OPTION_TEXT_LENGTH)
            {
                self.fail(
                    &option_path,
                    format!("option description too long (max {MAX_OPTION_TEXT_LENGTH})"),
                );
            }
            if !values.insert(option.value.as_str()) {
                self.fail(&option_path, format!("duplicate option value {:?}", option.value));
            }
        }
    }

    fn visit_thumbnail(&mut self, thumbnail: &Thumbnail, path: &str) {
        if thumbnail.media.url.trim().is_empty() {
            self.fail(path, "thumbnail media URL is empty");
        }
        if let Some(description) = &thumbnail.description {
            let length = description.chars().count();
            if length > MAX_THUMBNAIL_DESCRIPTION_LENGTH {
                self.fail(
                    path,
                    format!(
                        "thumbnail description too long: {length} (max {MAX_THUMBNAIL_DESCRIPTION_LENGTH})"
                    ),
                );
            }
        }
    }

    fn visit_gallery(&mut self, gallery: &MediaGallery, path: &str) {
        let count = gallery.items.len();
        if count == 0 || count > MAX_GALLERY_ITEMS {
            self.fail(
                path,
                format!("media gallery needs 1 to {MAX_GALLERY_ITEMS} items (got {count})"),
            );
        }
        for (i, item) in gallery.items.iter().enumerate() {
            let item_path = format!("{path}[{i}]");
            if item.media.url.trim().is_empty() {
                self.fail(&item_path, "media URL is empty");
            }
            if let Some(description) = &item.description {
                let length = description.chars().count();
                if length > MAX_GALLERY_DESCRIPTION_LENGTH {
                    self.fail(
                        &item_path,
                        format!(
                            "media description too long: {length} (max {MAX_GALLERY_DESCRIPTION_LENGTH})"
                        ),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{
        Emoji, File, MediaGalleryItem, SelectOption, Separator, SeparatorSpacing, UnfurledMedia,
    };

    fn edit_button(id: &str) -> Button {
        Button::new(ButtonStyle::Secondary, id).with_emoji(Emoji::unicode("✏️"))
    }

    fn problems(components: &[Component]) -> Vec<String> {
        match validate(components) {
            Ok(()) => Vec::new(),
            Err(e) => e.violations.into_iter().map(|v| v.to_string()).collect(),
        }
    }

    #[test]
    fn test_valid_tree_passes() {
        let tree: Vec<Component> = vec![
            Section::new(edit_button("a")).with_text("hello").into(),
            Container::new()
                .with_component(TextDisplay::new("inside"))
                .with_component(Separator::divider(SeparatorSpacing::Small))
                .with_component(ActionRow::new().with_component(
                    SelectMenu::new("b").with_option(SelectOption::new("One", "1")),
                ))
                .into(),
        ];
        assert!(validate(&tree).is_ok());
        assert_eq!(count_components(&tree), 3 + 1 + 1 + 1 + 2);
        assert_eq!(text_length(&tree), "hello".len() + "inside".len());
    }

    #[test]
    fn test_bare_button_at_top_level_rejected() {
        let tree: Vec<Component> = vec![edit_button("a").into()];
        let found = problems(&tree);
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("root/Button[0]"));
        assert!(found[0].contains("not allowed in the top level"));
    }

    #[test]
    fn test_nested_container_rejected() {
        let tree: Vec<Component> = vec![Container::new()
            .with_component(Container::new().with_component(TextDisplay::new("x")))
            .into()];
        let found = problems(&tree);
        assert!(found
            .iter()
            .any(|p| p.contains("root/Container[0]/Container[0]") && p.contains("a container")));
    }

    #[test]
    fn test_duplicate_custom_ids_rejected() {
        let tree: Vec<Component> = vec![
            Section::new(edit_button("same")).with_text("one").into(),
            Section::new(edit_button("same")).with_text("two").into(),
        ];
        let found = problems(&tree);
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("duplicate custom id"));
    }

    #[test]
    fn test_duplicate_ids_across_accessory_and_select() {
        let menu = SelectMenu::new("history:edit:1").with_option(SelectOption::new("A", "a"));
        let tree: Vec<Component> = vec![
            Section::new(edit_button("history:edit:1")).with_text("one").into(),
            ActionRow::new().with_component(menu).into(),
        ];
        let found = problems(&tree);
        assert_eq!(found.len(), 1);
        assert!(found[0].starts_with("root/ActionRow[1]/StringSelect[0]"));
        assert!(found[0].contains("duplicate custom id"));
    }

    #[test]
    fn test_select_menu_bounds() {
        let menu = SelectMenu::new("filter")
            .with_values(3, 2)
            .with_option(SelectOption::new("All", "all"));
        let tree: Vec<Component> = vec![ActionRow::new().with_component(menu).into()];
        let found = problems(&tree);
        assert!(found.iter().any(|p| p.contains("min_values 3 exceeds max_values 2")));
        assert!(found.iter().any(|p| p.contains("exceeds the 1 available options")));
    }

    #[test]
    fn test_select_must_be_alone_in_row() {
        let row = ActionRow::new()
            .with_component(SelectMenu::new("s").with_option(SelectOption::new("A", "a")))
            .with_component(edit_button("b"));
        let found = problems(&[row.into()]);
        assert!(found.iter().any(|p| p.contains("must be alone")));
    }

    #[test]
    fn test_too_many_components() {
        let tree: Vec<Component> = (0..41).map(|i| TextDisplay::new(format!("{i}")).into()).collect();
        let found = problems(&tree);
        assert_eq!(found, vec!["root: too many components: 41 (max 40)".to_string()]);
    }

    #[test]
    fn test_total_text_limit() {
        let tree: Vec<Component> = vec![
            TextDisplay::new("r".repeat(2500)).into(),
            TextDisplay::new("r".repeat(2500)).into(),
        ];
        let found = problems(&tree);
        assert_eq!(found, vec!["root: total text too long: 5000 (max 4000)".to_string()]);
    }

    #[test]
    fn test_link_button_rules() {
        let mut broken = Button::link("").with_label("Open");
        broken.custom_id = Some("x".to_string());
        let tree: Vec<Component> = vec![Section::new(broken).with_text("t").into()];
        let found = problems(&tree);
        assert!(found.iter().any(|p| p.contains("URL is missing")));
        assert!(found.iter().any(|p| p.contains("cannot carry a custom id")));
    }

    #[test]
    fn test_gallery_and_file_limits() {
        let items = (0..11)
            .map(|i| MediaGalleryItem::new(UnfurledMedia::new(format!("https://m/{i}.png"))))
            .collect();
        let mut file = File::attachment("a.png");
        file.file = UnfurledMedia::new("https://not-an-attachment/a.png");
        let tree: Vec<Component> = vec![MediaGallery::new(items).into(), file.into()];
        let found = problems(&tree);
        assert!(found.iter().any(|p| p.contains("1 to 10 items (got 11)")));
        assert!(found.iter().any(|p| p.contains("attachment://")));
    }

    #[test]
    fn test_error_display_lists_every_violation() {
        let tree: Vec<Component> = vec![edit_button("a").into(), TextDisplay::new(" ").into()];
        let err = validate(&tree).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("2 component limit violation(s):"));
        assert!(message.contains("  - root/Button[0]"));
        assert!(message.contains("  - root/TextDisplay[1]: text display content is empty"));
    }
}
