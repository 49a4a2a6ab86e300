//! The moderation history message.
//!
//! Layout, top to bottom:
//! 1. header section with a "View Member" link
//! 2. profile card (first page only) with per-kind tallies
//! 3. one card per reprimand, each with its own edit button and action menu
//! 4. kind filter, category filter (when the server has categories) and the
//!    "Moderation actions..." menu
//! 5. page buttons with Refresh and Close, then the "Requested by" footer
//!
//! Every select sits in its own action row, and the platform counts rows at
//! any depth, so the fixed rows leave room for one or two cards per page.

pub mod custom_id;
pub mod example;

use std::ops::Range;

use anyhow::{Context, Result};
use tracing::debug;

use crate::components::validate::{
    self, count_action_rows, count_components, text_length, MAX_ACTION_ROWS,
    MAX_GALLERY_ITEMS, MAX_OPTION_TEXT_LENGTH, MAX_SELECT_OPTIONS, MAX_TOTAL_COMPONENTS,
    MAX_TOTAL_TEXT_LENGTH,
};
use crate::components::{
    ActionRow, Button, ButtonStyle, Component, Container, Emoji, File, MediaGallery,
    MediaGalleryItem, Section, SelectMenu, SelectOption, Separator, SeparatorSpacing, TextDisplay, Thumbnail,
    UnfurledMedia,
};
use crate::config::RenderConfig;
use crate::moderation::{
    self, Attachment, HistoryFile, KindFilter, Reprimand, ReprimandKind, ReprimandStatus,
};
use crate::platform::discord::{self, MessagePayload};
use crate::platform::markdown::{self, TimestampStyle};

use custom_id::{HistoryCustomId, ReprimandAction};

const EMPTY_HISTORY_TEXT: &str = "*No reprimands found matching your criteria.*";

/// Uploaded non-media files shown inline on one card
const MAX_CARD_FILES: usize = 5;

/// Select option value for "every category"; never used as a category name
const ALL_CATEGORIES: &str = "all";

/// Entries of the "Moderation actions..." menu: kind, label, description, and
/// whether the member has to still be in the server
const MEMBER_ACTIONS: [(ReprimandKind, &str, &str, bool); 6] = [
    (ReprimandKind::Ban, "Ban", "Ban the user", false),
    (ReprimandKind::Note, "Note", "Add a note to the user", false),
    (ReprimandKind::Warning, "Warn", "Warn the user", true),
    (ReprimandKind::Kick, "Kick", "Kick the user", true),
    (ReprimandKind::Mute, "Mute", "Mute the user", true),
    (ReprimandKind::HardMute, "Hard Mute", "Hard Mute the user", true),
];

/// Components, characters and action rows a piece of the message uses up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Footprint {
    components: usize,
    text: usize,
    action_rows: usize,
}

impl Footprint {
    fn of(components: &[Component]) -> Self {
        Self {
            components: count_components(components),
            text: text_length(components),
            action_rows: count_action_rows(components),
        }
    }

    fn add(self, other: Footprint) -> Self {
        Self {
            components: self.components + other.components,
            text: self.text + other.text,
            action_rows: self.action_rows + other.action_rows,
        }
    }

    fn fits(&self) -> bool {
        self.components <= MAX_TOTAL_COMPONENTS
            && self.text <= MAX_TOTAL_TEXT_LENGTH
            && self.action_rows <= MAX_ACTION_ROWS
    }
}

/// A member's reprimand history, filtered and split into pages
pub struct HistoryView {
    file: HistoryFile,
    render: RenderConfig,
    filter: KindFilter,
    category: Option<String>,
}

impl HistoryView {
    pub fn new(file: HistoryFile, render: RenderConfig) -> Self {
        Self {
            file,
            render,
            filter: KindFilter::default(),
            category: None,
        }
    }

    pub fn with_filter(mut self, filter: KindFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    /// Reprimands matching the current filter, newest first
    pub fn entries(&self) -> Vec<&Reprimand> {
        moderation::select(
            &self.file.reprimands,
            &self.filter,
            self.category.as_deref(),
        )
    }

    /// Index ranges into [`entries`](Self::entries), one per page
    pub fn pages(&self) -> Vec<Range<usize>> {
        let entries = self.entries();
        if entries.is_empty() {
            return vec![0..0];
        }

        let first_fixed = self.fixed_footprint(true);
        let rest_fixed = self.fixed_footprint(false);
        let page_size = self.render.page_size.max(1);

        let mut pages = Vec::new();
        let mut start = 0;
        while start < entries.len() {
            let mut used = if pages.is_empty() {
                first_fixed
            } else {
                rest_fixed
            };
            let mut end = start;

            while end < entries.len() && end - start < page_size {
                let card = Component::from(self.entry_card(entries[end]));
                let next = used.add(Footprint::of(std::slice::from_ref(&card)));
                // A page always takes at least one entry so the loop makes progress
                if end > start && !next.fits() {
                    break;
                }
                used = next;
                end += 1;
            }

            debug!(
                "History page {} holds entries {}..{} ({} components, {} chars)",
                pages.len(),
                start,
                end,
                used.components,
                used.text
            );
            pages.push(start..end);
            start = end;
        }
        pages
    }

    pub fn page_count(&self) -> usize {
        self.pages().len()
    }

    /// Build the component tree for one page
    pub fn render(&self, page: usize) -> Result<Vec<Component>> {
        let pages = self.pages();
        let range = pages.get(page).cloned().with_context(|| {
            format!(
                "Page {} is out of range (history has {} page(s))",
                page + 1,
                pages.len()
            )
        })?;
        let entries = self.entries();

        let mut components: Vec<Component> = vec![self.header().into()];
        if page == 0 {
            components.push(self.profile_card().into());
        }
        components.push(Separator::divider(SeparatorSpacing::Large).into());

        if entries.is_empty() {
            components.push(TextDisplay::new(EMPTY_HISTORY_TEXT).into());
        }
        for reprimand in &entries[range] {
            components.push(self.entry_card(reprimand).into());
        }

        components.extend(self.controls());
        components.push(self.navigation(page, pages.len()).into());
        components.push(self.footer().into());

        Ok(components)
    }

    /// Render one page as a ready-to-send message, checked against platform limits
    pub fn to_message(&self, page: usize) -> Result<MessagePayload> {
        let components = self.render(page)?;
        validate::validate(&components)
            .with_context(|| format!("History page {} violates platform limits", page + 1))?;
        Ok(MessagePayload::components_v2(components))
    }

    /// Everything on a page except the reprimand cards
    fn fixed_footprint(&self, first_page: bool) -> Footprint {
        let mut fixed: Vec<Component> = vec![self.header().into()];
        if first_page {
            fixed.push(self.profile_card().into());
        }
        fixed.push(Separator::divider(SeparatorSpacing::Large).into());
        fixed.extend(self.controls());
        fixed.push(self.navigation(0, 1).into());
        fixed.push(self.footer().into());
        Footprint::of(&fixed)
    }

    /// The select rows shown under the cards on every page
    fn controls(&self) -> Vec<Component> {
        let mut rows: Vec<Component> = vec![self.filter_menu().into()];
        if let Some(categories) = self.category_menu() {
            rows.push(categories.into());
        }
        rows.push(self.moderation_menu().into());
        rows
    }

    fn header(&self) -> Section {
        let member = &self.file.member;
        Section::new(
            Button::link(discord::member_settings_url(self.file.guild_id))
                .with_label("View Member")
                .with_emoji(Emoji::unicode("👤")),
        )
        .with_text(markdown::heading(
            1,
            &format!("{} History", member.user_ref().mention()),
        ))
    }

    fn profile_card(&self) -> Container {
        let member = &self.file.member;
        let reprimands = &self.file.reprimands;
        let category = self.category.as_deref();

        let created = format!(
            "{} {}",
            markdown::timestamp(member.created_at, TimestampStyle::Relative),
            markdown::timestamp(member.created_at, TimestampStyle::ShortDateTime)
        );
        let joined = match member.joined_at {
            Some(at) => format!(
                "{} {}",
                markdown::timestamp(at, TimestampStyle::Relative),
                markdown::timestamp(at, TimestampStyle::ShortDateTime)
            ),
            None => "Unknown".to_string(),
        };

        let mut details = format!("Created {created}\nJoined   {joined}\n");
        for kind in ReprimandKind::TALLIED {
            let scoped = moderation::tally(reprimands, kind, category);
            let everywhere = moderation::tally(reprimands, kind, None);
            details.push('\n');
            details.push_str(&markdown::subtext(&format!(
                "- {} {} [{}]",
                kind.title(),
                scoped,
                everywhere
            )));
        }

        let avatar = Thumbnail::new(UnfurledMedia::new(member.avatar_url(self.render.avatar_size)))
            .with_description(format!("{}'s avatar", member.username));
        Container::new().with_component(
            Section::new(avatar)
                .with_text(format!("{} ({})", member.username, member.id))
                .with_text(details),
        )
    }

    fn entry_card(&self, reprimand: &Reprimand) -> Container {
        let mut card = Container::new().with_accent_color(reprimand.accent_color());

        let edit = Button::new(
            ButtonStyle::Secondary,
            HistoryCustomId::Edit(reprimand.id).to_string(),
        )
        .with_emoji(Emoji::unicode("✏️"));
        card.push(Section::new(edit).with_text(self.entry_text(reprimand)));

        // Remote files that can't be shown inline are listed with the notes
        let (media, files): (Vec<&Attachment>, Vec<&Attachment>) =
            reprimand.attachments.iter().partition(|a| a.is_media());
        let (uploads, links): (Vec<&Attachment>, Vec<&Attachment>) =
            files.into_iter().partition(|a| a.is_upload());

        let lines: Vec<String> = reprimand
            .notes
            .iter()
            .map(|note| format!("- {}", note.trim()))
            .chain(
                links
                    .iter()
                    .map(|a| format!("- 📎 {}", markdown::masked_link(a.filename(), &a.url))),
            )
            .map(|line| markdown::subtext(&line))
            .collect();
        if !lines.is_empty() {
            card.push(Separator::divider(SeparatorSpacing::Small));
            card.push(TextDisplay::new(markdown::truncate(
                &lines.join("\n"),
                self.render.max_notes_length,
            )));
        }

        if !media.is_empty() {
            let items = media
                .iter()
                .take(MAX_GALLERY_ITEMS)
                .map(|a| MediaGalleryItem::new(UnfurledMedia::new(&a.url)).spoiler(a.spoiler))
                .collect();
            card.push(MediaGallery::new(items));
        }
        for upload in uploads.into_iter().take(MAX_CARD_FILES) {
            card.push(File::attachment(upload.filename()).spoiler(upload.spoiler));
        }

        card.push(ActionRow::new().with_component(action_menu(reprimand)));
        card
    }

    fn entry_text(&self, reprimand: &Reprimand) -> String {
        let mut title = format!("{} • [{}]", reprimand.kind.title(), reprimand.short_id());
        if reprimand.status != ReprimandStatus::Added {
            title.push_str(&format!(" • {}", reprimand.status));
        }

        let moderator = reprimand
            .moderator_id
            .map(markdown::mention_user)
            .unwrap_or_else(|| "System".to_string());
        let byline = format!(
            "{moderator} {} {} • {}",
            markdown::timestamp(reprimand.created_at, TimestampStyle::ShortDate),
            markdown::timestamp(reprimand.created_at, TimestampStyle::ShortTime),
            markdown::timestamp(reprimand.created_at, TimestampStyle::Relative),
        );

        let reason = reprimand
            .reason
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .unwrap_or("No reason provided");
        let mut body = markdown::truncate(reason, self.render.max_reason_length);
        if let Some(context) = reprimand.context.as_deref() {
            body.push('\n');
            body.push_str(&markdown::truncate(context, self.render.max_notes_length));
        }

        format!(
            "{}\n{}\n{}",
            markdown::heading(3, &title),
            markdown::subtext(&byline),
            markdown::block_quote(&body)
        )
    }

    fn navigation(&self, page: usize, page_count: usize) -> ActionRow {
        let user_id = self.file.member.id;
        let last = page_count.saturating_sub(1);
        let button = |id: HistoryCustomId| Button::new(ButtonStyle::Secondary, id.to_string());

        let previous = button(HistoryCustomId::Page {
            user_id,
            page: page.saturating_sub(1),
        })
        .with_label("◀")
        .disabled(page == 0);

        let indicator = button(HistoryCustomId::PageIndicator { user_id })
            .with_label(format!("{} / {}", page + 1, page_count))
            .disabled(true);

        // Always page + 1, so the id differs from `previous` even on a single page
        let next = button(HistoryCustomId::Page {
            user_id,
            page: page + 1,
        })
        .with_label("▶")
        .disabled(page >= last);

        let refresh = Button::new(
            ButtonStyle::Primary,
            HistoryCustomId::Refresh { user_id }.to_string(),
        )
        .with_label("Refresh")
        .with_emoji(Emoji::unicode("🔄"));

        let close = Button::new(
            ButtonStyle::Danger,
            HistoryCustomId::Close { user_id }.to_string(),
        )
        .with_label("Close");

        ActionRow::new()
            .with_component(previous)
            .with_component(indicator)
            .with_component(next)
            .with_component(refresh)
            .with_component(close)
    }

    fn filter_menu(&self) -> ActionRow {
        let everything = self.filter.is_everything();

        let mut menu = SelectMenu::new(
            HistoryCustomId::Filter {
                user_id: self.file.member.id,
            }
            .to_string(),
        )
        .with_placeholder("Filter...")
        .with_option(
            SelectOption::new("All", "all")
                .with_emoji(Emoji::unicode("⭐"))
                .selected(everything),
        );

        for kind in ReprimandKind::ALL {
            menu = menu.with_option(
                SelectOption::new(kind.title(), kind.as_str())
                    .with_emoji(Emoji::unicode(kind.emoji()))
                    .selected(!everything && self.filter.contains(kind)),
            );
        }

        let max = u8::try_from(menu.options.len()).unwrap_or(u8::MAX);
        ActionRow::new().with_component(menu.with_values(1, max))
    }

    /// Category names worth offering: non-empty, unique, and within option limits
    fn categories(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.file.categories.iter().map(|c| c.trim()) {
            let usable = !name.is_empty()
                && name.chars().count() <= MAX_OPTION_TEXT_LENGTH
                && !name.eq_ignore_ascii_case(ALL_CATEGORIES);
            if usable && !names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
                names.push(name);
            }
        }
        names.truncate(MAX_SELECT_OPTIONS - 1);
        names
    }

    fn category_menu(&self) -> Option<ActionRow> {
        let names = self.categories();
        if names.is_empty() {
            return None;
        }
        let selected = self.category.as_deref();

        let mut menu = SelectMenu::new(
            HistoryCustomId::Category {
                user_id: self.file.member.id,
            }
            .to_string(),
        )
        .with_placeholder("Filter by category...")
        .with_option(SelectOption::new("All Categories", ALL_CATEGORIES).selected(selected.is_none()));

        for name in names {
            let chosen = selected.is_some_and(|s| s.eq_ignore_ascii_case(name));
            menu = menu.with_option(SelectOption::new(name, name).selected(chosen));
        }
        Some(ActionRow::new().with_component(menu))
    }

    fn moderation_menu(&self) -> ActionRow {
        let in_guild = self.file.member.in_guild();

        let mut menu = SelectMenu::new(
            HistoryCustomId::Moderate {
                user_id: self.file.member.id,
            }
            .to_string(),
        )
        .with_placeholder("Moderation actions...")
        .with_values(1, 1);

        for (kind, label, description, needs_member) in MEMBER_ACTIONS {
            if needs_member && !in_guild {
                continue;
            }
            menu = menu.with_option(
                SelectOption::new(label, kind.as_str())
                    .with_description(description)
                    .with_emoji(Emoji::unicode(kind.emoji())),
            );
        }
        ActionRow::new().with_component(menu)
    }

    fn footer(&self) -> TextDisplay {
        TextDisplay::new(markdown::subtext(&format!(
            "Requested by @{}",
            self.file.requested_by.username
        )))
    }
}

fn action_menu(reprimand: &Reprimand) -> SelectMenu {
    let mut menu = SelectMenu::new(HistoryCustomId::Actions(reprimand.id).to_string())
        .with_placeholder("Action...");

    if reprimand.is_pardonable() {
        menu = menu.with_option(
            SelectOption::new("Forgive", ReprimandAction::Pardon.as_str())
                .with_description("Pardon this reprimand")
                .with_emoji(Emoji::unicode("➖")),
        );
    }
    menu.with_option(
        SelectOption::new("Delete", ReprimandAction::Delete.as_str())
            .with_description("Remove it from the history")
            .with_emoji(Emoji::unicode("🗑️")),
    )
}
