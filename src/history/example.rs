//! Hand-built reference layout of a history message.
//!
//! Written out component by component (no [`HistoryView`](super::HistoryView))
//! so the renderer's output can be compared against a known-good tree.

use crate::components::{
    ActionRow, Button, ButtonStyle, Component, Container, Emoji, MediaGallery, MediaGalleryItem,
    Section, SelectMenu, SelectOption, Separator, SeparatorSpacing, TextDisplay, Thumbnail,
    UnfurledMedia,
};

const EDIT: &str = "✏️";

pub fn moderation_history_example() -> Vec<Component> {
    vec![
        header().into(),
        profile().into(),
        Separator::divider(SeparatorSpacing::Large).into(),
        doomposting_warning().into(),
        nsfw_warning().into(),
        censor().into(),
        filter().into(),
        TextDisplay::new("-# Requested by @hime.san").into(),
    ]
}

fn header() -> Section {
    Section::new(
        Button::link("discord://-/guilds/923991820868911184/settings/members")
            .with_label("View Member")
            .with_emoji(Emoji::unicode("👤")),
    )
    .with_text("# <@1036096131970629722> History")
}

fn profile() -> Container {
    let avatar = Thumbnail::new(UnfurledMedia::new(
        "https://cdn.discordapp.com/avatars/852717789071278100/582ffa635f2632db6e24c5f5350ff780.png?size=4096",
    ));
    Container::new().with_component(
        Section::new(avatar)
            .with_text("hime.san (852717789071278100)")
            .with_text(
                "Created <t:1744782660:R> <t:1744782660:f>\n\
                 Joined   <t:1744782660:R> <t:1744782660:f>\n\
                 \n\
                 -# - Warning 0/0 [0/0]\n\
                 -# - Notice 0/0 [0/0]\n\
                 -# - Ban 0/0 [0/0]\n\
                 -# - Kick 0/0 [0/0]\n\
                 -# - Note 0/0 [0/0]\n\
                 -# - Mute 0/0 [0/0]\n\
                 -# - Censored 0/0 [0/0]",
            ),
    )
}

fn edit_button(custom_id: &str) -> Button {
    Button::new(ButtonStyle::Secondary, custom_id).with_emoji(Emoji::unicode(EDIT))
}

fn action_row(custom_id: &str, options: Vec<SelectOption>) -> ActionRow {
    let menu = options.into_iter().fold(
        SelectMenu::new(custom_id).with_placeholder("Action..."),
        SelectMenu::with_option,
    );
    ActionRow::new().with_component(menu)
}

fn doomposting_warning() -> Container {
    Container::new()
        .with_component(
            Section::new(edit_button("38e0e62e01d0479ab5e28139799344a9")).with_text(
                "### Warning • [78b023b2]\n\
                 -# <@328166359483547650> <t:1744782660:d> <t:1744782660:t> • <t:1744782660:R>\n\
                 >>> Please avoid doomposting in theorycrafting discussions. Comments like \
                 \"why even play anymore\" are unproductive and discourage others. \
                 If you continue, further action may be taken.",
            ),
        )
        .with_component(Separator::divider(SeparatorSpacing::Small))
        .with_component(TextDisplay::new(
            "-# - User warned for attempting to [bypass rules](https://discord.com/channels/763583452762734592/953149337813266452/1393572627343212744) \
             and being argumetative about it. Again.\n\
             -# - Then argued about it [even after that](https://discord.com/channels/763583452762734592/953149337813266452/1393607142635995227). \
             Warn user immediately on similar infractions going forward. Keep an eye for exile \
             but user likely should be banned from server rather than exile at this continued path",
        ))
        .with_component(action_row(
            "26d69d8fda87440eda77533b17f2f0ba",
            vec![
                SelectOption::new("Forgive", "a295fa0156af4f39a193483677628c6b")
                    .with_description("Forgive")
                    .with_emoji(Emoji::unicode("➖")),
                SelectOption::new("Delete", "7b4214c4cbd348b3923a1a019badd176")
                    .with_emoji(Emoji::unicode("🗑️")),
            ],
        ))
}

fn nsfw_warning() -> Container {
    let evidence = [
        "https://media.discordapp.net/attachments/923991820868911187/1393701627306840114/776bd8f5c11e4867b9c7cab5aa667a1b.png?ex=68742149&is=6872cfc9&hm=ab737e1c47645fb07a0bbf893f777185611b39e4227e9cbd2d54f5fa1757253b&=&width=986&height=1395",
        "https://media.discordapp.net/attachments/923991820868911187/1393701628023931051/ef380456c44e419bf05879c4b7a68f64.png?ex=68742149&is=6872cfc9&hm=e6324967af034c259c094eed7f5275c6c223a98275ad5f011e60f381e54344c2&=&width=986&height=1395",
    ];

    Container::new()
        .with_component(
            Section::new(edit_button("dd06ba2e3d114e0588953fd8f80f695e")).with_text(
                "### Warning • [78b023b2]\n\
                 -# <@417236986181451778> <t:1744782660:d> <t:1744782660:t> • <t:1744782660:R>\n\
                 Posting NSFW or sexually suggestive content is not allowed in this server. \
                 This is your official warning. Any further infractions may result in a mute or ban. \
                 Please review the rules and keep all content safe for work.",
            ),
        )
        .with_component(Separator::divider(SeparatorSpacing::Small))
        .with_component(TextDisplay::new(
            "-# - User posted suggestive image in #memes without a spoiler tag or content warning. \
             Image was removed and user was informed.  Then argued about it \
             [even after that](https://discord.com/channels/763583452762734592/953149337813266452/1393607142635995227).  \n\
             -# - Warn user immediately on similar infractions going forward. ",
        ))
        .with_component(MediaGallery::new(
            evidence
                .into_iter()
                .map(|url| MediaGalleryItem::new(UnfurledMedia::new(url)).spoiler(true))
                .collect(),
        ))
        .with_component(action_row(
            "de05d2bc502144bce6f3ff2c7e13ab0f",
            vec![SelectOption::new(
                "Wild Alligator",
                "c9bd183dc7ca42dbeb0c7ed89a7d3e98",
            )],
        ))
}

fn censor() -> Container {
    Container::new()
        .with_component(
            Section::new(edit_button("4c65ffab6fbf4d6bcb0510aa6d286ac5")).with_text(
                "### Censor\n\
                 -# 78b023b2-bfe0-4633-a248-b9b1cdbd707a\n\
                 <@917873687254958181>  <t:1744782660:d> <t:1744782660:t> • <t:1744782660:R>\n\
                 [Suspicious Files]\n\
                 plugins.7z & themes.7z",
            ),
        )
        .with_component(action_row(
            "fc191c7357d44056845aa3842efce7c3",
            vec![SelectOption::new(
                "Furry Hummingbird",
                "09636f0d58784270c029af44067b6795",
            )],
        ))
}

fn filter() -> ActionRow {
    let options = [
        ("All", "1ad9c287ea8e4a35ffa156440eb766e8", "⭐"),
        ("Ban", "6efd802be4df4ef2fbd952103872577a", "🔨"),
        ("Kick", "23c9c6404ece45fafd77facdb07d065d", "👞"),
        ("Mute", "e9deea8203524c81ef12377da2e159b3", "🔇"),
    ];

    let menu = options.into_iter().fold(
        SelectMenu::new("6949f7ac774244039193fe4a888c201f")
            .with_placeholder("Filter...")
            .with_values(1, 4),
        |menu, (label, value, emoji)| {
            menu.with_option(
                SelectOption::new(label, value)
                    .with_emoji(Emoji::unicode(emoji))
                    .selected(true),
            )
        },
    );
    ActionRow::new().with_component(menu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::validate::{count_action_rows, count_components, validate};
    use serde_json::json;

    #[test]
    fn test_top_level_layout() {
        let components = moderation_history_example();
        let kinds: Vec<String> = components.iter().map(|c| c.kind().to_string()).collect();
        assert_eq!(
            kinds,
            vec![
                "Section",
                "Container",
                "Separator",
                "Container",
                "Container",
                "Container",
                "ActionRow",
                "TextDisplay"
            ]
        );
        assert_eq!(count_components(&components), 35);
        assert_eq!(count_action_rows(&components), 4);
    }

    #[test]
    fn test_example_passes_validation() {
        assert!(validate(&moderation_history_example()).is_ok());
    }

    #[test]
    fn test_header_json() {
        let value = serde_json::to_value(&moderation_history_example()[0]).unwrap();
        assert_eq!(
            value,
            json!({
                "type": 9,
                "components": [
                    { "type": 10, "content": "# <@1036096131970629722> History" }
                ],
                "accessory": {
                    "type": 2,
                    "style": 5,
                    "label": "View Member",
                    "emoji": { "name": "👤" },
                    "url": "discord://-/guilds/923991820868911184/settings/members"
                }
            })
        );
    }

    #[test]
    fn test_profile_text_is_verbatim() {
        let value = serde_json::to_value(&moderation_history_example()[1]).unwrap();
        let section = &value["components"][0];
        assert_eq!(section["accessory"]["type"], 11);
        assert_eq!(
            section["components"][1]["content"],
            "Created <t:1744782660:R> <t:1744782660:f>\nJoined   <t:1744782660:R> <t:1744782660:f>\n\n-# - Warning 0/0 [0/0]\n-# - Notice 0/0 [0/0]\n-# - Ban 0/0 [0/0]\n-# - Kick 0/0 [0/0]\n-# - Note 0/0 [0/0]\n-# - Mute 0/0 [0/0]\n-# - Censored 0/0 [0/0]"
        );
    }

    #[test]
    fn test_reprimand_cards() {
        let components = moderation_history_example();
        let nsfw = serde_json::to_value(&components[4]).unwrap();
        let kinds: Vec<u64> = nsfw["components"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["type"].as_u64().unwrap())
            .collect();
        assert_eq!(kinds, vec![9, 14, 10, 12, 1]);
        assert_eq!(nsfw["components"][1], json!({ "type": 14, "divider": true, "spacing": 1 }));
        assert_eq!(nsfw["components"][3]["items"].as_array().unwrap().len(), 2);
        assert!(nsfw["components"][2]["content"]
            .as_str()
            .unwrap()
            .ends_with("going forward. "));

        let censor = serde_json::to_value(&components[5]).unwrap();
        assert_eq!(
            censor["components"][0]["components"][0]["content"],
            "### Censor\n-# 78b023b2-bfe0-4633-a248-b9b1cdbd707a\n<@917873687254958181>  <t:1744782660:d> <t:1744782660:t> • <t:1744782660:R>\n[Suspicious Files]\nplugins.7z & themes.7z"
        );
    }

    #[test]
    fn test_filter_row() {
        let components = moderation_history_example();
        let row = serde_json::to_value(&components[6]).unwrap();
        let menu = &row["components"][0];
        assert_eq!(menu["type"], 3);
        assert_eq!(menu["min_values"], 1);
        assert_eq!(menu["max_values"], 4);
        let labels: Vec<&str> = menu["options"]
            .as_array()
            .unwrap()
            .iter()
            .inspect(|o| assert_eq!(o["default"], true))
            .map(|o| o["label"].as_str().unwrap())
            .collect();
        assert_eq!(labels, vec!["All", "Ban", "Kick", "Mute"]);
    }

    #[test]
    fn test_full_layout_json() {
        let value = serde_json::to_value(moderation_history_example()).unwrap();
        let edit = |custom_id: &str| {
            json!({ "type": 2, "style": 2, "emoji": { "name": "✏️" }, "custom_id": custom_id })
        };

        let expected = json!([
            {
                "type": 9,
                "components": [{ "type": 10, "content": "# <@1036096131970629722> History" }],
                "accessory": {
                    "type": 2,
                    "style": 5,
                    "label": "View Member",
                    "emoji": { "name": "👤" },
                    "url": "discord://-/guilds/923991820868911184/settings/members"
                }
            },
            {
                "type": 17,
                "components": [{
                    "type": 9,
                    "components": [
                        { "type": 10, "content": "hime.san (852717789071278100)" },
                        {
                            "type": 10,
                            "content": "Created <t:1744782660:R> <t:1744782660:f>\nJoined   <t:1744782660:R> <t:1744782660:f>\n\n-# - Warning 0/0 [0/0]\n-# - Notice 0/0 [0/0]\n-# - Ban 0/0 [0/0]\n-# - Kick 0/0 [0/0]\n-# - Note 0/0 [0/0]\n-# - Mute 0/0 [0/0]\n-# - Censored 0/0 [0/0]"
                        }
                    ],
                    "accessory": {
                        "type": 11,
                        "media": {
                            "url": "https://cdn.discordapp.com/avatars/852717789071278100/582ffa635f2632db6e24c5f5350ff780.png?size=4096"
                        }
                    }
                }]
            },
            { "type": 14, "divider": true, "spacing": 2 },
            {
                "type": 17,
                "components": [
                    {
                        "type": 9,
                        "components": [{
                            "type": 10,
                            "content": "### Warning • [78b023b2]\n-# <@328166359483547650> <t:1744782660:d> <t:1744782660:t> • <t:1744782660:R>\n>>> Please avoid doomposting in theorycrafting discussions. Comments like \"why even play anymore\" are unproductive and discourage others. If you continue, further action may be taken."
                        }],
                        "accessory": edit("38e0e62e01d0479ab5e28139799344a9")
                    },
                    { "type": 14, "divider": true, "spacing": 1 },
                    {
                        "type": 10,
                        "content": "-# - User warned for attempting to [bypass rules](https://discord.com/channels/763583452762734592/953149337813266452/1393572627343212744) and being argumetative about it. Again.\n-# - Then argued about it [even after that](https://discord.com/channels/763583452762734592/953149337813266452/1393607142635995227). Warn user immediately on similar infractions going forward. Keep an eye for exile but user likely should be banned from server rather than exile at this continued path"
                    },
                    {
                        "type": 1,
                        "components": [{
                            "type": 3,
                            "custom_id": "26d69d8fda87440eda77533b17f2f0ba",
                            "placeholder": "Action...",
                            "options": [
                                {
                                    "label": "Forgive",
                                    "value": "a295fa0156af4f39a193483677628c6b",
                                    "description": "Forgive",
                                    "emoji": { "name": "➖" }
                                },
                                {
                                    "label": "Delete",
                                    "value": "7b4214c4cbd348b3923a1a019badd176",
                                    "emoji": { "name": "🗑️" }
                                }
                            ]
                        }]
                    }
                ]
            },
            {
                "type": 17,
                "components": [
                    {
                        "type": 9,
                        "components": [{
                            "type": 10,
                            "content": "### Warning • [78b023b2]\n-# <@417236986181451778> <t:1744782660:d> <t:1744782660:t> • <t:1744782660:R>\nPosting NSFW or sexually suggestive content is not allowed in this server. This is your official warning. Any further infractions may result in a mute or ban. Please review the rules and keep all content safe for work."
                        }],
                        "accessory": edit("dd06ba2e3d114e0588953fd8f80f695e")
                    },
                    { "type": 14, "divider": true, "spacing": 1 },
                    {
                        "type": 10,
                        "content": "-# - User posted suggestive image in #memes without a spoiler tag or content warning. Image was removed and user was informed.  Then argued about it [even after that](https://discord.com/channels/763583452762734592/953149337813266452/1393607142635995227).  \n-# - Warn user immediately on similar infractions going forward. "
                    },
                    {
                        "type": 12,
                        "items": [
                            {
                                "media": {
                                    "url": "https://media.discordapp.net/attachments/923991820868911187/1393701627306840114/776bd8f5c11e4867b9c7cab5aa667a1b.png?ex=68742149&is=6872cfc9&hm=ab737e1c47645fb07a0bbf893f777185611b39e4227e9cbd2d54f5fa1757253b&=&width=986&height=1395"
                                },
                                "spoiler": true
                            },
                            {
                                "media": {
                                    "url": "https://media.discordapp.net/attachments/923991820868911187/1393701628023931051/ef380456c44e419bf05879c4b7a68f64.png?ex=68742149&is=6872cfc9&hm=e6324967af034c259c094eed7f5275c6c223a98275ad5f011e60f381e54344c2&=&width=986&height=1395"
                                },
                                "spoiler": true
                            }
                        ]
                    },
                    {
                        "type": 1,
                        "components": [{
                            "type": 3,
                            "custom_id": "de05d2bc502144bce6f3ff2c7e13ab0f",
                            "placeholder": "Action...",
                            "options": [
                                { "label": "Wild Alligator", "value": "c9bd183dc7ca42dbeb0c7ed89a7d3e98" }
                            ]
                        }]
                    }
                ]
            },
            {
                "type": 17,
                "components": [
                    {
                        "type": 9,
                        "components": [{
                            "type": 10,
                            "content": "### Censor\n-# 78b023b2-bfe0-4633-a248-b9b1cdbd707a\n<@917873687254958181>  <t:1744782660:d> <t:1744782660:t> • <t:1744782660:R>\n[Suspicious Files]\nplugins.7z & themes.7z"
                        }],
                        "accessory": edit("4c65ffab6fbf4d6bcb0510aa6d286ac5")
                    },
                    {
                        "type": 1,
                        "components": [{
                            "type": 3,
                            "custom_id": "fc191c7357d44056845aa3842efce7c3",
                            "placeholder": "Action...",
                            "options": [
                                { "label": "Furry Hummingbird", "value": "09636f0d58784270c029af44067b6795" }
                            ]
                        }]
                    }
                ]
            },
            {
                "type": 1,
                "components": [{
                    "type": 3,
                    "custom_id": "6949f7ac774244039193fe4a888c201f",
                    "placeholder": "Filter...",
                    "min_values": 1,
                    "max_values": 4,
                    "options": [
                        { "label": "All", "value": "1ad9c287ea8e4a35ffa156440eb766e8", "emoji": { "name": "⭐" }, "default": true },
                        { "label": "Ban", "value": "6efd802be4df4ef2fbd952103872577a", "emoji": { "name": "🔨" }, "default": true },
                        { "label": "Kick", "value": "23c9c6404ece45fafd77facdb07d065d", "emoji": { "name": "👞" }, "default": true },
                        { "label": "Mute", "value": "e9deea8203524c81ef12377da2e159b3", "emoji": { "name": "🔇" }, "default": true }
                    ]
                }]
            },
            { "type": 10, "content": "-# Requested by @hime.san" }
        ]);

        assert_eq!(value, expected);
    }
}
