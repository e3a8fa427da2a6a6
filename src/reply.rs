//! Reply payloads and embed helpers
//!
//! Handlers answer interactions with a [`Reply`]: plain content, rich embeds,
//! or both. The themed helpers (`fail_embed`, `success_embed`,
//! `warning_embed`) give every command the same look for common outcomes.

use crate::checks;
use crate::interaction::{Guild, Member, Snowflake, User};
use crate::util::split_by_chars;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Maximum length for embed field values
pub const MAX_EMBED_FIELD_VALUE_LENGTH: usize = 1024;

/// Palette colors used by the themed embeds
pub mod colors {
    pub const RED: u32 = 0xED4245;
    pub const GREEN: u32 = 0x57F287;
    pub const GOLD: u32 = 0xF1C40F;
}

// ─────────────────────────────────────────────────────────────────────────────
// Payload types
// ─────────────────────────────────────────────────────────────────────────────

/// A response to an interaction
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Reply {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
    /// Only visible to the invoking user
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub ephemeral: bool,
}

impl Reply {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn embed(embed: Embed) -> Self {
        Self {
            embeds: vec![embed],
            ..Default::default()
        }
    }

    pub fn ephemeral(mut self, ephemeral: bool) -> Self {
        self.ephemeral = ephemeral;
        self
    }
}

impl From<&str> for Reply {
    fn from(content: &str) -> Self {
        Self::content(content)
    }
}

impl From<String> for Reply {
    fn from(content: String) -> Self {
        Self::content(content)
    }
}

impl From<Embed> for Reply {
    fn from(embed: Embed) -> Self {
        Self::embed(embed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedAuthor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Rich message embed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

impl Embed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn author(mut self, name: impl Into<String>, icon_url: Option<String>) -> Self {
        self.author = Some(EmbedAuthor {
            name: name.into(),
            icon_url,
        });
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(EmbedFooter { text: text.into() });
        self
    }

    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Embed targets
// ─────────────────────────────────────────────────────────────────────────────

/// Entity an embed can be "about"
#[derive(Debug, Clone, Copy)]
pub enum EmbedTarget<'a> {
    User(&'a User),
    Member(&'a Member),
    Guild(&'a Guild),
}

impl EmbedTarget<'_> {
    fn id(&self) -> Snowflake {
        match self {
            Self::User(user) => user.id,
            Self::Member(member) => member.user.id,
            Self::Guild(guild) => guild.id,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Guild(_) => "Guild",
            _ => "User",
        }
    }
}

/// Point an embed at `target`:
/// - author set to the target's name and avatar/icon
/// - footer set to `User ID: <id>` (or `Guild ID: <id>`)
/// - timestamp set to now
///
/// With `infer_color`, members use their display color and users their
/// accent color when known. Guilds carry no color.
pub fn set_embed_target(base: Embed, target: EmbedTarget<'_>, infer_color: bool) -> Embed {
    let (name, icon_url, color) = match target {
        EmbedTarget::Member(member) => (
            member.nickname.clone().unwrap_or_else(|| member.user.tag()),
            Some(
                member
                    .avatar_url
                    .clone()
                    .unwrap_or_else(|| member.user.display_avatar_url()),
            ),
            Some(member.display_color),
        ),
        EmbedTarget::User(user) => (user.tag(), Some(user.display_avatar_url()), user.accent_color),
        EmbedTarget::Guild(guild) => (guild.name.clone(), guild.icon_url.clone(), None),
    };

    let mut embed = base;
    if infer_color {
        if let Some(color) = color {
            embed = embed.color(color);
        }
    }

    embed
        .author(name, icon_url)
        .footer(format!("{} ID: {}", target.kind(), target.id()))
        .timestamp(Utc::now())
}

// ─────────────────────────────────────────────────────────────────────────────
// Content helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Split `content` into chunks no longer than `max_length` characters
pub fn split_string_by_length(content: &str, max_length: usize) -> Result<Vec<&str>> {
    let n = max_length as f64;
    checks::is_integer(n, "maxLength")?;
    checks::is_positive(n, "maxLength")?;
    checks::is_non_zero(n, "maxLength")?;

    let parts = split_by_chars(content, max_length);
    if parts.is_empty() {
        return Ok(vec![content]);
    }
    Ok(parts)
}

/// Add as many non-inline fields titled `title` as needed to hold `content`
pub fn split_across_fields(base: Embed, title: &str, content: &str) -> Embed {
    let parts = split_by_chars(content, MAX_EMBED_FIELD_VALUE_LENGTH);
    let parts = if parts.is_empty() { vec![content] } else { parts };

    parts
        .into_iter()
        .fold(base, |embed, part| embed.field(title, part, false))
}

fn themed_embed(base: Embed, prep: &str, message: &str, color: u32) -> Embed {
    base.description(format!("{} {}", prep, message)).color(color)
}

/// `:x: message` in red
pub fn fail_embed(message: &str) -> Embed {
    themed_embed(Embed::new(), ":x:", message, colors::RED)
}

/// `:white_check_mark: message` in green
pub fn success_embed(message: &str) -> Embed {
    themed_embed(Embed::new(), ":white_check_mark:", message, colors::GREEN)
}

/// `:warning: message` in gold
pub fn warning_embed(message: &str) -> Embed {
    themed_embed(Embed::new(), ":warning:", message, colors::GOLD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::Permissions;

    #[test]
    fn test_themed_embeds() {
        let fail = fail_embed("nope");
        assert_eq!(fail.description.as_deref(), Some(":x: nope"));
        assert_eq!(fail.color, Some(colors::RED));

        let ok = success_embed("done");
        assert_eq!(ok.description.as_deref(), Some(":white_check_mark: done"));
        assert_eq!(ok.color, Some(colors::GREEN));

        let warn = warning_embed("careful");
        assert_eq!(warn.description.as_deref(), Some(":warning: careful"));
        assert_eq!(warn.color, Some(colors::GOLD));
    }

    #[test]
    fn test_target_member_uses_nickname_and_color() {
        let mut member = Member::new(User::new(42, "ana"), Permissions::empty());
        member.nickname = Some("Ana B".to_string());
        member.display_color = 0x123456;

        let embed = set_embed_target(Embed::new(), EmbedTarget::Member(&member), true);
        let author = embed.author.as_ref().unwrap();
        assert_eq!(author.name, "Ana B");
        assert!(author.icon_url.is_some());
        assert_eq!(embed.footer.as_ref().unwrap().text, "User ID: 42");
        assert_eq!(embed.color, Some(0x123456));
        assert!(embed.timestamp.is_some());
    }

    #[test]
    fn test_target_user_without_accent_keeps_base_color() {
        let user = User::new(42, "ana");
        let embed = set_embed_target(Embed::new().color(1), EmbedTarget::User(&user), true);
        assert_eq!(embed.author.as_ref().unwrap().name, "ana");
        assert_eq!(embed.color, Some(1));
    }

    #[test]
    fn test_target_guild() {
        let guild = Guild {
            id: 99,
            name: "Test Guild".to_string(),
            icon_url: None,
        };
        let embed = set_embed_target(Embed::new(), EmbedTarget::Guild(&guild), true);
        assert_eq!(embed.author.as_ref().unwrap().name, "Test Guild");
        assert_eq!(embed.footer.as_ref().unwrap().text, "Guild ID: 99");
        assert!(embed.color.is_none());
    }

    #[test]
    fn test_split_across_fields() {
        let content = "word ".repeat(500);
        let embed = split_across_fields(Embed::new(), "Output", &content);

        assert!(embed.fields.len() >= 3);
        for field in &embed.fields {
            assert_eq!(field.name, "Output");
            assert!(!field.inline);
            assert!(field.value.chars().count() <= MAX_EMBED_FIELD_VALUE_LENGTH);
        }
        let joined: String = embed.fields.iter().map(|f| f.value.as_str()).collect();
        assert_eq!(joined, content);
    }

    #[test]
    fn test_split_across_fields_empty_content_adds_one_field() {
        let embed = split_across_fields(Embed::new(), "Output", "");
        assert_eq!(embed.fields.len(), 1);
    }

    #[test]
    fn test_split_string_rejects_zero_length() {
        let err = split_string_by_length("abc", 0).unwrap_err();
        assert_eq!(err.to_string(), "maxLength must be non-zero!");
        assert_eq!(split_string_by_length("abc", 2).unwrap(), vec!["ab", "c"]);
    }

    #[test]
    fn test_reply_serialization_skips_empty_parts() {
        let reply = Reply::content("pong");
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            serde_json::json!({"content": "pong"})
        );

        let reply = Reply::embed(fail_embed("no")).ephemeral(true);
        let value = serde_json::to_value(&reply).unwrap();
        assert_eq!(value["ephemeral"], serde_json::json!(true));
        assert_eq!(value["embeds"][0]["description"], serde_json::json!(":x: no"));
    }
}
