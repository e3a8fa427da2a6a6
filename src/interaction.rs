//! Incoming interaction envelope
//!
//! An `Interaction` is one user-issued command invocation as delivered by the
//! gateway. The routing layer only reads the name fields; handler code answers
//! through [`Interaction::reply`], which is also the only way the envelope
//! becomes "responded" and therefore the only way a precondition can stop
//! dispatch.

use crate::permissions::Permissions;
use crate::reply::Reply;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Platform snowflake identifier
pub type Snowflake = u64;

/// Kind of interaction delivered by the gateway
///
/// Only `ChatInput` reaches the command registry; the other kinds are
/// answered by separate listeners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    /// Slash command typed into the chat input
    #[default]
    ChatInput,
    /// Option autocomplete request
    Autocomplete,
    /// Button / select menu press
    Component,
    /// Modal form submission
    ModalSubmit,
}

/// The invoking user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    /// Legacy 4-digit discriminator ("0" or absent for migrated accounts)
    #[serde(default)]
    pub discriminator: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Profile accent color, only known when the user was fully fetched
    #[serde(default)]
    pub accent_color: Option<u32>,
}

impl User {
    pub fn new(id: Snowflake, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            discriminator: None,
            avatar_url: None,
            accent_color: None,
        }
    }

    /// `name#1234` for legacy accounts, plain username otherwise
    pub fn tag(&self) -> String {
        match self.discriminator.as_deref() {
            Some(d) if d != "0" => format!("{}#{}", self.username, d),
            _ => self.username.clone(),
        }
    }

    /// Custom avatar, or the default avatar the platform assigns by id
    pub fn display_avatar_url(&self) -> String {
        self.avatar_url.clone().unwrap_or_else(|| {
            format!(
                "https://cdn.discordapp.com/embed/avatars/{}.png",
                (self.id >> 22) % 6
            )
        })
    }
}

/// Guild membership of the invoking user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub user: User,
    #[serde(default)]
    pub nickname: Option<String>,
    /// Resolved channel permissions of the member
    #[serde(default)]
    pub permissions: Permissions,
    /// Guild-specific avatar
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Color of the highest colored role (0 when none)
    #[serde(default)]
    pub display_color: u32,
}

impl Member {
    pub fn new(user: User, permissions: Permissions) -> Self {
        Self {
            user,
            nickname: None,
            permissions,
            avatar_url: None,
            display_color: 0,
        }
    }
}

/// Guild the interaction was issued in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guild {
    pub id: Snowflake,
    pub name: String,
    #[serde(default)]
    pub icon_url: Option<String>,
}

/// One incoming chat command
#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    pub id: Snowflake,
    #[serde(default)]
    pub kind: InteractionKind,
    /// Top-level command name
    pub command_name: String,
    #[serde(default)]
    pub subcommand_group: Option<String>,
    #[serde(default)]
    pub subcommand: Option<String>,
    /// Option values of the innermost invoked command, unvalidated
    #[serde(default)]
    pub options: BTreeMap<String, Value>,
    pub user: User,
    #[serde(default)]
    pub member: Option<Member>,
    #[serde(default)]
    pub guild: Option<Guild>,

    #[serde(skip)]
    responded: bool,
    #[serde(skip)]
    replies: Vec<Reply>,
}

impl Interaction {
    /// Create a chat-input interaction issued outside any guild
    pub fn new(id: Snowflake, command_name: impl Into<String>, user: User) -> Self {
        Self {
            id,
            kind: InteractionKind::ChatInput,
            command_name: command_name.into(),
            subcommand_group: None,
            subcommand: None,
            options: BTreeMap::new(),
            user,
            member: None,
            guild: None,
            responded: false,
            replies: Vec::new(),
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.subcommand_group = Some(group.into());
        self
    }

    pub fn with_subcommand(mut self, subcommand: impl Into<String>) -> Self {
        self.subcommand = Some(subcommand.into());
        self
    }

    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    pub fn with_kind(mut self, kind: InteractionKind) -> Self {
        self.kind = kind;
        self
    }

    /// Place the interaction in a guild, invoked by `member`
    pub fn in_guild(mut self, guild: Guild, member: Member) -> Self {
        self.guild = Some(guild);
        self.member = Some(member);
        self
    }

    pub fn is_chat_input(&self) -> bool {
        self.kind == InteractionKind::ChatInput
    }

    pub fn guild_id(&self) -> Option<Snowflake> {
        self.guild.as_ref().map(|g| g.id)
    }

    /// Permissions of the invoker; empty outside guilds
    pub fn permissions(&self) -> Permissions {
        self.member
            .as_ref()
            .map(|m| m.permissions)
            .unwrap_or_default()
    }

    /// String value of an option, if present and a string
    pub fn option_str(&self, name: &str) -> Option<&str> {
        self.options.get(name).and_then(Value::as_str)
    }

    /// Whether a reply has already been produced
    pub fn responded(&self) -> bool {
        self.responded
    }

    /// Send a reply, marking the interaction responded
    pub fn reply(&mut self, reply: impl Into<Reply>) {
        self.replies.push(reply.into());
        self.responded = true;
    }

    /// Acknowledge without content (the platform shows a "thinking" state)
    pub fn defer(&mut self) {
        self.responded = true;
    }

    pub fn replies(&self) -> &[Reply] {
        &self.replies
    }

    /// Drain produced replies for delivery
    pub fn take_replies(&mut self) -> Vec<Reply> {
        std::mem::take(&mut self.replies)
    }
}
