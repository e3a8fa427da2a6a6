//! `/config`: per-server settings
//!
//! ```text
//! /config show
//! /config welcome enable [message]
//! /config welcome disable
//! ```
//!
//! Server-only, and restricted to members who can manage the server.

use crate::dispatch::{CommandHandler, SlashCommand, Subcommand, SubcommandGroup};
use crate::guild_config::{GuildConfig, GuildConfigHolder, GuildConfigSource, ToggleableGuildConfig};
use crate::interaction::{Interaction, Snowflake};
use crate::permissions::Permissions;
use crate::reply::{set_embed_target, success_embed, warning_embed, Embed, EmbedTarget, Reply};
use crate::schema::{OptionKind, OptionSchema};
use crate::util::truncate_chars;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;

pub const DEFAULT_WELCOME_MESSAGE: &str = "Welcome to the server!";

/// Longest accepted welcome message, in characters
pub const MAX_WELCOME_MESSAGE_LENGTH: usize = 500;

/// Welcome message settings for one guild
#[derive(Debug, Clone, PartialEq)]
pub struct WelcomeConfig {
    pub guild_id: Snowflake,
    pub enabled: bool,
    pub message: String,
}

impl GuildConfig for WelcomeConfig {
    fn guild_id(&self) -> Snowflake {
        self.guild_id
    }
}

impl ToggleableGuildConfig for WelcomeConfig {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// Disabled, with the stock message
pub struct WelcomeDefaults;

#[async_trait]
impl GuildConfigSource<WelcomeConfig> for WelcomeDefaults {
    async fn default_config(&self, guild_id: Snowflake) -> Result<WelcomeConfig> {
        Ok(WelcomeConfig {
            guild_id,
            enabled: false,
            message: DEFAULT_WELCOME_MESSAGE.to_string(),
        })
    }
}

pub type WelcomeHolder = Arc<GuildConfigHolder<WelcomeConfig>>;

fn guild_of(interaction: &Interaction) -> Result<Snowflake> {
    interaction
        .guild_id()
        .context("server settings used outside a server")
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

struct Show(WelcomeHolder);

#[async_trait]
impl CommandHandler for Show {
    async fn action(&self, interaction: &mut Interaction) -> Result<()> {
        let guild_id = guild_of(interaction)?;
        let welcome = self.0.retrieve(guild_id).await?;

        let status = if welcome.enabled { "Enabled" } else { "Disabled" };
        let mut embed = Embed::new()
            .title("Server settings")
            .field("Welcome messages", status, true)
            .field("Welcome message", welcome.message, false);

        if let Some(guild) = &interaction.guild {
            embed = set_embed_target(embed, EmbedTarget::Guild(guild), false);
        }
        interaction.reply(Reply::embed(embed).ephemeral(true));
        Ok(())
    }
}

struct EnableWelcome(WelcomeHolder);

#[async_trait]
impl CommandHandler for EnableWelcome {
    async fn precondition(&self, interaction: &mut Interaction) -> Result<()> {
        let guild_id = guild_of(interaction)?;
        let current = self.0.retrieve(guild_id).await?;

        // Re-enabling with a new message is an update, not a no-op
        if current.enabled && interaction.option_str("message").is_none() {
            let warning = warning_embed("Welcome messages are already enabled.");
            interaction.reply(Reply::embed(warning).ephemeral(true));
        }
        Ok(())
    }

    async fn action(&self, interaction: &mut Interaction) -> Result<()> {
        let guild_id = guild_of(interaction)?;
        let mut welcome = self.0.set_enabled(guild_id, true).await?;

        if let Some(message) = interaction.option_str("message") {
            let message = truncate_chars(message.trim(), MAX_WELCOME_MESSAGE_LENGTH);
            if !message.is_empty() {
                welcome.message = message.to_string();
                self.0.store(welcome.clone()).await;
            }
        }

        tracing::info!(guild = guild_id, "Welcome messages enabled");
        interaction.reply(success_embed(&format!(
            "Welcome messages enabled: \"{}\"",
            welcome.message
        )));
        Ok(())
    }
}

struct DisableWelcome(WelcomeHolder);

#[async_trait]
impl CommandHandler for DisableWelcome {
    async fn precondition(&self, interaction: &mut Interaction) -> Result<()> {
        let guild_id = guild_of(interaction)?;
        if !self.0.retrieve(guild_id).await?.enabled {
            let warning = warning_embed("Welcome messages are already disabled.");
            interaction.reply(Reply::embed(warning).ephemeral(true));
        }
        Ok(())
    }

    async fn action(&self, interaction: &mut Interaction) -> Result<()> {
        let guild_id = guild_of(interaction)?;
        self.0.set_enabled(guild_id, false).await?;

        tracing::info!(guild = guild_id, "Welcome messages disabled");
        interaction.reply(success_embed("Welcome messages disabled."));
        Ok(())
    }
}

pub fn command(welcome: WelcomeHolder) -> SlashCommand {
    SlashCommand::new("config", "Configure the bot for this server")
        .require_permissions(Permissions::MANAGE_GUILD)
        .subcommand(Subcommand::new(
            "show",
            "Show the current settings",
            Show(Arc::clone(&welcome)),
        ))
        .group(
            SubcommandGroup::new("welcome", "Greet new members").subcommands([
                Subcommand::new(
                    "enable",
                    "Turn welcome messages on",
                    EnableWelcome(Arc::clone(&welcome)),
                )
                .argument(OptionSchema::argument(
                    OptionKind::String,
                    "message",
                    "Message to greet new members with",
                    false,
                )),
                Subcommand::new("disable", "Turn welcome messages off", DisableWelcome(welcome)),
            ]),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Dispatchable;
    use crate::interaction::{Guild, Member, User};
    use std::time::Duration;

    fn holder() -> WelcomeHolder {
        Arc::new(GuildConfigHolder::new(Duration::from_secs(60), WelcomeDefaults))
    }

    fn admin_interaction() -> Interaction {
        let user = User::new(7, "ana");
        let guild = Guild {
            id: 99,
            name: "Test".to_string(),
            icon_url: None,
        };
        Interaction::new(1, "config", user.clone())
            .in_guild(guild, Member::new(user, Permissions::MANAGE_GUILD))
    }

    #[tokio::test]
    async fn test_enable_with_message_then_show() {
        let welcome = holder();
        let command = command(Arc::clone(&welcome));

        let mut ctx = admin_interaction()
            .with_group("welcome")
            .with_subcommand("enable")
            .with_option("message", "  Hello there  ");
        command.dispatch(&mut ctx).await.unwrap();

        let stored = welcome.retrieve(99).await.unwrap();
        assert!(stored.enabled);
        assert_eq!(stored.message, "Hello there");

        let mut ctx = admin_interaction().with_subcommand("show");
        command.dispatch(&mut ctx).await.unwrap();
        let reply = &ctx.replies()[0];
        assert!(reply.ephemeral);
        assert_eq!(reply.embeds[0].fields[0].value, "Enabled");
        assert_eq!(reply.embeds[0].fields[1].value, "Hello there");
        assert_eq!(
            reply.embeds[0].footer.as_ref().unwrap().text,
            "Guild ID: 99"
        );
    }

    #[tokio::test]
    async fn test_enable_twice_warns() {
        let welcome = holder();
        let command = command(Arc::clone(&welcome));

        let mut first = admin_interaction().with_group("welcome").with_subcommand("enable");
        command.dispatch(&mut first).await.unwrap();

        let mut second = admin_interaction().with_group("welcome").with_subcommand("enable");
        command.dispatch(&mut second).await.unwrap();

        assert_eq!(second.replies().len(), 1);
        assert_eq!(
            second.replies()[0].embeds[0].description.as_deref(),
            Some(":warning: Welcome messages are already enabled.")
        );
        assert_eq!(welcome.retrieve(99).await.unwrap().message, DEFAULT_WELCOME_MESSAGE);
    }

    #[tokio::test]
    async fn test_disable_when_disabled_warns() {
        let welcome = holder();
        let command = command(welcome);

        let mut ctx = admin_interaction().with_group("welcome").with_subcommand("disable");
        command.dispatch(&mut ctx).await.unwrap();

        assert!(ctx.replies()[0].ephemeral);
        assert_eq!(
            ctx.replies()[0].embeds[0].description.as_deref(),
            Some(":warning: Welcome messages are already disabled.")
        );
    }

    #[tokio::test]
    async fn test_enable_then_disable() {
        let welcome = holder();
        let command = command(Arc::clone(&welcome));

        let mut ctx = admin_interaction().with_group("welcome").with_subcommand("enable");
        command.dispatch(&mut ctx).await.unwrap();
        let mut ctx = admin_interaction().with_group("welcome").with_subcommand("disable");
        command.dispatch(&mut ctx).await.unwrap();

        assert_eq!(
            ctx.replies()[0].embeds[0].description.as_deref(),
            Some(":white_check_mark: Welcome messages disabled.")
        );
        assert!(!welcome.retrieve(99).await.unwrap().enabled);
    }

    #[tokio::test]
    async fn test_members_without_manage_guild_are_refused() {
        let welcome = holder();
        let command = command(Arc::clone(&welcome));

        let user = User::new(8, "bo");
        let guild = Guild {
            id: 99,
            name: "Test".to_string(),
            icon_url: None,
        };
        let mut ctx = Interaction::new(1, "config", user.clone())
            .in_guild(guild, Member::new(user, Permissions::SEND_MESSAGES))
            .with_group("welcome")
            .with_subcommand("enable");
        command.dispatch(&mut ctx).await.unwrap();

        assert!(ctx.replies()[0].ephemeral);
        assert!(!welcome.retrieve(99).await.unwrap().enabled);
    }

    #[tokio::test]
    async fn test_direct_messages_are_refused() {
        let command = command(holder());
        let mut ctx = Interaction::new(1, "config", User::new(7, "ana")).with_subcommand("show");
        command.dispatch(&mut ctx).await.unwrap();

        assert_eq!(
            ctx.replies()[0].embeds[0].description.as_deref(),
            Some(":x: This command can only be used in a server.")
        );
    }

    #[test]
    fn test_schema_layout() {
        let schema = command(holder()).schema();
        assert_eq!(schema.routing_names(), vec!["welcome", "show"]);
        assert_eq!(schema.dm_permission, Some(false));
        assert_eq!(schema.default_member_permissions, Some(Permissions::MANAGE_GUILD));
    }
}
