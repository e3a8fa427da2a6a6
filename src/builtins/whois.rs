//! `/whois`

use super::ping::snowflake_time;
use crate::dispatch::{CommandHandler, SlashCommand};
use crate::interaction::Interaction;
use crate::reply::{set_embed_target, Embed, EmbedTarget};
use anyhow::Result;
use async_trait::async_trait;

struct Whois;

#[async_trait]
impl CommandHandler for Whois {
    async fn action(&self, interaction: &mut Interaction) -> Result<()> {
        let user = &interaction.user;
        let mut embed = Embed::new()
            .title("User info")
            .field("Username", user.tag(), true)
            .field("ID", user.id.to_string(), true);

        if let Some(created) = snowflake_time(user.id) {
            embed = embed.field("Created", created.format("%Y-%m-%d %H:%M UTC").to_string(), false);
        }

        let embed = match &interaction.member {
            Some(member) => {
                if let Some(nickname) = &member.nickname {
                    embed = embed.field("Nickname", nickname.clone(), true);
                }
                let permissions = if member.permissions.is_empty() {
                    "None".to_string()
                } else {
                    let names: Vec<_> = member
                        .permissions
                        .iter_names()
                        .map(|(name, _)| name)
                        .collect();
                    names.join(", ")
                };
                embed = embed.field("Permissions", permissions, false);
                set_embed_target(embed, EmbedTarget::Member(member), true)
            }
            None => set_embed_target(embed, EmbedTarget::User(user), true),
        };

        interaction.reply(embed);
        Ok(())
    }
}

pub fn command() -> SlashCommand {
    SlashCommand::new("whois", "Show information about yourself").handler(Whois)
}
