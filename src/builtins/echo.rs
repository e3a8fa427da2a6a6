//! `/echo text:<string>`

use crate::dispatch::{CommandHandler, SlashCommand};
use crate::interaction::Interaction;
use crate::reply::{fail_embed, set_embed_target, split_across_fields, Embed, EmbedTarget, Reply};
use crate::schema::{OptionKind, OptionSchema};
use anyhow::{Context, Result};
use async_trait::async_trait;

struct Echo;

#[async_trait]
impl CommandHandler for Echo {
    async fn precondition(&self, interaction: &mut Interaction) -> Result<()> {
        let blank = interaction
            .option_str("text")
            .map_or(true, |text| text.trim().is_empty());

        if blank {
            let reply = Reply::embed(fail_embed("There is nothing to echo.")).ephemeral(true);
            interaction.reply(reply);
        }
        Ok(())
    }

    async fn action(&self, interaction: &mut Interaction) -> Result<()> {
        let text = interaction
            .option_str("text")
            .context("echo invoked without text")?
            .to_string();

        let target = match &interaction.member {
            Some(member) => EmbedTarget::Member(member),
            None => EmbedTarget::User(&interaction.user),
        };
        let embed = set_embed_target(Embed::new(), target, true);
        let embed = split_across_fields(embed, "Echo", &text);

        interaction.reply(embed);
        Ok(())
    }
}

pub fn command() -> SlashCommand {
    SlashCommand::new("echo", "Repeat some text back")
        .argument(OptionSchema::argument(
            OptionKind::String,
            "text",
            "What to repeat",
            true,
        ))
        .handler(Echo)
}
