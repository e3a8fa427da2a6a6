//! Command registry: entry point for incoming interactions

use super::{insert_child, route, Dispatchable, SlashCommand, Table};
use crate::interaction::Interaction;
use crate::schema::CommandSchema;
use anyhow::Result;

/// The set of top-level commands a bot answers
///
/// Built once at startup from a fixed list and shared read-only afterwards
/// (wrap it in an `Arc` to hand it to per-interaction tasks). Later entries
/// with a colliding name replace earlier ones.
pub struct CommandRegistry {
    commands: Table<SlashCommand>,
}

impl CommandRegistry {
    pub fn new(commands: impl IntoIterator<Item = SlashCommand>) -> Self {
        let mut table = Table::new();
        for command in commands {
            insert_child(&mut table, command);
        }
        Self { commands: table }
    }

    pub fn get(&self, name: &str) -> Option<&SlashCommand> {
        self.commands.get(name)
    }

    /// Registered command names, in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Registration schema of every command, in registration order
    ///
    /// Pure: calling it again yields the same result.
    pub fn export_schemas(&self) -> Vec<CommandSchema> {
        self.commands.values().map(Dispatchable::schema).collect()
    }

    /// Route `interaction` to the command it names
    ///
    /// Unknown command names are ignored. Handler errors propagate.
    pub async fn dispatch(&self, interaction: &mut Interaction) -> Result<()> {
        let name = interaction.command_name.clone();
        route(&self.commands, "command", Some(name.as_str()), interaction).await
    }

    /// Gateway entry point: dispatch chat-input interactions, skip the rest
    pub async fn process(&self, interaction: &mut Interaction) -> Result<()> {
        if !interaction.is_chat_input() {
            tracing::trace!(
                interaction = interaction.id,
                kind = ?interaction.kind,
                "Skipping non-command interaction"
            );
            return Ok(());
        }
        self.dispatch(interaction).await
    }
}
