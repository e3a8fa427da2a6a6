//! Top-level slash commands

use super::{
    insert_child, run_handler, AccessConfig, CommandHandler, Dispatchable, Subcommand,
    SubcommandGroup, Table,
};
use crate::interaction::Interaction;
use crate::permissions::Permissions;
use crate::schema::{CommandSchema, OptionSchema};
use anyhow::Result;
use async_trait::async_trait;

/// A top-level command
///
/// Owns two child tables (groups and direct subcommands) and optionally its
/// own handler. Routing on dispatch, given the interaction's group `g` and
/// subcommand `s`:
///
/// 1. command name differs: no-op
/// 2. no `g`, no `s`: own precondition, then own action unless responded
/// 3. no `g`, `s` present: the direct subcommand `s`, or no-op
/// 4. `g` present: the group `g` (which resolves `s`), or no-op
///
/// A present group always wins over self-invocation, and unregistered names
/// are swallowed. Access restrictions are checked once a registered target
/// is found, before its precondition; a miss is never gated.
pub struct SlashCommand {
    name: String,
    description: String,
    access: AccessConfig,
    arguments: Vec<OptionSchema>,
    handler: Option<Box<dyn CommandHandler>>,
    groups: Table<SubcommandGroup>,
    subcommands: Table<Subcommand>,
}

impl SlashCommand {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            access: AccessConfig::default(),
            arguments: Vec::new(),
            handler: None,
            groups: Table::new(),
            subcommands: Table::new(),
        }
    }

    /// Handler used when the command is invoked without group or subcommand
    pub fn handler(mut self, handler: impl CommandHandler + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Declare a value argument for self-invocation
    pub fn argument(mut self, argument: OptionSchema) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Refuse invocations from direct messages
    pub fn guild_only(mut self) -> Self {
        self.access.guild_only = true;
        self
    }

    /// Require members to hold `permissions` (implies guild-only)
    pub fn require_permissions(mut self, permissions: Permissions) -> Self {
        self.access.required_permissions = Some(permissions);
        self
    }

    /// Add a subcommand group, replacing any earlier one with the same name
    pub fn group(mut self, group: SubcommandGroup) -> Self {
        insert_child(&mut self.groups, group);
        self
    }

    pub fn groups(self, groups: impl IntoIterator<Item = SubcommandGroup>) -> Self {
        groups.into_iter().fold(self, Self::group)
    }

    /// Add a direct subcommand, replacing any earlier one with the same name
    pub fn subcommand(mut self, subcommand: Subcommand) -> Self {
        insert_child(&mut self.subcommands, subcommand);
        self
    }

    pub fn subcommands(self, subcommands: impl IntoIterator<Item = Subcommand>) -> Self {
        subcommands.into_iter().fold(self, Self::subcommand)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn get_group(&self, name: &str) -> Option<&SubcommandGroup> {
        self.groups.get(name)
    }

    pub fn get_subcommand(&self, name: &str) -> Option<&Subcommand> {
        self.subcommands.get(name)
    }

    /// Whether the command can be invoked on its own
    pub fn is_invocable(&self) -> bool {
        self.handler.is_some()
    }
}

#[async_trait]
impl Dispatchable for SlashCommand {
    type Schema = CommandSchema;

    fn name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> CommandSchema {
        let mut schema = CommandSchema::new(&self.name, &self.description);

        schema.options.extend(self.groups.values().map(Dispatchable::schema));
        schema
            .options
            .extend(self.subcommands.values().map(Dispatchable::schema));
        schema.options.extend(self.arguments.iter().cloned());

        self.access.apply_to(&mut schema);
        schema
    }

    async fn dispatch(&self, interaction: &mut Interaction) -> Result<()> {
        if interaction.command_name != self.name {
            tracing::debug!(
                interaction = interaction.id,
                command = %self.name,
                "Command name mismatch, ignoring"
            );
            return Ok(());
        }

        let Some(target) = self.resolve(interaction) else {
            return Ok(());
        };

        // Only a resolved target is gated, so routing misses stay silent
        if !self.access.enforce(interaction) {
            return Ok(());
        }

        match target {
            Target::Own(handler) => run_handler(handler, interaction).await,
            Target::Group(group) => group.dispatch(interaction).await,
            Target::Subcommand(subcommand) => subcommand.dispatch(interaction).await,
        }
    }
}

/// Registered node an interaction resolves to below a `SlashCommand`
enum Target<'a> {
    Own(&'a dyn CommandHandler),
    Group(&'a SubcommandGroup),
    Subcommand(&'a Subcommand),
}

impl SlashCommand {
    /// Find the target named by the interaction, logging any miss
    fn resolve(&self, interaction: &Interaction) -> Option<Target<'_>> {
        let target = match (
            interaction.subcommand_group.as_deref(),
            interaction.subcommand.as_deref(),
        ) {
            (None, None) => self.handler.as_deref().map(Target::Own),
            (None, Some(subcommand)) => self.subcommands.get(subcommand).map(Target::Subcommand),
            (Some(group), subcommand) => self
                .groups
                .get(group)
                .filter(|g| subcommand.is_some_and(|s| g.get(s).is_some()))
                .map(Target::Group),
        };

        if target.is_none() {
            tracing::debug!(
                interaction = interaction.id,
                command = %self.name,
                group = ?interaction.subcommand_group,
                subcommand = ?interaction.subcommand,
                "Routing miss, ignoring"
            );
        }
        target
    }
}
