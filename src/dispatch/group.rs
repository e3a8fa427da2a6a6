//! Subcommand groups

use super::{insert_child, route, Dispatchable, Subcommand, Table};
use crate::interaction::Interaction;
use crate::schema::OptionSchema;
use anyhow::Result;
use async_trait::async_trait;

/// A named group of subcommands (`/config welcome enable`)
///
/// A group is never a terminal target: it only forwards to the subcommand
/// named in the interaction. A missing or unknown subcommand is a no-op.
pub struct SubcommandGroup {
    name: String,
    description: String,
    subcommands: Table<Subcommand>,
}

impl SubcommandGroup {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            subcommands: Table::new(),
        }
    }

    /// Add a subcommand, replacing any earlier one with the same name
    pub fn subcommand(mut self, subcommand: Subcommand) -> Self {
        insert_child(&mut self.subcommands, subcommand);
        self
    }

    /// Add several subcommands in order
    pub fn subcommands(self, subcommands: impl IntoIterator<Item = Subcommand>) -> Self {
        subcommands.into_iter().fold(self, Self::subcommand)
    }

    pub fn get(&self, name: &str) -> Option<&Subcommand> {
        self.subcommands.get(name)
    }

    pub fn len(&self) -> usize {
        self.subcommands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subcommands.is_empty()
    }
}

#[async_trait]
impl Dispatchable for SubcommandGroup {
    type Schema = OptionSchema;

    fn name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> OptionSchema {
        let subcommands = self.subcommands.values().map(Dispatchable::schema).collect();
        OptionSchema::group(&self.name, &self.description, subcommands)
    }

    async fn dispatch(&self, interaction: &mut Interaction) -> Result<()> {
        // A missing subcommand is a silent miss here, not an error
        let subcommand = interaction.subcommand.clone();
        route(&self.subcommands, "subcommand", subcommand.as_deref(), interaction).await
    }
}
