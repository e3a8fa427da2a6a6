//! Terminal subcommand

use super::{run_handler, CommandHandler, Dispatchable};
use crate::interaction::Interaction;
use crate::schema::OptionSchema;
use anyhow::Result;
use async_trait::async_trait;

/// A subcommand: the leaf of the routing tree
///
/// Matches its name against the interaction's subcommand field, then runs
/// its handler's precondition and action.
pub struct Subcommand {
    name: String,
    description: String,
    arguments: Vec<OptionSchema>,
    handler: Box<dyn CommandHandler>,
}

impl Subcommand {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: impl CommandHandler + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            arguments: Vec::new(),
            handler: Box::new(handler),
        }
    }

    /// Declare a value argument in the registration schema
    pub fn argument(mut self, argument: OptionSchema) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[async_trait]
impl Dispatchable for Subcommand {
    type Schema = OptionSchema;

    fn name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> OptionSchema {
        OptionSchema::subcommand(&self.name, &self.description, self.arguments.clone())
    }

    async fn dispatch(&self, interaction: &mut Interaction) -> Result<()> {
        if interaction.subcommand.as_deref() != Some(self.name.as_str()) {
            tracing::debug!(
                interaction = interaction.id,
                subcommand = %self.name,
                "Subcommand name mismatch, ignoring"
            );
            return Ok(());
        }

        run_handler(self.handler.as_ref(), interaction).await
    }
}
