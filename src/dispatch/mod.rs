//! Hierarchical command dispatch
//!
//! Incoming interactions are routed through three levels:
//!
//! ```text
//! CommandRegistry → SlashCommand → [SubcommandGroup →] Subcommand
//!                        └─ (no group / subcommand) → own handler
//! ```
//!
//! Every level implements [`Dispatchable`]: it has a name, describes itself
//! as a schema fragment for platform registration, and can attempt to handle
//! an interaction. Terminal targets (a [`Subcommand`], or a [`SlashCommand`]
//! invoked without group/subcommand) run a [`CommandHandler`] through the
//! same lifecycle:
//!
//! ```text
//! match name ─┬─ mismatch ─────────────────────────────→ done (no-op)
//!             └─ match → precondition ─┬─ responded ───→ done (short-circuit)
//!                                      └─ not responded → action → done
//! ```
//!
//! # Routing misses
//!
//! An unknown command, group or subcommand name is not an error. Dispatch
//! returns `Ok(())` without replying, which tolerates stale registrations on
//! the platform side.
//!
//! # Errors
//!
//! Hook errors are never caught here; they propagate to whoever called
//! `dispatch`.

mod access;
mod group;
mod registry;
mod slash;
mod subcommand;

#[cfg(test)]
mod testing;

pub use access::{AccessConfig, AccessDenial};
pub use group::SubcommandGroup;
pub use registry::CommandRegistry;
pub use slash::SlashCommand;
pub use subcommand::Subcommand;

use crate::interaction::Interaction;
use anyhow::Result;
use async_trait::async_trait;
use indexmap::IndexMap;

// ============================================================================
// Handler hooks
// ============================================================================

/// Behavior of a terminal dispatch target
///
/// `precondition` runs first. To stop dispatch it must reply to the
/// interaction (usually with a failure embed); returning `Ok(())` without
/// replying lets `action` run. Returning `Err` aborts dispatch and the error
/// reaches the caller.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Validation / authorization step. Defaults to a no-op.
    async fn precondition(&self, _interaction: &mut Interaction) -> Result<()> {
        Ok(())
    }

    /// The command's actual behavior
    async fn action(&self, interaction: &mut Interaction) -> Result<()>;
}

/// Run `handler` through the precondition → action lifecycle
pub(crate) async fn run_handler(
    handler: &dyn CommandHandler,
    interaction: &mut Interaction,
) -> Result<()> {
    handler.precondition(interaction).await?;

    // The precondition may have answered on its own (failed check, early reply)
    if interaction.responded() {
        tracing::debug!(
            interaction = interaction.id,
            "Precondition responded, skipping action"
        );
        return Ok(());
    }

    handler.action(interaction).await
}

// ============================================================================
// Dispatchable
// ============================================================================

/// A named routing node that can describe itself and handle interactions
#[async_trait]
pub trait Dispatchable: Send + Sync {
    /// Schema fragment type produced for registration
    type Schema;

    /// Name this node is registered under; constant after construction
    fn name(&self) -> &str;

    /// Registration description of this node and everything below it
    fn schema(&self) -> Self::Schema;

    /// Attempt to handle `interaction`
    async fn dispatch(&self, interaction: &mut Interaction) -> Result<()>;
}

/// Name-keyed child table; iteration follows first-insertion order
pub(crate) type Table<D> = IndexMap<String, D>;

/// Insert `child` under its own name, replacing any earlier entry
pub(crate) fn insert_child<D: Dispatchable>(table: &mut Table<D>, child: D) {
    let name = child.name().to_string();
    if table.insert(name.clone(), child).is_some() {
        tracing::debug!(name = %name, "Replaced earlier registration with the same name");
    }
}

/// Delegate to the child registered as `name`, or do nothing
pub(crate) async fn route<D: Dispatchable>(
    table: &Table<D>,
    level: &'static str,
    name: Option<&str>,
    interaction: &mut Interaction,
) -> Result<()> {
    let Some(name) = name else {
        tracing::debug!(interaction = interaction.id, level, "No {} named, ignoring", level);
        return Ok(());
    };

    match table.get(name) {
        Some(child) => child.dispatch(interaction).await,
        None => {
            tracing::debug!(
                interaction = interaction.id,
                level,
                name,
                "Routing miss: unknown {} '{}'",
                level,
                name
            );
            Ok(())
        }
    }
}
