//! Hierarchical slash-command routing
//!
//! Commands form a three-level tree (command, optional group, subcommand).
//! The [`dispatch::CommandRegistry`] routes each incoming
//! [`interaction::Interaction`] down that tree by name and runs the matched
//! handler's precondition and action hooks. The same tree exports the
//! registration schema the platform needs.

pub mod builtins;
pub mod checks;
pub mod config;
pub mod dispatch;
pub mod guild_config;
pub mod interaction;
pub mod logging;
pub mod permissions;
pub mod replay;
pub mod reply;
pub mod schema;
pub mod util;
