//! Built-in command set served by the binary

pub mod echo;
pub mod ping;
pub mod settings;
pub mod whois;

use crate::config::Config;
use crate::dispatch::{CommandRegistry, Dispatchable};
use crate::guild_config::GuildConfigHolder;
use settings::WelcomeDefaults;
use std::sync::Arc;

/// Names of every built-in command, in registration order
pub const NAMES: [&str; 4] = ["ping", "echo", "whois", "config"];

/// Registry of the built-ins not disabled in `config`
pub fn registry(config: &Config) -> CommandRegistry {
    let welcome = Arc::new(GuildConfigHolder::new(
        config.guild_config_ttl(),
        WelcomeDefaults,
    ));

    let commands = [
        ping::command(),
        echo::command(),
        whois::command(),
        settings::command(welcome),
    ];

    CommandRegistry::new(
        commands
            .into_iter()
            .filter(|command| config.commands.is_enabled(command.name())),
    )
}
