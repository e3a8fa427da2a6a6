// Startup module - banner and registered command overview
//
// Printed to stderr so stdout stays machine-readable for replay output.

use slashroute::config::{Config, VERSION};
use slashroute::dispatch::CommandRegistry;

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// Print the startup banner and the command table
pub fn print_startup(config: &Config, registry: &CommandRegistry) {
    use colors::*;

    eprintln!();
    eprintln!("  {BOLD}{CYAN}slashroute{RESET} {DIM}v{VERSION}{RESET}");
    eprintln!("  {DIM}Slash command router{RESET}");
    eprintln!();

    if let Some(path) = Config::config_path() {
        if path.exists() {
            eprintln!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            eprintln!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    eprintln!();

    eprintln!("  {DIM}Registering commands...{RESET}");
    for name in slashroute::builtins::NAMES {
        let enabled = registry.get(name).is_some();
        let (icon, style) = if enabled {
            (format!("{GREEN}✓{RESET}"), "")
        } else {
            (format!("{DIM}○{RESET}"), DIM)
        };
        let description = registry.get(name).map(|c| c.description()).unwrap_or("disabled");
        eprintln!("    {icon} {style}/{:<11}{RESET} {DIM}{}{RESET}", name, description);
    }
    eprintln!();

    eprintln!(
        "  {MAGENTA}▸{RESET} Guild settings cached for {BOLD}{}s{RESET}",
        config.guild_config_ttl_secs
    );
    eprintln!("  {MAGENTA}▸{RESET} Reading interactions from stdin");
    eprintln!();
}

/// Same overview through tracing, for file logs
pub fn log_startup(registry: &CommandRegistry) {
    tracing::info!(version = VERSION, "slashroute starting");
    for name in registry.names() {
        tracing::info!(command = name, "Registered");
    }
}
