// Startup module - displays banner and composition status
//
// Shows version info, the config file in use, the features composed into
// the shell, and where the analytics session log is written. Runs before
// the TUI takes over the screen (or in headless mode).

use crate::config::{Config, VERSION};
use crate::feature::FeatureRegistry;

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// Print the startup banner and composed feature list
pub fn print_startup(config: &Config, registry: &FeatureRegistry, session_id: &str) {
    use colors::*;

    // Banner
    println!();
    println!("  {BOLD}{CYAN}Wefriendz{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}Tabbed social client shell{RESET}");
    println!();

    // Config file status
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    println!();

    // Composed features, in tab display order
    println!("  {DIM}Composing features...{RESET}");
    for feature in registry.iter() {
        println!(
            "  {GREEN}✓{RESET} {} {BOLD}{}{RESET} {DIM}({}){RESET}",
            feature.tab_icon(),
            feature.title(),
            feature.id()
        );
    }
    if registry.is_empty() {
        println!("  {DIM}(no features registered){RESET}");
    }
    println!();

    // Collaborators
    println!("  {MAGENTA}▸{RESET} BFF at {BOLD}{}{RESET}", config.api_url);
    println!(
        "  {MAGENTA}▸{RESET} Analytics session {BOLD}{}{RESET} {DIM}(dir: {}){RESET}",
        session_id,
        config.log_dir.display()
    );
    println!();
}

/// Log the same status through tracing (for headless mode and log files)
pub fn log_startup(config: &Config, registry: &FeatureRegistry, session_id: &str) {
    tracing::info!("Wefriendz v{} starting", VERSION);
    for feature in registry.iter() {
        tracing::info!("Feature composed: {} ({})", feature.title(), feature.id());
    }
    tracing::info!("BFF: {}", config.api_url);
    tracing::info!(
        "Analytics session {} in {}",
        session_id,
        config.log_dir.display()
    );
}
