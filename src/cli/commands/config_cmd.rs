//! Configuration display.

use console::style;

use crate::config::Config;

/// Print the effective configuration as TOML.
pub fn cmd_config(config: &Config) -> anyhow::Result<()> {
    match &config.source_path {
        Some(path) => println!("{}", style(format!("# Loaded from {}", path.display())).dim()),
        None => println!("{}", style("# No config file found, using defaults").dim()),
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
