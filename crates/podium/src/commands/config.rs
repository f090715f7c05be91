use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();
    println!("{} {}", "Config file:".bold(), path.display());
    println!();
    print!("{}", render(&config));
    Ok(())
}

/// Effective values, written the way `config set` accepts them.
fn render(config: &Config) -> String {
    let rows = [
        ("defaults.theme", config.theme().unwrap_or("light")),
        ("defaults.aspect", config.aspect()),
        ("defaults.start_mode", config.start_mode().unwrap_or_default().name()),
    ];
    rows.iter()
        .map(|(key, value)| format!("  {key:<20} {}\n", value.cyan()))
        .collect()
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!("{} {key} = {value}", "Saved".green().bold());
    println!("  {}", path.display().to_string().dimmed());
    Ok(())
}
