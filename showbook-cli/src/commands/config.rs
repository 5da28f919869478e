//! `showbook config` - inspect and create the config file

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use showbook_core::config::CONFIG_TEMPLATE;
use showbook_core::ShowbookConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Print the effective configuration as TOML
    Show,
    /// Write a commented config file
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    let config_path = ShowbookConfig::config_path();
    match args.command {
        ConfigCommands::Path => {
            println!("{}", config_path.display());
            Ok(())
        }
        ConfigCommands::Show => run_show(&config_path),
        ConfigCommands::Init(args) => run_init(&config_path, args.force),
    }
}

fn run_show(config_path: &Path) -> Result<()> {
    let config = ShowbookConfig::load_from(config_path)?;
    print!("{}", config.to_toml()?);
    Ok(())
}

fn run_init(config_path: &Path, force: bool) -> Result<()> {
    write_template(config_path, force)?;
    println!("Created config at: {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit the config: $EDITOR {}", config_path.display());
    println!("  2. Set [database] url or export DATABASE_URL");
    println!("  3. Run: showbook migrate && showbook serve");
    Ok(())
}

fn write_template(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {}\n\nUse --force to overwrite",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(config_path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        write_template(&path, false).unwrap();
        let config = ShowbookConfig::load_from(&path).unwrap();
        assert_eq!(config, ShowbookConfig::default());
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\ncors_permissive = true\n").unwrap();

        let err = write_template(&path, false).unwrap_err();
        assert!(err.to_string().contains("--force"));

        write_template(&path, true).unwrap();
        let config = ShowbookConfig::load_from(&path).unwrap();
        assert!(!config.server.cors_permissive);
    }
}
