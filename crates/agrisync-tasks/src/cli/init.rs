/*
[INPUT]:  Interactive user input via CLI
[OUTPUT]: Generated YAML configuration file
[POS]:    CLI initialization layer
[UPDATE]: When AppConfig schema changes
*/

use std::path::PathBuf;

use agrisync_adapter::{DEFAULT_BASE_URL, Role};
use anyhow::{Context, Result};
use console::style;
use dialoguer::{Input, Select, theme::ColorfulTheme};

use agrisync_tasks::config::{ApiConfig, AppConfig, LoggingConfig, SessionConfig};

pub fn run_init(output: PathBuf) -> Result<()> {
    println!("{}", style("Welcome to AgriSync Tasks").bold().green());
    println!(
        "{}",
        style("This will guide you through connecting to an AgriSync backend.").dim()
    );

    let theme = ColorfulTheme::default();

    println!("\n{}", style("--- Backend ---").bold());
    let base_url: String = Input::with_theme(&theme)
        .with_prompt("API base URL")
        .default(DEFAULT_BASE_URL.to_string())
        .interact_text()?;

    let token: String = Input::with_theme(&theme)
        .with_prompt("API token (leave empty for none)")
        .allow_empty(true)
        .interact_text()?;

    println!("\n{}", style("--- Signed-in user ---").bold());
    let user_id: u64 = Input::with_theme(&theme)
        .with_prompt("User ID")
        .interact_text()?;

    let username: String = Input::with_theme(&theme)
        .with_prompt("Username")
        .interact_text()?;

    let roles = [Role::Worker, Role::Admin];
    let role_selection = Select::with_theme(&theme)
        .with_prompt("Role")
        .items(&roles.map(|role| role.as_str()))
        .default(0)
        .interact()?;

    let config = AppConfig {
        api: ApiConfig {
            base_url,
            token: Some(token).filter(|token| !token.trim().is_empty()),
            ..ApiConfig::default()
        },
        session: SessionConfig {
            user_id,
            username,
            role: roles[role_selection],
        },
        logging: LoggingConfig::default(),
    };

    config
        .save(&output)
        .context(format!("failed to write config to {}", output.display()))?;

    println!("\n{}", style("SUCCESS!").bold().green());
    println!(
        "Configuration written to: {}",
        style(output.display()).cyan()
    );

    Ok(())
}
