//! Configuration inspection commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use inkwell_core::error::AppError;

/// Arguments for the config command
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the merged configuration
    Show,
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;

    match &args.command {
        ConfigCommand::Show => match format {
            OutputFormat::Json => output::print_json(&config),
            OutputFormat::Table => {
                println!("Server:");
                output::print_kv("Bind address", &config.server.bind_address());
                output::print_kv(
                    "Request timeout",
                    &format!("{}s", config.server.request_timeout_seconds),
                );
                println!("Database:");
                output::print_kv("Provider", &format!("{:?}", config.database.provider));
                output::print_kv(
                    "Max connections",
                    &config.database.max_connections.to_string(),
                );
                println!("Media:");
                output::print_kv("Root", &config.media.root);
                output::print_kv("URL prefix", &config.media.url_prefix);
                output::print_kv("Default profile", &config.media.default_profile_image);
                output::print_kv(
                    "Allowed extensions",
                    &config.media.allowed_extensions.join(", "),
                );
                println!("Feed:");
                output::print_kv(
                    "Comments per page",
                    &config.feed.comments_per_page.to_string(),
                );
                output::print_kv(
                    "Notifications per page",
                    &config.feed.notifications_per_page.to_string(),
                );
            }
        },
    }

    Ok(())
}
