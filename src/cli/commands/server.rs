use clap::Subcommand;

use crate::cli::utils::{output_error, output_value};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Show server information from the API root endpoint")]
    Info {
        #[arg(long, help = "Server base URL (defaults to LIVEDOCS_URL or localhost)")]
        url: Option<String>,
    },

    #[command(about = "Check server health status from the /health endpoint")]
    Ping {
        #[arg(long, help = "Server base URL (defaults to LIVEDOCS_URL or localhost)")]
        url: Option<String>,
    },
}

pub async fn handle(cmd: ServerCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ServerCommands::Info { url } => fetch(&output_format, &base_url(url), "/", "Server info").await,
        ServerCommands::Ping { url } => fetch(&output_format, &base_url(url), "/health", "Server health").await,
    }
}

pub(super) fn base_url(url: Option<String>) -> String {
    url.or_else(|| std::env::var("LIVEDOCS_URL").ok())
        .unwrap_or_else(|| "http://localhost:3000".to_string())
        .trim_end_matches('/')
        .to_string()
}

async fn fetch(
    output_format: &OutputFormat,
    base_url: &str,
    path: &str,
    label: &str,
) -> anyhow::Result<()> {
    let client = reqwest::Client::new();

    match client.get(format!("{}{}", base_url, path)).send().await {
        Ok(response) => {
            let body = response.json::<serde_json::Value>().await?;
            output_value(output_format, label, &body)
        }
        Err(e) => output_error(output_format, &e.to_string(), Some("SERVER_UNREACHABLE")),
    }
}
