use clap::Subcommand;

use super::server::base_url;
use crate::cli::utils::{output_error, output_value};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum DocsCommands {
    #[command(about = "List documents for the authenticated user")]
    List {
        #[arg(long, help = "Session token (defaults to LIVEDOCS_TOKEN)")]
        token: Option<String>,
        #[arg(long, help = "Server base URL (defaults to LIVEDOCS_URL or localhost)")]
        url: Option<String>,
    },

    #[command(about = "Create a new document owned by the authenticated user")]
    Create {
        #[arg(long, help = "Session token (defaults to LIVEDOCS_TOKEN)")]
        token: Option<String>,
        #[arg(long, help = "Server base URL (defaults to LIVEDOCS_URL or localhost)")]
        url: Option<String>,
    },
}

pub async fn handle(cmd: DocsCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        DocsCommands::List { token, url } => {
            request(&output_format, reqwest::Method::GET, &base_url(url), token, "Documents").await
        }
        DocsCommands::Create { token, url } => {
            request(&output_format, reqwest::Method::POST, &base_url(url), token, "Created document").await
        }
    }
}

async fn request(
    output_format: &OutputFormat,
    method: reqwest::Method,
    base_url: &str,
    token: Option<String>,
    label: &str,
) -> anyhow::Result<()> {
    let Some(token) = token.or_else(|| std::env::var("LIVEDOCS_TOKEN").ok()) else {
        return output_error(output_format, "No session token given (use --token or LIVEDOCS_TOKEN)", Some("MISSING_TOKEN"));
    };

    let client = reqwest::Client::new();

    match client
        .request(method, format!("{}/api/documents", base_url))
        .bearer_auth(token)
        .send()
        .await
    {
        Ok(response) => {
            let body = response.json::<serde_json::Value>().await?;
            output_value(output_format, label, &body)
        }
        Err(e) => output_error(output_format, &e.to_string(), Some("SERVER_UNREACHABLE")),
    }
}
