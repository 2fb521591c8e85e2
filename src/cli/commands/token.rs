use clap::Subcommand;

use crate::auth::{generate_jwt, Claims};
use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum TokenCommands {
    #[command(about = "Mint a session token for a user (requires JWT_SECRET)")]
    Mint {
        #[arg(help = "Identity-provider user id")]
        user_id: String,
        #[arg(help = "User email (access-map key)")]
        email: String,
    },
}

pub async fn handle(cmd: TokenCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        TokenCommands::Mint { user_id, email } => {
            match generate_jwt(Claims::new(user_id, email)) {
                Ok(token) => output_success(
                    &output_format,
                    "Session token minted",
                    Some(serde_json::json!({ "token": token })),
                ),
                Err(e) => output_error(&output_format, &e.to_string(), Some("TOKEN_MINT_FAILED")),
            }
        }
    }
}
