use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use crate::commands::Command;
use crate::docs_client::DEFAULT_API_BASE;
use crate::output::OutputFormat;
use crate::token_manager::DEFAULT_TOKEN_URL;

/// Command-line configuration for gdocs.
#[derive(Parser, Debug)]
#[command(name = "gdocs", version)]
#[command(about = "Edit tabbed documents through batched, index-addressed updates")]
pub struct Cli {
    /// Output format for results and errors
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Json,
        env = "GDOCS_OUTPUT"
    )]
    pub output: OutputFormat,

    /// Stored OAuth credentials [default: <config dir>/gdocs/credentials.json]
    #[arg(long, global = true, env = "GDOCS_CREDENTIALS")]
    pub credentials: Option<PathBuf>,

    /// Access token to use as-is instead of the stored credentials
    #[arg(long, global = true, env = "GDOCS_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Docs API base URL
    #[arg(long, global = true, default_value = DEFAULT_API_BASE, env = "GDOCS_API_BASE")]
    pub api_base: String,

    /// OAuth2 token endpoint
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_TOKEN_URL,
        env = "GDOCS_TOKEN_URL",
        hide = true
    )]
    pub token_url: String,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn credentials_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = &self.credentials {
            return Ok(path.clone());
        }
        let dir = dirs::config_dir()
            .context("cannot determine the user config directory; pass --credentials")?;
        Ok(dir.join("gdocs").join("credentials.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["gdocs", "tabs", "doc-1"]).unwrap();
        assert_eq!(cli.api_base, DEFAULT_API_BASE);
        assert_eq!(cli.token_url, DEFAULT_TOKEN_URL);
        assert!(cli.access_token.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "gdocs",
            "tabs",
            "doc-1",
            "--output",
            "text",
            "--credentials",
            "/tmp/creds.json",
        ])
        .unwrap();
        assert_eq!(cli.output, OutputFormat::Text);
        assert_eq!(
            cli.credentials_path().unwrap(),
            PathBuf::from("/tmp/creds.json")
        );
    }
}
