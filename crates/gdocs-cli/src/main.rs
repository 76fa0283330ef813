mod commands;
mod config;
mod docs_client;
mod output;
mod token_manager;

use std::process::ExitCode;

use clap::Parser;
use gdocs_core::compose::ResultMap;
use gdocs_core::{DocsEditor, DocsError};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use config::Cli;
use docs_client::{DocsClient, TokenSource};
use output::{render, render_error};
use token_manager::TokenManager;

async fn run(cli: Cli) -> anyhow::Result<ResultMap> {
    let tokens = match cli.access_token.clone() {
        Some(token) => TokenSource::Static(token),
        None => {
            let path = cli.credentials_path()?;
            debug!("Using stored credentials at {}", path.display());
            TokenSource::Managed(TokenManager::new(path, cli.token_url.clone()))
        }
    };
    let editor = DocsEditor::new(DocsClient::new(cli.api_base.clone(), tokens));
    commands::run(cli.command, &editor).await
}

/// 2 for input rejected locally, 1 for everything else.
fn exit_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<DocsError>() {
        Some(e) if e.is_local() => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // stdout carries only the result
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let format = cli.output;

    match run(cli).await {
        Ok(result) => {
            println!("{}", render(&result, format));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", render_error(&err, format));
            exit_code(&err)
        }
    }
}
