use std::{io, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use search_core::{SearchClient, SearchSession};
use shared::domain::{PageNumber, SearchRequest, SearchTerm};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod view;

use commands::{dispatch, parse_line, Outcome, HELP};
use config::{load_settings, Settings};
use view::{spawn_renderer, SystemBrowser, TerminalView};

#[derive(Parser, Debug)]
#[command(name = "finder", about = "Search directory accounts by name")]
struct Args {
    /// Config file; defaults to ./finder.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    debounce_ms: Option<u64>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Live search driven by lines typed on stdin.
    Interactive,
    /// Fetch a single page and print it as JSON.
    Query {
        term: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    if let Some(debounce_ms) = args.debounce_ms {
        settings.debounce_ms = debounce_ms;
    }

    match args.command.unwrap_or(Command::Interactive) {
        Command::Interactive => run_interactive(&settings).await,
        Command::Query { term, page } => run_query(&settings, term, page).await,
    }
}

async fn run_query(settings: &Settings, term: String, page: u32) -> Result<()> {
    let page = PageNumber::new(page).context("page numbers start at 1")?;
    let client =
        SearchClient::new(&settings.client_settings()).context("failed to build search client")?;
    let result = client
        .fetch_page(&SearchRequest::new(SearchTerm::new(term), page))
        .await
        .context("search request failed")?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn run_interactive(settings: &Settings) -> Result<()> {
    let client =
        SearchClient::new(&settings.client_settings()).context("failed to build search client")?;
    info!(endpoint = %client.endpoint(), "starting interactive search");

    let (handle, session_task) =
        SearchSession::spawn(Arc::new(client), settings.controller_settings());
    let renderer = spawn_renderer(handle.subscribe(), TerminalView::new(io::stdout()));
    let opener = SystemBrowser;

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        match dispatch(&handle, &opener, parse_line(&line))? {
            Outcome::Continue => {}
            Outcome::Message(message) => println!("{message}"),
            Outcome::Quit => break,
        }
    }

    handle.shutdown()?;
    session_task.await.context("search session panicked")?;
    renderer.await.context("renderer panicked")?;
    Ok(())
}
