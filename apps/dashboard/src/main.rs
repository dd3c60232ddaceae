use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{DashboardSession, DirectoryOutcome, GenerationOutcome};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod panels;
mod settings;

use settings::load_settings;

#[derive(Parser, Debug)]
#[command(about = "PostVelocity dashboard in the terminal")]
struct Args {
    /// Backend base url; overrides the settings file and environment.
    #[arg(long)]
    backend_url: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Company to generate content for.
    #[arg(long)]
    company: Option<String>,
    /// One of content, analytics, media, calendar, automation, training.
    #[arg(long)]
    tab: Option<String>,
    #[arg(long, conflicts_with = "smart_generate")]
    topic: Option<String>,
    #[arg(long)]
    smart_generate: bool,
    #[arg(long)]
    check_health: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(url) = args.backend_url {
        settings.backend_url = url;
    }
    if let Some(secs) = args.timeout_secs {
        settings.request_timeout_secs = secs;
    }
    let config = settings.client_config()?;
    info!(backend_url = config.base_url(), "starting dashboard session");

    let session = DashboardSession::connect(config).context("failed to build http client")?;

    if args.check_health {
        match session.health().await {
            Ok(health) => println!(
                "backend {}: {}",
                health.status,
                health.message.unwrap_or_default()
            ),
            Err(err) => println!("backend unavailable: {err}"),
        }
    }

    let startup = session.spawn_company_load();
    if let Some(company) = args.company.or(settings.company_id) {
        session.set_selected_company(company).await;
    }
    if let Some(tab) = args.tab.as_deref() {
        if session.select_tab(tab).await.is_err() {
            warn!(tab, "unknown tab; staying on the current one");
        }
    }
    if let DirectoryOutcome::Failed(err) = startup.await.context("company load task panicked")? {
        warn!(error = %err, "continuing without company directory");
    }

    let generation = if args.smart_generate {
        Some(session.smart_generate().await)
    } else if let Some(topic) = args.topic.as_deref() {
        Some(session.generate_into_view(topic).await)
    } else {
        None
    };
    if let Some(GenerationOutcome::Generated(items)) = &generation {
        info!(items = items.len(), "content ready");
    }

    print!("{}", panels::render(&session.snapshot().await));
    session.shutdown();
    Ok(())
}
