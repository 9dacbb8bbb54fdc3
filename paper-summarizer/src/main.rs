use anyhow::{Context, Result};
use clap::Parser;
use paper_summarizer::config::{load_config_list, LlmSettings};
use paper_summarizer::{
    build_router, AppState, FetchConfig, Fetcher, LlmAdapter, MockLlmAdapter,
    OpenAiCompatibleAdapter, Summarizer, SummaryPipeline,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "paper-summarizer", version, about = "Summarize Atom paper feeds with an LLM")]
struct Args {
    /// Address to listen on
    #[arg(long, env = "SUMMARIZER_BIND", default_value = "127.0.0.1:5000")]
    bind: SocketAddr,

    /// Model config list (overridden by the OAI_CONFIG_LIST variable)
    #[arg(long, default_value = "OAI_CONFIG_LIST.json")]
    config_list: PathBuf,

    #[arg(long, default_value_t = 600)]
    llm_timeout_secs: u64,

    #[arg(long, default_value_t = 44)]
    seed: u64,

    #[arg(long, default_value_t = 0.0)]
    temperature: f32,

    /// Replace the summarizer instruction with the contents of this file
    #[arg(long)]
    instruction_file: Option<PathBuf>,

    /// Do not fetch and scrape the page before fetching the feed
    #[arg(long)]
    skip_page_scrape: bool,

    /// Answer every request with this text instead of calling a model
    #[arg(long)]
    mock_reply: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("paper_summarizer=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let adapter: Arc<dyn LlmAdapter> = match &args.mock_reply {
        Some(reply) => {
            warn!("Using mock LLM adapter; no model will be called");
            Arc::new(MockLlmAdapter::replying(reply.clone()))
        }
        None => {
            let endpoints = load_config_list(&args.config_list)
                .context("Failed to load model configuration")?;
            let settings = LlmSettings {
                timeout_seconds: args.llm_timeout_secs,
                seed: Some(args.seed),
                temperature: args.temperature,
            };
            let endpoint = endpoints.into_iter().next().context("Config list is empty")?;
            Arc::new(OpenAiCompatibleAdapter::new(endpoint, settings)?)
        }
    };

    let summarizer = match &args.instruction_file {
        Some(path) => {
            let instruction = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read instruction file {}", path.display()))?;
            Summarizer::with_instruction(adapter, instruction.trim())
        }
        None => Summarizer::new(adapter),
    };

    let fetcher = Fetcher::new(&FetchConfig::default())?;
    let pipeline = SummaryPipeline::new(fetcher, summarizer).with_page_scrape(!args.skip_page_scrape);
    let app = build_router(AppState::new(pipeline));

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;
    info!("Listening on {}", args.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
