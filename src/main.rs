use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use cardsearch::api::create_router;
use cardsearch::config::Config;
use cardsearch::scoring::ScoringStrategy;
use cardsearch::search_service::SearchService;

#[derive(Parser, Debug)]
#[command(version, about = "Search proxy that re-ranks results into product cards")]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:8888")]
    bind: String,

    /// Directory holding the static frontend
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,

    /// Scoring strategy, overrides SCORING_STRATEGY
    #[arg(long)]
    strategy: Option<ScoringStrategy>,

    /// Upper bound on results in semantic mode, overrides MAX_CANDIDATES
    #[arg(long)]
    max_candidates: Option<u32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }
    if let Some(max) = args.max_candidates {
        config.max_candidates = max;
    }

    // Also receives `log` records through the tracing-log bridge.
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_target(true)
        .init();

    if config.search_credentials().is_none() {
        tracing::warn!("GOOGLE_API_KEY or GOOGLE_CX not set; searches will fail");
    }
    if config.strategy.needs_embeddings() && config.embedding_credentials().is_none() {
        tracing::warn!("OPENAI_API_KEY not set; semantic searches will fail");
    }

    let strategy = config.strategy;
    let service = Arc::new(SearchService::from_config(config)?);
    let app = create_router(service, &args.static_dir);

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;
    tracing::info!(%strategy, "listening on {}", args.bind);
    axum::serve(listener, app).await?;
    Ok(())
}
