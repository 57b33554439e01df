use anyhow::Result;
use axum::Router;
use clap::Parser;
use sitesearch::{EngineConfig, StopWords, SynonymTable};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};
use server::build_app;
use tokio::net::TcpListener;

#[derive(Parser)]
struct Args {
    /// Snapshot file to serve (and to write on commit)
    #[arg(long, default_value = "./index.json")]
    index: String,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// JSON object mapping words to synonym lists
    #[arg(long)]
    synonyms: Option<PathBuf>,
    /// JSON array of stop words
    #[arg(long)]
    stop_words: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let mut config = EngineConfig::default();
    if let Some(path) = &args.synonyms {
        config.synonyms = Arc::new(SynonymTable::load_json(path)?);
    }
    if let Some(path) = &args.stop_words {
        config.stop_words = Arc::new(StopWords::load_json(path)?);
    }
    let app: Router = build_app(args.index.clone(), config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
