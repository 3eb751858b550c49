//! toolrun binary entry point.

use std::sync::Arc;

use clap::Parser;
use toolrun::batch::BatchRunner;
use toolrun::cli::Cli;
use toolrun::config::AgentConfig;
use toolrun::driver::ConversationDriver;
use toolrun::error::AgentError;
use toolrun::invoker::PluginInvoker;
use toolrun::provider::ernie::ErnieProvider;
use toolrun::rank::RerankServiceRanker;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toolrun=info".into()),
        )
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AgentError> {
    let mut config = AgentConfig::from_env();

    // CLI flags win over environment.
    if let Some(token) = cli.access_token {
        config.access_token = Some(token);
    }
    if let Some(key) = cli.api_key {
        config.api_key = Some(key);
    }
    if let Some(secret) = cli.secret_key {
        config.secret_key = Some(secret);
    }
    if let Some(url) = cli.plugin_base_url {
        config.plugin_base_url = url;
    }
    if let Some(url) = cli.rerank_base_url {
        config.rerank_base_url = url;
    }

    if config.plugin_base_url.is_empty() {
        return Err(AgentError::Configuration(
            "missing PLUGIN_BASE_URL (or --plugin-base-url)".to_string(),
        ));
    }
    if config.rerank_base_url.is_empty() {
        return Err(AgentError::Configuration(
            "missing RERANK_BASE_URL (or --rerank-base-url)".to_string(),
        ));
    }

    let provider = Arc::new(ErnieProvider::from_config(&config).await?);
    let invoker = Arc::new(PluginInvoker::new(config.plugin_base_url.clone()));
    let ranker = Arc::new(RerankServiceRanker::new(config.rerank_base_url.clone()));

    let driver = ConversationDriver::new(provider, invoker);
    let runner = BatchRunner::new(driver, ranker);
    runner
        .run(&cli.dataset, &cli.catalog, &cli.output, cli.top_k)
        .await
}
