//! CLI surface for the toolrun binary.

use clap::Parser;

/// Retrieval-augmented tool-calling agent runner.
#[derive(Parser, Debug)]
#[command(name = "toolrun", version, about = "Run a tool-using agent over a query dataset")]
pub struct Cli {
    /// Path to the input dataset (JSON array of {query, qid})
    #[arg(long, default_value = "dataset.json")]
    pub dataset: String,

    /// Path to the tool catalog (JSON lines, one tool per line)
    #[arg(long, default_value = "api_list.json")]
    pub catalog: String,

    /// Path the answer log is appended to
    #[arg(long, default_value = "result.json")]
    pub output: String,

    /// Number of tools retrieved per query
    #[arg(long, default_value_t = 5)]
    pub top_k: usize,

    /// Chat-service access token (overrides ERNIE_ACCESS_TOKEN)
    #[arg(long)]
    pub access_token: Option<String>,

    /// Chat-service API key (overrides ERNIE_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Chat-service secret key (overrides ERNIE_SECRET_KEY)
    #[arg(long)]
    pub secret_key: Option<String>,

    /// Plugin host base URL (overrides PLUGIN_BASE_URL)
    #[arg(long)]
    pub plugin_base_url: Option<String>,

    /// Rerank service base URL (overrides RERANK_BASE_URL)
    #[arg(long)]
    pub rerank_base_url: Option<String>,
}
