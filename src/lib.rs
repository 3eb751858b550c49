//! toolrun — retrieval-augmented tool-calling agent runner.
//!
//! Given a user query, retrieves the most relevant tools from a catalog via
//! an external similarity service, then drives a hosted chat-completion model
//! through a multi-turn function-calling loop, invoking tool HTTP endpoints
//! and feeding their responses back until an answer is produced or the turn
//! cap is reached.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use toolrun::batch::BatchRunner;
//! use toolrun::config::AgentConfig;
//! use toolrun::driver::ConversationDriver;
//! use toolrun::invoker::PluginInvoker;
//! use toolrun::provider::ernie::ErnieProvider;
//! use toolrun::rank::RerankServiceRanker;
//!
//! # async fn example() -> toolrun::error::Result<()> {
//! let config = AgentConfig::from_env();
//! let provider = Arc::new(ErnieProvider::from_config(&config).await?);
//! let invoker = Arc::new(PluginInvoker::new(config.plugin_base_url.clone()));
//! let ranker = Arc::new(RerankServiceRanker::new(config.rerank_base_url.clone()));
//!
//! let runner = BatchRunner::new(ConversationDriver::new(provider, invoker), ranker);
//! runner.run("dataset.json", "api_list.json", "result.json", 5).await?;
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod invoker;
pub mod provider;
pub mod rank;
pub mod types;
