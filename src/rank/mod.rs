//! Similarity-ranking collaborator used by catalog retrieval.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AgentError, Result};
use crate::provider::http::shared_client;

/// Ranks candidate strings against a query.
///
/// Implementations return up to `k` indices into `candidates`, best first.
/// Tie-breaking is the implementation's own business.
#[async_trait]
pub trait SimilarityRanker: Send + Sync {
    async fn rank(&self, query: &str, candidates: &[String], k: usize) -> Result<Vec<usize>>;
}

#[derive(Serialize)]
struct RerankRequest<'a> {
    query: &'a str,
    documents: &'a [String],
}

#[derive(Deserialize)]
struct RerankResponse {
    results: Vec<RankedDocument>,
}

#[derive(Deserialize)]
struct RankedDocument {
    index: usize,
}

/// Ranker backed by an external rerank microservice.
///
/// POSTs `{query, documents}` to `<base_url>/rerank` and reads back
/// `{results: [{index, score, ...}]}`, already sorted best-first.
pub struct RerankServiceRanker {
    base_url: String,
}

impl RerankServiceRanker {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SimilarityRanker for RerankServiceRanker {
    async fn rank(&self, query: &str, candidates: &[String], k: usize) -> Result<Vec<usize>> {
        let url = format!("{}/rerank", self.base_url);
        let resp = shared_client()
            .post(&url)
            .json(&RerankRequest {
                query,
                documents: candidates,
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AgentError::RankService(format!(
                "rerank returned {status}: {body}"
            )));
        }

        let data: RerankResponse = resp.json().await?;
        let indices = data
            .results
            .into_iter()
            .map(|r| r.index)
            .filter(|&i| i < candidates.len())
            .take(k)
            .collect::<Vec<_>>();
        debug!(query, k, returned = indices.len(), "rerank complete");
        Ok(indices)
    }
}
