//! Batch orchestration: dataset in, one answer line per query out.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::catalog::{self, ToolCatalog};
use crate::driver::ConversationDriver;
use crate::error::Result;
use crate::rank::SimilarityRanker;
use crate::types::QueryRecord;

/// Runs every query of a dataset through the conversation driver,
/// sequentially, appending one JSON line per query to the output log.
pub struct BatchRunner {
    driver: ConversationDriver,
    ranker: Arc<dyn SimilarityRanker>,
}

impl BatchRunner {
    pub fn new(driver: ConversationDriver, ranker: Arc<dyn SimilarityRanker>) -> Self {
        Self { driver, ranker }
    }

    /// Process `dataset_path` against `catalog_path`, appending answers to
    /// `output_path`. `k` is the retrieval budget per query.
    ///
    /// A catalog load failure is fatal and aborts the batch before any query
    /// runs. Chat-service failures only end the affected query's loop, so
    /// every query in the dataset produces exactly one output line.
    pub async fn run(
        &self,
        dataset_path: impl AsRef<Path>,
        catalog_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
        k: usize,
    ) -> Result<()> {
        let catalog = ToolCatalog::load(catalog_path)?;

        let raw = std::fs::read_to_string(dataset_path)?;
        let queries: Vec<QueryRecord> = serde_json::from_str(&raw)?;
        info!(queries = queries.len(), tools = catalog.len(), "batch start");

        let mut output = OpenOptions::new()
            .create(true)
            .append(true)
            .open(output_path)?;

        for record in queries {
            let tools = catalog.lookup(&record.query, k, self.ranker.as_ref()).await?;
            let (paths, schemas) = catalog::split(&tools);

            let answer = self
                .driver
                .run(&record.query, record.qid, &paths, &schemas)
                .await;

            let line = serde_json::to_string(&answer)?;
            writeln!(output, "{line}")?;
        }

        info!("batch complete");
        Ok(())
    }
}
