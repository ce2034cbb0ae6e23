use crate::core::http::ApiClient;
use crate::core::paginate::Pager;
use crate::core::request::{ItemsRequest, ItemsResponse, RunFilter};
use crate::domain::model::ExtractionPipelineRun;
use crate::utils::error::Result;

const LIST_PATH: &str = "extpipes/runs/list";
const CREATE_PATH: &str = "extpipes/runs";

/// The extraction pipeline runs sub-endpoint: status reports extractors file
/// against their pipeline.
#[derive(Debug, Clone)]
pub struct ExtractionPipelineRuns {
    client: ApiClient,
    list_limit: usize,
}

impl ExtractionPipelineRuns {
    pub(crate) fn new(client: ApiClient, list_limit: usize) -> Self {
        Self { client, list_limit }
    }

    /// Pages through the runs of one pipeline. The remote requires the
    /// pipeline's external id in the filter.
    pub fn list(&self, filter: RunFilter) -> Result<Pager<ExtractionPipelineRun>> {
        Ok(Pager::new(
            self.client.clone(),
            LIST_PATH,
            serde_json::to_value(filter)?,
            self.list_limit,
        ))
    }

    pub async fn list_all(&self, filter: RunFilter) -> Result<Vec<ExtractionPipelineRun>> {
        self.list(filter)?.fetch_all().await
    }

    /// Reports new runs. Each run references its pipeline via `external_id`.
    pub async fn create(
        &self,
        runs: &[ExtractionPipelineRun],
    ) -> Result<Vec<ExtractionPipelineRun>> {
        if runs.is_empty() {
            return Ok(Vec::new());
        }
        let body = ItemsRequest {
            items: runs.to_vec(),
        };
        let response: ItemsResponse<ExtractionPipelineRun> =
            self.client.post_json(CREATE_PATH, &body).await?;
        tracing::info!("Reported {} run(s)", response.items.len());
        Ok(response.items)
    }
}
