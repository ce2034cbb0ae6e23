use crate::config::ClientConfig;
use crate::core::http::ApiClient;
use crate::core::paginate::Pager;
use crate::core::request::{ExtractionPipelineFilter, ItemsResponse, ItemsWithIgnore};
use crate::core::runs::ExtractionPipelineRuns;
use crate::core::upsert::{EndpointWriter, UpsertItems};
use crate::core::DeleteItems;
use crate::domain::model::{ExtractionPipeline, Item};
use crate::utils::error::Result;

const LIST_PATH: &str = "extpipes/list";
const BY_IDS_PATH: &str = "extpipes/byids";
const CREATE_PATH: &str = "extpipes";
const UPDATE_PATH: &str = "extpipes/update";
const DELETE_PATH: &str = "extpipes/delete";

/// The extraction pipelines resource endpoint.
///
/// Translates typed pipeline objects into request payloads, pages through
/// list responses and reconciles create-vs-update semantics on upsert. All
/// heavy lifting happens server-side; this binding is deliberately thin.
#[derive(Debug, Clone)]
pub struct ExtractionPipelines {
    client: ApiClient,
    config: ClientConfig,
}

impl ExtractionPipelines {
    pub(crate) fn new(client: ApiClient, config: ClientConfig) -> Self {
        Self { client, config }
    }

    /// Pages through all pipelines matching the filter. An empty
    /// (`Default`) filter lists everything in the project.
    pub fn list(&self, filter: ExtractionPipelineFilter) -> Result<Pager<ExtractionPipeline>> {
        Ok(Pager::new(
            self.client.clone(),
            LIST_PATH,
            serde_json::to_value(filter)?,
            self.config.list_limit,
        ))
    }

    /// Buffers the full filtered result set. Prefer `list` for large
    /// projects.
    pub async fn list_all(
        &self,
        filter: ExtractionPipelineFilter,
    ) -> Result<Vec<ExtractionPipeline>> {
        self.list(filter)?.fetch_all().await
    }

    /// Retrieves pipelines by id / external id.
    pub async fn retrieve(
        &self,
        items: &[Item],
        ignore_unknown_ids: bool,
    ) -> Result<Vec<ExtractionPipeline>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }
        let body = ItemsWithIgnore {
            items,
            ignore_unknown_ids,
        };
        let response: ItemsResponse<ExtractionPipeline> =
            self.client.post_json(BY_IDS_PATH, &body).await?;
        Ok(response.items)
    }

    /// Creates pipelines that are new and updates the ones that already
    /// exist, keyed on externalId / id. Update vs. replace behavior follows
    /// `ClientConfig::upsert_mode`.
    pub async fn upsert(
        &self,
        pipelines: &[ExtractionPipeline],
    ) -> Result<Vec<ExtractionPipeline>> {
        let create_writer = EndpointWriter::new(self.client.clone(), CREATE_PATH);
        let update_writer = EndpointWriter::new(self.client.clone(), UPDATE_PATH);
        let helper =
            UpsertItems::new(&create_writer, &update_writer).with_mode(self.config.upsert_mode);

        helper
            .upsert(pipelines)
            .await?
            .into_iter()
            .map(|v| serde_json::from_value(v).map_err(Into::into))
            .collect()
    }

    /// Deletes pipelines by id / external id and echoes the deleted items
    /// back.
    pub async fn delete(&self, items: &[Item], ignore_unknown_ids: bool) -> Result<Vec<Item>> {
        DeleteItems::new(self.client.clone(), DELETE_PATH)
            .ignore_unknown_ids(ignore_unknown_ids)
            .delete_items(items)
            .await
    }

    /// The runs sub-endpoint for pipelines in this project.
    pub fn runs(&self) -> ExtractionPipelineRuns {
        ExtractionPipelineRuns::new(self.client.clone(), self.config.list_limit)
    }
}
