use crate::core::http::ApiClient;
use crate::core::request::{ItemsRequest, ItemsResponse};
use crate::domain::model::{ExtractionPipeline, Item, UpsertMode};
use crate::utils::error::{ExtPipesError, Result};
use async_trait::async_trait;
use serde_json::Value;

/// One write surface of a resource endpoint (create, update or delete path).
#[async_trait]
pub trait ItemWriter: Send + Sync {
    async fn write_items(&self, items: Vec<Value>) -> Result<Vec<Value>>;
}

/// `ItemWriter` over a plain `{items}` POST path.
pub struct EndpointWriter {
    client: ApiClient,
    path: String,
}

impl EndpointWriter {
    pub fn new(client: ApiClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
        }
    }
}

#[async_trait]
impl ItemWriter for EndpointWriter {
    async fn write_items(&self, items: Vec<Value>) -> Result<Vec<Value>> {
        let response: ItemsResponse<Value> = self
            .client
            .post_json(&self.path, &ItemsRequest { items })
            .await?;
        Ok(response.items)
    }
}

/// Mapping surface the upsert helper needs from a resource type.
pub trait UpsertItem {
    /// externalId first, then id; `None` means create-only.
    fn identity(&self) -> Option<Item>;
    fn to_insert_item(&self) -> Value;
    fn to_update_item(&self, mode: UpsertMode) -> Option<Value>;
}

impl UpsertItem for ExtractionPipeline {
    fn identity(&self) -> Option<Item> {
        ExtractionPipeline::identity(self)
    }

    fn to_insert_item(&self) -> Value {
        ExtractionPipeline::to_insert_item(self)
    }

    fn to_update_item(&self, mode: UpsertMode) -> Option<Value> {
        ExtractionPipeline::to_update_item(self, mode)
    }
}

/// Create-then-update reconciliation.
///
/// Everything creatable is first sent to the create writer. When the create
/// endpoint rejects the batch with a duplicate error, the duplicated
/// identities are rerouted to the update writer and the remainder is created
/// once more. Items carrying only a server-assigned id can never be created
/// and go straight to update.
pub struct UpsertItems<'a> {
    create_writer: &'a dyn ItemWriter,
    update_writer: &'a dyn ItemWriter,
    mode: UpsertMode,
}

impl<'a> UpsertItems<'a> {
    pub fn new(create_writer: &'a dyn ItemWriter, update_writer: &'a dyn ItemWriter) -> Self {
        Self {
            create_writer,
            update_writer,
            mode: UpsertMode::Update,
        }
    }

    pub fn with_mode(mut self, mode: UpsertMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns create results followed by update results, in server response
    /// order.
    pub async fn upsert<T: UpsertItem>(&self, items: &[T]) -> Result<Vec<Value>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        // Items with an id but no externalId cannot be created.
        let mut to_create: Vec<&T> = Vec::new();
        let mut to_update: Vec<&T> = Vec::new();
        for item in items {
            match item.identity() {
                Some(Item::Id { .. }) => to_update.push(item),
                _ => to_create.push(item),
            }
        }

        let mut created = Vec::new();
        if !to_create.is_empty() {
            let inserts: Vec<Value> = to_create.iter().map(|i| i.to_insert_item()).collect();
            match self.create_writer.write_items(inserts).await {
                Ok(mut items) => created.append(&mut items),
                Err(ExtPipesError::Api { duplicated, .. }) if !duplicated.is_empty() => {
                    tracing::info!(
                        "Create rejected {} duplicate(s), rerouting to update",
                        duplicated.len()
                    );

                    let (dupes, retry): (Vec<&T>, Vec<&T>) = to_create
                        .into_iter()
                        .partition(|i| matches!(i.identity(), Some(id) if duplicated.contains(&id)));
                    to_update.extend(dupes);

                    if !retry.is_empty() {
                        let inserts: Vec<Value> = retry.iter().map(|i| i.to_insert_item()).collect();
                        // A second duplicate rejection is surfaced as-is.
                        created.append(&mut self.create_writer.write_items(inserts).await?);
                    }
                }
                Err(e) => return Err(e),
            }
        }

        let mut updated = Vec::new();
        if !to_update.is_empty() {
            let updates = to_update
                .iter()
                .enumerate()
                .map(|(index, i)| {
                    i.to_update_item(self.mode)
                        .ok_or(ExtPipesError::MissingIdentity { index })
                })
                .collect::<Result<Vec<Value>>>()?;
            updated = self.update_writer.write_items(updates).await?;
        }

        tracing::info!(
            "Upserted {} item(s): {} created, {} updated",
            created.len() + updated.len(),
            created.len(),
            updated.len()
        );
        created.extend(updated);
        Ok(created)
    }
}
