use crate::core::http::ApiClient;
use crate::core::request::ItemsWithIgnore;
use crate::domain::model::Item;
use crate::utils::error::Result;
use serde_json::Value;

/// Delete-by-items helper. The remote answers an empty object; the input
/// items are echoed back so callers can log what was removed.
pub struct DeleteItems {
    client: ApiClient,
    path: String,
    ignore_unknown_ids: bool,
}

impl DeleteItems {
    pub fn new(client: ApiClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            ignore_unknown_ids: false,
        }
    }

    pub fn ignore_unknown_ids(mut self, ignore: bool) -> Self {
        self.ignore_unknown_ids = ignore;
        self
    }

    pub async fn delete_items(&self, items: &[Item]) -> Result<Vec<Item>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }
        let body = ItemsWithIgnore {
            items,
            ignore_unknown_ids: self.ignore_unknown_ids,
        };
        let _: Value = self.client.post_json(&self.path, &body).await?;
        tracing::info!("{}: deleted {} item(s)", self.path, items.len());
        Ok(items.to_vec())
    }
}
