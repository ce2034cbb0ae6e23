use crate::core::http::ApiClient;
use crate::core::request::{ItemsResponse, ListRequest};
use crate::utils::error::Result;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;

/// Cursor-driven pager over a `list` style endpoint. One page is held in
/// memory at a time; the cursor is treated as an opaque token and echoed back
/// verbatim.
#[derive(Debug)]
pub struct Pager<T> {
    client: ApiClient,
    path: String,
    filter: Value,
    limit: usize,
    cursor: Option<String>,
    exhausted: bool,
    _item: PhantomData<T>,
}

impl<T: DeserializeOwned> Pager<T> {
    pub(crate) fn new(client: ApiClient, path: impl Into<String>, filter: Value, limit: usize) -> Self {
        Self {
            client,
            path: path.into(),
            filter,
            limit,
            cursor: None,
            exhausted: false,
            _item: PhantomData,
        }
    }

    /// Fetches the next page, or `None` once the server stops returning a
    /// cursor. A response with items but no cursor is the final page.
    pub async fn next_page(&mut self) -> Result<Option<Vec<T>>> {
        if self.exhausted {
            return Ok(None);
        }

        let request = ListRequest {
            filter: &self.filter,
            limit: self.limit,
            cursor: self.cursor.take(),
        };
        let response: ItemsResponse<T> = self.client.post_json(&self.path, &request).await?;

        self.cursor = response.next_cursor;
        if self.cursor.is_none() {
            self.exhausted = true;
        }
        tracing::debug!(
            "{}: page of {} item(s), more={}",
            self.path,
            response.items.len(),
            !self.exhausted
        );

        if response.items.is_empty() && self.exhausted {
            return Ok(None);
        }
        Ok(Some(response.items))
    }

    /// Drains the pager into a single buffer. Prefer `next_page` for large
    /// result sets.
    pub async fn fetch_all(mut self) -> Result<Vec<T>> {
        let mut all = Vec::new();
        while let Some(mut page) = self.next_page().await? {
            all.append(&mut page);
        }
        Ok(all)
    }
}
