use crate::domain::model::{Item, RunStatus};
use serde::{Deserialize, Serialize};

/// Filter body for `extpipes/list`. An all-`None` filter lists everything.
///
/// The endpoint has no partition parameter; listing is single-stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionPipelineFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_set_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

/// Closed or half-open epoch-millisecond interval.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

/// Filter body for `extpipes/runs/list`. The remote requires the parent
/// pipeline's external id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunFilter {
    pub external_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statuses: Option<Vec<RunStatus>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_time: Option<TimeRange>,
}

impl RunFilter {
    pub fn for_pipeline(external_id: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            statuses: None,
            created_time: None,
        }
    }
}

/// Paginated list request: `{filter, limit, cursor}`.
#[derive(Debug, Clone, Serialize)]
pub struct ListRequest<F: Serialize> {
    pub filter: F,
    pub limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// Items envelope used by create/update/delete style calls.
#[derive(Debug, Clone, Serialize)]
pub struct ItemsRequest<T: Serialize> {
    pub items: Vec<T>,
}

/// Body for `byids` and `delete`: items plus the unknown-id policy flag.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemsWithIgnore<'a> {
    pub items: &'a [Item],
    pub ignore_unknown_ids: bool,
}

/// Every list/create/retrieve response wraps its payload in `items`; list
/// responses add an opaque `nextCursor` while more pages remain.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemsResponse<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}
