use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

/// Reference to an extraction pipeline (or run) by server-assigned id or
/// client-assigned external id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Item {
    Id { id: i64 },
    ExternalId {
        #[serde(rename = "externalId")]
        external_id: String,
    },
}

impl Item {
    pub fn id(id: i64) -> Self {
        Item::Id { id }
    }

    pub fn external_id(external_id: impl Into<String>) -> Self {
        Item::ExternalId {
            external_id: external_id.into(),
        }
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Item::Id { id } => write!(f, "id={}", id),
            Item::ExternalId { external_id } => write!(f, "externalId={}", external_id),
        }
    }
}

/// How `upsert` patches existing pipelines: `Update` only touches fields that
/// are set on the input object, `Replace` overwrites the full object and
/// nulls out unset optional fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertMode {
    #[default]
    Update,
    Replace,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_notification: Option<bool>,
}

/// Pointer to a raw table the pipeline writes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTable {
    pub db_name: String,
    pub table_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionPipeline {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_set_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_tables: Option<Vec<RawTable>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts: Option<Vec<Contact>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    // Server-populated fields, never part of write payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_success: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_failure: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated_time: Option<i64>,
}

impl ExtractionPipeline {
    /// Identity used for create-vs-update reconciliation: externalId first,
    /// then id. `None` means the object can only be created.
    pub fn identity(&self) -> Option<Item> {
        if let Some(external_id) = &self.external_id {
            Some(Item::external_id(external_id.clone()))
        } else {
            self.id.map(Item::id)
        }
    }

    /// Create payload: the writable fields only.
    pub fn to_insert_item(&self) -> Value {
        let mut obj = Map::new();
        insert_opt(&mut obj, "externalId", &self.external_id);
        insert_opt(&mut obj, "name", &self.name);
        insert_opt(&mut obj, "description", &self.description);
        insert_opt(&mut obj, "dataSetId", &self.data_set_id);
        insert_opt(&mut obj, "rawTables", &self.raw_tables);
        insert_opt(&mut obj, "schedule", &self.schedule);
        insert_opt(&mut obj, "contacts", &self.contacts);
        insert_opt(&mut obj, "metadata", &self.metadata);
        insert_opt(&mut obj, "source", &self.source);
        insert_opt(&mut obj, "documentation", &self.documentation);
        insert_opt(&mut obj, "createdBy", &self.created_by);
        Value::Object(obj)
    }

    /// Update payload: `{id|externalId, update: {field: {set}|{setNull}}}`.
    ///
    /// In `Update` mode unset fields are left untouched on the server; in
    /// `Replace` mode they are nulled out. `name` has no setNull form on the
    /// remote, so it is only ever patched when set.
    pub fn to_update_item(&self, mode: UpsertMode) -> Option<Value> {
        let mut update = Map::new();
        patch_set(&mut update, "name", &self.name);
        patch(&mut update, mode, "description", &self.description);
        patch(&mut update, mode, "dataSetId", &self.data_set_id);
        patch(&mut update, mode, "rawTables", &self.raw_tables);
        patch(&mut update, mode, "schedule", &self.schedule);
        patch(&mut update, mode, "contacts", &self.contacts);
        patch(&mut update, mode, "metadata", &self.metadata);
        patch(&mut update, mode, "source", &self.source);
        patch(&mut update, mode, "documentation", &self.documentation);

        let mut obj = Map::new();
        match self.identity()? {
            Item::ExternalId { external_id } => {
                obj.insert("externalId".into(), json!(external_id));
            }
            Item::Id { id } => {
                obj.insert("id".into(), json!(id));
            }
        }
        obj.insert("update".into(), Value::Object(update));
        Some(Value::Object(obj))
    }
}

fn insert_opt<T: Serialize>(obj: &mut Map<String, Value>, key: &str, value: &Option<T>) {
    if let Some(v) = value {
        obj.insert(key.to_string(), json!(v));
    }
}

fn patch_set<T: Serialize>(update: &mut Map<String, Value>, key: &str, value: &Option<T>) {
    if let Some(v) = value {
        update.insert(key.to_string(), json!({ "set": v }));
    }
}

fn patch<T: Serialize>(
    update: &mut Map<String, Value>,
    mode: UpsertMode,
    key: &str,
    value: &Option<T>,
) {
    match (value, mode) {
        (Some(v), _) => {
            update.insert(key.to_string(), json!({ "set": v }));
        }
        (None, UpsertMode::Replace) => {
            update.insert(key.to_string(), json!({ "setNull": true }));
        }
        (None, UpsertMode::Update) => {}
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Failure,
    Seen,
}

impl std::str::FromStr for RunStatus {
    type Err = crate::utils::error::ExtPipesError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "success" => Ok(RunStatus::Success),
            "failure" => Ok(RunStatus::Failure),
            "seen" => Ok(RunStatus::Seen),
            other => Err(crate::utils::error::ExtPipesError::Validation {
                field: "status".to_string(),
                value: other.to_string(),
                reason: "Expected success, failure or seen".to_string(),
            }),
        }
    }
}

/// A single status report from an extractor, attached to its pipeline via
/// the pipeline's external id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionPipelineRun {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub status: RunStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_time: Option<i64>,
}
