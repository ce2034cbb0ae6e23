//! Typed client for the Cognite Data Fusion extraction pipelines endpoint:
//! list, retrieve, upsert and delete pipelines plus their runs, with cursor
//! pagination and create-vs-update reconciliation handled in the client.

pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{ClientConfig, Credentials, PipelinesFile};
pub use core::{
    CogniteExtPipes, ExtractionPipelineFilter, ExtractionPipelineRuns, ExtractionPipelines, Pager,
    RunFilter, TimeRange,
};
pub use domain::model::{
    Contact, ExtractionPipeline, ExtractionPipelineRun, Item, RawTable, RunStatus, UpsertMode,
};
pub use utils::error::{ExtPipesError, Result};
