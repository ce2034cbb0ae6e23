// Domain layer: wire DTOs for the extraction pipelines endpoint.

pub mod model;

pub use model::{
    Contact, ExtractionPipeline, ExtractionPipelineRun, Item, RawTable, RunStatus, UpsertMode,
};
