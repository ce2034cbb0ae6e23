pub mod client;
pub mod delete;
pub mod extraction_pipelines;
pub mod http;
pub mod paginate;
pub mod request;
pub mod runs;
pub mod upsert;

pub use client::CogniteExtPipes;
pub use delete::DeleteItems;
pub use extraction_pipelines::ExtractionPipelines;
pub use paginate::Pager;
pub use request::{ExtractionPipelineFilter, RunFilter, TimeRange};
pub use runs::ExtractionPipelineRuns;
pub use upsert::{ItemWriter, UpsertItem, UpsertItems};
