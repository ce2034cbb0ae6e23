use crate::config::ClientConfig;
use crate::core::extraction_pipelines::ExtractionPipelines;
use crate::core::http::ApiClient;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Entry point: validates the configuration once and hands out endpoint
/// bindings.
#[derive(Debug, Clone)]
pub struct CogniteExtPipes {
    api: ApiClient,
    config: ClientConfig,
}

impl CogniteExtPipes {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let api = ApiClient::new(&config)?;
        Ok(Self { api, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn extraction_pipelines(&self) -> ExtractionPipelines {
        ExtractionPipelines::new(self.api.clone(), self.config.clone())
    }
}
