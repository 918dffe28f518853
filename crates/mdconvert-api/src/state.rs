//! Application state shared by every handler.
//!
//! The stores and the conversion gateway are built once at startup from `Config` and
//! passed in here; handlers never read configuration from the environment.

use mdconvert_core::Config;
use mdconvert_processing::ConversionGateway;
use mdconvert_storage::{ConvertedStore, UploadStore};

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Config,
    pub uploads: UploadStore,
    pub converted: ConvertedStore,
    pub gateway: ConversionGateway,
}

impl AppState {
    /// Open both directories (creating them if needed) and select the converter backend.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let gateway = ConversionGateway::from_config(&config);
        Self::with_gateway(config, gateway).await
    }

    /// Like [`AppState::new`] with an explicit gateway.
    pub async fn with_gateway(config: Config, gateway: ConversionGateway) -> anyhow::Result<Self> {
        let uploads = UploadStore::new(config.upload_dir()).await?;
        let converted = ConvertedStore::new(config.converted_dir()).await?;

        Ok(Self {
            config,
            uploads,
            converted,
            gateway,
        })
    }
}
