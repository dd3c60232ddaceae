use std::sync::Arc;

use shared::{domain::Company, error::GatewayError};
use tracing::{info, warn};

use crate::transport::DashboardApi;

/// Fetches the organizations the user may generate content for.
pub struct CompanyDirectoryLoader {
    api: Arc<dyn DashboardApi>,
}

impl CompanyDirectoryLoader {
    pub fn new(api: Arc<dyn DashboardApi>) -> Self {
        Self { api }
    }

    /// One request, no retry. The list is returned exactly as the backend
    /// ordered it.
    pub async fn fetch(&self) -> Result<Vec<Company>, GatewayError> {
        match self.api.fetch_companies().await {
            Ok(companies) => {
                info!(count = companies.len(), "loaded company directory");
                Ok(companies)
            }
            Err(err) => {
                warn!(kind = ?err.kind(), error = %err, "failed to load company directory");
                Err(err)
            }
        }
    }
}
