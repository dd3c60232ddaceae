use std::sync::Arc;

use shared::{
    domain::CompanyId,
    error::GatewayError,
    protocol::{GenerateContentRequest, GeneratedContentItem},
};
use tracing::{info, warn};

use crate::transport::DashboardApi;

/// Topic sent by the "Smart Generate" quick action.
pub const SMART_GENERATE_TOPIC: &str = "trending safety topic";

pub struct ContentOrchestrator {
    api: Arc<dyn DashboardApi>,
}

impl ContentOrchestrator {
    pub fn new(api: Arc<dyn DashboardApi>) -> Self {
        Self { api }
    }

    pub fn build_request(company_id: &CompanyId, topic: &str) -> GenerateContentRequest {
        GenerateContentRequest::for_topic(company_id.clone(), topic)
    }

    /// Topics are forwarded untouched, including empty ones.
    pub async fn try_generate(
        &self,
        company_id: &CompanyId,
        topic: &str,
    ) -> Result<Vec<GeneratedContentItem>, GatewayError> {
        let request = Self::build_request(company_id, topic);
        let response = self.api.generate_content(&request).await?;
        info!(
            company_id = %company_id,
            items = response.generated_content.len(),
            "generated content"
        );
        Ok(response.generated_content)
    }

    /// Never fails: any error is logged and reported as an empty list.
    pub async fn generate(
        &self,
        company_id: &CompanyId,
        topic: &str,
    ) -> Vec<GeneratedContentItem> {
        items_or_empty(company_id, self.try_generate(company_id, topic).await)
    }
}

/// Logs a failed generation and reports it as an empty list.
pub(crate) fn items_or_empty(
    company_id: &CompanyId,
    result: Result<Vec<GeneratedContentItem>, GatewayError>,
) -> Vec<GeneratedContentItem> {
    match result {
        Ok(items) => items,
        Err(err) => {
            warn!(
                company_id = %company_id,
                kind = ?err.kind(),
                error = %err,
                "content generation failed"
            );
            Vec::new()
        }
    }
}
