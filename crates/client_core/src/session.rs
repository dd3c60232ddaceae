//! One dashboard session: view state plus the network operations that feed it.

use std::{
    future::Future,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use shared::{
    domain::{ActiveTab, CompanyId, UnknownTab, UserStatus},
    error::{FailureContext, FailureNotice, GatewayError},
    protocol::{GeneratedContentItem, HealthResponse},
};
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{
    config::ClientConfig,
    directory::CompanyDirectoryLoader,
    generation::{items_or_empty, ContentOrchestrator, SMART_GENERATE_TOPIC},
    transport::{DashboardApi, HttpDashboardApi},
    view_state::ViewState,
};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    CompaniesLoaded { count: usize },
    ContentGenerated { count: usize },
    RequestFailed(FailureNotice),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryOutcome {
    Loaded { count: usize },
    Failed(GatewayError),
    /// A newer load was issued before this one completed.
    Superseded,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    Generated(Vec<GeneratedContentItem>),
    Failed(GatewayError),
    /// A newer generation was issued before this one completed.
    Superseded,
}

pub struct DashboardSession {
    api: Arc<dyn DashboardApi>,
    directory: CompanyDirectoryLoader,
    orchestrator: ContentOrchestrator,
    state: Mutex<ViewState>,
    lifetime: CancellationToken,
    directory_ticket: AtomicU64,
    generation_ticket: AtomicU64,
    events: broadcast::Sender<SessionEvent>,
}

impl DashboardSession {
    pub fn new(api: Arc<dyn DashboardApi>) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            directory: CompanyDirectoryLoader::new(Arc::clone(&api)),
            orchestrator: ContentOrchestrator::new(Arc::clone(&api)),
            api,
            state: Mutex::new(ViewState::new()),
            lifetime: CancellationToken::new(),
            directory_ticket: AtomicU64::new(0),
            generation_ticket: AtomicU64::new(0),
            events,
        })
    }

    pub fn connect(config: ClientConfig) -> reqwest::Result<Arc<Self>> {
        let api = HttpDashboardApi::new(config)?;
        Ok(Self::new(Arc::new(api)))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> ViewState {
        self.state.lock().await.clone()
    }

    pub async fn set_active_tab(&self, tab: ActiveTab) {
        self.state.lock().await.set_active_tab(tab);
    }

    pub async fn select_tab(&self, id: &str) -> Result<ActiveTab, UnknownTab> {
        let result = self.state.lock().await.select_tab(id);
        if let Err(err) = &result {
            warn!(error = %err, "ignored tab switch");
        }
        result
    }

    pub async fn set_selected_company(&self, id: impl Into<CompanyId>) {
        self.state.lock().await.set_selected_company(id);
    }

    pub async fn set_user_status(&self, status: UserStatus) {
        self.state.lock().await.set_user_status(status);
    }

    /// Fire-and-forget directory load, as issued at startup.
    pub fn spawn_company_load(self: &Arc<Self>) -> JoinHandle<DirectoryOutcome> {
        let session = Arc::clone(self);
        tokio::spawn(async move { session.load_companies().await })
    }

    /// Replaces the company list on success; leaves it untouched otherwise.
    pub async fn load_companies(&self) -> DirectoryOutcome {
        let ticket = self.directory_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.guarded(self.directory.fetch()).await;

        let mut state = self.state.lock().await;
        if self.lifetime.is_cancelled() {
            return DirectoryOutcome::Failed(GatewayError::Cancelled);
        }
        if self.directory_ticket.load(Ordering::SeqCst) != ticket {
            debug!(ticket, "discarding superseded company directory response");
            return DirectoryOutcome::Superseded;
        }

        match result {
            Ok(companies) => {
                let count = companies.len();
                state.set_companies(companies);
                state.clear_failure(FailureContext::LoadCompanies);
                let _ = self.events.send(SessionEvent::CompaniesLoaded { count });
                DirectoryOutcome::Loaded { count }
            }
            Err(err) => {
                let notice = FailureNotice::new(FailureContext::LoadCompanies, &err);
                state.record_failure(notice.clone());
                let _ = self.events.send(SessionEvent::RequestFailed(notice));
                DirectoryOutcome::Failed(err)
            }
        }
    }

    /// Generates content for the currently selected company without touching
    /// view state. Failures collapse into an empty list.
    pub async fn generate(&self, topic: &str) -> Vec<GeneratedContentItem> {
        let company_id = self.state.lock().await.selected_company_id().clone();
        items_or_empty(&company_id, self.try_generate(topic).await)
    }

    pub async fn try_generate(
        &self,
        topic: &str,
    ) -> Result<Vec<GeneratedContentItem>, GatewayError> {
        let company_id = self.state.lock().await.selected_company_id().clone();
        self.guarded(self.orchestrator.try_generate(&company_id, topic))
            .await
    }

    /// Generates content and stores it in view state unless a newer request
    /// was issued meanwhile. A failure keeps the previously shown content.
    pub async fn generate_into_view(&self, topic: &str) -> GenerationOutcome {
        let ticket = self.generation_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.try_generate(topic).await;

        let mut state = self.state.lock().await;
        if self.lifetime.is_cancelled() {
            return GenerationOutcome::Failed(GatewayError::Cancelled);
        }
        if self.generation_ticket.load(Ordering::SeqCst) != ticket {
            debug!(ticket, "discarding superseded generation response");
            return GenerationOutcome::Superseded;
        }

        match result {
            Ok(items) => {
                state.set_generated_content(items.clone());
                let _ = self
                    .events
                    .send(SessionEvent::ContentGenerated { count: items.len() });
                GenerationOutcome::Generated(items)
            }
            Err(err) => {
                warn!(kind = ?err.kind(), error = %err, "content generation failed");
                let notice = FailureNotice::new(FailureContext::GenerateContent, &err);
                state.record_failure(notice.clone());
                let _ = self.events.send(SessionEvent::RequestFailed(notice));
                GenerationOutcome::Failed(err)
            }
        }
    }

    pub async fn smart_generate(&self) -> GenerationOutcome {
        self.generate_into_view(SMART_GENERATE_TOPIC).await
    }

    pub async fn health(&self) -> Result<HealthResponse, GatewayError> {
        self.guarded(self.api.health()).await
    }

    /// Cancels pending requests; their results are dropped without touching state.
    pub fn shutdown(&self) {
        self.lifetime.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.lifetime.is_cancelled()
    }

    async fn guarded<T>(
        &self,
        call: impl Future<Output = Result<T, GatewayError>>,
    ) -> Result<T, GatewayError> {
        tokio::select! {
            biased;
            _ = self.lifetime.cancelled() => Err(GatewayError::Cancelled),
            result = call => result,
        }
    }
}

impl Drop for DashboardSession {
    fn drop(&mut self) {
        self.lifetime.cancel();
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
