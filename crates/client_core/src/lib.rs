//! Client-side orchestration for the PostVelocity dashboard: selection state,
//! the company directory, and content generation against the backend API.

pub mod config;
pub mod directory;
pub mod generation;
pub mod session;
pub mod transport;
pub mod view_state;

pub use config::{ClientConfig, ConfigError, DEFAULT_BACKEND_URL};
pub use directory::CompanyDirectoryLoader;
pub use generation::{ContentOrchestrator, SMART_GENERATE_TOPIC};
pub use session::{DashboardSession, DirectoryOutcome, GenerationOutcome, SessionEvent};
pub use transport::{DashboardApi, HttpDashboardApi};
pub use view_state::ViewState;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
