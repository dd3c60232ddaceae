use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Transport,
    Response,
    Malformed,
    Cancelled,
}

/// Why an outbound call to the dashboard backend produced no usable result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("backend responded with status {status}")]
    Response { status: u16 },
    #[error("malformed response body: {0}")]
    Malformed(String),
    #[error("request cancelled before completion")]
    Cancelled,
}

impl GatewayError {
    pub fn kind(&self) -> FailureKind {
        match self {
            GatewayError::Transport(_) => FailureKind::Transport,
            GatewayError::Response { .. } => FailureKind::Response,
            GatewayError::Malformed(_) => FailureKind::Malformed,
            GatewayError::Cancelled => FailureKind::Cancelled,
        }
    }
}

/// Which user-triggered operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureContext {
    LoadCompanies,
    GenerateContent,
}

/// Non-fatal failure the presentation layer may choose to surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureNotice {
    pub context: FailureContext,
    pub kind: FailureKind,
    pub message: String,
}

impl FailureNotice {
    pub fn new(context: FailureContext, err: &GatewayError) -> Self {
        Self {
            context,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
