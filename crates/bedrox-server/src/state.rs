//! Shared application state

use std::path::PathBuf;

use bedrox_providers::InferenceGateway;

/// State shared by all handlers. Holds only immutable handles.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Gateway used by `POST /api/invoke`
    pub gateway: InferenceGateway,
    /// Directory containing `index.html`
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(gateway: InferenceGateway, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            gateway,
            static_dir: static_dir.into(),
        }
    }
}
