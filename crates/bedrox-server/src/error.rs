//! Server error types

use thiserror::Error;

/// Errors that can occur while starting or running the HTTP server
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the specified address
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The accept loop terminated with an I/O error
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}
