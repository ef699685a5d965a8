// ABOUTME: Error types for talking to external programs on the host
// Covers spawn failures and I/O on a child's pipes

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Failed to start {program}: {source}")]
    SpawnFailed {
        program: String,
        source: std::io::Error,
    },

    #[error("Failed to feed stdin to {program}: {source}")]
    StdinFailed {
        program: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
