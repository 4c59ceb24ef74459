//! Error types for the invox-core library.

use thiserror::Error;

/// Main error type for the invox library.
#[derive(Error, Debug)]
pub enum InvoxError {
    /// Document analysis service error.
    #[error("analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// CSV export error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors reported by the external document-analysis service.
///
/// All of these are fatal for the file being analyzed, never for the batch.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Failed to submit the document for analysis.
    #[error("failed to submit document: {0}")]
    Upload(String),

    /// A request to the service failed (network, auth, bad status).
    #[error("analysis request failed: {0}")]
    Request(String),

    /// The service reported the analysis job as failed.
    #[error("analysis job {job_id} failed: {reason}")]
    JobFailed { job_id: String, reason: String },

    /// The job did not complete within the configured polling window.
    #[error("timed out waiting for analysis job {0}")]
    Timeout(String),

    /// The service response could not be interpreted.
    #[error("malformed analysis response: {0}")]
    Malformed(String),
}

/// Errors related to CSV export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The table has no rows, so there is no header to carry over.
    #[error("table has no rows")]
    EmptyTable,

    /// CSV serialization failed.
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the invox library.
pub type Result<T> = std::result::Result<T, InvoxError>;
