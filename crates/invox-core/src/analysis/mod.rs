//! Capability interface over the external document-analysis service.

use std::future::Future;
use std::path::Path;

use crate::error::AnalysisError;
use crate::models::document::Document;

/// A collaborator that turns an input file into an analyzed [`Document`].
///
/// The service call is consumed as one awaited call per file: however the
/// implementation stages the upload or polls a job internally, the caller
/// only sees a fully materialized document or an [`AnalysisError`]. Keeping
/// this seam a trait lets the extraction and orchestration logic run against
/// fabricated documents, with no live network dependency.
pub trait DocumentAnalyzer {
    /// Analyze `file`, staging it at `upload_location` for the service to
    /// read. Failures are fatal for this file only.
    fn analyze(
        &self,
        file: &Path,
        upload_location: &str,
    ) -> impl Future<Output = Result<Document, AnalysisError>> + Send;
}
