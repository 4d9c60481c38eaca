//! Electronic invoice extraction.
//!
//! The backend extracts one invoice per request. Batches are driven from the
//! client: one request per file, with failures recorded per file.

use aud_core::entities::InvoiceData;
use aud_core::outcome::{BatchReport, FileOutcome};

use crate::progress::ProgressTracker;
use crate::{ApiClient, ProgressSink, UploadFile, error::ApiError, require_files};

const EXTRACT_PATH: &str = "/api/v1/contabilidad/extraer/factura";
const FILE_FIELD: &str = "invoice_file";

impl ApiClient {
    /// # Errors
    ///
    /// Any error of [`ApiClient::request`] or the response decode.
    pub async fn extract_invoice(
        &self,
        file: &UploadFile,
        progress: Option<ProgressSink>,
    ) -> Result<InvoiceData, ApiError> {
        self.upload(EXTRACT_PATH, &[(FILE_FIELD, file)], Vec::new(), progress)
            .await
    }

    /// Extract each file in turn. Progress spans the whole batch.
    ///
    /// A failed file does not stop the others, except for a 401: the session
    /// is gone, so the remaining uploads would fail the same way.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] for an empty file list and
    /// [`ApiError::Unauthorized`] when the backend rejects the credentials.
    pub async fn extract_invoices(
        &self,
        files: &[UploadFile],
        progress: Option<ProgressSink>,
    ) -> Result<BatchReport<InvoiceData>, ApiError> {
        require_files(files)?;
        let tracker = ProgressTracker::for_files(files, progress);
        let mut results = Vec::with_capacity(files.len());

        for file in files {
            match self
                .upload_tracked::<InvoiceData>(EXTRACT_PATH, &[(FILE_FIELD, file)], Vec::new(), &tracker)
                .await
            {
                Ok(data) => results.push(FileOutcome::success(&file.file_name, data)),
                Err(ApiError::Unauthorized) => {
                    tracker.close();
                    return Err(ApiError::Unauthorized);
                }
                Err(error) => {
                    tracing::warn!(file = %file.file_name, %error, "invoice extraction failed");
                    results.push(FileOutcome::failure(&file.file_name, error.to_string()));
                }
            }
        }

        tracker.close();
        Ok(BatchReport::from_results(results))
    }
}
