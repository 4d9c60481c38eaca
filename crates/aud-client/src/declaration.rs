//! Income tax declaration extraction.

use aud_core::entities::DeclarationExtraction;

use crate::{ApiClient, ProgressSink, UploadFile, error::ApiError};

const EXTRACT_PATH: &str = "/api/v1/compliance/extract/declaration/detailed";

impl ApiClient {
    /// Upload one declaration form and return the extracted fields.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] for an empty file, otherwise any error of
    /// [`ApiClient::request`] or the response decode.
    pub async fn extract_declaration(
        &self,
        file: &UploadFile,
        progress: Option<ProgressSink>,
    ) -> Result<DeclarationExtraction, ApiError> {
        if file.is_empty() {
            return Err(ApiError::Validation(format!("{} is empty", file.file_name)));
        }
        self.upload(EXTRACT_PATH, &[("declaration_file", file)], Vec::new(), progress)
            .await
    }
}
