//! RUT (taxpayer registration) extraction and record management.

use aud_core::entities::{
    ProcessingState, RutBatchResponse, RutClientBatchResponse, RutListResponse, RutRecord,
    RutStateUpdate,
};
use serde::Serialize;

use crate::{ApiClient, ProgressSink, UploadFile, error::ApiError, require_files, segment};

const BATCH_PATH: &str = "/api/v1/contabilidad/extraer/rut/lote";
const CLIENT_BATCH_PATH: &str = "/api/v1/contabilidad/extraer/rut/lote/con-cliente";
const RECORDS_PATH: &str = "/api/v1/contabilidad/ruts";
const FILE_FIELD: &str = "files";

#[derive(Serialize)]
struct StateChange {
    new_state: ProcessingState,
}

impl ApiClient {
    /// Extract every file in one request. Each file gets its own outcome.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] for an empty file list, [`ApiError::Decode`]
    /// when the batch counters contradict the results, otherwise any error of
    /// [`ApiClient::request`].
    pub async fn extract_ruts(
        &self,
        files: &[UploadFile],
        progress: Option<ProgressSink>,
    ) -> Result<RutBatchResponse, ApiError> {
        require_files(files)?;
        let parts: Vec<_> = files.iter().map(|file| (FILE_FIELD, file)).collect();
        let response: RutBatchResponse = self
            .upload(BATCH_PATH, &parts, Vec::new(), progress)
            .await?;
        response.validate()?;
        Ok(response)
    }

    /// Extract and associate every file with an existing client/provider.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] for an empty file list or a non-positive id,
    /// otherwise the same as [`ApiClient::extract_ruts`].
    pub async fn extract_ruts_for_client(
        &self,
        files: &[UploadFile],
        client_provider_id: i64,
        progress: Option<ProgressSink>,
    ) -> Result<RutClientBatchResponse, ApiError> {
        require_files(files)?;
        if client_provider_id <= 0 {
            return Err(ApiError::Validation(
                "a client or provider must be selected".to_string(),
            ));
        }
        let parts: Vec<_> = files.iter().map(|file| (FILE_FIELD, file)).collect();
        let fields = vec![("cliente_proveedor_id", client_provider_id.to_string())];
        let response: RutClientBatchResponse = self
            .upload(CLIENT_BATCH_PATH, &parts, fields, progress)
            .await?;
        response.validate()?;
        Ok(response)
    }

    /// # Errors
    ///
    /// [`ApiError::Validation`] for a zero page or page size, otherwise any
    /// error of [`ApiClient::request`] or the response decode.
    pub async fn list_ruts(&self, page: u32, page_size: u32) -> Result<RutListResponse, ApiError> {
        if page == 0 || page_size == 0 {
            return Err(ApiError::Validation(
                "page and page size start at 1".to_string(),
            ));
        }
        self.get_json(
            RECORDS_PATH,
            vec![
                ("page".to_string(), page.to_string()),
                ("page_size".to_string(), page_size.to_string()),
            ],
        )
        .await
    }

    /// # Errors
    ///
    /// [`ApiError::Validation`] for a blank NIT, otherwise any error of
    /// [`ApiClient::request`] or the response decode.
    pub async fn rut_details(&self, nit: &str) -> Result<RutRecord, ApiError> {
        let nit = require_nit(nit)?;
        self.get_json(&format!("{RECORDS_PATH}/{}", segment(nit)), Vec::new())
            .await
    }

    /// # Errors
    ///
    /// Same as [`ApiClient::rut_details`].
    pub async fn update_rut_state(
        &self,
        nit: &str,
        state: ProcessingState,
    ) -> Result<RutStateUpdate, ApiError> {
        let nit = require_nit(nit)?;
        self.put_json(
            &format!("{RECORDS_PATH}/{}/estado", segment(nit)),
            &StateChange { new_state: state },
        )
        .await
    }
}

fn require_nit(nit: &str) -> Result<&str, ApiError> {
    let nit = nit.trim();
    if nit.is_empty() {
        return Err(ApiError::Validation("NIT is required".to_string()));
    }
    Ok(nit)
}
