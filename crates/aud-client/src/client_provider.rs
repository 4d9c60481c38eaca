//! Clients and providers ("terceros") and their associated RUT records.

use aud_core::entities::{
    ClientProviderPage, ClientProviderRuts, CreatedClientProvider, EntityKind, NewClientProvider,
};

use crate::{ApiClient, error::ApiError};

const BASE_PATH: &str = "/api/v1/clientes-proveedores";

impl ApiClient {
    /// # Errors
    ///
    /// Any error of [`ApiClient::request`] or the response decode.
    pub async fn list_client_providers(
        &self,
        kind: EntityKind,
    ) -> Result<ClientProviderPage, ApiError> {
        self.get_json(
            &format!("{BASE_PATH}/"),
            vec![("tipo_entidad".to_string(), kind.as_str().to_string())],
        )
        .await
    }

    /// # Errors
    ///
    /// [`ApiError::Validation`] for a blank commercial name, otherwise any
    /// error of [`ApiClient::request`] or the response decode.
    pub async fn create_client_provider(
        &self,
        request: &NewClientProvider,
    ) -> Result<CreatedClientProvider, ApiError> {
        request.validate()?;
        self.post_json(&format!("{BASE_PATH}/"), request).await
    }

    /// # Errors
    ///
    /// Any error of [`ApiClient::request`] or the response decode.
    pub async fn client_provider_ruts(&self, id: i64) -> Result<ClientProviderRuts, ApiError> {
        self.get_json(&format!("{BASE_PATH}/{id}/ruts"), Vec::new())
            .await
    }
}
