//! Companies whose books the firm keeps.

use aud_core::entities::AccountingClientPage;

use crate::{ApiClient, error::ApiError};

const LIST_PATH: &str = "/api/v1/contabilidad-clientes";

impl ApiClient {
    /// # Errors
    ///
    /// Any error of [`ApiClient::request`] or the response decode.
    pub async fn list_accounting_clients(&self) -> Result<AccountingClientPage, ApiError> {
        self.get_json(LIST_PATH, Vec::new()).await
    }
}
