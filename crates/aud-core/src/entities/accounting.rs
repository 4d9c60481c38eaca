//! Companies whose books are kept by the firm.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountingClient {
    pub id: String,
    pub codigo_empresa: String,
    pub razon_social: String,
    pub nit: String,
    pub activa: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountingClientPage {
    pub total: u64,
    pub items: Vec<AccountingClient>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_accounting_client_page() {
        let page: AccountingClientPage = serde_json::from_str(
            r#"{"total":1,"items":[{"id":"c1","codigo_empresa":"001","razon_social":"ACME SAS",
                "nit":"900123456","activa":true,"created_at":"2024-01-01T00:00:00",
                "updated_at":"2024-02-01T00:00:00"}]}"#,
        )
        .unwrap();
        assert_eq!(page.total, 1);
        assert!(page.items[0].activa);
    }

    #[test]
    fn rejects_item_missing_nit() {
        let parsed = serde_json::from_str::<AccountingClientPage>(
            r#"{"total":1,"items":[{"id":"c1","codigo_empresa":"001","razon_social":"ACME SAS",
                "activa":true,"created_at":"x","updated_at":"y"}]}"#,
        );
        assert!(parsed.is_err());
    }
}
