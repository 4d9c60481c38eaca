//! Tax filing and payment calendars.

use aud_core::entities::{
    CalendarFilter, CalendarResponse, LargeTaxpayerDeadline, LegalEntityDeadline,
};

use crate::{ApiClient, error::ApiError};

const LARGE_TAXPAYERS_PATH: &str = "/api/v1/tax-calendar/grandes-contribuyentes";
const LEGAL_ENTITIES_PATH: &str = "/api/v1/tax-calendar/personas-juridicas";

impl ApiClient {
    /// Deadlines for large taxpayers. `None` returns the complete calendar.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] for a NIT digit outside 0–9, otherwise any
    /// error of [`ApiClient::request`] or the response decode.
    pub async fn large_taxpayer_calendar(
        &self,
        filter: Option<CalendarFilter>,
    ) -> Result<CalendarResponse<LargeTaxpayerDeadline>, ApiError> {
        self.get_json(LARGE_TAXPAYERS_PATH, calendar_query(filter)?)
            .await
    }

    /// Deadlines for legal entities. `None` returns the complete calendar.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::large_taxpayer_calendar`].
    pub async fn legal_entity_calendar(
        &self,
        filter: Option<CalendarFilter>,
    ) -> Result<CalendarResponse<LegalEntityDeadline>, ApiError> {
        self.get_json(LEGAL_ENTITIES_PATH, calendar_query(filter)?)
            .await
    }
}

fn calendar_query(filter: Option<CalendarFilter>) -> Result<Vec<(String, String)>, ApiError> {
    let Some(filter) = filter else {
        return Ok(Vec::new());
    };
    // Fields are public, so re-check what `CalendarFilter::new` enforces.
    let filter = CalendarFilter::new(filter.tax_year, filter.nit_last_digit)?;
    Ok(vec![
        ("ano_gravable".to_string(), filter.tax_year.to_string()),
        ("ultimo_digito_nit".to_string(), filter.nit_last_digit.to_string()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_filter_means_no_query() {
        assert!(calendar_query(None).unwrap().is_empty());
    }

    #[test]
    fn filter_becomes_backend_query_names() {
        let query = calendar_query(Some(CalendarFilter::new(2024, 7).unwrap())).unwrap();
        assert_eq!(
            query,
            vec![
                ("ano_gravable".to_string(), "2024".to_string()),
                ("ultimo_digito_nit".to_string(), "7".to_string()),
            ]
        );
    }

    #[test]
    fn hand_built_filter_is_still_validated() {
        let filter = CalendarFilter {
            tax_year: 2024,
            nit_last_digit: 12,
        };
        assert!(matches!(calendar_query(Some(filter)), Err(ApiError::Validation(_))));
    }
}
