//! Tax filing and payment deadlines keyed by taxpayer class and NIT digit.

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Lookup filter for a calendar query. No filter means the complete calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFilter {
    pub tax_year: i32,
    pub nit_last_digit: u8,
}

impl CalendarFilter {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when `nit_last_digit` is not 0–9.
    pub fn new(tax_year: i32, nit_last_digit: u8) -> Result<Self, CoreError> {
        if nit_last_digit > 9 {
            return Err(CoreError::Validation(format!(
                "NIT last digit must be between 0 and 9, got {nit_last_digit}"
            )));
        }
        Ok(Self {
            tax_year,
            nit_last_digit,
        })
    }
}

/// Deadlines for large taxpayers (three installments).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LargeTaxpayerDeadline {
    pub ultimo_digito_nit: u8,
    pub ano_gravable: i32,
    pub fecha_pago_primera_cuota: String,
    pub fecha_declaracion_segunda_cuota: String,
    pub fecha_pago_tercera_cuota: String,
}

/// Deadlines for legal entities (two installments).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalEntityDeadline {
    pub ultimo_digito_nit: u8,
    pub ano_gravable: i32,
    pub fecha_declaracion_primera_cuota: String,
    pub fecha_pago_segunda_cuota: String,
}

/// Filters echoed back by the backend; empty for the complete calendar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedFilters {
    #[serde(default)]
    pub ultimo_digito_nit: Option<u8>,
    #[serde(default)]
    pub ano_gravable: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarResponse<T> {
    pub total_registros: u64,
    #[serde(default)]
    pub filtros_aplicados: AppliedFilters,
    pub calendarios: Vec<T>,
}
