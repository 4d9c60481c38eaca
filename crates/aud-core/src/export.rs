//! Mapping of stored RUT records onto the accounting "Clientes" import sheet.
//!
//! Only the row model lives here. Writing the spreadsheet file belongs to
//! whatever tool consumes the rows.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::entities::rut::{ProcessingState, RutRecord};
use crate::errors::CoreError;

/// Column headers of the "Clientes" sheet, in order.
pub const CLIENT_SHEET_HEADERS: [&str; 16] = [
    "Compañía",
    "Código del cliente",
    "Razón social del cliente",
    "Moneda",
    "Condición de pago",
    "Tipo de cliente",
    "Contacto",
    "Dirección 1",
    "Dirección 2",
    "País",
    "Departamento",
    "Ciudad",
    "Teléfono",
    "Dirección de correo electrónico",
    "Fecha de ingreso AAAAMMDD",
    "Teléfono Celular",
];

const COMPANY: &str = "1";
const CLIENT_TYPE: &str = "001";
const COUNTRY_CODE: &str = "169";
const DEPARTMENT_CODE: &str = "11";
const CITY_CODE: &str = "001";
const DEFAULT_CURRENCY: &str = "COP";

/// One row of the "Clientes" sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientRow {
    #[serde(rename = "Compañía")]
    pub company: String,
    #[serde(rename = "Código del cliente")]
    pub client_code: String,
    #[serde(rename = "Razón social del cliente")]
    pub business_name: String,
    #[serde(rename = "Moneda")]
    pub currency: String,
    #[serde(rename = "Condición de pago")]
    pub payment_condition: String,
    #[serde(rename = "Tipo de cliente")]
    pub client_type: String,
    #[serde(rename = "Contacto")]
    pub contact: String,
    #[serde(rename = "Dirección 1")]
    pub address_1: String,
    #[serde(rename = "Dirección 2")]
    pub address_2: String,
    #[serde(rename = "País")]
    pub country: String,
    #[serde(rename = "Departamento")]
    pub department: String,
    #[serde(rename = "Ciudad")]
    pub city: String,
    #[serde(rename = "Teléfono")]
    pub phone: String,
    #[serde(rename = "Dirección de correo electrónico")]
    pub email: String,
    #[serde(rename = "Fecha de ingreso AAAAMMDD")]
    pub entry_date: String,
    #[serde(rename = "Teléfono Celular")]
    pub mobile: String,
}

impl ClientRow {
    #[must_use]
    pub fn from_record(record: &RutRecord) -> Self {
        let start_date = record
            .representantes_legales
            .first()
            .map(|rep| rep.fecha_inicio_ejercicio.as_str())
            .unwrap_or_default();

        Self {
            company: COMPANY.to_string(),
            client_code: record.nit.clone(),
            business_name: record.razon_social.clone(),
            currency: currency_for_country(&record.pais).to_string(),
            payment_condition: String::new(),
            client_type: CLIENT_TYPE.to_string(),
            contact: String::new(),
            address_1: record.direccion_principal.clone(),
            address_2: String::new(),
            country: COUNTRY_CODE.to_string(),
            department: DEPARTMENT_CODE.to_string(),
            city: CITY_CODE.to_string(),
            phone: record.telefono_1.clone(),
            email: record.correo_electronico.clone(),
            entry_date: compact_date(start_date),
            mobile: String::new(),
        }
    }

    /// Cells in column order.
    #[must_use]
    pub fn cells(&self) -> [&str; 16] {
        [
            self.company.as_str(),
            self.client_code.as_str(),
            self.business_name.as_str(),
            self.currency.as_str(),
            self.payment_condition.as_str(),
            self.client_type.as_str(),
            self.contact.as_str(),
            self.address_1.as_str(),
            self.address_2.as_str(),
            self.country.as_str(),
            self.department.as_str(),
            self.city.as_str(),
            self.phone.as_str(),
            self.email.as_str(),
            self.entry_date.as_str(),
            self.mobile.as_str(),
        ]
    }
}

/// ISO currency code for a country name; unknown countries bill in COP.
#[must_use]
pub fn currency_for_country(country: &str) -> &'static str {
    match country.trim().to_uppercase().as_str() {
        "COLOMBIA" => "COP",
        "MEXICO" | "MÉXICO" => "MXN",
        "ARGENTINA" => "ARS",
        "PERU" | "PERÚ" => "PEN",
        "CHILE" => "CLP",
        "ECUADOR" => "USD",
        "VENEZUELA" => "VES",
        "URUGUAY" => "UYU",
        "PARAGUAY" => "PYG",
        "BOLIVIA" => "BOB",
        _ => DEFAULT_CURRENCY,
    }
}

/// Format a date as `YYYYMMDD`; blank or unparseable input yields an empty cell.
#[must_use]
pub fn compact_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        });
    date.map(|d| d.format("%Y%m%d").to_string())
        .unwrap_or_default()
}

/// Map every record to a sheet row.
#[must_use]
pub fn client_rows(records: &[RutRecord]) -> Vec<ClientRow> {
    records.iter().map(ClientRow::from_record).collect()
}

/// Rows for the records that are ready (`LISTO`) to be imported.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] when no record is in the `LISTO` state.
pub fn ready_for_export(records: &[RutRecord]) -> Result<Vec<ClientRow>, CoreError> {
    let rows: Vec<ClientRow> = records
        .iter()
        .filter(|record| record.processing_state == ProcessingState::Ready)
        .map(ClientRow::from_record)
        .collect();
    if rows.is_empty() {
        return Err(CoreError::Validation(
            "no records in LISTO state to export".to_string(),
        ));
    }
    Ok(rows)
}
