//! RUT (tax registry) extraction results and stored records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entities::third_party::{Association, ClientProviderSummary};
use crate::errors::CoreError;
use crate::outcome::{FileOutcome, check_counters};

// ---------------------------------------------------------------------------
// ProcessingState
// ---------------------------------------------------------------------------

/// Review state of a stored RUT record.
///
/// ```text
/// EXTRAIDO → LISTO → PROCESADO
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessingState {
    #[serde(rename = "EXTRAIDO")]
    Extracted,
    #[serde(rename = "LISTO")]
    Ready,
    #[serde(rename = "PROCESADO")]
    Processed,
}

impl ProcessingState {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Extracted => "EXTRAIDO",
            Self::Ready => "LISTO",
            Self::Processed => "PROCESADO",
        }
    }
}

impl fmt::Display for ProcessingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessingState {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EXTRAIDO" | "EXTRACTED" => Ok(Self::Extracted),
            "LISTO" | "READY" => Ok(Self::Ready),
            "PROCESADO" | "PROCESSED" => Ok(Self::Processed),
            other => Err(CoreError::Validation(format!(
                "unknown processing state '{other}' (expected EXTRAIDO, LISTO or PROCESADO)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Extraction payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalRepresentative {
    pub tipo_representacion: String,
    pub tipo_documento: String,
    pub numero_identificacion: String,
    #[serde(default)]
    pub dv: Option<String>,
    pub primer_apellido: String,
    pub segundo_apellido: String,
    pub primer_nombre: String,
    pub otros_nombres: String,
    #[serde(default)]
    pub numero_tarjeta_profesional: Option<String>,
    pub fecha_inicio_ejercicio: String,
}

impl LegalRepresentative {
    /// Full name in "given names, surnames" order, skipping blanks.
    #[must_use]
    pub fn full_name(&self) -> String {
        [
            &self.primer_nombre,
            &self.otros_nombres,
            &self.primer_apellido,
            &self.segundo_apellido,
        ]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Fields read from one RUT document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RutData {
    pub nit: String,
    pub dv: String,
    pub numero_formulario: String,
    pub razon_social: String,
    pub nombre_comercial: String,
    pub sigla: String,
    pub tipo_contribuyente: String,
    pub tipo_documento: String,
    pub pais: String,
    pub departamento: String,
    pub ciudad_municipio: String,
    pub direccion_principal: String,
    pub codigo_postal: String,
    pub telefono_1: String,
    pub telefono_2: String,
    pub correo_electronico: String,
    pub actividad_principal_codigo: String,
    pub actividad_principal_fecha_inicio: String,
    pub actividad_secundaria_codigo: String,
    pub actividad_secundaria_fecha_inicio: String,
    pub responsabilidades: Vec<String>,
    pub representantes_legales: Vec<LegalRepresentative>,
    pub fecha_expedicion: String,
    pub fecha_generacion_pdf: String,
    pub direccion_seccional: String,
    pub buzon_electronico: String,
    #[serde(default)]
    pub composicion_capital: Option<String>,
    #[serde(default)]
    pub estado_actual: Option<String>,
    #[serde(default)]
    pub fecha_cambio_estado: Option<String>,
    pub extraction_timestamp: String,
    pub message: String,
}

/// Response of a plain RUT batch extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RutBatchResponse {
    pub total_files: usize,
    pub successful_extractions: usize,
    pub failed_extractions: usize,
    pub results: Vec<FileOutcome<RutData>>,
    pub total_excel_entries: u64,
    pub processing_time_seconds: f64,
    pub extraction_timestamp: String,
    #[serde(default)]
    pub common_errors: Vec<String>,
    pub message: String,
}

impl RutBatchResponse {
    /// # Errors
    ///
    /// Returns [`CoreError::InconsistentBatch`] if the counters disagree with
    /// the result list.
    pub fn validate(&self) -> Result<(), CoreError> {
        check_counters(
            self.total_files,
            self.successful_extractions,
            self.failed_extractions,
            &self.results,
        )
    }
}

/// Per-file payload of a batch that also associates the RUT with a
/// client/provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RutClientExtraction {
    pub rut_data: RutData,
    pub cliente_proveedor: ClientProviderSummary,
    pub asociacion: Association,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RutClientBatchResponse {
    pub total_files: usize,
    pub successful_extractions: usize,
    pub failed_extractions: usize,
    pub processing_time_seconds: f64,
    pub cliente_proveedor: ClientProviderSummary,
    pub total_excel_entries: u64,
    pub total_associations_created: u64,
    pub extraction_timestamp: String,
    #[serde(default)]
    pub common_errors: Vec<String>,
    pub message: String,
    pub results: Vec<FileOutcome<RutClientExtraction>>,
}

impl RutClientBatchResponse {
    /// # Errors
    ///
    /// Returns [`CoreError::InconsistentBatch`] if the counters disagree with
    /// the result list.
    pub fn validate(&self) -> Result<(), CoreError> {
        check_counters(
            self.total_files,
            self.successful_extractions,
            self.failed_extractions,
            &self.results,
        )
    }
}

// ---------------------------------------------------------------------------
// Stored records
// ---------------------------------------------------------------------------

/// A RUT record stored by the backend (list item and detail view share a shape).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RutRecord {
    pub id: i64,
    pub nit: String,
    pub dv: String,
    pub numero_formulario: String,
    pub razon_social: String,
    pub nombre_comercial: String,
    pub tipo_contribuyente: String,
    pub pais: String,
    pub departamento: String,
    pub ciudad_municipio: String,
    pub direccion_principal: String,
    pub telefono_1: String,
    pub correo_electronico: String,
    pub actividad_principal_codigo: String,
    pub processing_state: ProcessingState,
    pub representantes_legales: Vec<LegalRepresentative>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    pub original_filename: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCounts {
    #[serde(rename = "EXTRAIDO")]
    pub extracted: u64,
    #[serde(rename = "LISTO")]
    pub ready: u64,
    #[serde(rename = "PROCESADO")]
    pub processed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RutListResponse {
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub ruts: Vec<RutRecord>,
    pub state_counts: StateCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RutStateUpdate {
    pub success: bool,
    pub message: String,
    pub nit: String,
    pub new_state: ProcessingState,
}
