//! Clients and providers ("terceros") and their RUT associations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entities::rut::ProcessingState;
use crate::errors::CoreError;

/// Whether a third party is a client or a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    #[serde(rename = "CLIENTE")]
    Client,
    #[serde(rename = "PROVEEDOR")]
    Provider,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "CLIENTE",
            Self::Provider => "PROVEEDOR",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CLIENTE" | "CLIENT" => Ok(Self::Client),
            "PROVEEDOR" | "PROVIDER" => Ok(Self::Provider),
            other => Err(CoreError::Validation(format!(
                "unknown entity kind '{other}' (expected CLIENTE or PROVEEDOR)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "ALTO")]
    High,
    #[serde(rename = "MEDIO")]
    Medium,
    #[serde(rename = "BAJO")]
    Low,
}

impl FromStr for RiskLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ALTO" | "HIGH" => Ok(Self::High),
            "MEDIO" | "MEDIUM" => Ok(Self::Medium),
            "BAJO" | "LOW" => Ok(Self::Low),
            other => Err(CoreError::Validation(format!(
                "unknown risk level '{other}' (expected ALTO, MEDIO or BAJO)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssociationState {
    #[serde(rename = "ACTIVO")]
    Active,
    #[serde(rename = "INACTIVO")]
    Inactive,
}

/// Short form embedded in RUT batch responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProviderSummary {
    pub id: i64,
    pub nombre_comercial: String,
    pub tipo_entidad: EntityKind,
    pub categoria: String,
    #[serde(default)]
    pub razon_social_principal: Option<String>,
}

/// Link between a client/provider and one RUT record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    pub id: i64,
    pub es_principal: bool,
    #[serde(default)]
    pub rol_en_relacion: Option<String>,
    pub fecha_asociacion: String,
    pub observaciones: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProvider {
    pub id: i64,
    pub tipo_entidad: EntityKind,
    pub nombre_comercial: String,
    #[serde(default)]
    pub razon_social_principal: Option<String>,
    pub categoria: String,
    pub estado: String,
    pub codigo_interno: String,
    pub total_ruts: u32,
    pub tiene_rut_principal: bool,
    pub fecha_registro: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProviderPage {
    pub total: u64,
    pub page: u32,
    pub size: u32,
    pub items: Vec<ClientProvider>,
}

/// Request body for creating a client/provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClientProvider {
    pub tipo_entidad: EntityKind,
    pub nombre_comercial: String,
    pub categoria: String,
    pub sector_economico: String,
    pub nivel_riesgo: RiskLevel,
    pub codigo_interno: String,
    pub notas: String,
}

impl NewClientProvider {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when the commercial name is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.nombre_comercial.trim().is_empty() {
            return Err(CoreError::Validation(
                "nombre_comercial is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedClientProvider {
    pub id: i64,
    pub nombre_comercial: String,
    pub tipo_entidad: EntityKind,
    pub codigo_interno: String,
    pub message: String,
}

/// A RUT record as seen through a client/provider association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProviderRut {
    pub id: i64,
    pub rut_record_id: i64,
    pub es_principal: bool,
    #[serde(default)]
    pub rol_en_relacion: Option<String>,
    pub estado: AssociationState,
    pub fecha_asociacion: String,
    pub observaciones: String,
    pub asociado_por: String,
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
    pub original_filename: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProviderRuts {
    pub cliente_proveedor_id: i64,
    pub cliente_proveedor_nombre: String,
    pub total_ruts: u32,
    pub ruts_principales: u32,
    pub ruts_activos: u32,
    pub ruts: Vec<ClientProviderRut>,
}
