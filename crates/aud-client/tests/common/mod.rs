//! Shared fixtures: a client wired to an httpmock server and a host that
//! records announcements.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use aud_auth::{
    AllowedOrigins, AuthHeaderBuilder, CredentialRelay, CredentialStore, FallbackIdentity,
    HostChannel, MemorySessionStorage, OutboundMessage,
};
use aud_client::ApiClient;
use aud_config::ApiConfig;
use aud_core::Credentials;
use serde_json::{Value, json};

#[derive(Default)]
pub struct RecordingHost {
    posted: Mutex<Vec<OutboundMessage>>,
}

impl RecordingHost {
    pub fn posted(&self) -> Vec<OutboundMessage> {
        self.posted.lock().unwrap().clone()
    }
}

impl HostChannel for RecordingHost {
    fn is_nested(&self) -> bool {
        true
    }

    fn post(&self, message: OutboundMessage) {
        self.posted.lock().unwrap().push(message);
    }
}

pub struct Harness {
    pub client: ApiClient,
    pub store: Arc<CredentialStore>,
    pub host: Arc<RecordingHost>,
}

pub fn harness(base_url: &str, fallback: FallbackIdentity) -> Harness {
    let store = Arc::new(CredentialStore::new(Arc::new(MemorySessionStorage::new())));
    let host = Arc::new(RecordingHost::default());
    let relay = Arc::new(CredentialRelay::new(
        store.clone(),
        AllowedOrigins::new(["http://localhost:5173"]),
        host.clone(),
    ));
    let config = ApiConfig {
        base_url: base_url.to_string(),
        ..ApiConfig::default()
    };
    let headers = AuthHeaderBuilder::new(store.clone(), fallback);
    let client = ApiClient::new(&config, headers, relay).expect("client builds");
    Harness { client, store, host }
}

pub fn signed_in(base_url: &str) -> Harness {
    let harness = harness(base_url, FallbackIdentity::default());
    harness.store.set(
        Credentials::new("jwt-123", "user-9", Some("ana@firm.co".into()), 1_700_000_000_000)
            .expect("valid credentials"),
    );
    harness
}

pub fn rut_data(nit: &str) -> Value {
    json!({
        "nit": nit, "dv": "1", "numero_formulario": "14000000001",
        "razon_social": "ACME SAS", "nombre_comercial": "ACME", "sigla": "",
        "tipo_contribuyente": "Persona jurídica", "tipo_documento": "NIT",
        "pais": "COLOMBIA", "departamento": "Antioquia", "ciudad_municipio": "Medellín",
        "direccion_principal": "CR 43A 1 50", "codigo_postal": "050021",
        "telefono_1": "6044440000", "telefono_2": "", "correo_electronico": "info@acme.co",
        "actividad_principal_codigo": "6201", "actividad_principal_fecha_inicio": "2015-01-01",
        "actividad_secundaria_codigo": "", "actividad_secundaria_fecha_inicio": "",
        "responsabilidades": ["05 - Impto. renta y compl. régimen ordinar"],
        "representantes_legales": [],
        "fecha_expedicion": "2024-01-10", "fecha_generacion_pdf": "2024-01-10",
        "direccion_seccional": "Impuestos de Medellín", "buzon_electronico": "",
        "composicion_capital": null, "estado_actual": null, "fecha_cambio_estado": null,
        "extraction_timestamp": "2024-06-01T12:00:00", "message": "ok"
    })
}

pub fn rut_batch(results: Vec<Value>, successful: usize, failed: usize) -> Value {
    json!({
        "total_files": results.len(),
        "successful_extractions": successful,
        "failed_extractions": failed,
        "results": results,
        "total_excel_entries": successful,
        "processing_time_seconds": 1.5,
        "extraction_timestamp": "2024-06-01T12:00:04",
        "common_errors": [],
        "message": "done"
    })
}

pub fn accounting_page() -> Value {
    json!({
        "total": 1,
        "items": [{
            "id": "c1", "codigo_empresa": "001", "razon_social": "ACME SAS",
            "nit": "900123456", "activa": true,
            "created_at": "2024-01-01T00:00:00", "updated_at": "2024-02-01T00:00:00"
        }]
    })
}
