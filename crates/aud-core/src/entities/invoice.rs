//! Electronic invoice extraction result.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub codigo: String,
    pub codigo_cliente: String,
    pub referencia: String,
    pub descripcion: String,
    pub unidad_empaque: String,
    pub cantidad: f64,
    pub valor_unitario: f64,
    pub valor_total: f64,
    pub porcentaje_iva: f64,
    #[serde(default)]
    pub valor_iva: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceData {
    pub numero_factura: String,
    pub tipo_documento: String,
    pub cufe: String,
    pub fecha_emision: String,
    pub fecha_vencimiento: String,
    pub fecha_validacion_dian: String,

    pub emisor_nit: String,
    pub emisor_razon_social: String,
    pub emisor_direccion: String,
    pub emisor_ciudad: String,
    pub emisor_telefono: String,
    pub emisor_email: String,

    pub receptor_nit: String,
    pub receptor_razon_social: String,
    pub receptor_direccion: String,
    pub receptor_ciudad: String,
    pub receptor_telefono: String,

    pub asesor_comercial: String,
    pub contacto: String,
    pub zona: String,
    pub items: Vec<InvoiceItem>,

    pub subtotal: f64,
    pub valor_gravado: f64,
    pub valor_no_gravado: f64,
    pub total_iva: f64,
    pub retencion_fuente: f64,
    pub retencion_ica: f64,
    pub valor_total: f64,

    pub forma_pago: String,
    pub medio_pago: String,
    #[serde(default)]
    pub terminos_pago: Option<String>,
    #[serde(default)]
    pub numero_pedido: Option<String>,
    pub orden_compra: String,
    pub observaciones: String,
    pub autorizacion_dian: String,
    pub rango_numeracion: String,
    pub total_items: u32,
    pub total_paginas: u32,
    pub extraction_timestamp: String,
    pub message: String,
}
