//! Income tax return (Form 110) extraction result.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Taxpayer classification block, present only for some returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxpayerInfo {
    pub clasificacion: String,
    pub vigencia_periodo: String,
    pub numero_consecutivo: i64,
    pub razon_social_oficial: String,
}

/// Structured fields read from one income tax return.
///
/// Amounts are in pesos as reported on the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclarationExtraction {
    // Identification
    pub nit: String,
    pub razon_social: String,
    pub ano_gravable: i32,
    pub numero_formulario: String,
    pub codigo_direccion_seccional: String,
    pub actividad_economica_principal: String,
    pub submission_date: String,
    pub submission_date_only: String,

    // Equity
    pub efectivo_equivalentes: f64,
    pub inversiones_instrumentos_financieros: f64,
    pub cuentas_documentos_arrendamientos: f64,
    pub inventarios: f64,
    pub activos_intangibles: f64,
    pub activos_biologicos: f64,
    pub propiedades_planta_equipo: f64,
    pub otros_activos: f64,
    pub patrimonio_bruto: f64,
    pub deudas: f64,
    pub patrimonio_liquido: f64,

    // Income
    pub ingresos_brutos_actividades_ordinarias: f64,
    pub ingresos_financieros: f64,
    pub otros_ingresos: f64,
    pub total_ingresos_brutos: f64,
    pub devoluciones_rebajas_descuentos: f64,
    pub ingresos_no_constitutivos_renta: f64,
    pub ingresos_netos: f64,

    // Costs and deductions
    pub costos: f64,
    pub gastos_administracion: f64,
    pub gastos_distribucion_ventas: f64,
    pub gastos_financieros: f64,
    pub otros_gastos_deducciones: f64,
    pub total_costos_gastos: f64,
    pub total_costos_gastos_nomina: f64,
    pub aportes_sistema_seguridad_social: f64,
    pub aportes_sena_icbf_cajas: f64,

    // Taxable income
    pub inversiones_efectuadas_ano: f64,
    pub inversiones_liquidadas_periodos_anteriores: f64,
    pub renta_recuperacion_deducciones: f64,
    pub renta_pasiva_ece: f64,
    pub renta_liquida_ordinaria_ejercicio: f64,
    pub compensaciones: f64,
    pub renta_liquida: f64,
    pub renta_presuntiva: f64,
    pub renta_exenta: f64,
    pub rentas_gravables: f64,
    pub renta_liquida_gravable: f64,

    // Occasional gains
    pub ingresos_ganancias_ocasionales: f64,
    pub costos_ganancias_ocasionales: f64,
    pub ganancias_ocasionales_no_gravadas: f64,
    pub ganancias_ocasionales_gravables: f64,

    // Tax liquidation
    pub subtotal_renta_impuesto: f64,
    pub impuesto_renta_liquida: f64,
    pub valor_adicionar_vaa: f64,
    pub descuentos_tributarios: f64,
    pub impuesto_neto_renta_sin_adicionado: f64,
    pub impuesto_adicionar_ia: f64,
    pub impuesto_neto_renta_con_adicionado: f64,
    pub impuesto_ganancias_ocasionales: f64,
    pub descuento_impuestos_exterior_ganancias: f64,
    pub total_impuesto_cargo: f64,
    pub valor_inversion_obras_impuestos_50: f64,
    pub descuento_efectivo_inversion_obras: f64,
    pub credito_fiscal_articulo_256: f64,
    pub anticipo_renta_liquidado_anterior: f64,
    pub saldo_favor_anterior_sin_solicitud: f64,
    pub autorretenciones: f64,
    pub otras_retenciones: f64,
    pub retenciones_autorretenciones: f64,
    pub anticipo_renta_ano_siguiente: f64,
    pub anticipo_puntos_adicionales_anterior: f64,
    pub anticipo_puntos_adicionales_siguiente: f64,
    pub saldo_pagar_impuesto: f64,
    pub sanciones: f64,
    pub valor_pagar: f64,
    pub saldo_favor: f64,

    // Filing
    pub fecha_presentacion: String,
    pub hora_presentacion: String,
    pub liquidacion_tipo: String,
    pub codigo_contador_revisor: String,
    pub numero_tarjeta_profesional: String,
    pub es_gran_contribuyente: bool,
    #[serde(default)]
    pub contribuyente_info: Map<String, Value>,
    #[serde(default)]
    pub additional_fields: Map<String, Value>,
    pub extraction_timestamp: String,
    pub message: String,
}

impl DeclarationExtraction {
    /// The taxpayer classification block, when the backend filled it in.
    #[must_use]
    pub fn taxpayer_info(&self) -> Option<TaxpayerInfo> {
        if self.contribuyente_info.is_empty() {
            return None;
        }
        serde_json::from_value(Value::Object(self.contribuyente_info.clone())).ok()
    }
}
