//! Typed payloads exchanged with the extraction backend.
//!
//! Field names follow the backend's JSON schema (Colombian tax vocabulary:
//! NIT, RUT, razón social, DIAN). Required fields are not defaulted, so a
//! response missing one is rejected at decode time instead of silently
//! producing empty values.

pub mod accounting;
pub mod calendar;
pub mod declaration;
pub mod invoice;
pub mod rut;
pub mod third_party;

pub use accounting::{AccountingClient, AccountingClientPage};
pub use calendar::{
    AppliedFilters, CalendarFilter, CalendarResponse, LargeTaxpayerDeadline, LegalEntityDeadline,
};
pub use declaration::{DeclarationExtraction, TaxpayerInfo};
pub use invoice::{InvoiceData, InvoiceItem};
pub use rut::{
    LegalRepresentative, ProcessingState, RutBatchResponse, RutClientBatchResponse,
    RutClientExtraction, RutData, RutListResponse, RutRecord, RutStateUpdate, StateCounts,
};
pub use third_party::{
    Association, AssociationState, ClientProvider, ClientProviderPage, ClientProviderRut,
    ClientProviderRuts, ClientProviderSummary, CreatedClientProvider, EntityKind,
    NewClientProvider, RiskLevel,
};
