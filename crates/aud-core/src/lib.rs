//! # aud-core
//!
//! Core types and error types for Auditor.
//!
//! This crate provides the foundational types shared across all Auditor crates:
//! - Session [`Credentials`] relayed from the hosting window
//! - [`UploadProgress`] ticks for long-running uploads
//! - [`ExtractionOutcome`] and batch summaries for per-file extraction results
//! - Typed payloads returned by the extraction backend (declarations, RUT,
//!   invoices, tax calendars, clients/providers, accounting clients)
//! - The "Clientes" sheet export mapping
//! - Cross-cutting error types

pub mod credentials;
pub mod entities;
pub mod errors;
pub mod export;
pub mod outcome;
pub mod progress;

pub use credentials::Credentials;
pub use errors::CoreError;
pub use outcome::{BatchReport, ExtractionOutcome};
pub use progress::UploadProgress;
