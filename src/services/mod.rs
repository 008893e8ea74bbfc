//! Services module
//!
//! Lógica de negocio que combina varios repositorios: presupuestos,
//! importación del catálogo y cache de respuestas.

pub mod import_service;
pub mod quote_service;
pub mod response_cache;

pub use import_service::{CatalogFile, ImportReport, ImportService};
pub use quote_service::QuoteService;
pub use response_cache::ResponseCache;
