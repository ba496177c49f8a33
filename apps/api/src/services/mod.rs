//! Service layer.
//!
//! Operations that span more than one entity store live here; single-store
//! CRUD is handled directly by the route handlers.

pub mod invoice_service;
pub mod messaging;

pub use invoice_service::InvoiceService;
pub use messaging::{InvoiceMessenger, MockMessenger};
