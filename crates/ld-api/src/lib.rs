//! # ld-api
//!
//! Session-authenticated JSON HTTP surface for LedgerDesk. Handlers parse
//! request bodies, call the services, and serialize their envelopes; no
//! business rules live here.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;

pub use error::{ApiError, ApiResult};
pub use extractors::{AppState, AuthenticatedSession};
pub use routes::router;
