//! # ld-services
//!
//! Business rule modules for LedgerDesk. Services validate input through
//! contracts, call the repositories, and translate raw outcomes into a
//! uniform [`ServiceResult`] envelope. Unanticipated repository errors are
//! caught here and become generic error envelopes; nothing propagates as a
//! protocol-level failure.

pub mod auth;
pub mod lookups;
pub mod result;
pub mod rights;
pub mod sidebar;
pub mod transactions;
pub mod users;

pub use auth::LoginService;
pub use lookups::LookupService;
pub use result::ServiceResult;
pub use rights::{RightInput, RightsMatrixService, RightsWriter, SaveAllRightsService};
pub use sidebar::{build_hierarchy, Hierarchy, MenuNode, ModuleNode};
