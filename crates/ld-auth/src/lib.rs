//! # ld-auth
//!
//! Session-based authentication and authorization state for LedgerDesk:
//!
//! - Server-side sessions with a pluggable store
//! - Session cookie construction and parsing
//! - Per-menu capability flags
//! - The per-user sidebar cache with explicit invalidation

pub mod permissions;
pub mod session;
pub mod sidebar_cache;

pub use permissions::{PermissionFlags, RightKind};
pub use session::{CookieConfig, MemorySessionStore, SameSite, Session, SessionError, SessionStore};
pub use sidebar_cache::SidebarCache;
