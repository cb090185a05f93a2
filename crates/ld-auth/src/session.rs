//! Session authentication.
//!
//! A session is established at login and carries the identity the rest of
//! the application reads: user id, display name, and the currently selected
//! service (tenant).

use std::collections::HashMap;

use ld_core::types::{Id, SessionUser};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found")]
    NotFound,
    #[error("Session expired")]
    Expired,
    #[error("Session invalid")]
    Invalid,
}

/// Server-side session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Session ID
    pub id: String,
    pub user_id: Id,
    pub full_name: String,
    /// Currently selected service (tenant)
    pub service_id: Id,
    pub service_name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub accessed_at: chrono::DateTime<chrono::Utc>,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

impl Session {
    /// Create a session for an authenticated user.
    pub fn new(user: SessionUser, lifetime_seconds: i64) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: generate_session_id(),
            user_id: user.user_id,
            full_name: user.full_name,
            service_id: user.service_id,
            service_name: user.service_name,
            created_at: now,
            accessed_at: now,
            expires_at: now + chrono::Duration::seconds(lifetime_seconds),
        }
    }

    pub fn is_valid(&self) -> bool {
        chrono::Utc::now() < self.expires_at
    }

    /// Update accessed_at.
    pub fn touch(&mut self) {
        self.accessed_at = chrono::Utc::now();
    }

    pub fn extend(&mut self, additional_seconds: i64) {
        self.expires_at = chrono::Utc::now() + chrono::Duration::seconds(additional_seconds);
        self.touch();
    }

    /// The identity payload carried by this session.
    pub fn user(&self) -> SessionUser {
        SessionUser {
            user_id: self.user_id,
            full_name: self.full_name.clone(),
            service_id: self.service_id,
            service_name: self.service_name.clone(),
        }
    }
}

/// Generate a random session ID.
fn generate_session_id() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    const SESSION_ID_LENGTH: usize = 64;

    let mut rng = rand::rng();
    (0..SESSION_ID_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Session store trait for different backends.
pub trait SessionStore: Send + Sync {
    /// Get a valid session by ID.
    fn get(&self, session_id: &str) -> Option<Session>;

    /// Store a session.
    fn set(&self, session: Session) -> Result<(), SessionError>;

    /// Delete a session.
    fn delete(&self, session_id: &str) -> Result<(), SessionError>;

    /// Delete all sessions for a user.
    fn delete_user_sessions(&self, user_id: Id) -> Result<usize, SessionError>;

    /// Clean up expired sessions.
    fn cleanup_expired(&self) -> Result<usize, SessionError>;
}

/// In-memory session store.
pub struct MemorySessionStore {
    sessions: std::sync::RwLock<HashMap<String, Session>>,
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: std::sync::RwLock::new(HashMap::new()),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, session_id: &str) -> Option<Session> {
        let sessions = self.sessions.read().ok()?;
        sessions.get(session_id).cloned().filter(|s| s.is_valid())
    }

    fn set(&self, session: Session) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().map_err(|_| SessionError::Invalid)?;
        sessions.insert(session.id.clone(), session);
        Ok(())
    }

    fn delete(&self, session_id: &str) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().map_err(|_| SessionError::Invalid)?;
        sessions.remove(session_id);
        Ok(())
    }

    fn delete_user_sessions(&self, user_id: Id) -> Result<usize, SessionError> {
        let mut sessions = self.sessions.write().map_err(|_| SessionError::Invalid)?;
        let to_remove: Vec<String> = sessions
            .iter()
            .filter(|(_, s)| s.user_id == user_id)
            .map(|(k, _)| k.clone())
            .collect();

        let count = to_remove.len();
        for key in to_remove {
            sessions.remove(&key);
        }

        Ok(count)
    }

    fn cleanup_expired(&self) -> Result<usize, SessionError> {
        let mut sessions = self.sessions.write().map_err(|_| SessionError::Invalid)?;
        let now = chrono::Utc::now();
        let to_remove: Vec<String> = sessions
            .iter()
            .filter(|(_, s)| s.expires_at < now)
            .map(|(k, _)| k.clone())
            .collect();

        let count = to_remove.len();
        for key in to_remove {
            sessions.remove(&key);
        }

        Ok(count)
    }
}

/// Cookie configuration for sessions.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub path: String,
    pub domain: Option<String>,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub max_age: Option<i64>,
}

#[derive(Debug, Clone, Copy)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "_ledgerdesk_session".to_string(),
            path: "/".to_string(),
            domain: None,
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
            max_age: None,
        }
    }
}

impl CookieConfig {
    /// Non-secure configuration for local development.
    pub fn development() -> Self {
        Self {
            secure: false,
            ..Default::default()
        }
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Build cookie header value.
    pub fn build_cookie(&self, session_id: &str) -> String {
        let mut parts = vec![format!("{}={}", self.name, session_id)];

        parts.push(format!("Path={}", self.path));

        if let Some(ref domain) = self.domain {
            parts.push(format!("Domain={}", domain));
        }

        if self.secure {
            parts.push("Secure".to_string());
        }

        if self.http_only {
            parts.push("HttpOnly".to_string());
        }

        match self.same_site {
            SameSite::Strict => parts.push("SameSite=Strict".to_string()),
            SameSite::Lax => parts.push("SameSite=Lax".to_string()),
            SameSite::None => parts.push("SameSite=None".to_string()),
        }

        if let Some(max_age) = self.max_age {
            parts.push(format!("Max-Age={}", max_age));
        }

        parts.join("; ")
    }

    /// Build cookie header to clear the session.
    pub fn build_clear_cookie(&self) -> String {
        format!("{}=; Path={}; Max-Age=0; HttpOnly", self.name, self.path)
    }
}

/// Extract session ID from a Cookie header value.
pub fn extract_session_id(cookie_header: &str, cookie_name: &str) -> Option<String> {
    for part in cookie_header.split(';') {
        let part = part.trim();
        if let Some((name, value)) = part.split_once('=') {
            if name.trim() == cookie_name {
                return Some(value.trim().to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> SessionUser {
        SessionUser {
            user_id: 1,
            full_name: "Jane Roe".into(),
            service_id: 2,
            service_name: "Head Office".into(),
        }
    }

    #[test]
    fn session_creation() {
        let session = Session::new(sample_user(), 3600);
        assert!(session.is_valid());
        assert_eq!(session.user_id, 1);
        assert_eq!(session.service_id, 2);
        assert_eq!(session.id.len(), 64);
    }

    #[test]
    fn session_user_round_trip() {
        let session = Session::new(sample_user(), 3600);
        assert_eq!(session.user(), sample_user());
    }

    #[test]
    fn expired_session_is_invalid() {
        let session = Session::new(sample_user(), -1);
        assert!(!session.is_valid());
    }

    #[test]
    fn memory_session_store() {
        let store = MemorySessionStore::new();
        let session = Session::new(sample_user(), 3600);
        let session_id = session.id.clone();

        store.set(session).unwrap();

        let retrieved = store.get(&session_id);
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().user_id, 1);

        store.delete(&session_id).unwrap();
        assert!(store.get(&session_id).is_none());
    }

    #[test]
    fn store_hides_expired_sessions() {
        let store = MemorySessionStore::new();
        let session = Session::new(sample_user(), -1);
        let session_id = session.id.clone();
        store.set(session).unwrap();

        assert!(store.get(&session_id).is_none());
        assert_eq!(store.cleanup_expired().unwrap(), 1);
    }

    #[test]
    fn delete_user_sessions_removes_only_that_user() {
        let store = MemorySessionStore::new();
        store.set(Session::new(sample_user(), 3600)).unwrap();
        store.set(Session::new(sample_user(), 3600)).unwrap();

        let other = SessionUser {
            user_id: 9,
            ..sample_user()
        };
        let other_session = Session::new(other, 3600);
        let other_id = other_session.id.clone();
        store.set(other_session).unwrap();

        assert_eq!(store.delete_user_sessions(1).unwrap(), 2);
        assert!(store.get(&other_id).is_some());
    }

    #[test]
    fn cookie_config() {
        let config = CookieConfig::default();
        let cookie = config.build_cookie("abc123");

        assert!(cookie.contains("_ledgerdesk_session=abc123"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));

        let cleared = config.build_clear_cookie();
        assert!(cleared.contains("Max-Age=0"));
    }

    #[test]
    fn extract_session_id_from_header() {
        let cookie = "_ledgerdesk_session=abc123; other=value";
        assert_eq!(
            extract_session_id(cookie, "_ledgerdesk_session"),
            Some("abc123".to_string())
        );
        assert_eq!(extract_session_id(cookie, "missing"), None);
    }
}
