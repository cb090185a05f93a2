//! User repository.
//!
//! Wraps the `sp_users_*` and `sp_authenticate_user` procedures.

use ld_core::types::Id;
use serde::Serialize;

use crate::error::{DbError, DbResult};
use crate::procedure::{ProcParam, ProcedureExecutor, Record};
use crate::repository::{decode_version, MutationOutcome};

/// Row returned by `sp_users_get_list`.
///
/// Output contract: `userid bigint, serviceid bigint, username text,
/// fullname text, statusid bigint, statusname text, versionid bytea`.
/// The credential hash never leaves the database.
#[derive(Debug, Clone, Serialize)]
pub struct UserRow {
    pub user_id: Id,
    pub service_id: Id,
    pub username: String,
    pub full_name: String,
    pub status_id: Option<i64>,
    pub status_name: Option<String>,
    pub version_hex: Option<String>,
}

impl UserRow {
    fn from_record(record: &Record, proc: &'static str) -> DbResult<Self> {
        let user_id = record.get_i64("userid").ok_or_else(|| DbError::Contract {
            proc,
            detail: "missing `userid` column".into(),
        })?;
        Ok(Self {
            user_id,
            service_id: record.get_i64("serviceid").unwrap_or_default(),
            username: record.get_str("username").unwrap_or_default().to_owned(),
            full_name: record.get_str("fullname").unwrap_or_default().to_owned(),
            status_id: record.get_i64("statusid"),
            status_name: record.get_str("statusname").map(str::to_owned),
            version_hex: record.get_str("version_hex").map(str::to_owned),
        })
    }
}

/// Identity row returned by `sp_authenticate_user`.
///
/// Output contract: `userid bigint, fullname text, serviceid bigint,
/// servicename text`; zero rows means the credentials or the service
/// mapping are invalid.
#[derive(Debug, Clone)]
pub struct AuthRow {
    pub user_id: Id,
    pub full_name: String,
    pub service_id: Id,
    pub service_name: String,
}

/// Input for `sp_users_insert`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub service_id: Id,
    pub username: String,
    pub full_name: String,
    pub password: String,
    pub status_id: i64,
    pub created_by: Id,
}

/// Input for `sp_users_update`. `version_hex` is the stamp captured at the
/// caller's last read.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub service_id: Id,
    pub user_id: Id,
    pub username: String,
    pub full_name: String,
    pub password: String,
    pub status_id: i64,
    pub version_hex: String,
    pub changed_by: Id,
}

/// Outcome of `sp_users_insert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Created { user_id: Id },
    Rejected { code: i32, message: String },
}

pub struct UserRepository {
    exec: ProcedureExecutor,
}

impl UserRepository {
    pub fn new(exec: ProcedureExecutor) -> Self {
        Self { exec }
    }

    /// All users of one service.
    pub async fn list_by_service(&self, service_id: Id) -> DbResult<Vec<UserRow>> {
        const PROC: &str = "sp_users_get_list";
        let records = self
            .exec
            .fetch_rows(PROC, &[ProcParam::bigint(service_id)])
            .await?;
        records
            .iter()
            .map(|record| UserRow::from_record(record, PROC))
            .collect()
    }

    /// Create a user.
    ///
    /// Output contract: `code int, message text, new_id bigint`.
    pub async fn insert(&self, user: &NewUser) -> DbResult<InsertOutcome> {
        const PROC: &str = "sp_users_insert";
        let envelope = self
            .exec
            .execute(
                PROC,
                &[
                    ProcParam::bigint(user.service_id),
                    ProcParam::text(user.username.clone()),
                    ProcParam::text(user.full_name.clone()),
                    ProcParam::text(user.password.clone()),
                    ProcParam::bigint(user.status_id),
                    ProcParam::bigint(user.created_by),
                ],
            )
            .await?;

        if !envelope.is_success() {
            return Ok(InsertOutcome::Rejected {
                code: envelope.code,
                message: envelope.message,
            });
        }

        let user_id = envelope
            .record
            .as_ref()
            .and_then(|r| r.get_i64("new_id"))
            .ok_or(DbError::Contract {
                proc: PROC,
                detail: "success row is missing `new_id`".into(),
            })?;
        Ok(InsertOutcome::Created { user_id })
    }

    /// Update a user, presenting the version stamp from the last read.
    ///
    /// Output contract: `code int, message text`; codes 50001/50002 signal
    /// a stale stamp and a missing record respectively.
    pub async fn update(&self, update: &UserUpdate) -> DbResult<MutationOutcome> {
        const PROC: &str = "sp_users_update";
        let version = decode_version(&update.version_hex)?;
        let envelope = self
            .exec
            .execute(
                PROC,
                &[
                    ProcParam::bigint(update.service_id),
                    ProcParam::bigint(update.user_id),
                    ProcParam::text(update.username.clone()),
                    ProcParam::text(update.full_name.clone()),
                    ProcParam::text(update.password.clone()),
                    ProcParam::bigint(update.status_id),
                    ProcParam::bytes(version),
                    ProcParam::bigint(update.changed_by),
                ],
            )
            .await?;
        Ok(MutationOutcome::from_envelope(&envelope))
    }

    /// Delete a user; same version-stamp contract as [`Self::update`].
    pub async fn delete(
        &self,
        service_id: Id,
        user_id: Id,
        version_hex: &str,
        requested_by: Id,
    ) -> DbResult<MutationOutcome> {
        const PROC: &str = "sp_users_delete";
        let version = decode_version(version_hex)?;
        let envelope = self
            .exec
            .execute(
                PROC,
                &[
                    ProcParam::bigint(service_id),
                    ProcParam::bigint(user_id),
                    ProcParam::bytes(version),
                    ProcParam::bigint(requested_by),
                ],
            )
            .await?;
        Ok(MutationOutcome::from_envelope(&envelope))
    }

    /// Verify credentials against a service.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
        service_id: Id,
    ) -> DbResult<Option<AuthRow>> {
        const PROC: &str = "sp_authenticate_user";
        let record = self
            .exec
            .fetch_one(
                PROC,
                &[
                    ProcParam::text(username),
                    ProcParam::text(password),
                    ProcParam::bigint(service_id),
                ],
            )
            .await?;

        let Some(record) = record else {
            return Ok(None);
        };

        let user_id = record.get_i64("userid").ok_or(DbError::Contract {
            proc: PROC,
            detail: "missing `userid` column".into(),
        })?;
        Ok(Some(AuthRow {
            user_id,
            full_name: record.get_str("fullname").unwrap_or_default().to_owned(),
            service_id: record.get_i64("serviceid").unwrap_or(service_id),
            service_name: record.get_str("servicename").unwrap_or_default().to_owned(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedure::ProcValue;

    #[test]
    fn user_row_decodes_from_record() {
        let mut record = Record::new();
        record.push("UserID", ProcValue::Int(5));
        record.push("ServiceID", ProcValue::Int(2));
        record.push("Username", ProcValue::Text("jroe".into()));
        record.push("FullName", ProcValue::Text("Jane Roe".into()));
        record.push("StatusID", ProcValue::Int(1));
        record.push("versionid", ProcValue::Bytes(vec![0x01, 0xff]));
        record.push("version_hex", ProcValue::Text("01ff".into()));

        let row = UserRow::from_record(&record, "sp_users_get_list").unwrap();
        assert_eq!(row.user_id, 5);
        assert_eq!(row.username, "jroe");
        assert_eq!(row.version_hex.as_deref(), Some("01ff"));
    }

    #[test]
    fn user_row_requires_id() {
        let mut record = Record::new();
        record.push("username", ProcValue::Text("jroe".into()));
        let err = UserRow::from_record(&record, "sp_users_get_list").unwrap_err();
        assert!(matches!(err, DbError::Contract { .. }));
    }
}
