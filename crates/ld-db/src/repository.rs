//! Shared repository types: mutation outcomes and version-stamp handling.

use crate::error::{DbError, DbResult};
use crate::procedure::StatusEnvelope;
use ld_core::status::DbStatus;

/// Outcome of a versioned update or delete.
///
/// The stored procedure is the sole arbiter of whether the presented
/// version stamp is still current. Concurrency violations and missing
/// records are distinct variants; presentation decides how much of that
/// distinction to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    /// The record exists but was changed since the caller's last read.
    Concurrency,
    /// The record no longer exists.
    NotFound,
    /// Any other business rejection, with the raw code and its message.
    Rejected { code: i32, message: String },
}

impl MutationOutcome {
    pub fn from_envelope(envelope: &StatusEnvelope) -> Self {
        match DbStatus::from_code(envelope.code) {
            DbStatus::Success => MutationOutcome::Applied,
            DbStatus::ConcurrencyViolation => MutationOutcome::Concurrency,
            DbStatus::RecordNotFound => MutationOutcome::NotFound,
            _ => MutationOutcome::Rejected {
                code: envelope.code,
                message: envelope.message.clone(),
            },
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied)
    }

    /// Human-readable message for the non-applied variants.
    pub fn message(&self) -> String {
        match self {
            MutationOutcome::Applied => DbStatus::Success.message(),
            MutationOutcome::Concurrency => DbStatus::ConcurrencyViolation.message(),
            MutationOutcome::NotFound => DbStatus::RecordNotFound.message(),
            MutationOutcome::Rejected { message, .. } => message.clone(),
        }
    }
}

/// Decode a caller-supplied hexadecimal version token into the binary
/// stamp expected by the procedures.
pub fn decode_version(token: &str) -> DbResult<Vec<u8>> {
    if token.is_empty() {
        return Err(DbError::BadVersionToken);
    }
    hex::decode(token).map_err(|_| DbError::BadVersionToken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedure::{ProcValue, Record};

    fn envelope(code: i32) -> StatusEnvelope {
        let mut record = Record::new();
        record.push("code", ProcValue::Int(i64::from(code)));
        StatusEnvelope {
            code,
            message: DbStatus::from_code(code).message(),
            record: Some(record),
        }
    }

    #[test]
    fn outcome_keeps_concurrency_and_not_found_distinct() {
        let stale = MutationOutcome::from_envelope(&envelope(50_001));
        let missing = MutationOutcome::from_envelope(&envelope(50_002));

        assert_eq!(stale, MutationOutcome::Concurrency);
        assert_eq!(missing, MutationOutcome::NotFound);
        assert_ne!(stale.message(), missing.message());
    }

    #[test]
    fn zero_code_is_applied() {
        assert!(MutationOutcome::from_envelope(&envelope(0)).is_applied());
    }

    #[test]
    fn other_codes_are_rejections_with_message() {
        let outcome = MutationOutcome::from_envelope(&envelope(50_003));
        match outcome {
            MutationOutcome::Rejected { code, ref message } => {
                assert_eq!(code, 50_003);
                assert!(message.contains("Duplicate"));
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn version_tokens_decode_from_hex() {
        assert_eq!(decode_version("ab12").unwrap(), vec![0xab, 0x12]);
        assert!(decode_version("").is_err());
        assert!(decode_version("not-hex").is_err());
    }
}
