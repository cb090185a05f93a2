//! Rights-matrix repository.
//!
//! The matrix is the full grid of (menu x capability) booleans for one
//! user; each row is saved independently through a single-row upsert.

use ld_core::types::Id;
use serde::Serialize;

use crate::error::DbResult;
use crate::procedure::{ProcParam, ProcedureExecutor, Record};
use crate::repository::MutationOutcome;

/// Row returned by `sp_get_user_rights_matrix`.
///
/// Output contract: `rightid bigint (0 when the pair has no row yet),
/// menuid bigint, menuname text, modulename text, canview int, cancreate
/// int, canedit int, candelete int`.
#[derive(Debug, Clone, Serialize)]
pub struct RightRow {
    pub right_id: i64,
    pub menu_id: Id,
    pub menu_name: String,
    pub module_name: Option<String>,
    pub can_view: bool,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

impl RightRow {
    fn from_record(record: &Record) -> Self {
        Self {
            right_id: record.get_i64("rightid").unwrap_or(0),
            menu_id: record.get_i64("menuid").unwrap_or(0),
            menu_name: record.get_str("menuname").unwrap_or_default().to_owned(),
            module_name: record.get_str("modulename").map(str::to_owned),
            can_view: record.get_bool("canview").unwrap_or(false),
            can_create: record.get_bool("cancreate").unwrap_or(false),
            can_edit: record.get_bool("canedit").unwrap_or(false),
            can_delete: record.get_bool("candelete").unwrap_or(false),
        }
    }
}

/// One upsert for `sp_save_user_right`. `right_id` zero means insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RightSpec {
    pub right_id: i64,
    pub user_id: Id,
    pub menu_id: Id,
    pub can_view: bool,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

pub struct RightsRepository {
    exec: ProcedureExecutor,
}

impl RightsRepository {
    pub fn new(exec: ProcedureExecutor) -> Self {
        Self { exec }
    }

    /// The complete menu-rights grid for a user.
    pub async fn matrix(&self, user_id: Id) -> DbResult<Vec<RightRow>> {
        const PROC: &str = "sp_get_user_rights_matrix";
        let records = self
            .exec
            .fetch_rows(PROC, &[ProcParam::bigint(user_id)])
            .await?;
        Ok(records.iter().map(RightRow::from_record).collect())
    }

    /// Upsert a single permission row.
    ///
    /// Output contract: `code int, message text`. Rows are independent:
    /// there is no transaction spanning a batch of calls.
    pub async fn save_right(&self, spec: &RightSpec) -> DbResult<MutationOutcome> {
        const PROC: &str = "sp_save_user_right";
        let envelope = self
            .exec
            .execute(
                PROC,
                &[
                    ProcParam::bigint(spec.right_id),
                    ProcParam::bigint(spec.user_id),
                    ProcParam::bigint(spec.menu_id),
                    ProcParam::int(i32::from(spec.can_view)),
                    ProcParam::int(i32::from(spec.can_create)),
                    ProcParam::int(i32::from(spec.can_edit)),
                    ProcParam::int(i32::from(spec.can_delete)),
                ],
            )
            .await?;
        Ok(MutationOutcome::from_envelope(&envelope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedure::ProcValue;

    #[test]
    fn right_row_decodes_integer_flags() {
        let mut record = Record::new();
        record.push("RightID", ProcValue::Int(3));
        record.push("MenuID", ProcValue::Int(10));
        record.push("MenuName", ProcValue::Text("Cash Book".into()));
        record.push("CanView", ProcValue::Int(1));
        record.push("CanCreate", ProcValue::Int(0));
        record.push("CanEdit", ProcValue::Int(1));
        record.push("CanDelete", ProcValue::Int(0));

        let row = RightRow::from_record(&record);
        assert_eq!(row.right_id, 3);
        assert_eq!(row.menu_id, 10);
        assert!(row.can_view);
        assert!(!row.can_create);
        assert!(row.can_edit);
        assert!(!row.can_delete);
    }

    #[test]
    fn missing_right_id_defaults_to_zero() {
        let mut record = Record::new();
        record.push("MenuID", ProcValue::Int(10));
        let row = RightRow::from_record(&record);
        assert_eq!(row.right_id, 0);
    }
}
