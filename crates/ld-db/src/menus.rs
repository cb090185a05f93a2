//! Sidebar menu repository.

use ld_core::types::Id;

use crate::error::DbResult;
use crate::procedure::{ProcParam, ProcedureExecutor, Record};

/// Row returned by `sp_get_sidebar_menus`: one per menu the user may see.
///
/// Output contract: `moduleid bigint, modulename text, menuid bigint,
/// menuname text, menuurl text, menuicon text, parentmenuid bigint`.
/// Every column is nullable; the hierarchy builder decides how to treat
/// missing values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuRow {
    pub module_id: Option<Id>,
    pub module_name: Option<String>,
    pub menu_id: Option<Id>,
    pub menu_name: Option<String>,
    pub menu_url: Option<String>,
    pub menu_icon: Option<String>,
    pub parent_menu_id: Option<Id>,
}

impl MenuRow {
    fn from_record(record: &Record) -> Self {
        Self {
            module_id: record.get_i64("moduleid"),
            module_name: record.get_str("modulename").map(str::to_owned),
            menu_id: record.get_i64("menuid"),
            menu_name: record.get_str("menuname").map(str::to_owned),
            menu_url: record.get_str("menuurl").map(str::to_owned),
            menu_icon: record.get_str("menuicon").map(str::to_owned),
            parent_menu_id: record.get_i64("parentmenuid"),
        }
    }
}

pub struct MenuRepository {
    exec: ProcedureExecutor,
}

impl MenuRepository {
    pub fn new(exec: ProcedureExecutor) -> Self {
        Self { exec }
    }

    /// Flat, authorized menu rows for one user, in display order.
    pub async fn sidebar_rows(&self, user_id: Id) -> DbResult<Vec<MenuRow>> {
        const PROC: &str = "sp_get_sidebar_menus";
        let records = self
            .exec
            .fetch_rows(PROC, &[ProcParam::bigint(user_id)])
            .await?;
        Ok(records.iter().map(MenuRow::from_record).collect())
    }
}
