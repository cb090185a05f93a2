//! Generic lookup repository: id/text pairs for selection inputs,
//! parameterized by a type tag (accounts, departments, cost centers,
//! voucher types, user statuses, services).

use serde::Serialize;

use crate::error::DbResult;
use crate::procedure::{ProcParam, ProcValue, ProcedureExecutor, Record};

/// One selectable entry.
///
/// Ids are carried as text so numeric and coded lookups share a shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupItem {
    pub id: String,
    pub text: String,
}

impl LookupItem {
    fn from_record(record: &Record) -> Self {
        let id = match record.get("id") {
            Some(ProcValue::Int(v)) => v.to_string(),
            Some(ProcValue::Text(v)) => v.clone(),
            _ => String::new(),
        };
        let text = record
            .get_str("text")
            .map(str::to_owned)
            .unwrap_or_else(|| "No Name".to_string());
        Self { id, text }
    }
}

pub struct LookupRepository {
    exec: ProcedureExecutor,
}

impl LookupRepository {
    pub fn new(exec: ProcedureExecutor) -> Self {
        Self { exec }
    }

    /// Fetch lookup entries.
    ///
    /// Output contract of `sp_common_get_lookup(type text, term text)`:
    /// `id bigint-or-text, text text`.
    pub async fn fetch(
        &self,
        lookup_type: &str,
        search_term: Option<&str>,
    ) -> DbResult<Vec<LookupItem>> {
        const PROC: &str = "sp_common_get_lookup";
        let records = self
            .exec
            .fetch_rows(
                PROC,
                &[
                    ProcParam::text(lookup_type),
                    ProcParam::opt_text(search_term),
                ],
            )
            .await?;
        Ok(records.iter().map(LookupItem::from_record).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_text_ids_both_stringify() {
        let mut numeric = Record::new();
        numeric.push("id", ProcValue::Int(12));
        numeric.push("text", ProcValue::Text("Petty Cash".into()));
        assert_eq!(
            LookupItem::from_record(&numeric),
            LookupItem { id: "12".into(), text: "Petty Cash".into() }
        );

        let mut coded = Record::new();
        coded.push("id", ProcValue::Text("CC-01".into()));
        coded.push("text", ProcValue::Text("Head Office".into()));
        assert_eq!(LookupItem::from_record(&coded).id, "CC-01");
    }

    #[test]
    fn missing_text_defaults_to_no_name() {
        let mut record = Record::new();
        record.push("id", ProcValue::Int(3));
        assert_eq!(LookupItem::from_record(&record).text, "No Name");
    }
}
