//! Lookup service: id/text pairs for selection inputs.

use ld_db::lookups::{LookupItem, LookupRepository};

use crate::result::ServiceResult;

pub struct LookupService<'a> {
    lookups: &'a LookupRepository,
}

impl<'a> LookupService<'a> {
    pub fn new(lookups: &'a LookupRepository) -> Self {
        Self { lookups }
    }

    /// Fetch the entries for one lookup type, optionally narrowed by a
    /// search term the procedure applies.
    pub async fn call(
        &self,
        lookup_type: &str,
        search_term: Option<&str>,
    ) -> ServiceResult<Vec<LookupItem>> {
        if lookup_type.trim().is_empty() {
            return ServiceResult::failure_with_base_error("Lookup type is required.");
        }

        match self.lookups.fetch(lookup_type, search_term).await {
            Ok(items) => ServiceResult::success(items),
            Err(e) => {
                tracing::error!(error = %e, lookup_type, "lookup fetch failed");
                ServiceResult::failure_with_base_error(format!("System error: {e}"))
            }
        }
    }
}
