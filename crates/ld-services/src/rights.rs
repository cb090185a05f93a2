//! Rights-matrix services.
//!
//! The bulk save iterates the submitted rows in order and upserts each one
//! independently; there is no transaction spanning the batch. Policy:
//! fail-fast. The first failing row stops the loop and is reported by menu
//! id; rows saved before it stay committed.

use async_trait::async_trait;
use ld_core::types::Id;
use ld_db::rights::{RightRow, RightSpec, RightsRepository};
use ld_db::{DbResult, MutationOutcome};

use crate::result::ServiceResult;

/// One row of the submitted rights grid.
#[derive(Debug, Clone)]
pub struct RightInput {
    /// Existing right row id, zero when the (user, menu) pair has none yet.
    pub right_id: i64,
    pub menu_id: Id,
    pub can_view: bool,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

/// Seam over the single-row upsert so the bulk-save policy is testable
/// without a database.
#[async_trait]
pub trait RightsWriter: Send + Sync {
    async fn save_right(&self, spec: &RightSpec) -> DbResult<MutationOutcome>;
}

#[async_trait]
impl RightsWriter for RightsRepository {
    async fn save_right(&self, spec: &RightSpec) -> DbResult<MutationOutcome> {
        RightsRepository::save_right(self, spec).await
    }
}

pub struct RightsMatrixService<'a> {
    rights: &'a RightsRepository,
}

impl<'a> RightsMatrixService<'a> {
    pub fn new(rights: &'a RightsRepository) -> Self {
        Self { rights }
    }

    /// The complete menu-rights grid for one user.
    pub async fn call(&self, user_id: Id) -> ServiceResult<Vec<RightRow>> {
        match self.rights.matrix(user_id).await {
            Ok(rows) => ServiceResult::success(rows),
            Err(e) => {
                tracing::error!(error = %e, user_id, "rights matrix fetch failed");
                ServiceResult::failure_with_base_error(format!("System error: {e}"))
            }
        }
    }
}

pub struct SaveAllRightsService<'a, W: RightsWriter + ?Sized> {
    writer: &'a W,
}

impl<'a, W: RightsWriter + ?Sized> SaveAllRightsService<'a, W> {
    pub fn new(writer: &'a W) -> Self {
        Self { writer }
    }

    /// Save every submitted row, in order, stopping at the first failure.
    /// Returns the number of rows persisted.
    pub async fn call(&self, user_id: Id, rights: &[RightInput]) -> ServiceResult<usize> {
        if user_id <= 0 {
            return ServiceResult::failure_with_base_error("Invalid data format.");
        }

        let mut saved = 0usize;
        for right in rights {
            let spec = RightSpec {
                right_id: right.right_id,
                user_id,
                menu_id: right.menu_id,
                can_view: right.can_view,
                can_create: right.can_create,
                can_edit: right.can_edit,
                can_delete: right.can_delete,
            };

            match self.writer.save_right(&spec).await {
                Ok(outcome) if outcome.is_applied() => saved += 1,
                Ok(outcome) => {
                    return ServiceResult::failure_with_base_error(format!(
                        "Failed to save right for menu {}: {}",
                        right.menu_id,
                        outcome.message()
                    ));
                }
                Err(e) => {
                    tracing::error!(error = %e, menu_id = right.menu_id, "right save failed");
                    return ServiceResult::failure_with_base_error(format!(
                        "Failed to save right for menu {}",
                        right.menu_id
                    ));
                }
            }
        }

        ServiceResult::success_with_message(saved, "User rights updated successfully!")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ld_db::DbError;
    use std::sync::Mutex;

    /// Records every applied spec; fails when asked to save `fail_on_menu`.
    struct RecordingWriter {
        saved: Mutex<Vec<RightSpec>>,
        fail_on_menu: Option<Id>,
    }

    impl RecordingWriter {
        fn new(fail_on_menu: Option<Id>) -> Self {
            Self {
                saved: Mutex::new(Vec::new()),
                fail_on_menu,
            }
        }

        fn saved_count(&self) -> usize {
            self.saved.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl RightsWriter for RecordingWriter {
        async fn save_right(&self, spec: &RightSpec) -> DbResult<MutationOutcome> {
            if self.fail_on_menu == Some(spec.menu_id) {
                return Err(DbError::Contract {
                    proc: "sp_save_user_right",
                    detail: "boom".into(),
                });
            }
            self.saved.lock().unwrap().push(spec.clone());
            Ok(MutationOutcome::Applied)
        }
    }

    fn rights(menu_ids: &[Id]) -> Vec<RightInput> {
        menu_ids
            .iter()
            .map(|menu_id| RightInput {
                right_id: 0,
                menu_id: *menu_id,
                can_view: true,
                can_create: false,
                can_edit: false,
                can_delete: false,
            })
            .collect()
    }

    #[tokio::test]
    async fn saves_every_row_on_success() {
        let writer = RecordingWriter::new(None);
        let service = SaveAllRightsService::new(&writer);

        let result = service.call(7, &rights(&[10, 11, 12])).await;
        assert!(result.is_success());
        assert_eq!(result.result(), Some(&3));
        assert_eq!(writer.saved_count(), 3);
        assert_eq!(
            result.message(),
            Some("User rights updated successfully!")
        );
    }

    #[tokio::test]
    async fn failure_at_k_leaves_exactly_k_minus_one_persisted() {
        // Fail-fast policy: the third of five rows fails, so exactly the
        // first two stay committed and the last two are never attempted.
        let writer = RecordingWriter::new(Some(12));
        let service = SaveAllRightsService::new(&writer);

        let result = service.call(7, &rights(&[10, 11, 12, 13, 14])).await;
        assert!(result.is_failure());
        assert_eq!(writer.saved_count(), 2);
        assert!(result.display_message().contains("menu 12"));
    }

    #[tokio::test]
    async fn business_rejection_also_stops_the_loop() {
        struct RejectingWriter;

        #[async_trait]
        impl RightsWriter for RejectingWriter {
            async fn save_right(&self, spec: &RightSpec) -> DbResult<MutationOutcome> {
                if spec.menu_id == 11 {
                    Ok(MutationOutcome::Rejected {
                        code: 50_004,
                        message: "Access denied".into(),
                    })
                } else {
                    Ok(MutationOutcome::Applied)
                }
            }
        }

        let writer = RejectingWriter;
        let service = SaveAllRightsService::new(&writer);
        let result = service.call(7, &rights(&[10, 11, 12])).await;

        assert!(result.is_failure());
        assert!(result.display_message().contains("menu 11"));
    }

    #[tokio::test]
    async fn invalid_user_id_rejected_without_any_write() {
        let writer = RecordingWriter::new(None);
        let service = SaveAllRightsService::new(&writer);

        let result = service.call(0, &rights(&[10])).await;
        assert!(result.is_failure());
        assert_eq!(writer.saved_count(), 0);
    }

    #[tokio::test]
    async fn empty_batch_succeeds_with_zero_saved() {
        let writer = RecordingWriter::new(None);
        let service = SaveAllRightsService::new(&writer);

        let result = service.call(7, &[]).await;
        assert!(result.is_success());
        assert_eq!(result.result(), Some(&0));
    }
}
