//! Per-menu capability flags.
//!
//! Authorization is a grid of four independent booleans per (user, menu)
//! pair; there is no role indirection.

use serde::{Deserialize, Serialize};

/// The four capabilities a user can hold on a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RightKind {
    View,
    Create,
    Edit,
    Delete,
}

/// One cell row of the rights matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionFlags {
    pub can_view: bool,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

impl PermissionFlags {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn view_only() -> Self {
        Self {
            can_view: true,
            ..Self::default()
        }
    }

    pub fn all() -> Self {
        Self {
            can_view: true,
            can_create: true,
            can_edit: true,
            can_delete: true,
        }
    }

    pub fn allows(&self, kind: RightKind) -> bool {
        match kind {
            RightKind::View => self.can_view,
            RightKind::Create => self.can_create,
            RightKind::Edit => self.can_edit,
            RightKind::Delete => self.can_delete,
        }
    }

    pub fn any(&self) -> bool {
        self.can_view || self.can_create || self.can_edit || self.can_delete
    }
}
