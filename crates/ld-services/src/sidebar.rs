//! Sidebar hierarchy builder.
//!
//! Converts the flat, authorized menu rows into the two-level tree the
//! sidebar renders: module -> parent menu -> sub menu. Depth beyond two
//! levels is not represented; parent pointers are checked one level only,
//! never traversed transitively, so a malformed parent chain cannot loop
//! the builder.

use std::collections::BTreeMap;

use ld_core::types::Id;
use ld_db::menus::MenuRow;
use serde::Serialize;

/// module id -> module group. Rows without a module id group under `0`.
pub type Hierarchy = BTreeMap<Id, ModuleNode>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleNode {
    pub name: String,
    pub menus: BTreeMap<Id, MenuNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuNode {
    pub id: Id,
    pub name: String,
    pub url: String,
    pub icon: String,
    pub parent_id: Option<Id>,
    pub has_children: bool,
}

/// Build the sidebar hierarchy from flat rows.
///
/// Rules:
/// - a row with no menu id (absent or zero) is skipped;
/// - a missing module id groups under the sentinel module `0`, named "Main";
/// - a parent id that is absent, zero, or not among the same module's menus
///   is treated as top-level (the parent reference is cleared);
/// - a menu's `has_children` flag is set iff at least one other menu in the
///   same module declares it as parent.
pub fn build_hierarchy(rows: &[MenuRow]) -> Hierarchy {
    let mut hierarchy = Hierarchy::new();

    for row in rows {
        let Some(menu_id) = row.menu_id.filter(|id| *id != 0) else {
            continue;
        };
        let module_id = row.module_id.unwrap_or(0);

        let module = hierarchy.entry(module_id).or_insert_with(|| ModuleNode {
            name: non_blank(&row.module_name).unwrap_or_else(|| "Main".to_string()),
            menus: BTreeMap::new(),
        });

        module.menus.insert(
            menu_id,
            MenuNode {
                id: menu_id,
                name: non_blank(&row.menu_name).unwrap_or_else(|| "Unknown".to_string()),
                url: non_blank(&row.menu_url).unwrap_or_else(|| "#".to_string()),
                icon: non_blank(&row.menu_icon).unwrap_or_else(|| "bi-circle".to_string()),
                parent_id: row.parent_menu_id.filter(|id| *id != 0),
                has_children: false,
            },
        );
    }

    for module in hierarchy.values_mut() {
        link_parents(&mut module.menus);
    }

    hierarchy
}

/// Second pass over one module: clear parent references that do not resolve
/// within the module (including self references), then flag every resolved
/// parent as having children.
fn link_parents(menus: &mut BTreeMap<Id, MenuNode>) {
    let ids: Vec<Id> = menus.keys().copied().collect();

    let mut parents_to_flag = Vec::new();
    for (id, node) in menus.iter_mut() {
        match node.parent_id {
            Some(parent_id) if parent_id != *id && ids.contains(&parent_id) => {
                parents_to_flag.push(parent_id);
            }
            Some(_) => node.parent_id = None,
            None => {}
        }
    }

    for parent_id in parents_to_flag {
        if let Some(parent) = menus.get_mut(&parent_id) {
            parent.has_children = true;
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.trim().is_empty())
}
