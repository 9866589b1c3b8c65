//! Per-View State Stores
//!
//! Each table owns a small explicit state object (rows keyed by id plus view
//! state), held in a `reactive_stores::Store` and updated by the reducer
//! functions below on response receipt. The DOM re-renders from the store;
//! nothing is read back out of the DOM. The reducers are plain functions so
//! the decision logic tests without a browser.

use leptos::prelude::Write;
use reactive_stores::Store;

use crate::models::{Decision, PartitionInfo, ProjectRow, Task, TaskDetail, UserRow};
use crate::table::{ProjectColumn, ProjectFilter, TableState, UserColumn, UserFilter};

/// Expansion state of one task row pair. `Loading` only occurs in the
/// lazy-detail variant; a failed fetch falls back to `Collapsed` so the
/// glyph never sticks on the spinner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Expansion {
    #[default]
    Collapsed,
    Loading,
    Expanded,
}

impl Expansion {
    pub fn glyph(self) -> &'static str {
        match self {
            Expansion::Collapsed => "+",
            Expansion::Loading => "⟳",
            Expansion::Expanded => "−",
        }
    }
}

/// One task with its client-side view state.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskEntry {
    pub task: Task,
    pub expansion: Expansion,
    pub detail: Option<TaskDetail>,
}

#[derive(Debug, Clone, Default, Store)]
pub struct TaskBoardState {
    pub entries: Vec<TaskEntry>,
    /// Pending-count badge, updated from each action reply.
    pub pending: u32,
    pub loaded: bool,
}

#[derive(Debug, Clone, Default, Store)]
pub struct ProjectBoardState {
    pub rows: Vec<ProjectRow>,
    pub table: TableState<ProjectColumn, ProjectFilter>,
    pub partition: Option<PartitionInfo>,
    pub loaded: bool,
}

#[derive(Debug, Clone, Default, Store)]
pub struct RegistryState {
    pub rows: Vec<UserRow>,
    pub table: TableState<UserColumn, UserFilter>,
    pub loaded: bool,
}

// ========================
// Task Reducers
// ========================

pub fn entries_from(tasks: Vec<Task>) -> Vec<TaskEntry> {
    tasks
        .into_iter()
        .map(|task| TaskEntry {
            task,
            expansion: Expansion::Collapsed,
            detail: None,
        })
        .collect()
}

/// Drop the acted-upon task and nothing else; both of its rendered rows go
/// with it since they render from this one entry.
pub fn remove_entry(entries: &mut Vec<TaskEntry>, id: u32) {
    entries.retain(|entry| entry.task.id != id);
}

/// Targeted patch after a successful edit: status text and decision icon
/// change in place, no list reload.
pub fn patch_entry(entries: &mut [TaskEntry], id: u32, status: &str, decision: Decision) {
    if let Some(entry) = entries.iter_mut().find(|entry| entry.task.id == id) {
        entry.task.status = status.to_string();
        entry.task.decision = decision;
    }
}

pub fn expansion_of(entries: &[TaskEntry], id: u32) -> Expansion {
    entries
        .iter()
        .find(|entry| entry.task.id == id)
        .map(|entry| entry.expansion)
        .unwrap_or_default()
}

pub fn set_expansion(entries: &mut [TaskEntry], id: u32, expansion: Expansion) {
    if let Some(entry) = entries.iter_mut().find(|entry| entry.task.id == id) {
        entry.expansion = expansion;
    }
}

pub fn detail_of(entries: &[TaskEntry], id: u32) -> Option<TaskDetail> {
    entries
        .iter()
        .find(|entry| entry.task.id == id)
        .and_then(|entry| entry.detail.clone())
}

pub fn set_detail(entries: &mut [TaskEntry], id: u32, detail: TaskDetail) {
    if let Some(entry) = entries.iter_mut().find(|entry| entry.task.id == id) {
        entry.detail = Some(detail);
    }
}

// ========================
// Project Reducers
// ========================

pub fn patch_project(rows: &mut [ProjectRow], id: u32, patch: impl FnOnce(&mut ProjectRow)) {
    if let Some(row) = rows.iter_mut().find(|row| row.id == id) {
        patch(row);
    }
}

pub fn remove_project_user(rows: &mut [ProjectRow], id: u32, login: &str) {
    if let Some(row) = rows.iter_mut().find(|row| row.id == id) {
        row.users.retain(|user| user != login);
    }
}

// ========================
// Registry Reducers
// ========================

pub fn patch_user(rows: &mut [UserRow], updated: UserRow) {
    if let Some(row) = rows.iter_mut().find(|row| row.id == updated.id) {
        *row = updated;
    }
}

pub fn remove_user(rows: &mut Vec<UserRow>, id: u32) {
    rows.retain(|row| row.id != id);
}

// ========================
// Store Wrappers
// ========================

pub fn store_set_tasks(store: &Store<TaskBoardState>, tasks: Vec<Task>) {
    *store.entries().write() = entries_from(tasks);
    *store.loaded().write() = true;
}

pub fn store_remove_task(store: &Store<TaskBoardState>, id: u32) {
    remove_entry(&mut store.entries().write(), id);
}

pub fn store_set_projects(store: &Store<ProjectBoardState>, rows: Vec<ProjectRow>) {
    *store.rows().write() = rows;
    // view state resets with every reload
    *store.table().write() = TableState::default();
    *store.loaded().write() = true;
}

pub fn store_set_users(store: &Store<RegistryState>, rows: Vec<UserRow>) {
    *store.rows().write() = rows;
    *store.table().write() = TableState::default();
    *store.loaded().write() = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: u32) -> Task {
        Task {
            id,
            action: "registration".to_string(),
            entity: format!("prj{}", id),
            author: "marie".to_string(),
            status: "pending".to_string(),
            decision: Decision::None,
            created: "2024-03-01".to_string(),
            description: None,
        }
    }

    #[test]
    fn test_remove_entry_removes_exactly_one() {
        let mut entries = entries_from(vec![task(1), task(2), task(3)]);
        remove_entry(&mut entries, 2);
        let ids: Vec<u32> = entries.iter().map(|e| e.task.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_remove_entry_unknown_id_is_noop() {
        let mut entries = entries_from(vec![task(1)]);
        remove_entry(&mut entries, 99);
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_patch_entry_updates_status_and_decision_in_place() {
        let mut entries = entries_from(vec![task(1), task(2)]);
        patch_entry(&mut entries, 2, "processed", Decision::Accept);
        assert_eq!(entries[1].task.status, "processed");
        assert_eq!(entries[1].task.decision, Decision::Accept);
        // untouched neighbour
        assert_eq!(entries[0].task.status, "pending");
    }

    #[test]
    fn test_expansion_failure_reverts_to_collapsed() {
        let mut entries = entries_from(vec![task(1)]);
        set_expansion(&mut entries, 1, Expansion::Loading);
        assert_eq!(expansion_of(&entries, 1), Expansion::Loading);
        // the fetch failed: the glyph must not stick on the spinner
        set_expansion(&mut entries, 1, Expansion::Collapsed);
        assert_eq!(expansion_of(&entries, 1), Expansion::Collapsed);
        assert_eq!(entries[0].expansion.glyph(), "+");
    }

    #[test]
    fn test_detail_cached_on_entry() {
        let mut entries = entries_from(vec![task(1)]);
        assert_eq!(detail_of(&entries, 1), None);
        set_detail(
            &mut entries,
            1,
            TaskDetail {
                text: Some("requested 50k hours".to_string()),
                ..TaskDetail::default()
            },
        );
        assert!(detail_of(&entries, 1).is_some());
    }

    #[test]
    fn test_remove_project_user() {
        let mut rows = vec![ProjectRow {
            id: 5,
            name: "prj5".to_string(),
            title: String::new(),
            responsible: String::new(),
            resources: 0,
            consumed: 0,
            users: vec!["marie".to_string(), "pierre".to_string()],
            active: true,
            extension: false,
            renewal: false,
            activate: false,
            transform: false,
            created: String::new(),
        }];
        remove_project_user(&mut rows, 5, "marie");
        assert_eq!(rows[0].users, vec!["pierre".to_string()]);
    }

    #[test]
    fn test_patch_project_sets_flag() {
        let mut rows = vec![ProjectRow {
            id: 5,
            name: "prj5".to_string(),
            title: String::new(),
            responsible: String::new(),
            resources: 0,
            consumed: 0,
            users: Vec::new(),
            active: true,
            extension: false,
            renewal: false,
            activate: false,
            transform: false,
            created: String::new(),
        }];
        patch_project(&mut rows, 5, |row| row.extension = true);
        assert!(rows[0].extension);
    }

    #[test]
    fn test_remove_user_row() {
        let mut rows = vec![
            UserRow {
                id: 1,
                login: "marie".to_string(),
                name: String::new(),
                surname: String::new(),
                email: String::new(),
                active: true,
                roles: Default::default(),
            },
            UserRow {
                id: 2,
                login: "pierre".to_string(),
                name: String::new(),
                surname: String::new(),
                email: String::new(),
                active: true,
                roles: Default::default(),
            },
        ];
        remove_user(&mut rows, 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].login, "pierre");
    }
}
